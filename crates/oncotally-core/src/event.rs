//! Alteration event type domains and their storage codes.
//!
//! Each enum is a closed domain with a stable primitive code: mutation types
//! map to MAF variant-classification strings, copy-number types map to the
//! discrete GISTIC-style integer calls.

use serde::{Deserialize, Serialize};

/// Mutation code used by storage to mark a structural fusion event.
pub const FUSION_MUTATION_TYPE: &str = "Fusion";

/// Kind of mutation event, as classified in MAF files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationEventType {
    Missense,
    Nonsense,
    FrameShiftDeletion,
    FrameShiftInsertion,
    InFrameDeletion,
    InFrameInsertion,
    SpliceSite,
    SpliceRegion,
    Nonstop,
    TranslationStartSite,
    Silent,
    /// Fusions are stored as a special mutation marker.
    Fusion,
    Other,
}

impl MutationEventType {
    /// Every mutation event type, in declaration order.
    pub const ALL: [MutationEventType; 13] = [
        MutationEventType::Missense,
        MutationEventType::Nonsense,
        MutationEventType::FrameShiftDeletion,
        MutationEventType::FrameShiftInsertion,
        MutationEventType::InFrameDeletion,
        MutationEventType::InFrameInsertion,
        MutationEventType::SpliceSite,
        MutationEventType::SpliceRegion,
        MutationEventType::Nonstop,
        MutationEventType::TranslationStartSite,
        MutationEventType::Silent,
        MutationEventType::Fusion,
        MutationEventType::Other,
    ];

    /// The storage code for this event type.
    pub fn mutation_type(&self) -> &'static str {
        match self {
            MutationEventType::Missense => "Missense_Mutation",
            MutationEventType::Nonsense => "Nonsense_Mutation",
            MutationEventType::FrameShiftDeletion => "Frame_Shift_Del",
            MutationEventType::FrameShiftInsertion => "Frame_Shift_Ins",
            MutationEventType::InFrameDeletion => "In_Frame_Del",
            MutationEventType::InFrameInsertion => "In_Frame_Ins",
            MutationEventType::SpliceSite => "Splice_Site",
            MutationEventType::SpliceRegion => "Splice_Region",
            MutationEventType::Nonstop => "Nonstop_Mutation",
            MutationEventType::TranslationStartSite => "Translation_Start_Site",
            MutationEventType::Silent => "Silent",
            MutationEventType::Fusion => FUSION_MUTATION_TYPE,
            MutationEventType::Other => "Other",
        }
    }

    /// Look up an event type by its storage code.
    pub fn from_mutation_type(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.mutation_type() == code)
    }

    /// Truncating events are expected to produce a shortened protein.
    pub fn is_truncating(&self) -> bool {
        matches!(
            self,
            MutationEventType::Nonsense
                | MutationEventType::FrameShiftDeletion
                | MutationEventType::FrameShiftInsertion
                | MutationEventType::SpliceSite
                | MutationEventType::Nonstop
                | MutationEventType::TranslationStartSite
        )
    }
}

/// Discrete copy-number call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CnaEventType {
    Amplification,
    Gain,
    Diploid,
    /// Shallow deletion.
    HeterozygousLoss,
    /// Deep deletion.
    HomozygousDeletion,
}

impl CnaEventType {
    pub const ALL: [CnaEventType; 5] = [
        CnaEventType::Amplification,
        CnaEventType::Gain,
        CnaEventType::Diploid,
        CnaEventType::HeterozygousLoss,
        CnaEventType::HomozygousDeletion,
    ];

    /// The storage code for this call.
    pub fn code(&self) -> i16 {
        match self {
            CnaEventType::Amplification => 2,
            CnaEventType::Gain => 1,
            CnaEventType::Diploid => 0,
            CnaEventType::HeterozygousLoss => -1,
            CnaEventType::HomozygousDeletion => -2,
        }
    }

    pub fn from_code(code: i16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

/// Tri-state fusion filter applied on top of the mutation-type selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionFilter {
    /// Neutral: fusions are neither required nor excluded.
    #[default]
    Pass,
    /// Only fusion events are counted.
    Include,
    /// Fusion events are left out.
    Exclude,
}

impl FusionFilter {
    /// Whether a mutation with the given storage code passes this filter.
    pub fn admits(&self, mutation_type: &str) -> bool {
        let is_fusion = mutation_type == FUSION_MUTATION_TYPE;
        match self {
            FusionFilter::Pass => true,
            FusionFilter::Include => is_fusion,
            FusionFilter::Exclude => !is_fusion,
        }
    }
}

impl From<bool> for FusionFilter {
    /// `true` searches fusions only, `false` searches everything but fusions.
    fn from(search_fusions: bool) -> Self {
        if search_fusions {
            FusionFilter::Include
        } else {
            FusionFilter::Exclude
        }
    }
}
