//! Shared types: identifiers, cohorts and per-gene count records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// NCBI Entrez gene identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntrezGeneId(pub i32);

impl fmt::Display for EntrezGeneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Granularity at which a cohort is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseLevel {
    Sample,
    Patient,
}

impl fmt::Display for CaseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseLevel::Sample => write!(f, "sample"),
            CaseLevel::Patient => write!(f, "patient"),
        }
    }
}

/// One (molecular profile, sample-or-patient) pair of a cohort.
///
/// Whether `case_id` names a sample or a patient depends on the [`CaseLevel`]
/// of the query the identifier is used in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CaseIdentifier {
    pub molecular_profile_id: String,
    pub case_id: String,
}

impl CaseIdentifier {
    pub fn new(molecular_profile_id: impl Into<String>, case_id: impl Into<String>) -> Self {
        Self {
            molecular_profile_id: molecular_profile_id.into(),
            case_id: case_id.into(),
        }
    }
}

/// Per-gene alteration count over mutations, fusions and copy-number events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterationCountByGene {
    pub entrez_gene_id: EntrezGeneId,
    pub hugo_gene_symbol: String,
    /// Distinct cases carrying at least one matching alteration.
    pub number_of_altered_cases: u32,
    /// Distinct cases profiled for this gene. Filled in by frequency enrichment.
    pub number_of_profiled_cases: u32,
    /// Total number of matching alteration events.
    pub total_count: u32,
    /// Altered over profiled cases. `None` until enrichment ran.
    pub frequency: Option<f64>,
    pub matching_gene_panel_ids: BTreeSet<String>,
}

impl AlterationCountByGene {
    pub fn new(entrez_gene_id: EntrezGeneId, hugo_gene_symbol: impl Into<String>) -> Self {
        Self {
            entrez_gene_id,
            hugo_gene_symbol: hugo_gene_symbol.into(),
            number_of_altered_cases: 0,
            number_of_profiled_cases: 0,
            total_count: 0,
            frequency: None,
            matching_gene_panel_ids: BTreeSet::new(),
        }
    }

    pub fn with_counts(mut self, altered_cases: u32, total_count: u32) -> Self {
        self.number_of_altered_cases = altered_cases;
        self.total_count = total_count;
        self
    }
}

/// Per-gene, per-call copy-number count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyNumberCountByGene {
    pub entrez_gene_id: EntrezGeneId,
    pub hugo_gene_symbol: String,
    /// Copy-number storage code (see [`crate::event::CnaEventType::code`]).
    pub alteration: i16,
    pub cytoband: Option<String>,
    pub number_of_altered_cases: u32,
    pub number_of_profiled_cases: u32,
    pub total_count: u32,
    pub frequency: Option<f64>,
    pub matching_gene_panel_ids: BTreeSet<String>,
}

impl CopyNumberCountByGene {
    pub fn new(
        entrez_gene_id: EntrezGeneId,
        hugo_gene_symbol: impl Into<String>,
        alteration: i16,
    ) -> Self {
        Self {
            entrez_gene_id,
            hugo_gene_symbol: hugo_gene_symbol.into(),
            alteration,
            cytoband: None,
            number_of_altered_cases: 0,
            number_of_profiled_cases: 0,
            total_count: 0,
            frequency: None,
            matching_gene_panel_ids: BTreeSet::new(),
        }
    }

    pub fn with_counts(mut self, altered_cases: u32, total_count: u32) -> Self {
        self.number_of_altered_cases = altered_cases;
        self.total_count = total_count;
        self
    }

    pub fn with_cytoband(mut self, cytoband: impl Into<String>) -> Self {
        self.cytoband = Some(cytoband.into());
        self
    }
}

/// Common view over count records, used by frequency enrichment.
pub trait GeneCount {
    fn entrez_gene_id(&self) -> EntrezGeneId;

    fn number_of_altered_cases(&self) -> u32;

    /// Store the profiled-case denominator and the resulting frequency.
    fn set_profiled(&mut self, profiled_cases: u32, frequency: f64);

    fn set_matching_gene_panel_ids(&mut self, panel_ids: BTreeSet<String>);
}

macro_rules! impl_gene_count {
    ($record:ty) => {
        impl GeneCount for $record {
            fn entrez_gene_id(&self) -> EntrezGeneId {
                self.entrez_gene_id
            }

            fn number_of_altered_cases(&self) -> u32 {
                self.number_of_altered_cases
            }

            fn set_profiled(&mut self, profiled_cases: u32, frequency: f64) {
                self.number_of_profiled_cases = profiled_cases;
                self.frequency = Some(frequency);
            }

            fn set_matching_gene_panel_ids(&mut self, panel_ids: BTreeSet<String>) {
                self.matching_gene_panel_ids = panel_ids;
            }
        }
    };
}

impl_gene_count!(AlterationCountByGene);
impl_gene_count!(CopyNumberCountByGene);

/// Altered over profiled cases, 0 when nothing was profiled.
pub fn alteration_frequency(altered_cases: u32, profiled_cases: u32) -> f64 {
    if profiled_cases == 0 {
        0.0
    } else {
        altered_cases as f64 / profiled_cases as f64
    }
}
