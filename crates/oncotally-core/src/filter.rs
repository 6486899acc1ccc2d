//! Query filters, in domain form and in the primitive form storage consumes.

use crate::error::FilterError;
use crate::event::{CnaEventType, FusionFilter, MutationEventType};
use crate::selection::Selection;
use crate::types::EntrezGeneId;
use serde::{Deserialize, Serialize};

/// Event-type filter for combined mutation, fusion and copy-number counts.
///
/// An absent (`None`) event-type selection behaves like select-none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterationFilter {
    /// Genes to count. Select-all means no gene restriction.
    pub gene_ids: Selection<EntrezGeneId>,
    pub mutation_types: Option<Selection<MutationEventType>>,
    pub cna_types: Option<Selection<CnaEventType>>,
    pub fusions: FusionFilter,
}

impl AlterationFilter {
    /// A filter over all genes that selects no event type yet.
    pub fn new() -> Self {
        Self {
            gene_ids: Selection::All,
            mutation_types: None,
            cna_types: None,
            fusions: FusionFilter::Pass,
        }
    }

    pub fn with_gene_ids(mut self, gene_ids: Selection<EntrezGeneId>) -> Self {
        self.gene_ids = gene_ids;
        self
    }

    pub fn with_mutation_types(mut self, mutation_types: Selection<MutationEventType>) -> Self {
        self.mutation_types = Some(mutation_types);
        self
    }

    pub fn with_cna_types(mut self, cna_types: Selection<CnaEventType>) -> Self {
        self.cna_types = Some(cna_types);
        self
    }

    pub fn with_fusions(mut self, fusions: impl Into<FusionFilter>) -> Self {
        self.fusions = fusions.into();
        self
    }

    /// Check that the mutation-type selection and fusion filter can be combined.
    pub fn validate(&self) -> Result<(), FilterError> {
        check_fusion_combination(self.mutation_types.as_ref(), self.fusions)
    }

    /// True when neither the mutation nor the copy-number selection can match.
    pub fn selects_no_event_type(&self) -> bool {
        is_absent_or_none(self.mutation_types.as_ref()) && is_absent_or_none(self.cna_types.as_ref())
    }
}

impl Default for AlterationFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Filter for copy-number-only counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CnaFilter {
    pub gene_ids: Selection<EntrezGeneId>,
    pub cna_types: Option<Selection<CnaEventType>>,
}

impl CnaFilter {
    pub fn new(cna_types: Selection<CnaEventType>) -> Self {
        Self {
            gene_ids: Selection::All,
            cna_types: Some(cna_types),
        }
    }

    pub fn with_gene_ids(mut self, gene_ids: Selection<EntrezGeneId>) -> Self {
        self.gene_ids = gene_ids;
        self
    }

    pub fn selects_no_event_type(&self) -> bool {
        is_absent_or_none(self.cna_types.as_ref())
    }
}

/// [`AlterationFilter`] with event types translated to storage codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedAlterationFilter {
    pub gene_ids: Selection<EntrezGeneId>,
    pub mutation_types: Selection<String>,
    pub cna_types: Selection<i16>,
    pub fusions: FusionFilter,
}

/// [`CnaFilter`] with event types translated to storage codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedCnaFilter {
    pub gene_ids: Selection<EntrezGeneId>,
    pub cna_types: Selection<i16>,
}

/// Reject an explicit mutation-type subset combined with a directional fusion filter.
///
/// Fusions are stored as a mutation marker, so narrowing mutation types while
/// also requiring or excluding fusions has no well-defined meaning.
pub fn check_fusion_combination(
    mutation_types: Option<&Selection<MutationEventType>>,
    fusions: FusionFilter,
) -> Result<(), FilterError> {
    match mutation_types {
        Some(selection) if !selection.has_all() && fusions != FusionFilter::Pass => {
            Err(FilterError::InvalidCombination { fusions })
        }
        _ => Ok(()),
    }
}

fn is_absent_or_none<T>(selection: Option<&Selection<T>>) -> bool {
    selection.map_or(true, Selection::has_none)
}
