//! Alteration query gateway.
//!
//! Every call runs the same sequence: validate the filter combination,
//! short-circuit when nothing can match, map event types to storage codes,
//! then dispatch to the [`AggregationEngine`]. The gateway holds no mutable
//! state, so one instance can serve any number of concurrent callers.

use crate::{AggregationEngine, StoreResult};
use oncotally_core::event::{CnaEventType, MutationEventType};
use oncotally_core::filter::{AlterationFilter, CnaFilter, MappedAlterationFilter, MappedCnaFilter};
use oncotally_core::selection::Selection;
use oncotally_core::types::{AlterationCountByGene, CaseIdentifier, CaseLevel, CopyNumberCountByGene};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Validating, short-circuiting front for an aggregation engine.
#[derive(Clone)]
pub struct AlterationGateway {
    engine: Arc<dyn AggregationEngine>,
}

impl AlterationGateway {
    pub fn new(engine: Arc<dyn AggregationEngine>) -> Self {
        Self { engine }
    }

    /// Name of the backing engine.
    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Count mutation, fusion and copy-number alterations per gene.
    ///
    /// Fails with [`FilterError::InvalidCombination`](oncotally_core::error::FilterError)
    /// when an explicit mutation-type subset is combined with a directional
    /// fusion filter. Returns an empty list without touching the engine when
    /// the cohort is empty or no event type is selected.
    #[instrument(skip_all, fields(level = %level, cases = cohort.len()))]
    pub async fn query_alteration_counts(
        &self,
        level: CaseLevel,
        cohort: &[CaseIdentifier],
        filter: &AlterationFilter,
    ) -> StoreResult<Vec<AlterationCountByGene>> {
        if let Err(e) = filter.validate() {
            warn!("Rejecting alteration count query: {}", e);
            return Err(e.into());
        }

        if filter.selects_no_event_type() {
            debug!("No mutation or copy-number type selected, skipping query");
            return Ok(Vec::new());
        }
        if cohort.is_empty() {
            debug!("Empty cohort, skipping query");
            return Ok(Vec::new());
        }

        let mapped = MappedAlterationFilter {
            gene_ids: filter.gene_ids.clone(),
            mutation_types: map_mutation_types(filter.mutation_types.as_ref()),
            cna_types: map_cna_types(filter.cna_types.as_ref()),
            fusions: filter.fusions,
        };

        debug!("Dispatching alteration count query to {}", self.engine.name());
        self.engine.query_counts(level, cohort, &mapped).await
    }

    /// Count copy-number alterations per gene and call.
    #[instrument(skip_all, fields(level = %level, cases = cohort.len()))]
    pub async fn query_cna_counts(
        &self,
        level: CaseLevel,
        cohort: &[CaseIdentifier],
        filter: &CnaFilter,
    ) -> StoreResult<Vec<CopyNumberCountByGene>> {
        if cohort.is_empty() || filter.selects_no_event_type() {
            debug!("Empty cohort or no copy-number type selected, skipping query");
            return Ok(Vec::new());
        }

        let mapped = MappedCnaFilter {
            gene_ids: filter.gene_ids.clone(),
            cna_types: map_cna_types(filter.cna_types.as_ref()),
        };

        debug!("Dispatching copy-number count query to {}", self.engine.name());
        self.engine.query_cna_counts(level, cohort, &mapped).await
    }
}

/// Map mutation event types to storage codes, keeping the inverse flag.
///
/// An absent selection maps to select-none.
pub fn map_mutation_types(selection: Option<&Selection<MutationEventType>>) -> Selection<String> {
    selection.map_or(Selection::None, |s| {
        s.map(|t| t.mutation_type().to_string())
    })
}

/// Map copy-number event types to storage codes, keeping the inverse flag.
///
/// An absent selection maps to select-none.
pub fn map_cna_types(selection: Option<&Selection<CnaEventType>>) -> Selection<i16> {
    selection.map_or(Selection::None, |s| s.map(CnaEventType::code))
}
