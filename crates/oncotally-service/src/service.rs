//! Alteration count service.
//!
//! Public entry point for per-gene alteration counts. An empty cohort is
//! answered with an empty list straight away; everything else goes through
//! the [`AlterationGateway`] and, when asked for, frequency enrichment.

use crate::coverage::PanelCoverageProvider;
use crate::frequency::{FrequencyEnricher, PanelFrequencyEnricher};
use crate::CountResult;
use oncotally_core::event::{FusionFilter, MutationEventType};
use oncotally_core::filter::{AlterationFilter, CnaFilter};
use oncotally_core::selection::Selection;
use oncotally_core::types::{
    AlterationCountByGene, CaseIdentifier, CaseLevel, CopyNumberCountByGene, EntrezGeneId,
};
use oncotally_store::{AggregationEngine, AlterationGateway};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Whether and how to enrich counts with frequencies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyOptions {
    /// Compute profiled-case counts and frequencies.
    #[serde(default)]
    pub include_frequency: bool,
    /// Leave cases whose panel does not cover a gene out of that gene's
    /// profiled-case denominator.
    #[serde(default)]
    pub include_missing_from_panel: bool,
}

impl FrequencyOptions {
    /// Raw counts, no enrichment.
    pub fn counts_only() -> Self {
        Self::default()
    }

    /// Enrich with frequencies.
    pub fn with_frequency(include_missing_from_panel: bool) -> Self {
        Self {
            include_frequency: true,
            include_missing_from_panel,
        }
    }
}

/// Orchestrates gateway queries and frequency enrichment.
#[derive(Clone)]
pub struct AlterationCountService {
    gateway: AlterationGateway,
    enricher: Arc<dyn FrequencyEnricher<AlterationCountByGene>>,
    cna_enricher: Arc<dyn FrequencyEnricher<CopyNumberCountByGene>>,
}

impl AlterationCountService {
    pub fn new(
        gateway: AlterationGateway,
        enricher: Arc<dyn FrequencyEnricher<AlterationCountByGene>>,
        cna_enricher: Arc<dyn FrequencyEnricher<CopyNumberCountByGene>>,
    ) -> Self {
        Self {
            gateway,
            enricher,
            cna_enricher,
        }
    }

    /// Build a service that enriches both record shapes from one coverage source.
    pub fn with_panel_coverage(
        engine: Arc<dyn AggregationEngine>,
        coverage: Arc<dyn PanelCoverageProvider>,
    ) -> Self {
        let enricher = Arc::new(PanelFrequencyEnricher::new(coverage));
        Self::new(AlterationGateway::new(engine), enricher.clone(), enricher)
    }

    /// Count mutations, fusions and copy-number alterations per gene.
    #[instrument(skip_all, fields(level = %level, cases = cohort.len()))]
    pub async fn alteration_counts(
        &self,
        level: CaseLevel,
        cohort: &[CaseIdentifier],
        filter: &AlterationFilter,
        options: FrequencyOptions,
    ) -> CountResult<Vec<AlterationCountByGene>> {
        if cohort.is_empty() {
            debug!("Empty cohort, returning no counts");
            return Ok(Vec::new());
        }

        let mut counts = self.gateway.query_alteration_counts(level, cohort, filter).await?;
        if options.include_frequency {
            debug!("Adding frequencies to {} gene counts", counts.len());
            self.enricher
                .annotate_frequency(level, cohort, &mut counts, options.include_missing_from_panel)
                .await?;
        }
        Ok(counts)
    }

    /// Count copy-number alterations per gene and call.
    #[instrument(skip_all, fields(level = %level, cases = cohort.len()))]
    pub async fn cna_counts(
        &self,
        level: CaseLevel,
        cohort: &[CaseIdentifier],
        filter: &CnaFilter,
        options: FrequencyOptions,
    ) -> CountResult<Vec<CopyNumberCountByGene>> {
        if cohort.is_empty() {
            debug!("Empty cohort, returning no counts");
            return Ok(Vec::new());
        }

        let mut counts = self.gateway.query_cna_counts(level, cohort, filter).await?;
        if options.include_frequency {
            debug!("Adding frequencies to {} copy-number counts", counts.len());
            self.cna_enricher
                .annotate_frequency(level, cohort, &mut counts, options.include_missing_from_panel)
                .await?;
        }
        Ok(counts)
    }

    /// Mutation counts only: copy-number events and fusions are left out.
    pub async fn mutation_counts(
        &self,
        level: CaseLevel,
        cohort: &[CaseIdentifier],
        gene_ids: Selection<EntrezGeneId>,
        mutation_types: Selection<MutationEventType>,
        options: FrequencyOptions,
    ) -> CountResult<Vec<AlterationCountByGene>> {
        let filter = single_class_filter(gene_ids, mutation_types, FusionFilter::Exclude);
        self.alteration_counts(level, cohort, &filter, options).await
    }

    /// Fusion counts only: copy-number events and non-fusion mutations are left out.
    pub async fn fusion_counts(
        &self,
        level: CaseLevel,
        cohort: &[CaseIdentifier],
        gene_ids: Selection<EntrezGeneId>,
        mutation_types: Selection<MutationEventType>,
        options: FrequencyOptions,
    ) -> CountResult<Vec<AlterationCountByGene>> {
        let filter = single_class_filter(gene_ids, mutation_types, FusionFilter::Include);
        self.alteration_counts(level, cohort, &filter, options).await
    }

    pub async fn sample_alteration_counts(
        &self,
        cohort: &[CaseIdentifier],
        filter: &AlterationFilter,
        options: FrequencyOptions,
    ) -> CountResult<Vec<AlterationCountByGene>> {
        self.alteration_counts(CaseLevel::Sample, cohort, filter, options).await
    }

    pub async fn patient_alteration_counts(
        &self,
        cohort: &[CaseIdentifier],
        filter: &AlterationFilter,
        options: FrequencyOptions,
    ) -> CountResult<Vec<AlterationCountByGene>> {
        self.alteration_counts(CaseLevel::Patient, cohort, filter, options).await
    }

    pub async fn sample_mutation_counts(
        &self,
        cohort: &[CaseIdentifier],
        gene_ids: Selection<EntrezGeneId>,
        mutation_types: Selection<MutationEventType>,
        options: FrequencyOptions,
    ) -> CountResult<Vec<AlterationCountByGene>> {
        self.mutation_counts(CaseLevel::Sample, cohort, gene_ids, mutation_types, options)
            .await
    }

    pub async fn patient_mutation_counts(
        &self,
        cohort: &[CaseIdentifier],
        gene_ids: Selection<EntrezGeneId>,
        mutation_types: Selection<MutationEventType>,
        options: FrequencyOptions,
    ) -> CountResult<Vec<AlterationCountByGene>> {
        self.mutation_counts(CaseLevel::Patient, cohort, gene_ids, mutation_types, options)
            .await
    }

    pub async fn sample_fusion_counts(
        &self,
        cohort: &[CaseIdentifier],
        gene_ids: Selection<EntrezGeneId>,
        mutation_types: Selection<MutationEventType>,
        options: FrequencyOptions,
    ) -> CountResult<Vec<AlterationCountByGene>> {
        self.fusion_counts(CaseLevel::Sample, cohort, gene_ids, mutation_types, options)
            .await
    }

    pub async fn patient_fusion_counts(
        &self,
        cohort: &[CaseIdentifier],
        gene_ids: Selection<EntrezGeneId>,
        mutation_types: Selection<MutationEventType>,
        options: FrequencyOptions,
    ) -> CountResult<Vec<AlterationCountByGene>> {
        self.fusion_counts(CaseLevel::Patient, cohort, gene_ids, mutation_types, options)
            .await
    }

    pub async fn sample_cna_counts(
        &self,
        cohort: &[CaseIdentifier],
        filter: &CnaFilter,
        options: FrequencyOptions,
    ) -> CountResult<Vec<CopyNumberCountByGene>> {
        self.cna_counts(CaseLevel::Sample, cohort, filter, options).await
    }

    pub async fn patient_cna_counts(
        &self,
        cohort: &[CaseIdentifier],
        filter: &CnaFilter,
        options: FrequencyOptions,
    ) -> CountResult<Vec<CopyNumberCountByGene>> {
        self.cna_counts(CaseLevel::Patient, cohort, filter, options).await
    }
}

/// Filter for mutation-only or fusion-only counts: copy-number selects nothing.
fn single_class_filter(
    gene_ids: Selection<EntrezGeneId>,
    mutation_types: Selection<MutationEventType>,
    fusions: FusionFilter,
) -> AlterationFilter {
    AlterationFilter::new()
        .with_gene_ids(gene_ids)
        .with_mutation_types(mutation_types)
        .with_cna_types(Selection::none())
        .with_fusions(fusions)
}
