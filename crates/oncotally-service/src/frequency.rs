//! Frequency enrichment of per-gene count records.
//!
//! Frequency is altered cases over profiled cases. The profiled-case
//! denominator either counts every profiled case of the cohort, or only the
//! cases whose panel actually covers the gene.

use crate::coverage::PanelCoverageProvider;
use crate::EnrichmentResult;
use async_trait::async_trait;
use oncotally_core::types::{alteration_frequency, CaseIdentifier, CaseLevel, GeneCount};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Annotates count records with profiled-case counts and frequencies.
#[async_trait]
pub trait FrequencyEnricher<R: GeneCount + Send>: Send + Sync {
    /// Fill in `number_of_profiled_cases` and `frequency` for every record.
    ///
    /// With `exclude_uncovered` set, cases whose gene panel does not cover a
    /// record's gene are left out of that gene's denominator.
    async fn annotate_frequency(
        &self,
        level: CaseLevel,
        cohort: &[CaseIdentifier],
        records: &mut [R],
        exclude_uncovered: bool,
    ) -> EnrichmentResult<()>;
}

/// Frequency enricher backed by a gene panel coverage lookup.
#[derive(Clone)]
pub struct PanelFrequencyEnricher {
    coverage: Arc<dyn PanelCoverageProvider>,
}

impl PanelFrequencyEnricher {
    pub fn new(coverage: Arc<dyn PanelCoverageProvider>) -> Self {
        Self { coverage }
    }
}

#[async_trait]
impl<R: GeneCount + Send> FrequencyEnricher<R> for PanelFrequencyEnricher {
    async fn annotate_frequency(
        &self,
        level: CaseLevel,
        cohort: &[CaseIdentifier],
        records: &mut [R],
        exclude_uncovered: bool,
    ) -> EnrichmentResult<()> {
        let coverage = self.coverage.case_coverage(level, cohort).await?;
        let profiled: HashSet<&str> = coverage.iter().map(|c| c.case_id.as_str()).collect();
        debug!(
            "Annotating {} records over {} profiled {} cases",
            records.len(),
            profiled.len(),
            level
        );

        for record in records.iter_mut() {
            let gene = record.entrez_gene_id();
            let covering: Vec<_> = coverage.iter().filter(|c| c.covers(gene)).collect();

            let denominator = if exclude_uncovered {
                covering
                    .iter()
                    .map(|c| c.case_id.as_str())
                    .collect::<HashSet<_>>()
                    .len() as u32
            } else {
                profiled.len() as u32
            };

            let panels: BTreeSet<String> = covering
                .iter()
                .filter_map(|c| c.gene_panel_id.clone())
                .collect();

            let frequency = alteration_frequency(record.number_of_altered_cases(), denominator);
            record.set_profiled(denominator, frequency);
            record.set_matching_gene_panel_ids(panels);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{InMemoryPanelCoverage, SampleProfile};
    use oncotally_core::types::{AlterationCountByGene, CopyNumberCountByGene, EntrezGeneId};

    const PROFILE: &str = "study_mutations";
    const GENE_X: EntrezGeneId = EntrezGeneId(7157);
    const GENE_Y: EntrezGeneId = EntrezGeneId(672);

    /// Ten samples; S9 and S10 use a panel without gene X.
    fn enricher() -> PanelFrequencyEnricher {
        let coverage = InMemoryPanelCoverage::new();
        let mut profiles: Vec<_> = (1..=8)
            .map(|i| SampleProfile::whole_genome(PROFILE, format!("S{}", i), format!("P{}", i)))
            .collect();
        profiles.push(SampleProfile::panel(PROFILE, "S9", "P9", "SMALL_PANEL", [GENE_Y]));
        profiles.push(SampleProfile::panel(PROFILE, "S10", "P10", "SMALL_PANEL", [GENE_Y]));
        coverage.insert(profiles).unwrap();
        PanelFrequencyEnricher::new(Arc::new(coverage))
    }

    fn cohort() -> Vec<CaseIdentifier> {
        (1..=10)
            .map(|i| CaseIdentifier::new(PROFILE, format!("S{}", i)))
            .collect()
    }

    #[tokio::test]
    async fn test_frequency_over_all_profiled_cases() {
        let mut records = vec![AlterationCountByGene::new(GENE_X, "TP53").with_counts(3, 3)];
        enricher()
            .annotate_frequency(CaseLevel::Sample, &cohort(), records.as_mut_slice(), false)
            .await
            .unwrap();

        assert_eq!(records[0].number_of_profiled_cases, 10);
        assert!((records[0].frequency.unwrap() - 0.3).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_uncovered_cases_leave_denominator() {
        let mut records = vec![
            AlterationCountByGene::new(GENE_X, "TP53").with_counts(3, 3),
            AlterationCountByGene::new(GENE_Y, "BRCA1").with_counts(1, 1),
        ];
        enricher()
            .annotate_frequency(CaseLevel::Sample, &cohort(), records.as_mut_slice(), true)
            .await
            .unwrap();

        assert_eq!(records[0].number_of_profiled_cases, 8);
        assert!((records[0].frequency.unwrap() - 0.375).abs() < 1e-12);
        assert!(records[0].matching_gene_panel_ids.is_empty());

        assert_eq!(records[1].number_of_profiled_cases, 10);
        assert!(records[1].matching_gene_panel_ids.contains("SMALL_PANEL"));
    }

    #[tokio::test]
    async fn test_unprofiled_cohort_has_zero_frequency() {
        let mut records = vec![CopyNumberCountByGene::new(GENE_X, "TP53", -2).with_counts(2, 2)];
        let strangers = vec![CaseIdentifier::new("other_study", "S1")];
        enricher()
            .annotate_frequency(CaseLevel::Sample, &strangers, records.as_mut_slice(), true)
            .await
            .unwrap();

        assert_eq!(records[0].number_of_profiled_cases, 0);
        assert_eq!(records[0].frequency, Some(0.0));
    }

    #[tokio::test]
    async fn test_patients_counted_once() {
        let coverage = InMemoryPanelCoverage::new();
        coverage
            .insert(vec![
                SampleProfile::whole_genome(PROFILE, "S1", "P1"),
                SampleProfile::whole_genome(PROFILE, "S2", "P1"),
                SampleProfile::whole_genome(PROFILE, "S3", "P2"),
            ])
            .unwrap();
        let enricher = PanelFrequencyEnricher::new(Arc::new(coverage));
        let cohort = vec![CaseIdentifier::new(PROFILE, "P1"), CaseIdentifier::new(PROFILE, "P2")];

        let mut records = vec![AlterationCountByGene::new(GENE_X, "TP53").with_counts(1, 2)];
        enricher
            .annotate_frequency(CaseLevel::Patient, &cohort, records.as_mut_slice(), true)
            .await
            .unwrap();

        assert_eq!(records[0].number_of_profiled_cases, 2);
        assert!((records[0].frequency.unwrap() - 0.5).abs() < 1e-12);
    }
}
