//! Gene panel coverage lookup.
//!
//! Targeted panels only sequence a subset of genes, so a case profiled with
//! a panel says nothing about genes outside it. A [`PanelCoverageProvider`]
//! reports, for each profiled case of a cohort, which genes were measured.

use crate::{EnrichmentError, EnrichmentResult};
use async_trait::async_trait;
use oncotally_core::types::{CaseIdentifier, CaseLevel, EntrezGeneId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::RwLock;

/// Genes measured for a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneCoverage {
    /// Whole-exome or whole-genome profiling.
    WholeGenome,
    /// Targeted panel covering only these genes.
    Genes(BTreeSet<EntrezGeneId>),
}

impl GeneCoverage {
    pub fn covers(&self, gene: EntrezGeneId) -> bool {
        match self {
            GeneCoverage::WholeGenome => true,
            GeneCoverage::Genes(genes) => genes.contains(&gene),
        }
    }
}

/// Coverage of one profiled case within one molecular profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseCoverage {
    pub molecular_profile_id: String,
    /// Sample or patient id, matching the level the coverage was requested at.
    pub case_id: String,
    pub gene_panel_id: Option<String>,
    pub genes: GeneCoverage,
}

impl CaseCoverage {
    pub fn covers(&self, gene: EntrezGeneId) -> bool {
        self.genes.covers(gene)
    }
}

/// Source of per-case gene panel coverage.
#[async_trait]
pub trait PanelCoverageProvider: Send + Sync {
    /// Coverage entries for the profiled cases of `cohort`.
    ///
    /// Cases that were never profiled have no entry. A patient with several
    /// profiled samples may have several entries.
    async fn case_coverage(
        &self,
        level: CaseLevel,
        cohort: &[CaseIdentifier],
    ) -> EnrichmentResult<Vec<CaseCoverage>>;
}

/// Panel assignment of one profiled sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleProfile {
    pub molecular_profile_id: String,
    pub sample_id: String,
    pub patient_id: String,
    pub gene_panel_id: Option<String>,
    pub genes: GeneCoverage,
}

impl SampleProfile {
    /// A sample profiled genome-wide.
    pub fn whole_genome(
        molecular_profile_id: impl Into<String>,
        sample_id: impl Into<String>,
        patient_id: impl Into<String>,
    ) -> Self {
        Self {
            molecular_profile_id: molecular_profile_id.into(),
            sample_id: sample_id.into(),
            patient_id: patient_id.into(),
            gene_panel_id: None,
            genes: GeneCoverage::WholeGenome,
        }
    }

    /// A sample profiled with a targeted panel.
    pub fn panel(
        molecular_profile_id: impl Into<String>,
        sample_id: impl Into<String>,
        patient_id: impl Into<String>,
        gene_panel_id: impl Into<String>,
        genes: impl IntoIterator<Item = EntrezGeneId>,
    ) -> Self {
        Self {
            molecular_profile_id: molecular_profile_id.into(),
            sample_id: sample_id.into(),
            patient_id: patient_id.into(),
            gene_panel_id: Some(gene_panel_id.into()),
            genes: GeneCoverage::Genes(genes.into_iter().collect()),
        }
    }
}

/// In-memory panel coverage table.
pub struct InMemoryPanelCoverage {
    profiles: RwLock<Vec<SampleProfile>>,
}

impl InMemoryPanelCoverage {
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(Vec::new()),
        }
    }

    pub fn insert(&self, profiles: Vec<SampleProfile>) -> EnrichmentResult<()> {
        let mut store = self.profiles.write().map_err(|e| {
            EnrichmentError::Connection(format!("Failed to acquire write lock: {}", e))
        })?;
        store.extend(profiles);
        Ok(())
    }
}

impl Default for InMemoryPanelCoverage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PanelCoverageProvider for InMemoryPanelCoverage {
    async fn case_coverage(
        &self,
        level: CaseLevel,
        cohort: &[CaseIdentifier],
    ) -> EnrichmentResult<Vec<CaseCoverage>> {
        let store = self.profiles.read().map_err(|e| {
            EnrichmentError::Connection(format!("Failed to acquire read lock: {}", e))
        })?;

        let members: HashSet<(&str, &str)> = cohort
            .iter()
            .map(|c| (c.molecular_profile_id.as_str(), c.case_id.as_str()))
            .collect();

        Ok(store
            .iter()
            .filter_map(|p| {
                let case_id = match level {
                    CaseLevel::Sample => p.sample_id.as_str(),
                    CaseLevel::Patient => p.patient_id.as_str(),
                };
                members
                    .contains(&(p.molecular_profile_id.as_str(), case_id))
                    .then(|| CaseCoverage {
                        molecular_profile_id: p.molecular_profile_id.clone(),
                        case_id: case_id.to_string(),
                        gene_panel_id: p.gene_panel_id.clone(),
                        genes: p.genes.clone(),
                    })
            })
            .collect())
    }
}
