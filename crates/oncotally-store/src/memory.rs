//! In-memory aggregation engine.
//!
//! This module provides a simple aggregation engine over in-process event
//! tables. Every query scans the full tables, which is fine for tests, demos
//! and small embedded cohorts.

use crate::{AggregationEngine, StoreError, StoreResult};
use async_trait::async_trait;
use oncotally_core::event::MutationEventType;
use oncotally_core::filter::{MappedAlterationFilter, MappedCnaFilter};
use oncotally_core::selection::Selection;
use oncotally_core::types::{
    AlterationCountByGene, CaseIdentifier, CaseLevel, CopyNumberCountByGene, EntrezGeneId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::RwLock;

/// A stored mutation (or fusion) call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationEvent {
    pub molecular_profile_id: String,
    pub sample_id: String,
    pub patient_id: String,
    pub entrez_gene_id: EntrezGeneId,
    pub hugo_gene_symbol: String,
    /// Storage code, see [`MutationEventType::mutation_type`].
    pub mutation_type: String,
}

impl MutationEvent {
    pub fn new(
        molecular_profile_id: impl Into<String>,
        sample_id: impl Into<String>,
        patient_id: impl Into<String>,
        entrez_gene_id: EntrezGeneId,
        hugo_gene_symbol: impl Into<String>,
        mutation_type: MutationEventType,
    ) -> Self {
        Self {
            molecular_profile_id: molecular_profile_id.into(),
            sample_id: sample_id.into(),
            patient_id: patient_id.into(),
            entrez_gene_id,
            hugo_gene_symbol: hugo_gene_symbol.into(),
            mutation_type: mutation_type.mutation_type().to_string(),
        }
    }
}

/// A stored discrete copy-number call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CnaEvent {
    pub molecular_profile_id: String,
    pub sample_id: String,
    pub patient_id: String,
    pub entrez_gene_id: EntrezGeneId,
    pub hugo_gene_symbol: String,
    pub alteration: i16,
    pub cytoband: Option<String>,
}

impl CnaEvent {
    pub fn new(
        molecular_profile_id: impl Into<String>,
        sample_id: impl Into<String>,
        patient_id: impl Into<String>,
        entrez_gene_id: EntrezGeneId,
        hugo_gene_symbol: impl Into<String>,
        alteration: i16,
    ) -> Self {
        Self {
            molecular_profile_id: molecular_profile_id.into(),
            sample_id: sample_id.into(),
            patient_id: patient_id.into(),
            entrez_gene_id,
            hugo_gene_symbol: hugo_gene_symbol.into(),
            alteration,
            cytoband: None,
        }
    }

    pub fn with_cytoband(mut self, cytoband: impl Into<String>) -> Self {
        self.cytoband = Some(cytoband.into());
        self
    }
}

/// In-memory aggregation engine using full table scans.
///
/// # Example
///
/// ```rust
/// use oncotally_core::prelude::*;
/// use oncotally_store::{AggregationEngine, CnaEvent, InMemoryAlterationStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryAlterationStore::new();
///     store.insert_cna_events(vec![
///         CnaEvent::new("study_gistic", "S1", "P1", EntrezGeneId(2064), "ERBB2", 2),
///         CnaEvent::new("study_gistic", "S2", "P2", EntrezGeneId(2064), "ERBB2", 2),
///     ])?;
///
///     let cohort = vec![
///         CaseIdentifier::new("study_gistic", "S1"),
///         CaseIdentifier::new("study_gistic", "S2"),
///     ];
///     let filter = MappedCnaFilter { gene_ids: Selection::All, cna_types: Selection::only([2]) };
///     let counts = store.query_cna_counts(CaseLevel::Sample, &cohort, &filter).await?;
///     assert_eq!(counts[0].number_of_altered_cases, 2);
///     Ok(())
/// }
/// ```
pub struct InMemoryAlterationStore {
    mutations: RwLock<Vec<MutationEvent>>,
    cna_events: RwLock<Vec<CnaEvent>>,
}

impl InMemoryAlterationStore {
    pub fn new() -> Self {
        Self {
            mutations: RwLock::new(Vec::new()),
            cna_events: RwLock::new(Vec::new()),
        }
    }

    pub fn insert_mutations(&self, events: Vec<MutationEvent>) -> StoreResult<()> {
        let mut store = self
            .mutations
            .write()
            .map_err(|e| StoreError::Connection(format!("Failed to acquire write lock: {}", e)))?;
        store.extend(events);
        Ok(())
    }

    pub fn insert_cna_events(&self, events: Vec<CnaEvent>) -> StoreResult<()> {
        let mut store = self
            .cna_events
            .write()
            .map_err(|e| StoreError::Connection(format!("Failed to acquire write lock: {}", e)))?;
        store.extend(events);
        Ok(())
    }

    /// Number of stored mutation and copy-number events.
    pub fn len(&self) -> StoreResult<usize> {
        let mutations = self
            .mutations
            .read()
            .map_err(|e| StoreError::Connection(format!("Failed to acquire read lock: {}", e)))?;
        let cna_events = self
            .cna_events
            .read()
            .map_err(|e| StoreError::Connection(format!("Failed to acquire read lock: {}", e)))?;
        Ok(mutations.len() + cna_events.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.mutations
            .write()
            .map_err(|e| StoreError::Connection(format!("Failed to acquire write lock: {}", e)))?
            .clear();
        self.cna_events
            .write()
            .map_err(|e| StoreError::Connection(format!("Failed to acquire write lock: {}", e)))?
            .clear();
        Ok(())
    }
}

impl Default for InMemoryAlterationStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Running per-gene tally of distinct altered cases and events.
struct Tally<'a> {
    hugo_gene_symbol: &'a str,
    cases: HashSet<&'a str>,
    events: u32,
}

impl<'a> Tally<'a> {
    fn new(hugo_gene_symbol: &'a str) -> Self {
        Self {
            hugo_gene_symbol,
            cases: HashSet::new(),
            events: 0,
        }
    }

    fn add(&mut self, case_id: &'a str) {
        self.cases.insert(case_id);
        self.events += 1;
    }
}

/// Cohort membership keyed on (molecular profile, case id).
struct CohortIndex<'a> {
    members: HashSet<(&'a str, &'a str)>,
    level: CaseLevel,
}

impl<'a> CohortIndex<'a> {
    fn new(level: CaseLevel, cohort: &'a [CaseIdentifier]) -> Self {
        Self {
            members: cohort
                .iter()
                .map(|c| (c.molecular_profile_id.as_str(), c.case_id.as_str()))
                .collect(),
            level,
        }
    }

    /// Returns the case id the event counts toward, if it belongs to the cohort.
    fn case_of<'e>(&self, profile: &str, sample_id: &'e str, patient_id: &'e str) -> Option<&'e str> {
        let case_id = match self.level {
            CaseLevel::Sample => sample_id,
            CaseLevel::Patient => patient_id,
        };
        self.members.contains(&(profile, case_id)).then_some(case_id)
    }
}

/// An empty explicit gene list places no restriction on genes.
fn gene_admitted(gene_ids: &Selection<EntrezGeneId>, gene: EntrezGeneId) -> bool {
    match gene_ids {
        Selection::Subset { values, inverse: false } if values.is_empty() => true,
        _ => gene_ids.contains(&gene),
    }
}

#[async_trait]
impl AggregationEngine for InMemoryAlterationStore {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn query_counts(
        &self,
        level: CaseLevel,
        cohort: &[CaseIdentifier],
        filter: &MappedAlterationFilter,
    ) -> StoreResult<Vec<AlterationCountByGene>> {
        let mutations = self
            .mutations
            .read()
            .map_err(|e| StoreError::Connection(format!("Failed to acquire read lock: {}", e)))?;
        let cna_events = self
            .cna_events
            .read()
            .map_err(|e| StoreError::Connection(format!("Failed to acquire read lock: {}", e)))?;

        let index = CohortIndex::new(level, cohort);
        let mut tallies: BTreeMap<EntrezGeneId, Tally<'_>> = BTreeMap::new();

        for event in mutations.iter() {
            if !gene_admitted(&filter.gene_ids, event.entrez_gene_id)
                || !filter.mutation_types.contains(&event.mutation_type)
                || !filter.fusions.admits(&event.mutation_type)
            {
                continue;
            }
            if let Some(case_id) =
                index.case_of(&event.molecular_profile_id, &event.sample_id, &event.patient_id)
            {
                tallies
                    .entry(event.entrez_gene_id)
                    .or_insert_with(|| Tally::new(&event.hugo_gene_symbol))
                    .add(case_id);
            }
        }

        for event in cna_events.iter() {
            if !gene_admitted(&filter.gene_ids, event.entrez_gene_id)
                || !filter.cna_types.contains(&event.alteration)
            {
                continue;
            }
            if let Some(case_id) =
                index.case_of(&event.molecular_profile_id, &event.sample_id, &event.patient_id)
            {
                tallies
                    .entry(event.entrez_gene_id)
                    .or_insert_with(|| Tally::new(&event.hugo_gene_symbol))
                    .add(case_id);
            }
        }

        Ok(tallies
            .into_iter()
            .map(|(gene, tally)| {
                AlterationCountByGene::new(gene, tally.hugo_gene_symbol)
                    .with_counts(tally.cases.len() as u32, tally.events)
            })
            .collect())
    }

    async fn query_cna_counts(
        &self,
        level: CaseLevel,
        cohort: &[CaseIdentifier],
        filter: &MappedCnaFilter,
    ) -> StoreResult<Vec<CopyNumberCountByGene>> {
        let cna_events = self
            .cna_events
            .read()
            .map_err(|e| StoreError::Connection(format!("Failed to acquire read lock: {}", e)))?;

        let index = CohortIndex::new(level, cohort);
        let mut tallies: BTreeMap<(EntrezGeneId, i16), (Tally<'_>, Option<&str>)> = BTreeMap::new();

        for event in cna_events.iter() {
            if !gene_admitted(&filter.gene_ids, event.entrez_gene_id)
                || !filter.cna_types.contains(&event.alteration)
            {
                continue;
            }
            if let Some(case_id) =
                index.case_of(&event.molecular_profile_id, &event.sample_id, &event.patient_id)
            {
                let (tally, cytoband) = tallies
                    .entry((event.entrez_gene_id, event.alteration))
                    .or_insert_with(|| (Tally::new(&event.hugo_gene_symbol), None));
                tally.add(case_id);
                if cytoband.is_none() {
                    *cytoband = event.cytoband.as_deref();
                }
            }
        }

        Ok(tallies
            .into_iter()
            .map(|((gene, alteration), (tally, cytoband))| {
                let record = CopyNumberCountByGene::new(gene, tally.hugo_gene_symbol, alteration)
                    .with_counts(tally.cases.len() as u32, tally.events);
                match cytoband {
                    Some(band) => record.with_cytoband(band),
                    None => record,
                }
            })
            .collect())
    }
}
