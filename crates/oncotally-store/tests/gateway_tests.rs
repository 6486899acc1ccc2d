//! Gateway behavior against a recording engine.
//!
//! The recording engine captures every dispatched filter so the tests can
//! check validation, short-circuiting and type mapping without real data.

use async_trait::async_trait;
use oncotally_core::prelude::*;
use oncotally_store::{AggregationEngine, AlterationGateway, StoreError, StoreResult};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingEngine {
    alteration_calls: Mutex<Vec<(CaseLevel, MappedAlterationFilter)>>,
    cna_calls: Mutex<Vec<(CaseLevel, MappedCnaFilter)>>,
}

impl RecordingEngine {
    fn alteration_calls(&self) -> Vec<(CaseLevel, MappedAlterationFilter)> {
        self.alteration_calls.lock().unwrap().clone()
    }

    fn cna_call_count(&self) -> usize {
        self.cna_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AggregationEngine for RecordingEngine {
    fn name(&self) -> &str {
        "recording"
    }

    async fn query_counts(
        &self,
        level: CaseLevel,
        _cohort: &[CaseIdentifier],
        filter: &MappedAlterationFilter,
    ) -> StoreResult<Vec<AlterationCountByGene>> {
        self.alteration_calls.lock().unwrap().push((level, filter.clone()));
        Ok(vec![AlterationCountByGene::new(EntrezGeneId(7157), "TP53").with_counts(1, 1)])
    }

    async fn query_cna_counts(
        &self,
        level: CaseLevel,
        _cohort: &[CaseIdentifier],
        filter: &MappedCnaFilter,
    ) -> StoreResult<Vec<CopyNumberCountByGene>> {
        self.cna_calls.lock().unwrap().push((level, filter.clone()));
        Ok(vec![CopyNumberCountByGene::new(EntrezGeneId(2064), "ERBB2", 2).with_counts(1, 1)])
    }
}

struct FailingEngine;

#[async_trait]
impl AggregationEngine for FailingEngine {
    fn name(&self) -> &str {
        "failing"
    }

    async fn query_counts(
        &self,
        _level: CaseLevel,
        _cohort: &[CaseIdentifier],
        _filter: &MappedAlterationFilter,
    ) -> StoreResult<Vec<AlterationCountByGene>> {
        Err(StoreError::Connection("database unreachable".to_string()))
    }

    async fn query_cna_counts(
        &self,
        _level: CaseLevel,
        _cohort: &[CaseIdentifier],
        _filter: &MappedCnaFilter,
    ) -> StoreResult<Vec<CopyNumberCountByGene>> {
        Err(StoreError::Query("bad plan".to_string()))
    }
}

fn cohort(n: usize) -> Vec<CaseIdentifier> {
    (1..=n)
        .map(|i| CaseIdentifier::new("study_mutations", format!("S{}", i)))
        .collect()
}

fn setup() -> (Arc<RecordingEngine>, AlterationGateway) {
    let engine = Arc::new(RecordingEngine::default());
    let gateway = AlterationGateway::new(engine.clone());
    (engine, gateway)
}

#[tokio::test]
async fn test_missense_query_is_dispatched_with_mapped_codes() {
    let (engine, gateway) = setup();
    let filter = AlterationFilter::new()
        .with_mutation_types(Selection::only([MutationEventType::Missense]))
        .with_cna_types(Selection::none());

    let counts = gateway
        .query_alteration_counts(CaseLevel::Sample, &cohort(5), &filter)
        .await
        .unwrap();
    assert_eq!(counts.len(), 1);

    let calls = engine.alteration_calls();
    assert_eq!(calls.len(), 1);
    let (level, mapped) = &calls[0];
    assert_eq!(*level, CaseLevel::Sample);
    assert_eq!(mapped.gene_ids, Selection::All);
    assert_eq!(mapped.mutation_types, Selection::only(["Missense_Mutation".to_string()]));
    assert!(!mapped.mutation_types.is_inverse());
    assert_eq!(mapped.cna_types, Selection::None);
    assert_eq!(mapped.fusions, FusionFilter::Pass);
}

#[tokio::test]
async fn test_inverse_flag_reaches_engine() {
    let (engine, gateway) = setup();
    let filter = AlterationFilter::new()
        .with_mutation_types(Selection::excluding([MutationEventType::Missense, MutationEventType::Silent]))
        .with_cna_types(Selection::excluding([CnaEventType::Diploid]));

    gateway
        .query_alteration_counts(CaseLevel::Patient, &cohort(2), &filter)
        .await
        .unwrap();

    let calls = engine.alteration_calls();
    let (level, mapped) = &calls[0];
    assert_eq!(*level, CaseLevel::Patient);
    assert_eq!(
        mapped.mutation_types,
        Selection::excluding(["Missense_Mutation".to_string(), "Silent".to_string()])
    );
    assert_eq!(mapped.cna_types, Selection::excluding([0]));
}

#[tokio::test]
async fn test_invalid_combination_is_rejected_for_every_level() {
    for level in [CaseLevel::Sample, CaseLevel::Patient] {
        for fusions in [FusionFilter::Include, FusionFilter::Exclude] {
            let (engine, gateway) = setup();
            let filter = AlterationFilter::new()
                .with_mutation_types(Selection::only([MutationEventType::Nonsense]))
                .with_fusions(fusions);

            let result = gateway.query_alteration_counts(level, &cohort(3), &filter).await;
            assert!(matches!(
                result,
                Err(StoreError::Filter(FilterError::InvalidCombination { .. }))
            ));
            assert!(engine.alteration_calls().is_empty());
        }
    }
}

#[tokio::test]
async fn test_validation_runs_before_empty_cohort_short_circuit() {
    let (engine, gateway) = setup();
    let filter = AlterationFilter::new()
        .with_mutation_types(Selection::only([MutationEventType::Missense]))
        .with_fusions(true);

    let result = gateway.query_alteration_counts(CaseLevel::Sample, &[], &filter).await;
    assert!(result.is_err());
    assert!(engine.alteration_calls().is_empty());
}

#[tokio::test]
async fn test_all_mutation_types_accept_fusion_filter() {
    let (engine, gateway) = setup();
    let filter = AlterationFilter::new()
        .with_mutation_types(Selection::all())
        .with_cna_types(Selection::none())
        .with_fusions(true);

    gateway
        .query_alteration_counts(CaseLevel::Sample, &cohort(1), &filter)
        .await
        .unwrap();

    let calls = engine.alteration_calls();
    assert_eq!(calls[0].1.mutation_types, Selection::All);
    assert_eq!(calls[0].1.fusions, FusionFilter::Include);
}

#[tokio::test]
async fn test_short_circuits_skip_the_engine() {
    let (engine, gateway) = setup();

    let nothing_selected = AlterationFilter::new()
        .with_mutation_types(Selection::none())
        .with_cna_types(Selection::none());
    let counts = gateway
        .query_alteration_counts(CaseLevel::Sample, &cohort(4), &nothing_selected)
        .await
        .unwrap();
    assert!(counts.is_empty());

    let absent = AlterationFilter::new();
    let counts = gateway
        .query_alteration_counts(CaseLevel::Sample, &cohort(4), &absent)
        .await
        .unwrap();
    assert!(counts.is_empty());

    let selected = AlterationFilter::new().with_mutation_types(Selection::all());
    let counts = gateway
        .query_alteration_counts(CaseLevel::Sample, &[], &selected)
        .await
        .unwrap();
    assert!(counts.is_empty());

    assert!(engine.alteration_calls().is_empty());
}

#[tokio::test]
async fn test_cna_query_short_circuits_and_maps() {
    let (engine, gateway) = setup();

    let none = CnaFilter::new(Selection::none());
    assert!(gateway
        .query_cna_counts(CaseLevel::Sample, &cohort(2), &none)
        .await
        .unwrap()
        .is_empty());

    let amp = CnaFilter::new(Selection::only([CnaEventType::Amplification]));
    assert!(gateway
        .query_cna_counts(CaseLevel::Sample, &[], &amp)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(engine.cna_call_count(), 0);

    let counts = gateway
        .query_cna_counts(CaseLevel::Patient, &cohort(2), &amp)
        .await
        .unwrap();
    assert_eq!(counts[0].alteration, 2);
    assert_eq!(engine.cna_call_count(), 1);
    let recorded = engine.cna_calls.lock().unwrap()[0].1.clone();
    assert_eq!(recorded.cna_types, Selection::only([2]));
}

#[tokio::test]
async fn test_engine_failures_pass_through() {
    let gateway = AlterationGateway::new(Arc::new(FailingEngine));
    let filter = AlterationFilter::new().with_mutation_types(Selection::all());

    let result = gateway
        .query_alteration_counts(CaseLevel::Sample, &cohort(1), &filter)
        .await;
    match result {
        Err(StoreError::Connection(msg)) => assert_eq!(msg, "database unreachable"),
        other => panic!("expected connection error, got {:?}", other),
    }

    let result = gateway
        .query_cna_counts(CaseLevel::Sample, &cohort(1), &CnaFilter::new(Selection::all()))
        .await;
    assert!(matches!(result, Err(StoreError::Query(_))));
}
