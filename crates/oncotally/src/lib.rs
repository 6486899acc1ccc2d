//! # Oncotally
//!
//! Per-gene alteration counts and panel-aware frequencies for molecular
//! profile cohorts.
//!
//! Given a cohort of (molecular profile, sample or patient) cases, oncotally
//! counts per gene how many cases carry a mutation, a fusion or a copy-number
//! alteration, filtered by event type, and can normalize those counts by the
//! number of cases whose gene panel actually covers each gene.
//!
//! ## Quick Start
//!
//! ```rust
//! use oncotally::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryAlterationStore::new();
//!     store.insert_cna_events(vec![
//!         CnaEvent::new("brca_gistic", "S1", "P1", EntrezGeneId(2064), "ERBB2", 2),
//!     ])?;
//!     let coverage = InMemoryPanelCoverage::new();
//!     coverage.insert(vec![
//!         SampleProfile::whole_genome("brca_gistic", "S1", "P1"),
//!         SampleProfile::whole_genome("brca_gistic", "S2", "P2"),
//!         SampleProfile::whole_genome("brca_gistic", "S3", "P3"),
//!         SampleProfile::whole_genome("brca_gistic", "S4", "P4"),
//!     ])?;
//!
//!     let service = AlterationCountService::with_panel_coverage(Arc::new(store), Arc::new(coverage));
//!     let cohort: Vec<_> = ["S1", "S2", "S3", "S4"]
//!         .iter()
//!         .map(|s| CaseIdentifier::new("brca_gistic", *s))
//!         .collect();
//!
//!     let filter = CnaFilter::new(Selection::only([CnaEventType::Amplification]));
//!     let counts = service
//!         .sample_cna_counts(&cohort, &filter, FrequencyOptions::with_frequency(true))
//!         .await?;
//!
//!     assert_eq!(counts[0].hugo_gene_symbol, "ERBB2");
//!     assert_eq!(counts[0].frequency, Some(0.25));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`oncotally_core`] - Selections, event types, identifiers, records and filters
//! - [`oncotally_store`] - Aggregation engine trait, query gateway, in-memory engine
//! - [`oncotally_service`] - Count service, frequency enrichment, panel coverage
//!
//! ## Filter Rules
//!
//! | Situation | Outcome |
//! |-----------|---------|
//! | Empty cohort | Empty result, nothing queried |
//! | No mutation and no copy-number type selected | Empty result, nothing queried |
//! | Explicit mutation types with a fusion include/exclude filter | `InvalidCombination` error |
//! | Anything else | Dispatched to the aggregation engine |

// Re-export all subcrates
pub use oncotally_core as core;
pub use oncotally_service as service;
pub use oncotally_store as store;

/// Prelude module for convenient imports.
///
/// ```rust
/// use oncotally::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use oncotally_core::prelude::*;

    // Store
    pub use oncotally_store::{
        create_engine, AggregationEngine, AlterationGateway, BackendConfig, CnaEvent,
        InMemoryAlterationStore, MutationEvent, StoreConfig, StoreError, StoreResult,
    };

    // Service
    pub use oncotally_service::{
        AlterationCountService, CaseCoverage, CountError, CountResult, EnrichmentError,
        EnrichmentResult, FrequencyEnricher, FrequencyOptions, GeneCoverage,
        InMemoryPanelCoverage, PanelCoverageProvider, PanelFrequencyEnricher, SampleProfile,
    };
}
