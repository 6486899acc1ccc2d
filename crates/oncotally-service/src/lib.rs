//! # Oncotally Service
//!
//! Alteration count service and panel-aware frequency enrichment.
//!
//! The [`AlterationCountService`] is the public entry point. It answers
//! empty cohorts without any storage round-trip, delegates everything else to
//! the [`AlterationGateway`](oncotally_store::AlterationGateway), and on
//! request turns raw counts into frequencies through a [`FrequencyEnricher`].
//!
//! ## Quick Start
//!
//! ```rust
//! use oncotally_core::prelude::*;
//! use oncotally_service::{
//!     AlterationCountService, FrequencyOptions, InMemoryPanelCoverage, SampleProfile,
//! };
//! use oncotally_store::{InMemoryAlterationStore, MutationEvent};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryAlterationStore::new();
//!     store.insert_mutations(vec![MutationEvent::new(
//!         "study_mutations", "S1", "P1", EntrezGeneId(7157), "TP53", MutationEventType::Missense,
//!     )])?;
//!
//!     let coverage = InMemoryPanelCoverage::new();
//!     coverage.insert(vec![
//!         SampleProfile::whole_genome("study_mutations", "S1", "P1"),
//!         SampleProfile::whole_genome("study_mutations", "S2", "P2"),
//!     ])?;
//!
//!     let service = AlterationCountService::with_panel_coverage(Arc::new(store), Arc::new(coverage));
//!     let cohort = vec![
//!         CaseIdentifier::new("study_mutations", "S1"),
//!         CaseIdentifier::new("study_mutations", "S2"),
//!     ];
//!
//!     let counts = service
//!         .sample_mutation_counts(&cohort, Selection::all(), Selection::all(), FrequencyOptions::with_frequency(false))
//!         .await?;
//!     assert_eq!(counts[0].frequency, Some(0.5));
//!     Ok(())
//! }
//! ```

pub mod coverage;
pub mod frequency;
pub mod service;

use oncotally_core::error::FilterError;
use oncotally_store::StoreError;
use thiserror::Error;

/// Errors raised by a panel coverage lookup or frequency enrichment.
#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("Coverage lookup failed: {0}")]
    Coverage(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Result type for enrichment operations.
pub type EnrichmentResult<T> = Result<T, EnrichmentError>;

/// Errors returned by the alteration count service.
///
/// Collaborator failures are wrapped transparently: their message and source
/// are exactly those of the underlying error.
#[derive(Error, Debug)]
pub enum CountError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),
}

impl CountError {
    /// Whether the request combined an explicit mutation-type subset with a
    /// directional fusion filter.
    pub fn is_invalid_combination(&self) -> bool {
        matches!(
            self,
            CountError::Store(StoreError::Filter(FilterError::InvalidCombination { .. }))
        )
    }
}

/// Result type for count operations.
pub type CountResult<T> = Result<T, CountError>;

// Re-export commonly used types
pub use coverage::{CaseCoverage, GeneCoverage, InMemoryPanelCoverage, PanelCoverageProvider, SampleProfile};
pub use frequency::{FrequencyEnricher, PanelFrequencyEnricher};
pub use service::{AlterationCountService, FrequencyOptions};
