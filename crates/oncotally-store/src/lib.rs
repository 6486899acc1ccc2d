//! # Oncotally Store
//!
//! Alteration query gateway and aggregation engine adapters.
//!
//! The [`AggregationEngine`] trait is the contract with whatever actually
//! aggregates persisted genomic data. The [`AlterationGateway`] sits in front
//! of it: it validates filter combinations, short-circuits queries that cannot
//! match anything, and maps domain event types to storage codes.
//!
//! ## Supported Backends
//!
//! | Backend | Description |
//! |---------|-------------|
//! | In-Memory | Scans in-process event tables, good for testing and embedding |
//!
//! ## Quick Start
//!
//! ```rust
//! use oncotally_core::prelude::*;
//! use oncotally_store::{AlterationGateway, InMemoryAlterationStore, MutationEvent};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryAlterationStore::new();
//!     store.insert_mutations(vec![MutationEvent::new(
//!         "study_mutations", "S1", "P1", EntrezGeneId(7157), "TP53", MutationEventType::Missense,
//!     )])?;
//!
//!     let gateway = AlterationGateway::new(Arc::new(store));
//!     let cohort = vec![CaseIdentifier::new("study_mutations", "S1")];
//!     let filter = AlterationFilter::new()
//!         .with_mutation_types(Selection::only([MutationEventType::Missense]))
//!         .with_cna_types(Selection::none());
//!
//!     let counts = gateway.query_alteration_counts(CaseLevel::Sample, &cohort, &filter).await?;
//!     assert_eq!(counts[0].number_of_altered_cases, 1);
//!     Ok(())
//! }
//! ```

pub mod gateway;
pub mod memory;

use async_trait::async_trait;
use oncotally_core::error::FilterError;
use oncotally_core::filter::{MappedAlterationFilter, MappedCnaFilter};
use oncotally_core::types::{AlterationCountByGene, CaseIdentifier, CaseLevel, CopyNumberCountByGene};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when querying alteration counts.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Abstract interface for the engine that aggregates persisted alteration data.
///
/// Implementations must treat an all-genes or empty explicit gene selection as
/// "no gene restriction" and must honor the inverse flag on every selection.
#[async_trait]
pub trait AggregationEngine: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Count mutation, fusion and copy-number alterations per gene.
    async fn query_counts(
        &self,
        level: CaseLevel,
        cohort: &[CaseIdentifier],
        filter: &MappedAlterationFilter,
    ) -> StoreResult<Vec<AlterationCountByGene>>;

    /// Count copy-number alterations per gene and call.
    async fn query_cna_counts(
        &self,
        level: CaseLevel,
        cohort: &[CaseIdentifier],
        filter: &MappedCnaFilter,
    ) -> StoreResult<Vec<CopyNumberCountByGene>>;
}

/// Configuration for creating an aggregation engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: BackendConfig,
}

impl StoreConfig {
    /// Parse a store configuration from a TOML document.
    ///
    /// ```toml
    /// [backend]
    /// type = "InMemory"
    /// ```
    pub fn from_toml_str(content: &str) -> StoreResult<Self> {
        toml::from_str(content).map_err(|e| StoreError::Config(e.to_string()))
    }
}

/// Backend-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BackendConfig {
    /// In-memory event tables.
    #[default]
    InMemory,
}

/// Create an aggregation engine from configuration.
pub fn create_engine(config: &StoreConfig) -> StoreResult<Arc<dyn AggregationEngine>> {
    match config.backend {
        BackendConfig::InMemory => Ok(Arc::new(memory::InMemoryAlterationStore::new())),
    }
}

// Re-export commonly used types
pub use gateway::{map_cna_types, map_mutation_types, AlterationGateway};
pub use memory::{CnaEvent, InMemoryAlterationStore, MutationEvent};
