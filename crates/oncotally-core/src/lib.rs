//! # Oncotally Core
//!
//! Core types for counting genomic alterations across molecular profile cohorts.
//!
//! - [`Selection`](selection::Selection): tri-state filter (all, none, explicit subset with inverse)
//! - [`MutationEventType`](event::MutationEventType) and [`CnaEventType`](event::CnaEventType)
//!   with their storage codes
//! - [`FusionFilter`](event::FusionFilter): pass / include-only / exclude fusions
//! - Case identifiers, per-gene count records and query filters
//!
//! ## Quick Start
//!
//! ```rust
//! use oncotally_core::prelude::*;
//!
//! let filter = AlterationFilter::new()
//!     .with_mutation_types(Selection::only([MutationEventType::Missense]))
//!     .with_cna_types(Selection::none());
//!
//! assert!(filter.validate().is_ok());
//! assert!(!filter.selects_no_event_type());
//! ```

pub mod error;
pub mod event;
pub mod filter;
pub mod prelude;
pub mod selection;
pub mod types;
