//! Oncotally Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use oncotally_core::prelude::*;
//! ```

pub use crate::event::{CnaEventType, FusionFilter, MutationEventType, FUSION_MUTATION_TYPE};
pub use crate::filter::{
    check_fusion_combination, AlterationFilter, CnaFilter, MappedAlterationFilter, MappedCnaFilter,
};
pub use crate::selection::Selection;
pub use crate::types::{
    alteration_frequency, AlterationCountByGene, CaseIdentifier, CaseLevel, CopyNumberCountByGene,
    EntrezGeneId, GeneCount,
};

pub use crate::error::FilterError;
