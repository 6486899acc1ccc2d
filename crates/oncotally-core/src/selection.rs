//! Tri-state filter over a finite value domain.
//!
//! A [`Selection`] replaces nullable filter lists: it either selects every
//! value, no value, or an explicit subset. An explicit subset can be inverted,
//! in which case it selects every value *except* the listed ones.
//!
//! ```rust
//! use oncotally_core::selection::Selection;
//!
//! let only = Selection::only([1, 2]);
//! assert!(only.contains(&1));
//! assert!(!only.contains(&3));
//!
//! let except = Selection::excluding([1, 2]);
//! assert!(!except.contains(&1));
//! assert!(except.contains(&3));
//!
//! // Mapping touches values only; the inverse flag survives.
//! let codes = except.map(|v| v * 10);
//! assert_eq!(codes, Selection::excluding([10, 20]));
//! ```

use serde::{Deserialize, Serialize};

/// A filter over a finite domain of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Selection<T> {
    /// No filtering: every value is selected.
    All,
    /// Every value is filtered out.
    None,
    /// An explicit subset. With `inverse` set, the subset is the excluded set.
    Subset { values: Vec<T>, inverse: bool },
}

impl<T> Selection<T> {
    /// Select every value.
    pub fn all() -> Self {
        Selection::All
    }

    /// Select nothing.
    pub fn none() -> Self {
        Selection::None
    }

    /// Select exactly the given values.
    pub fn only(values: impl IntoIterator<Item = T>) -> Self {
        Selection::Subset {
            values: values.into_iter().collect(),
            inverse: false,
        }
    }

    /// Select every value except the given ones.
    pub fn excluding(values: impl IntoIterator<Item = T>) -> Self {
        Selection::Subset {
            values: values.into_iter().collect(),
            inverse: true,
        }
    }

    /// True when nothing is filtered out.
    ///
    /// An inverted empty subset excludes nothing, so it counts as select-all.
    pub fn has_all(&self) -> bool {
        match self {
            Selection::All => true,
            Selection::None => false,
            Selection::Subset { values, inverse } => *inverse && values.is_empty(),
        }
    }

    /// True when nothing can pass the filter.
    ///
    /// A non-inverted empty subset selects nothing, so it counts as select-none.
    pub fn has_none(&self) -> bool {
        match self {
            Selection::All => false,
            Selection::None => true,
            Selection::Subset { values, inverse } => !*inverse && values.is_empty(),
        }
    }

    /// Whether the explicit subset is inverted. Always false for all/none.
    pub fn is_inverse(&self) -> bool {
        matches!(self, Selection::Subset { inverse: true, .. })
    }

    /// The explicit subset values, if any.
    pub fn values(&self) -> Option<&[T]> {
        match self {
            Selection::Subset { values, .. } => Some(values),
            _ => None,
        }
    }

    /// Transform the selected values, keeping the mode and inverse flag.
    pub fn map<U, F>(&self, f: F) -> Selection<U>
    where
        F: FnMut(&T) -> U,
    {
        match self {
            Selection::All => Selection::All,
            Selection::None => Selection::None,
            Selection::Subset { values, inverse } => Selection::Subset {
                values: values.iter().map(f).collect(),
                inverse: *inverse,
            },
        }
    }
}

impl<T: PartialEq> Selection<T> {
    /// Whether `value` passes the filter.
    pub fn contains(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::None => false,
            Selection::Subset { values, inverse } => values.contains(value) != *inverse,
        }
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T> FromIterator<T> for Selection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Selection::only(iter)
    }
}
