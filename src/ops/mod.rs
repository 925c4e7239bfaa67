//! Document transformations: overlay merge and numeric-key cleanup.

mod merge;
mod sanitize;

pub use merge::{
    MergeStats,
    deep_merge,
};
pub use sanitize::{
    is_numeric_key,
    remove_numeric_keys,
    sanitize_at_path,
};
