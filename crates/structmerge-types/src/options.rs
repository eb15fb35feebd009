use serde::{Deserialize, Serialize};

/// Which declared visibilities a merge may write.
///
/// Private fields are never written regardless of this setting; they keep
/// the zero value in every merge result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Writability {
    /// Only `pub` fields receive merged values.
    #[default]
    PublicOnly,
    /// `pub(crate)`, `pub(super)` and `pub(in path)` fields are written too.
    IncludeRestricted,
}

/// Configuration for a merge call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Which field visibilities count as writable.
    pub writability: Writability,
}

impl MergeOptions {
    /// Options that also write crate-restricted fields.
    ///
    /// Useful when records are merged inside the crate that declares them
    /// and `pub(crate)` fields should take part.
    pub fn permissive() -> Self {
        Self {
            writability: Writability::IncludeRestricted,
        }
    }
}
