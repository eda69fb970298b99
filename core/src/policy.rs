use serde::{Deserialize, Serialize};

/// How a single call fans out its independent per-term work.
/// Both variants produce identical results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    /// Fan out on the rayon global pool.
    Parallel,
}
