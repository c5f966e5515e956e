use serde::{Deserialize, Serialize};

/// Whether a value came from a live upstream call or a local approximation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Provider,
    Fallback,
}
