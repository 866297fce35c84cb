use serde::{Deserialize, Serialize};

/// What a MIN node reports when the depth limit stops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffEval {
    /// Negated score differential of the position.
    Utility,
    /// Negated flip-potential estimate, see [`crate::engine::eval`].
    Heuristic,
}

/// How long cached search values live inside a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Keep every entry for the whole game. Entries are not depth-aware, so
    /// values from an earlier, shallower search may be reused.
    Retain,
    /// Start every move request with an empty cache.
    ClearPerMove,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub minimax_cutoff: CutoffEval,
    pub alpha_beta_cutoff: CutoffEval,
    pub cache_policy: CachePolicy,
    /// Ordered alpha-beta recurses into non-terminal moves without spending a
    /// ply, as the first version of this engine did. With a finite limit this
    /// turns into a full-game search, so it is off unless asked for.
    pub ordering_extends_depth: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            minimax_cutoff: CutoffEval::Heuristic,
            alpha_beta_cutoff: CutoffEval::Utility,
            cache_policy: CachePolicy::ClearPerMove,
            ordering_extends_depth: false,
        }
    }
}

impl EngineConfig {
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Same cutoff evaluation for both searchers, which makes their root
    /// values directly comparable.
    #[must_use]
    pub fn with_cutoff(cutoff: CutoffEval) -> Self {
        Self {
            minimax_cutoff: cutoff,
            alpha_beta_cutoff: cutoff,
            ..Self::default()
        }
    }
}
