//! Resolver configuration
//!
//! Controls which name-matching strategies run, and in what order:
//! - Standard policy (exact, then prefix, then first name)
//! - Exact-only policy for surfaces where partial names must not resolve
//! - An explicit strategy list supplied by the host

use serde::{Deserialize, Serialize};

use crate::matching::MatchStrategy;

/// Preset for how loosely `@name` tokens may match.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Exact, then prefix, then first-name match
    #[default]
    Standard,
    /// Full names only
    ExactOnly,
}

impl MatchPolicy {
    /// Strategy cascade for this policy, highest precedence first
    pub fn recommended_strategies(&self) -> Vec<MatchStrategy> {
        match self {
            MatchPolicy::Standard => vec![
                MatchStrategy::Exact,
                MatchStrategy::Prefix,
                MatchStrategy::FirstToken,
            ],
            MatchPolicy::ExactOnly => vec![MatchStrategy::Exact],
        }
    }
}

/// Resolver configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(from = "ConfigFile")]
pub struct ResolverConfig {
    pub policy: MatchPolicy,
    pub strategies: Vec<MatchStrategy>,
}

/// Host-supplied config; `strategies` defaults to the policy's cascade.
#[derive(Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    policy: MatchPolicy,
    strategies: Option<Vec<MatchStrategy>>,
}

impl From<ConfigFile> for ResolverConfig {
    fn from(file: ConfigFile) -> Self {
        Self {
            strategies: file
                .strategies
                .unwrap_or_else(|| file.policy.recommended_strategies()),
            policy: file.policy,
        }
    }
}

impl ResolverConfig {
    /// Create config from a policy (uses its recommended strategies)
    pub fn from_policy(policy: MatchPolicy) -> Self {
        Self {
            policy,
            strategies: policy.recommended_strategies(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::from_policy(MatchPolicy::Standard)
    }
}
