//! Name matching
//!
//! A `Roster` holds the users a text may mention, with names normalized once
//! (trimmed, lower-cased). Lookups by id search every user; lookups by name
//! search only the bias-filtered pool and walk the strategy list in order.

use serde::{Deserialize, Serialize};

use crate::user::{MentionBias, User, UserId};

/// One rule for matching a normalized `@name` against a normalized full name.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Whole name equals the token.
    Exact,
    /// Name starts with the token ("@Sami U" for "Sami Ullah").
    Prefix,
    /// First word of the name equals the token. Anything it matches `Prefix`
    /// also matches, so after `Prefix` it never changes the result.
    FirstToken,
}

impl MatchStrategy {
    pub fn matches(self, token: &str, name: &str) -> bool {
        match self {
            MatchStrategy::Exact => name == token,
            MatchStrategy::Prefix => name.starts_with(token),
            MatchStrategy::FirstToken => name.split_whitespace().next() == Some(token),
        }
    }
}

pub(crate) fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Users eligible for one resolve call.
#[derive(Debug, Clone)]
pub struct Roster<'a> {
    users: &'a [User],
    candidates: Vec<(String, &'a User)>,
}

impl<'a> Roster<'a> {
    pub fn new(users: &'a [User], bias: Option<&MentionBias>) -> Self {
        let bias = bias.filter(|bias| !bias.is_empty());
        let candidates = users
            .iter()
            .filter(|user| bias.map_or(true, |bias| bias.contains(user.id)))
            .map(|user| (normalize(&user.full_name), user))
            .collect();
        Self { users, candidates }
    }

    /// Id lookup ignores the bias.
    pub fn by_id(&self, id: UserId) -> Option<&'a User> {
        self.users.iter().find(|user| user.id == id)
    }

    /// First strategy with any match wins; ties go to roster order.
    pub fn by_name(&self, name: &str, strategies: &[MatchStrategy]) -> Option<&'a User> {
        let token = normalize(name);
        if token.is_empty() {
            return None;
        }
        strategies.iter().find_map(|strategy| {
            self.candidates
                .iter()
                .find(|(candidate, _)| strategy.matches(&token, candidate))
                .map(|(_, user)| *user)
        })
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }
}
