//! Roster types
//!
//! Users are supplied by the calling UI (task members, organization members)
//! and are only ever read by the resolver.
//! - id: backend user id
//! - full_name: display name, matched against `@name` tokens
//! - profile_image_url: avatar shown on a resolved mention chip

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Backend user identifier.
pub type UserId = u64;

/// A known user that mentions may resolve to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

impl User {
    pub fn new(id: UserId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            profile_image_url: None,
        }
    }

    pub fn with_profile_image(mut self, url: impl Into<String>) -> Self {
        self.profile_image_url = Some(url.into());
        self
    }

    /// Name shown on a mention chip, see `Rendering::label`.
    pub fn display_name(&self) -> &str {
        self.full_name.trim()
    }
}

/// Ids the backend tagged as mentioned in a piece of text.
///
/// Only narrows name matching; an empty bias behaves like no bias at all.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct MentionBias {
    ids: HashSet<UserId>,
}

impl MentionBias {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: UserId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

impl FromIterator<UserId> for MentionBias {
    fn from_iter<I: IntoIterator<Item = UserId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
