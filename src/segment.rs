//! Resolver output
//!
//! A resolved text is an ordered list of segments. Values borrow from the
//! input text and users borrow from the roster, so nothing is copied.

use serde::Serialize;
use std::collections::HashSet;

use crate::user::{User, UserId};

/// One piece of a resolved text.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment<'a> {
    /// Literal text, shown verbatim.
    Text { value: &'a str },
    /// The raw `@` token as written, with the user it resolved to.
    Mention {
        value: &'a str,
        user: Option<&'a User>,
    },
}

/// How the UI should paint a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rendering<'a> {
    Plain(&'a str),
    Chip { value: &'a str, user: &'a User },
}

impl<'a> Rendering<'a> {
    /// Text to paint: the raw value, or the user's name on a chip.
    pub fn label(&self) -> &'a str {
        match *self {
            Rendering::Plain(value) => value,
            Rendering::Chip { user, .. } => user.display_name(),
        }
    }
}

impl<'a> Segment<'a> {
    pub fn value(&self) -> &'a str {
        match self {
            Segment::Text { value } | Segment::Mention { value, .. } => *value,
        }
    }

    pub fn user(&self) -> Option<&'a User> {
        match self {
            Segment::Text { .. } => None,
            Segment::Mention { user, .. } => *user,
        }
    }

    pub fn is_mention(&self) -> bool {
        matches!(self, Segment::Mention { .. })
    }

    /// Unresolved mentions look exactly like the text around them.
    pub fn render(&self) -> Rendering<'a> {
        match *self {
            Segment::Text { value } => Rendering::Plain(value),
            Segment::Mention { value, user: None } => Rendering::Plain(value),
            Segment::Mention {
                value,
                user: Some(user),
            } => Rendering::Chip { value, user },
        }
    }
}

/// Rebuild the source text from its segments.
pub fn concat(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::value).collect()
}

/// Ids of resolved mentions, first occurrence first, without duplicates.
pub fn mentioned_user_ids(segments: &[Segment<'_>]) -> Vec<UserId> {
    let mut seen = HashSet::new();
    segments
        .iter()
        .filter_map(Segment::user)
        .map(|user| user.id)
        .filter(|id| seen.insert(*id))
        .collect()
}
