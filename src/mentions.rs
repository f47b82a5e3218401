//! Mention scanning
//!
//! Splits free text into text and mention segments in one left-to-right pass.
//! - `@{42}`, `@[42]`, `@<42>` and `@id:42` reference a user by id.
//! - `@Name Words` references a user by name. Words are runs of anything but
//!   whitespace and `. , ; : ( ) [ ] { } ! ? # @`, joined by single spaces.
//! - An `@` followed by neither stays plain text.

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::config::ResolverConfig;
use crate::matching::{MatchStrategy, Roster};
use crate::segment::Segment;
use crate::user::{MentionBias, User, UserId};

const NAME_STOPS: &[char] = &[
    '.', ',', ';', ':', '(', ')', '[', ']', '{', '}', '!', '?', '#', '@',
];

// Hyphens and apostrophes are word characters too, so in practice only the
// space ever joins two words.
const WORD_JOINERS: &[char] = &[' ', '-', '\''];

const ID_BRACKETS: &[(char, char)] = &[('{', '}'), ('[', ']'), ('<', '>')];
const ID_PREFIX: &str = "id:";

static DEFAULT_CONFIG: Lazy<ResolverConfig> = Lazy::new(ResolverConfig::default);

/// Resolves mentions against one roster; reusable across many texts.
#[derive(Debug, Clone)]
pub struct MentionResolver<'a> {
    roster: Roster<'a>,
    strategies: Vec<MatchStrategy>,
}

impl<'a> MentionResolver<'a> {
    pub fn new(users: &'a [User], bias: Option<&MentionBias>, config: &ResolverConfig) -> Self {
        Self {
            roster: Roster::new(users, bias),
            strategies: config.strategies.clone(),
        }
    }

    /// Lazily split `text` into segments.
    pub fn segments<'r>(&'r self, text: &'a str) -> Segments<'r, 'a> {
        Segments {
            resolver: self,
            text,
            pos: 0,
        }
    }
}

/// Iterator over the segments of one text.
#[derive(Debug, Clone)]
pub struct Segments<'r, 'a> {
    resolver: &'r MentionResolver<'a>,
    text: &'a str,
    pos: usize,
}

impl<'r, 'a> Segments<'r, 'a> {
    /// `rest` starts with `@`.
    fn mention_at(&mut self, rest: &'a str) -> Segment<'a> {
        let body = &rest[1..];

        if let Some((len, digits)) = id_token(body) {
            let value = &rest[..1 + len];
            self.pos += value.len();
            let user = digits
                .parse::<UserId>()
                .ok()
                .and_then(|id| self.resolver.roster.by_id(id));
            if user.is_none() {
                trace!(token = value, "id mention did not resolve");
            }
            return Segment::Mention { value, user };
        }

        let len = name_token_len(body);
        if len == 0 {
            self.pos += 1;
            return Segment::Text { value: &rest[..1] };
        }

        let value = &rest[..1 + len];
        self.pos += value.len();
        let user = self
            .resolver
            .roster
            .by_name(&body[..len], &self.resolver.strategies);
        if user.is_none() {
            trace!(token = value, "name mention did not resolve");
        }
        Segment::Mention { value, user }
    }
}

impl<'r, 'a> Iterator for Segments<'r, 'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let text = self.text;
        let rest = &text[self.pos..];
        if rest.is_empty() {
            return None;
        }

        match rest.find('@') {
            None => {
                self.pos = text.len();
                Some(Segment::Text { value: rest })
            }
            Some(0) => Some(self.mention_at(rest)),
            Some(at) => {
                self.pos += at;
                Some(Segment::Text { value: &rest[..at] })
            }
        }
    }
}

/// Split `text` into segments using the standard match cascade.
pub fn resolve<'a>(
    text: &'a str,
    users: &'a [User],
    bias: Option<&MentionBias>,
) -> Vec<Segment<'a>> {
    resolve_with(text, users, bias, &DEFAULT_CONFIG)
}

/// Split `text` into segments using `config`.
pub fn resolve_with<'a>(
    text: &'a str,
    users: &'a [User],
    bias: Option<&MentionBias>,
    config: &ResolverConfig,
) -> Vec<Segment<'a>> {
    let resolver = MentionResolver::new(users, bias, config);
    let segments: Vec<Segment<'a>> = resolver.segments(text).collect();

    let mentions = segments.iter().filter(|s| s.is_mention()).count();
    let unresolved = segments
        .iter()
        .filter(|s| s.is_mention() && s.user().is_none())
        .count();
    debug!(
        segments = segments.len(),
        mentions,
        unresolved,
        roster = users.len(),
        "resolved mentions"
    );

    segments
}

/// Byte length of an id token at the start of `body`, with its digits.
fn id_token(body: &str) -> Option<(usize, &str)> {
    for &(open, close) in ID_BRACKETS {
        if let Some(inner) = body.strip_prefix(open) {
            let digits = leading_digits(inner);
            if !digits.is_empty() && inner[digits.len()..].starts_with(close) {
                return Some((open.len_utf8() + digits.len() + close.len_utf8(), digits));
            }
        }
    }

    let digits = leading_digits(body.strip_prefix(ID_PREFIX)?);
    if digits.is_empty() {
        return None;
    }
    Some((ID_PREFIX.len() + digits.len(), digits))
}

fn leading_digits(s: &str) -> &str {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    &s[..end]
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !NAME_STOPS.contains(&c)
}

fn word_len(s: &str) -> usize {
    s.find(|c: char| !is_word_char(c)).unwrap_or(s.len())
}

/// Byte length of the longest name token at the start of `body`, 0 if none.
fn name_token_len(body: &str) -> usize {
    let mut end = word_len(body);
    if end == 0 {
        return 0;
    }

    while let Some(joiner) = body[end..].chars().next() {
        if !WORD_JOINERS.contains(&joiner) {
            break;
        }
        let next = word_len(&body[end + joiner.len_utf8()..]);
        if next == 0 {
            break;
        }
        end += joiner.len_utf8() + next;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchPolicy;
    use crate::segment::{concat, mentioned_user_ids};
    use pretty_assertions::assert_eq;

    fn text(value: &str) -> Segment<'_> {
        Segment::Text { value }
    }

    fn mention<'a>(value: &'a str, user: Option<&'a User>) -> Segment<'a> {
        Segment::Mention { value, user }
    }

    fn samis() -> Vec<User> {
        vec![User::new(1, "Sami Ullah"), User::new(2, "Sami Khan")]
    }

    #[test]
    fn test_exact_match_wins_over_prefix() {
        let users = samis();
        let segments = resolve("Hello @Sami Ullah, welcome", &users, None);
        assert_eq!(
            segments,
            vec![
                text("Hello "),
                mention("@Sami Ullah", Some(&users[0])),
                text(", welcome"),
            ]
        );
    }

    #[test]
    fn test_prefix_fallback() {
        let users = vec![User::new(1, "Sami Ullah")];
        let segments = resolve("cc @Sami", &users, None);
        assert_eq!(segments, vec![text("cc "), mention("@Sami", Some(&users[0]))]);
    }

    #[test]
    fn test_id_syntax_keeps_token_verbatim() {
        let users = vec![User::new(42, "Jane Doe")];
        let segments = resolve("ping @{42} now", &users, None);
        assert_eq!(
            segments,
            vec![text("ping "), mention("@{42}", Some(&users[0])), text(" now")]
        );

        let segments = resolve("ping @{42} now", &[], None);
        assert_eq!(segments, vec![text("ping "), mention("@{42}", None), text(" now")]);
    }

    #[test]
    fn test_all_id_forms() {
        let users = vec![User::new(7, "Jane Doe")];
        let segments = resolve("@[7] @<7> @id:7.", &users, None);
        assert_eq!(
            segments,
            vec![
                mention("@[7]", Some(&users[0])),
                text(" "),
                mention("@<7>", Some(&users[0])),
                text(" "),
                mention("@id:7", Some(&users[0])),
                text("."),
            ]
        );
    }

    #[test]
    fn test_id_lookup_ignores_bias() {
        let users = vec![User::new(7, "Jane Doe"), User::new(8, "Jane Doe")];
        let bias: MentionBias = [8].into_iter().collect();
        let segments = resolve("@{7}", &users, Some(&bias));
        assert_eq!(segments, vec![mention("@{7}", Some(&users[0]))]);
    }

    #[test]
    fn test_malformed_id_forms() {
        let segments = resolve("@{abc}", &[], None);
        assert_eq!(segments, vec![text("@"), text("{abc}")]);

        let segments = resolve("@{12", &[], None);
        assert_eq!(segments, vec![text("@"), text("{12")]);

        // "id" without digits is an ordinary name
        let segments = resolve("@id:x", &[], None);
        assert_eq!(segments, vec![mention("@id", None), text(":x")]);
    }

    #[test]
    fn test_oversized_id_is_unresolved_mention() {
        let users = vec![User::new(1, "Jane Doe")];
        let segments = resolve("@{99999999999999999999999}", &users, None);
        assert_eq!(segments, vec![mention("@{99999999999999999999999}", None)]);
    }

    #[test]
    fn test_stray_at_sign() {
        let users = samis();
        let segments = resolve("email me @ noon", &users, None);
        assert_eq!(segments, vec![text("email me "), text("@"), text(" noon")]);

        let segments = resolve("trailing @", &users, None);
        assert_eq!(segments, vec![text("trailing "), text("@")]);

        let segments = resolve("@!", &users, None);
        assert_eq!(segments, vec![text("@"), text("!")]);
    }

    #[test]
    fn test_bias_restriction() {
        let users = vec![User::new(1, "Alex Park"), User::new(2, "Alex Park")];
        let bias: MentionBias = [2].into_iter().collect();
        assert_eq!(
            resolve("@Alex Park", &users, Some(&bias)),
            vec![mention("@Alex Park", Some(&users[1]))]
        );
        assert_eq!(
            resolve("@Alex Park", &users, None),
            vec![mention("@Alex Park", Some(&users[0]))]
        );
    }

    #[test]
    fn test_multi_word_names_with_hyphen_and_apostrophe() {
        let users = vec![User::new(3, "John O'Brien-Smith")];
        let segments = resolve("thanks @John O'Brien-Smith!", &users, None);
        assert_eq!(
            segments,
            vec![
                text("thanks "),
                mention("@John O'Brien-Smith", Some(&users[0])),
                text("!"),
            ]
        );
    }

    #[test]
    fn test_name_token_is_greedy_until_punctuation() {
        let users = samis();
        let segments = resolve("@Sami Ullah please review", &users, None);
        assert_eq!(segments, vec![mention("@Sami Ullah please review", None)]);
    }

    #[test]
    fn test_name_stops_at_tab_and_double_space() {
        let users = samis();
        assert_eq!(
            resolve("@Sami\tUllah", &users, None),
            vec![mention("@Sami", Some(&users[0])), text("\tUllah")]
        );
        assert_eq!(
            resolve("@Sami  Ullah", &users, None),
            vec![mention("@Sami", Some(&users[0])), text("  Ullah")]
        );
    }

    #[test]
    fn test_adjacent_mentions() {
        let users = samis();
        let segments = resolve("@Sami Khan@{1}", &users, None);
        assert_eq!(
            segments,
            vec![
                mention("@Sami Khan", Some(&users[1])),
                mention("@{1}", Some(&users[0])),
            ]
        );
    }

    #[test]
    fn test_email_like_text_round_trips() {
        let input = "write to test@example.com";
        let segments = resolve(input, &[], None);
        assert_eq!(
            segments,
            vec![text("write to test"), mention("@example", None), text(".com")]
        );
        assert_eq!(concat(&segments), input);
    }

    #[test]
    fn test_case_insensitive_unicode_names() {
        let users = vec![User::new(9, "Zoë Ærø")];
        let segments = resolve("hej @ZOË ærø.", &users, None);
        assert_eq!(
            segments,
            vec![text("hej "), mention("@ZOË ærø", Some(&users[0])), text(".")]
        );
    }

    #[test]
    fn test_empty_and_plain_text() {
        assert_eq!(resolve("", &[], None), Vec::<Segment<'_>>::new());
        assert_eq!(resolve("no mentions here", &[], None), vec![text("no mentions here")]);
    }

    #[test]
    fn test_exact_only_policy_rejects_partial_names() {
        let users = samis();
        let config = ResolverConfig::from_policy(MatchPolicy::ExactOnly);
        assert_eq!(
            resolve_with("cc @Sami", &users, None, &config),
            vec![text("cc "), mention("@Sami", None)]
        );
        assert_eq!(
            resolve_with("cc @sami khan", &users, None, &config),
            vec![text("cc "), mention("@sami khan", Some(&users[1]))]
        );
    }

    #[test]
    fn test_resolver_reused_across_texts() {
        let users = samis();
        let resolver = MentionResolver::new(&users, None, &ResolverConfig::default());
        let comments = ["@Sami Khan, see above", "ok @{1}"];
        let ids: Vec<Vec<UserId>> = comments
            .iter()
            .map(|&comment| {
                let segments: Vec<_> = resolver.segments(comment).collect();
                mentioned_user_ids(&segments)
            })
            .collect();
        assert_eq!(ids, vec![vec![2], vec![1]]);
    }

    #[test]
    fn test_segments_iterator_is_lazy() {
        let users = samis();
        let resolver = MentionResolver::new(&users, None, &ResolverConfig::default());
        let mut segments = resolver.segments("a @Sami Khan b @{1}");
        assert_eq!(segments.next(), Some(text("a ")));
        assert_eq!(segments.next(), Some(mention("@Sami Khan b", None)));
        assert_eq!(segments.next(), Some(text(" ")));
        assert_eq!(segments.next(), Some(mention("@{1}", Some(&users[0]))));
        assert_eq!(segments.next(), None);
    }

    #[test]
    fn test_name_token_len() {
        assert_eq!(name_token_len("Sami Ullah, hi"), "Sami Ullah".len());
        assert_eq!(name_token_len("Sami "), "Sami".len());
        assert_eq!(name_token_len(" Sami"), 0);
        assert_eq!(name_token_len(""), 0);
        assert_eq!(name_token_len("a b#c"), "a b".len());
    }

    #[test]
    fn test_id_token() {
        assert_eq!(id_token("{42} x"), Some((4, "42")));
        assert_eq!(id_token("id:42abc"), Some((5, "42")));
        assert_eq!(id_token("<4>"), Some((3, "4")));
        assert_eq!(id_token("{}"), None);
        assert_eq!(id_token("[4}"), None);
        assert_eq!(id_token("ID:4"), None);
    }
}
