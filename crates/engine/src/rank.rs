use regex::Regex;

use crate::candidate::Candidate;
use crate::policy::PolicyError;

/// A compiled priority pattern.
///
/// Patterns are matched against the basename of a candidate's real content
/// with an implicit anchor at the start: `core` matches `core.1000` but not
/// `score`. The original text is retained for diagnostics.
#[derive(Clone, Debug)]
pub struct PriorityPattern {
    text: String,
    regex: Regex,
}

impl PriorityPattern {
    /// Compiles a pattern, anchoring it at the start of the basename.
    ///
    /// The text is wrapped as `^(?:…)` so alternations anchor as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidPattern`] when the text is not a valid
    /// regular expression.
    pub fn new(text: &str) -> Result<Self, PolicyError> {
        let regex = Regex::new(&format!("^(?:{text})")).map_err(|source| {
            PolicyError::InvalidPattern {
                pattern: text.to_string(),
                source,
            }
        })?;
        Ok(Self {
            text: text.to_string(),
            regex,
        })
    }

    /// Pattern text as supplied by the user.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether `name` matches, prefix-anchored.
    #[must_use]
    pub fn matches_basename(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Orders the purge queue.
///
/// Primary order is ascending deletion time with ties broken by the incoming
/// order (the sort is stable). Priority patterns are then applied in reverse
/// of the user-supplied order: each moves its matches to the front while
/// preserving relative order, so the first-given pattern ends up on top.
pub fn rank_candidates(candidates: &mut Vec<Candidate>, patterns: &[PriorityPattern]) {
    candidates.sort_by_key(Candidate::deletion_time);

    for pattern in patterns.iter().rev() {
        promote_matches(candidates, pattern);
    }
}

/// Stable partition: matching candidates move to the front.
fn promote_matches(candidates: &mut Vec<Candidate>, pattern: &PriorityPattern) {
    let mut matched = Vec::with_capacity(candidates.len());
    let mut rest = Vec::with_capacity(candidates.len());

    for candidate in candidates.drain(..) {
        let is_match = candidate
            .real_basename()
            .is_some_and(|name| pattern.matches_basename(&name));
        if is_match {
            matched.push(candidate);
        } else {
            rest.push(candidate);
        }
    }

    candidates.append(&mut matched);
    candidates.append(&mut rest);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use time::macros::datetime;
    use time::{Duration, PrimitiveDateTime};

    fn candidate(name: &str, deleted: PrimitiveDateTime) -> Candidate {
        Candidate::new(
            PathBuf::from(format!("/t/info/{name}.trashinfo")),
            PathBuf::from(format!("/t/files/{name}")),
            deleted,
            datetime!(2026-06-01 00:00:00),
        )
    }

    fn names(candidates: &[Candidate]) -> Vec<String> {
        candidates
            .iter()
            .map(|candidate| {
                candidate
                    .real_basename()
                    .expect("named candidate")
                    .into_owned()
            })
            .collect()
    }

    fn pattern(text: &str) -> PriorityPattern {
        PriorityPattern::new(text).expect("valid pattern")
    }

    #[test]
    fn sorts_by_deletion_time_ascending() {
        let base = datetime!(2026-01-01 00:00:00);
        let mut queue = vec![
            candidate("new", base + Duration::days(9)),
            candidate("old", base),
            candidate("mid", base + Duration::days(4)),
        ];
        rank_candidates(&mut queue, &[]);
        assert_eq!(names(&queue), vec!["old", "mid", "new"]);
    }

    #[test]
    fn equal_timestamps_keep_enumeration_order() {
        let when = datetime!(2026-01-01 00:00:00);
        let mut queue = vec![
            candidate("first", when),
            candidate("second", when),
            candidate("third", when),
        ];
        rank_candidates(&mut queue, &[]);
        assert_eq!(names(&queue), vec!["first", "second", "third"]);
    }

    #[test]
    fn first_pattern_wins_top_position() {
        let when = datetime!(2026-01-01 00:00:00);
        let mut queue = vec![
            candidate("alpha", when),
            candidate("beta", when),
            candidate("ashes", when),
        ];
        // Reverse iteration applies the second pattern first, then the
        // first, so "beta" ends up above both "a…" matches.
        rank_candidates(&mut queue, &[pattern("beta"), pattern("a")]);
        assert_eq!(names(&queue), vec!["beta", "alpha", "ashes"]);
    }

    #[test]
    fn matched_items_retain_relative_order() {
        let base = datetime!(2026-01-01 00:00:00);
        let mut queue = vec![
            candidate("keep", base),
            candidate("tmp-one", base + Duration::days(1)),
            candidate("tmp-two", base + Duration::days(2)),
        ];
        rank_candidates(&mut queue, &[pattern("tmp")]);
        assert_eq!(names(&queue), vec!["tmp-one", "tmp-two", "keep"]);
    }

    #[test]
    fn ranking_is_idempotent() {
        let base = datetime!(2026-01-01 00:00:00);
        let patterns = [pattern("b"), pattern("c")];
        let mut queue = vec![
            candidate("alpha", base + Duration::days(2)),
            candidate("bravo", base + Duration::days(1)),
            candidate("charlie", base),
        ];

        rank_candidates(&mut queue, &patterns);
        let once = names(&queue);
        rank_candidates(&mut queue, &patterns);
        assert_eq!(names(&queue), once);
    }

    #[test]
    fn matching_is_prefix_anchored_not_full() {
        let anchored = pattern("core");
        assert!(anchored.matches_basename("core.1000"));
        assert!(anchored.matches_basename("core"));
        assert!(!anchored.matches_basename("score"));

        let alternation = pattern("ab|cd");
        assert!(alternation.matches_basename("abacus"));
        assert!(alternation.matches_basename("cdrom"));
        assert!(!alternation.matches_basename("xabcd"));
    }

    #[test]
    fn invalid_patterns_report_their_text() {
        let error = PriorityPattern::new("th[").expect_err("must fail");
        assert!(error.to_string().contains("th["));
    }
}
