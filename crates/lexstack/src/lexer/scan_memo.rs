//! # Scan Memo
//!
//! `fancy_regex` has no anchored search; trying a fancy rule at the cursor
//! scans ahead to its next match anywhere in the text. Re-scanning at every
//! cursor position is quadratic on long stretches without a match.
//!
//! A [`ScanMemo`] remembers, per rule, where the next match starts. While
//! the cursor has not passed that start, the rule can only match exactly
//! there, and no new search is needed.

use crate::{errors::LSResult, rules::CompiledRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NextMatch {
    origin: usize,
    start: Option<usize>,
}

/// Per-scan memo of next match starts for unanchored (fancy) rules.
///
/// A memo is only valid for one text; the cursor must not move backwards.
#[derive(Debug, Clone, Default)]
pub struct ScanMemo {
    next: Vec<Option<NextMatch>>,
    searches: usize,
}

impl ScanMemo {
    /// Create an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of forward searches run so far.
    pub fn searches(&self) -> usize {
        self.searches
    }

    /// Can `rule` match at `at`?
    ///
    /// Rules on the anchored engine always answer `true`; the caller's
    /// anchored match decides. For fancy rules, `false` is exact.
    pub fn may_match(
        &mut self,
        rule: &CompiledRule,
        text: &str,
        at: usize,
    ) -> LSResult<bool> {
        if !rule.regex().is_fancy() {
            return Ok(true);
        }

        let slot = rule.slot();
        if let Some(Some(NextMatch { origin, start })) = self.next.get(slot).copied()
            && origin <= at
        {
            match start {
                None => return Ok(false),
                Some(start) if at <= start => return Ok(at == start),
                Some(_) => {}
            }
        }

        self.searches += 1;
        let start = rule.next_match_start(text, at)?;
        if self.next.len() <= slot {
            self.next.resize(slot + 1, None);
        }
        self.next[slot] = Some(NextMatch { origin: at, start });
        Ok(start == Some(at))
    }
}
