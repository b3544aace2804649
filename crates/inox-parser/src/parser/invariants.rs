//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;

impl Parser<'_, '_> {
    #[inline]
    pub(super) fn ensure_progress(&self) {
        assert!(
            self.debug_fuel.get() != 0,
            "parser is stuck: too many lookaheads"
        );
        self.debug_fuel.set(self.debug_fuel.get() - 1);
    }

    #[inline]
    pub(super) fn assert_at(&self, expected: u8) {
        let found = self.byte(0);
        assert_eq!(
            found,
            Some(expected),
            "broken parser invariant: expected {:?} but found {:?} (upstream caller's responsibility)",
            expected as char,
            found.map(char::from),
        );
    }
}
