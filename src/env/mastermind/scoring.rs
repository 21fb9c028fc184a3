//! Feedback peg scoring
//!
//! Standard Mastermind rule: exact-position matches are counted first and
//! removed, then every remaining digit value contributes
//! `min(remaining in secret, remaining in guess)` color-only matches.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::code_index::Code;

/// Peg value for a digit with no match
pub const PEG_NONE: u8 = 0;
/// Peg value for a right digit in the wrong position
pub const PEG_COLOR: u8 = 1;
/// Peg value for a right digit in the right position
pub const PEG_EXACT: u8 = 2;

/// Multiset of feedback pegs for one guess
///
/// Pegs carry no position, so the outcome is stored as counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedbackOutcome {
    exact: usize,
    color: usize,
    size: usize,
}

impl FeedbackOutcome {
    /// Outcome with the given counts, `None` if they exceed `size` pegs
    pub fn new(exact: usize, color: usize, size: usize) -> Option<Self> {
        (exact + color <= size).then_some(Self { exact, color, size })
    }

    /// Count the pegs of an arbitrary peg sequence
    ///
    /// Returns `None` if any peg is not 0, 1 or 2.
    pub fn from_pegs(pegs: &[u8]) -> Option<Self> {
        let mut exact = 0;
        let mut color = 0;
        for &peg in pegs {
            match peg {
                PEG_EXACT => exact += 1,
                PEG_COLOR => color += 1,
                PEG_NONE => {}
                _ => return None,
            }
        }
        Some(Self { exact, color, size: pegs.len() })
    }

    /// Number of exact-position pegs
    pub fn exact(&self) -> usize {
        self.exact
    }

    /// Number of color-only pegs
    pub fn color(&self) -> usize {
        self.color
    }

    /// Number of empty pegs
    pub fn none(&self) -> usize {
        self.size - self.exact - self.color
    }

    /// Total number of pegs
    pub fn size(&self) -> usize {
        self.size
    }

    /// True when every peg is an exact match
    pub fn is_solved(&self) -> bool {
        self.exact == self.size
    }

    /// Canonical peg sequence: 0s, then 1s, then 2s
    pub fn pegs(&self) -> Vec<u8> {
        let mut pegs = Vec::with_capacity(self.size);
        pegs.extend(std::iter::repeat(PEG_NONE).take(self.none()));
        pegs.extend(std::iter::repeat(PEG_COLOR).take(self.color));
        pegs.extend(std::iter::repeat(PEG_EXACT).take(self.exact));
        pegs
    }
}

impl fmt::Display for FeedbackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for peg in self.pegs() {
            write!(f, "{peg}")?;
        }
        Ok(())
    }
}

/// Score a guess against the secret
///
/// # Panics
///
/// Panics if the two codes have different lengths.
pub fn score(secret: &Code, guess: &Code) -> FeedbackOutcome {
    assert_eq!(secret.len(), guess.len(), "Guess and secret must have the same length");

    let mut secret_left = [0usize; 256];
    let mut guess_left = [0usize; 256];
    let mut exact = 0;

    for (&s, &g) in secret.digits().iter().zip(guess.digits()) {
        if s == g {
            exact += 1;
        } else {
            secret_left[s as usize] += 1;
            guess_left[g as usize] += 1;
        }
    }

    let color = secret_left.iter().zip(guess_left.iter()).map(|(&s, &g)| s.min(g)).sum();

    FeedbackOutcome { exact, color, size: secret.len() }
}
