//! Error types for the Mastermind environment

use thiserror::Error;

/// Failures surfaced by the Mastermind components
///
/// All of these are local and synchronous. Nothing in the environment
/// retries; the caller decides whether to fix the input or call `reset`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MastermindError {
    /// A raw action component lies outside `[0, 1]` (or is NaN)
    #[error("action component {index} = {value} is outside [0, 1]")]
    InvalidActionValue {
        /// Slot of the offending component
        index: usize,
        /// The rejected value
        value: f32,
    },

    /// The action vector does not have one slot per action bit
    #[error("expected {expected} action components, got {actual}")]
    ActionWidth {
        /// Number of action bits
        expected: usize,
        /// Number of components received
        actual: usize,
    },

    /// A binary code whose value addresses nothing in its table
    #[error("binary code {value} has no entry (table holds {limit} entries)")]
    UnrepresentableCode {
        /// Numeric value of the code
        value: usize,
        /// Number of valid entries
        limit: usize,
    },

    /// A peg sequence that is not a valid feedback outcome
    #[error("feedback pegs {pegs:?} are not a valid outcome for {size} pegs")]
    UnknownFeedback {
        /// The rejected pegs
        pegs: Vec<u8>,
        /// Expected number of pegs
        size: usize,
    },

    /// A code of the wrong length or with a digit outside the alphabet
    #[error("code {digits:?} is not a {size}-digit code over {values} values")]
    CodeShape {
        /// The rejected digits
        digits: Vec<u8>,
        /// Expected length
        size: usize,
        /// Alphabet size
        values: usize,
    },

    /// A table does not fit in its binary width or size cap
    #[error("capacity overflow: {0}")]
    CapacityOverflow(String),

    /// `step` was called after the episode reached a terminal state
    #[error("episode is finished; call reset() before stepping again")]
    EpisodeFinished,
}
