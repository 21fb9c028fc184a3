//! Mastermind code-breaking environment
//!
//! The agent has a bounded number of guesses to find a hidden code of `L`
//! digits over `V` values. Each guess is scored with feedback pegs:
//! - `2`: right digit in the right position
//! - `1`: right digit in the wrong position
//! - `0`: otherwise
//!
//! Actions are continuous vectors with one slot per bit of the binary guess
//! index; observations are `[step] ++ [guess bits] ++ [feedback bits]`.
//! Rewards: +100 for the secret, -12 when the budget runs out, -1 for any
//! other guess, and an extra -5 for repeating a guess.

pub use code_index::{bit_width, BitCode, Code, CodeIndex};
pub use config::{MastermindConfig, SecretSchedule};
pub use environment::{discretize, EpisodePhase, MastermindEnv, MastermindTables};
pub use error::MastermindError;
pub use evaluation::{EvaluationEntry, EvaluationLog};
pub use feedback::FeedbackIndex;
pub use observation::ObservationLayout;
pub use scoring::{score, FeedbackOutcome};

mod code_index;
mod config;
mod environment;
mod error;
mod evaluation;
mod feedback;
mod observation;
mod scoring;

/// Create the reference environment (4 values, 4 digits, 8 guesses)
pub fn make_mastermind_env() -> anyhow::Result<MastermindEnv> {
    MastermindEnv::new(MastermindConfig::default())
}
