//! # Mastermind RL
//!
//! A Mastermind code-breaking environment for reinforcement learning agents.
//!
//! The environment hides a secret code, the agent submits guesses as
//! continuous action vectors, and each guess is answered with feedback pegs
//! packed into a fixed-size observation vector.
//!
//! ## Quick Start
//!
//! ```rust
//! use mastermind_rl::prelude::*;
//!
//! let mut env = MastermindEnv::new(MastermindConfig::default()).unwrap();
//! env.seed(Some(7));
//! let obs = env.reset().unwrap();
//! assert_eq!(obs.len(), 13);
//!
//! let result = env.step(vec![0.0; 8]).unwrap();
//! assert_eq!(result.observation[0], 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Environment traits and implementations
pub mod env;

/// Step observers and reward statistics
pub mod stats;

/// Prelude module for convenient imports
///
/// This module re-exports commonly used types and traits for convenience.
pub mod prelude {
    pub use crate::env::{
        mastermind::{Code, MastermindConfig, MastermindEnv, MastermindError, SecretSchedule},
        pool::EnvPool,
        Environment, SpaceInfo, SpaceType, StepResult,
    };
    pub use crate::stats::{RewardHistory, StepObserver, StepRecord};
}

/// Current version of mastermind-rl
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
