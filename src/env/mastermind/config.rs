//! Mastermind environment configuration
//!
//! Defines the game parameters, the reward policy and the secret schedule,
//! with validation and builder-style setters. Configs serialize to JSON.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use super::code_index::MAX_CODES;

/// How secrets are chosen at each reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretSchedule {
    /// Uniformly random secret per episode
    #[default]
    Random,

    /// Walk every code in index order, one per episode, then fall back to
    /// `Random`
    Sweep,
}

/// Mastermind environment parameters
///
/// Defaults are the reference game: 4 values, 4 digits, 8 guesses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MastermindConfig {
    /// Alphabet size (V)
    pub values: usize,

    /// Code length (L)
    pub size: usize,

    /// Maximum number of guesses per episode
    pub guess_max: usize,

    /// Reward for guessing the secret
    pub win_reward: f32,

    /// Reward when the guess budget runs out
    pub loss_reward: f32,

    /// Reward for any other step
    pub step_reward: f32,

    /// Added to the reward when a guess repeats an earlier one
    pub repeat_penalty: f32,

    /// Fixed width of the feedback code; derived from the peg count if unset
    pub feedback_bits: Option<usize>,

    /// Secret selection at reset
    pub secret_schedule: SecretSchedule,
}

impl Default for MastermindConfig {
    fn default() -> Self {
        Self {
            values: 4,
            size: 4,
            guess_max: 8,
            win_reward: 100.0,
            loss_reward: -12.0,
            step_reward: -1.0,
            repeat_penalty: -5.0,
            feedback_bits: None,
            secret_schedule: SecretSchedule::Random,
        }
    }
}

impl MastermindConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid Mastermind config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.values < 2 {
            return Err(anyhow!("values must be at least 2"));
        }
        if self.values > u8::MAX as usize {
            return Err(anyhow!("values must be at most {}", u8::MAX));
        }
        if self.size == 0 {
            return Err(anyhow!("size must be positive"));
        }
        if self.guess_max == 0 {
            return Err(anyhow!("guess_max must be positive"));
        }
        let codes = u32::try_from(self.size).ok().and_then(|exp| self.values.checked_pow(exp));
        match codes {
            Some(n) if n <= MAX_CODES => {}
            _ => {
                return Err(anyhow!(
                    "{}^{} codes exceed the limit of {}",
                    self.values,
                    self.size,
                    MAX_CODES
                ))
            }
        }
        let rewards =
            [self.win_reward, self.loss_reward, self.step_reward, self.repeat_penalty];
        if rewards.iter().any(|r| !r.is_finite()) {
            return Err(anyhow!("rewards must be finite"));
        }
        Ok(())
    }

    /// Set alphabet size
    pub fn values(mut self, values: usize) -> Self {
        self.values = values;
        self
    }

    /// Set code length
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set guess budget
    pub fn guess_max(mut self, guess_max: usize) -> Self {
        self.guess_max = guess_max;
        self
    }

    /// Set win reward
    pub fn win_reward(mut self, reward: f32) -> Self {
        self.win_reward = reward;
        self
    }

    /// Set budget-exhausted reward
    pub fn loss_reward(mut self, reward: f32) -> Self {
        self.loss_reward = reward;
        self
    }

    /// Set per-step reward
    pub fn step_reward(mut self, reward: f32) -> Self {
        self.step_reward = reward;
        self
    }

    /// Set repeated-guess penalty
    pub fn repeat_penalty(mut self, penalty: f32) -> Self {
        self.repeat_penalty = penalty;
        self
    }

    /// Force the feedback code width
    pub fn feedback_bits(mut self, bits: usize) -> Self {
        self.feedback_bits = Some(bits);
        self
    }

    /// Set secret schedule
    pub fn secret_schedule(mut self, schedule: SecretSchedule) -> Self {
        self.secret_schedule = schedule;
        self
    }
}
