//! Per-step reward tracking
//!
//! Environments notify [`StepObserver`]s after every successful step. The
//! stock observer, [`RewardHistory`], keeps a bounded window of recent
//! rewards and the running window mean for plotting or logging elsewhere.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::env::mastermind::Code;

/// What happened on one step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    /// Guesses made so far this episode, including this one
    pub guess_count: usize,

    /// The decoded guess
    pub guess: Code,

    /// Reward returned for the step
    pub reward: f32,

    /// Whether the step ended the episode
    pub terminated: bool,

    /// Whether the guess matched the secret
    pub solved: bool,

    /// Whether the guess repeated an earlier one in the same episode
    pub repeated: bool,
}

/// Receives a record after every step
pub trait StepObserver: Send {
    /// Called once per successful step
    fn on_step(&mut self, record: &StepRecord);
}

impl<T: StepObserver> StepObserver for Arc<Mutex<T>> {
    fn on_step(&mut self, record: &StepRecord) {
        if let Ok(mut inner) = self.lock() {
            inner.on_step(record);
        }
    }
}

/// Default number of recent rewards kept by [`RewardHistory`]
pub const DEFAULT_REWARD_WINDOW: usize = 3000;

/// Windowed reward statistics
///
/// Each step contributes `reward * guess_count`, so late-episode rewards
/// weigh more heavily.
#[derive(Debug, Clone, Serialize)]
pub struct RewardHistory {
    window: usize,
    recent: VecDeque<f32>,
    mean_history: Vec<f32>,
    episode_lengths: Vec<usize>,
    total_steps: usize,
    solved_episodes: usize,
}

impl RewardHistory {
    /// Create a history with the given window size
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            recent: VecDeque::with_capacity(window.max(1)),
            mean_history: Vec::new(),
            episode_lengths: Vec::new(),
            total_steps: 0,
            solved_episodes: 0,
        }
    }

    /// Mean of the current window, 0 when empty
    pub fn recent_mean(&self) -> f32 {
        if self.recent.is_empty() {
            return 0.0;
        }
        self.recent.iter().sum::<f32>() / self.recent.len() as f32
    }

    /// Window mean after each step so far
    pub fn mean_history(&self) -> &[f32] {
        &self.mean_history
    }

    /// Guess count of every finished episode
    pub fn episode_lengths(&self) -> &[usize] {
        &self.episode_lengths
    }

    /// Steps observed
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Finished episodes
    pub fn episodes(&self) -> usize {
        self.episode_lengths.len()
    }

    /// Fraction of finished episodes that were solved
    pub fn solve_rate(&self) -> f32 {
        if self.episode_lengths.is_empty() {
            return 0.0;
        }
        self.solved_episodes as f32 / self.episode_lengths.len() as f32
    }
}

impl Default for RewardHistory {
    fn default() -> Self {
        Self::new(DEFAULT_REWARD_WINDOW)
    }
}

impl StepObserver for RewardHistory {
    fn on_step(&mut self, record: &StepRecord) {
        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(record.reward * record.guess_count as f32);
        self.mean_history.push(self.recent_mean());
        self.total_steps += 1;

        if record.terminated {
            self.episode_lengths.push(record.guess_count);
            if record.solved {
                self.solved_episodes += 1;
            }
        }
    }
}
