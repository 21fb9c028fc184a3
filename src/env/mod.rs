//! Environment traits and implementations
//!
//! This module defines the core environment interface, the vectorized pool
//! that drives many instances at once, and the Mastermind environment.

use anyhow::Result;

/// Core trait for RL environments
pub trait Environment {
    /// Observation type
    type Observation;

    /// Action type
    type Action;

    /// Reset the environment and return initial observation
    fn reset(&mut self) -> Result<Self::Observation>;

    /// Step the environment with an action
    fn step(&mut self, action: Self::Action) -> Result<StepResult<Self::Observation>>;

    /// Reseed the randomness source and return the seed in use
    ///
    /// `None` draws a fresh seed from OS entropy.
    fn seed(&mut self, seed: Option<u64>) -> Vec<u64>;

    /// Get the observation space description
    fn observation_space(&self) -> SpaceInfo;

    /// Get the action space description
    fn action_space(&self) -> SpaceInfo;
}

/// Result of an environment step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult<O> {
    /// Next observation
    pub observation: O,

    /// Reward received
    pub reward: f32,

    /// Whether the episode terminated
    pub terminated: bool,

    /// Additional info
    pub info: StepInfo,
}

/// Space information for observations and actions
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceInfo {
    /// Shape of the space
    pub shape: Vec<usize>,

    /// Data type
    pub dtype: SpaceType,

    /// Per-component lower bounds
    pub low: Vec<f32>,

    /// Per-component upper bounds
    pub high: Vec<f32>,
}

impl SpaceInfo {
    /// Box space with the given bounds
    pub fn bounded(dtype: SpaceType, low: Vec<f32>, high: Vec<f32>) -> Self {
        debug_assert_eq!(low.len(), high.len());
        Self { shape: vec![low.len()], dtype, low, high }
    }

    /// Whether a vector lies inside the bounds
    pub fn contains(&self, values: &[f32]) -> bool {
        values.len() == self.low.len()
            && values
                .iter()
                .zip(self.low.iter().zip(&self.high))
                .all(|(v, (lo, hi))| (*lo..=*hi).contains(v))
    }
}

/// Space data types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceType {
    /// Continuous space (Box)
    Continuous,

    /// Integer-valued box
    MultiDiscrete,
}

/// Additional step information
///
/// Empty for every built-in environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepInfo {}

pub mod mastermind;
pub mod pool;
