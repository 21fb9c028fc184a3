//! Observation vector assembly
//!
//! Layout: `[step] ++ [action bits] ++ [feedback bits]`, one slot per bit.

use super::{code_index::BitCode, error::MastermindError};

/// Fixed layout of the observation vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationLayout {
    action_bits: usize,
    feedback_bits: usize,
    step_cap: usize,
}

impl ObservationLayout {
    /// Layout for the given code widths; `step_cap` bounds the step slot
    pub fn new(action_bits: usize, feedback_bits: usize, step_cap: usize) -> Self {
        Self { action_bits, feedback_bits, step_cap }
    }

    /// Total number of slots
    pub fn len(&self) -> usize {
        1 + self.action_bits + self.feedback_bits
    }

    /// Never true; the step slot is always present
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Width of the action segment
    pub fn action_bits(&self) -> usize {
        self.action_bits
    }

    /// Width of the feedback segment
    pub fn feedback_bits(&self) -> usize {
        self.feedback_bits
    }

    /// Observation at the start of an episode: all zeros
    pub fn initial(&self) -> Vec<f32> {
        vec![0.0; self.len()]
    }

    /// Merge the step count and both binary codes into one vector
    pub fn assemble(
        &self,
        step: usize,
        action: &BitCode,
        feedback: &BitCode,
    ) -> Result<Vec<f32>, MastermindError> {
        if action.width() != self.action_bits {
            return Err(MastermindError::ActionWidth {
                expected: self.action_bits,
                actual: action.width(),
            });
        }
        if feedback.width() != self.feedback_bits {
            return Err(MastermindError::ActionWidth {
                expected: self.feedback_bits,
                actual: feedback.width(),
            });
        }

        let mut observation = Vec::with_capacity(self.len());
        observation.push(step as f32);
        observation.extend(action.bits().iter().map(|&b| b as f32));
        observation.extend(feedback.bits().iter().map(|&b| b as f32));
        Ok(observation)
    }

    /// Per-slot lower bounds
    pub fn low(&self) -> Vec<f32> {
        vec![0.0; self.len()]
    }

    /// Per-slot upper bounds: the step cap, then 1 for every bit
    pub fn high(&self) -> Vec<f32> {
        let mut high = vec![1.0; self.len()];
        high[0] = self.step_cap as f32;
        high
    }
}
