//! Per-secret guess log collected during a sweep

use serde::{Deserialize, Serialize};

use super::code_index::Code;

/// Guesses made against one scheduled secret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationEntry {
    /// The secret of the episode
    pub secret: Code,

    /// Decoded guesses in submission order
    pub guesses: Vec<Code>,
}

impl EvaluationEntry {
    /// Whether the last guess hit the secret
    pub fn solved(&self) -> bool {
        self.guesses.last() == Some(&self.secret)
    }
}

/// Ordered record of finished sweep episodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationLog {
    entries: Vec<EvaluationEntry>,
}

impl EvaluationLog {
    /// Append a finished episode
    pub fn record(&mut self, secret: Code, guesses: Vec<Code>) {
        self.entries.push(EvaluationEntry { secret, guesses });
    }

    /// Entries in episode order
    pub fn entries(&self) -> &[EvaluationEntry] {
        &self.entries
    }

    /// Number of recorded episodes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True before any episode is recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fraction of recorded episodes that were solved
    pub fn solve_rate(&self) -> f32 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.entries.iter().filter(|e| e.solved()).count() as f32 / self.entries.len() as f32
    }

    /// Mean number of guesses per recorded episode
    pub fn mean_guesses(&self) -> f32 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let total: usize = self.entries.iter().map(|e| e.guesses.len()).sum();
        total as f32 / self.entries.len() as f32
    }
}
