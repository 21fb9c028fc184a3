//! Mastermind episode controller
//!
//! Owns the secret and the episode state, drives the lookup tables on every
//! step and applies the reward policy.

use std::fmt;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use rand::{rngs::StdRng, SeedableRng};

use super::{
    code_index::{BitCode, Code, CodeIndex},
    config::{MastermindConfig, SecretSchedule},
    error::MastermindError,
    evaluation::EvaluationLog,
    feedback::FeedbackIndex,
    observation::ObservationLayout,
    scoring::score,
};
use crate::env::{Environment, SpaceInfo, SpaceType, StepInfo, StepResult};
use crate::stats::{StepObserver, StepRecord};

/// Action components at or above this value discretize to 1
pub const ACTION_THRESHOLD: f32 = 0.5;

/// Read-only lookup tables shared by every environment of one configuration
#[derive(Debug, Clone)]
pub struct MastermindTables {
    codes: CodeIndex,
    feedback: FeedbackIndex,
    layout: ObservationLayout,
}

impl MastermindTables {
    /// Build the code index, feedback index and observation layout
    pub fn build(config: &MastermindConfig) -> Result<Self, MastermindError> {
        let codes = CodeIndex::build(config.values, config.size)?;
        let feedback = FeedbackIndex::build_with_width(config.size, config.feedback_bits)?;
        let layout = ObservationLayout::new(codes.width(), feedback.width(), config.guess_max);
        Ok(Self { codes, feedback, layout })
    }

    /// Code space index
    pub fn codes(&self) -> &CodeIndex {
        &self.codes
    }

    /// Feedback index
    pub fn feedback(&self) -> &FeedbackIndex {
        &self.feedback
    }

    /// Observation layout
    pub fn layout(&self) -> &ObservationLayout {
        &self.layout
    }

    fn matches(&self, config: &MastermindConfig) -> bool {
        self.codes.values() == config.values
            && self.codes.size() == config.size
            && config.feedback_bits.map_or(true, |bits| bits == self.feedback.width())
            && self.layout.high()[0] == config.guess_max as f32
    }
}

/// Episode state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodePhase {
    /// Guesses remain
    Active,

    /// Secret guessed or budget exhausted; only `reset` is valid
    Terminal,
}

/// Threshold a continuous action into a binary action code
///
/// Every component must lie in `[0, 1]`.
pub fn discretize(action: &[f32], width: usize) -> Result<BitCode, MastermindError> {
    if action.len() != width {
        return Err(MastermindError::ActionWidth { expected: width, actual: action.len() });
    }
    let bits = action
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if !(0.0..=1.0).contains(&value) {
                return Err(MastermindError::InvalidActionValue { index, value });
            }
            Ok(u8::from(value >= ACTION_THRESHOLD))
        })
        .collect::<Result<Vec<u8>, _>>()?;
    Ok(BitCode::from_bits(bits))
}

/// Single-agent Mastermind environment
///
/// The agent submits one continuous value per action bit; the thresholded
/// bits address a guess, which is scored against the hidden secret.
pub struct MastermindEnv {
    config: MastermindConfig,
    tables: Arc<MastermindTables>,
    rng: StdRng,
    seed: u64,

    // Episode state
    secret: Code,
    guess_count: usize,
    tried: Vec<Code>,
    repeats: usize,
    observation: Vec<f32>,
    phase: EpisodePhase,
    episode: usize,

    // Sweep bookkeeping
    schedule: SecretSchedule,
    sweep_cursor: usize,
    scheduled: bool,
    evaluation: EvaluationLog,

    observers: Vec<Box<dyn StepObserver>>,
}

impl MastermindEnv {
    /// Create an environment, building fresh lookup tables
    pub fn new(config: MastermindConfig) -> Result<Self> {
        config.validate()?;
        let tables = Arc::new(MastermindTables::build(&config)?);
        Self::with_tables(config, tables)
    }

    /// Create an environment over tables shared with other instances
    pub fn with_tables(config: MastermindConfig, tables: Arc<MastermindTables>) -> Result<Self> {
        config.validate()?;
        if !tables.matches(&config) {
            return Err(anyhow!("lookup tables were built for a different configuration"));
        }

        let seed = rand::random();
        let observation = tables.layout.initial();
        let schedule = config.secret_schedule;
        let placeholder = Code::new(vec![0; config.size]);

        let mut env = Self {
            config,
            tables,
            rng: StdRng::seed_from_u64(seed),
            seed,
            secret: placeholder,
            guess_count: 0,
            tried: Vec::new(),
            repeats: 0,
            observation,
            phase: EpisodePhase::Active,
            episode: 0,
            schedule,
            sweep_cursor: 0,
            scheduled: false,
            evaluation: EvaluationLog::default(),
            observers: Vec::new(),
        };
        env.reset_episode();
        Ok(env)
    }

    /// Register an observer notified after every step
    pub fn add_observer(&mut self, observer: Box<dyn StepObserver>) {
        self.observers.push(observer);
    }

    /// Start a new episode against a chosen secret
    ///
    /// The first-guess rule still applies.
    pub fn reset_with_secret(&mut self, secret: Code) -> Result<Vec<f32>, MastermindError> {
        self.tables.codes.rank(&secret)?;
        self.begin_episode(secret, false);
        Ok(self.observation.clone())
    }

    /// Submit a code directly instead of a continuous action
    pub fn step_code(&mut self, code: &Code) -> Result<StepResult<Vec<f32>>, MastermindError> {
        let bits = self.tables.codes.encode(code)?;
        let action: Vec<f32> = bits.bits().iter().map(|&b| b as f32).collect();
        self.try_step(&action)
    }

    /// Advance the episode by one guess
    ///
    /// Invalid actions are rejected before any state changes.
    pub fn try_step(&mut self, action: &[f32]) -> Result<StepResult<Vec<f32>>, MastermindError> {
        if self.phase == EpisodePhase::Terminal {
            return Err(MastermindError::EpisodeFinished);
        }

        let bits = discretize(action, self.tables.codes.width())?;
        let guess = self.tables.codes.decode(&bits)?.clone();
        let guess_count = self.guess_count + 1;

        let mut secret = self.secret.clone();
        if guess_count == 1 && guess == secret && !self.scheduled {
            while secret == self.secret {
                secret = self.tables.codes.random_code(&mut self.rng);
            }
            tracing::debug!(
                episode = self.episode,
                old = %self.secret,
                new = %secret,
                "first guess hit the secret; drew a new one"
            );
        }

        let solved = guess == secret;
        let terminated = solved || guess_count >= self.config.guess_max;
        let mut reward = if solved {
            self.config.win_reward
        } else if terminated {
            self.config.loss_reward
        } else {
            self.config.step_reward
        };

        let repeated = self.tried.contains(&guess);
        if repeated {
            reward += self.config.repeat_penalty;
        }

        let outcome = score(&secret, &guess);
        let feedback = self.tables.feedback.encode(&outcome)?;
        let observation = self.tables.layout.assemble(guess_count, &bits, feedback)?;

        self.secret = secret;
        self.guess_count = guess_count;
        self.observation = observation;
        if repeated {
            self.repeats += 1;
        }
        self.tried.push(guess.clone());

        if terminated {
            self.phase = EpisodePhase::Terminal;
            if self.scheduled {
                self.evaluation.record(self.secret.clone(), self.tried.clone());
            }
            tracing::debug!(
                episode = self.episode,
                secret = %self.secret,
                guesses = guess_count,
                solved,
                "episode finished"
            );
        }

        let record = StepRecord { guess_count, guess, reward, terminated, solved, repeated };
        for observer in &mut self.observers {
            observer.on_step(&record);
        }

        Ok(StepResult {
            observation: self.observation.clone(),
            reward,
            terminated,
            info: StepInfo::default(),
        })
    }

    /// Current secret
    pub fn secret(&self) -> &Code {
        &self.secret
    }

    /// Guesses made this episode
    pub fn guess_count(&self) -> usize {
        self.guess_count
    }

    /// Decoded guesses of this episode in order
    pub fn tried(&self) -> &[Code] {
        &self.tried
    }

    /// Repeated guesses this episode
    pub fn repeats(&self) -> usize {
        self.repeats
    }

    /// Current observation
    pub fn observation(&self) -> &[f32] {
        &self.observation
    }

    /// Episode phase
    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    /// Number of episodes started
    pub fn episode(&self) -> usize {
        self.episode
    }

    /// Seed of the current randomness source
    pub fn current_seed(&self) -> u64 {
        self.seed
    }

    /// Schedule used for the next reset
    pub fn schedule(&self) -> SecretSchedule {
        self.schedule
    }

    /// Guesses recorded against scheduled secrets
    pub fn evaluation_log(&self) -> &EvaluationLog {
        &self.evaluation
    }

    /// Shared lookup tables
    pub fn tables(&self) -> &Arc<MastermindTables> {
        &self.tables
    }

    /// Environment configuration
    pub fn config(&self) -> &MastermindConfig {
        &self.config
    }

    fn reset_episode(&mut self) {
        let (secret, scheduled) = self.next_secret();
        self.begin_episode(secret, scheduled);
    }

    fn begin_episode(&mut self, secret: Code, scheduled: bool) {
        self.secret = secret;
        self.scheduled = scheduled;
        self.guess_count = 0;
        self.tried.clear();
        self.repeats = 0;
        self.observation = self.tables.layout.initial();
        self.phase = EpisodePhase::Active;
        self.episode += 1;
        tracing::debug!(episode = self.episode, secret = %self.secret, scheduled, "new episode");
    }

    fn next_secret(&mut self) -> (Code, bool) {
        if self.schedule == SecretSchedule::Sweep {
            if let Some(code) = self.tables.codes.get(self.sweep_cursor) {
                self.sweep_cursor += 1;
                return (code.clone(), true);
            }
            tracing::info!(
                episodes = self.evaluation.len(),
                solve_rate = self.evaluation.solve_rate(),
                mean_guesses = self.evaluation.mean_guesses(),
                "sweep complete; switching to random secrets"
            );
            self.schedule = SecretSchedule::Random;
        }
        (self.tables.codes.random_code(&mut self.rng), false)
    }
}

impl fmt::Debug for MastermindEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MastermindEnv")
            .field("config", &self.config)
            .field("seed", &self.seed)
            .field("episode", &self.episode)
            .field("guess_count", &self.guess_count)
            .field("phase", &self.phase)
            .field("schedule", &self.schedule)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Environment for MastermindEnv {
    type Observation = Vec<f32>;
    type Action = Vec<f32>;

    fn reset(&mut self) -> Result<Self::Observation> {
        self.reset_episode();
        Ok(self.observation.clone())
    }

    fn step(&mut self, action: Self::Action) -> Result<StepResult<Self::Observation>> {
        Ok(self.try_step(&action)?)
    }

    fn seed(&mut self, seed: Option<u64>) -> Vec<u64> {
        let seed = seed.unwrap_or_else(rand::random);
        self.rng = StdRng::seed_from_u64(seed);
        self.seed = seed;
        vec![seed]
    }

    fn observation_space(&self) -> SpaceInfo {
        let layout = &self.tables.layout;
        SpaceInfo::bounded(SpaceType::MultiDiscrete, layout.low(), layout.high())
    }

    fn action_space(&self) -> SpaceInfo {
        let width = self.tables.codes.width();
        SpaceInfo::bounded(SpaceType::Continuous, vec![0.0; width], vec![1.0; width])
    }
}
