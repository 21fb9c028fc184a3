//! Vectorized environment pool for parallel execution
//!
//! Runs many environment instances at once on Rayon's thread pool. Each
//! instance owns its episode state; only read-only data (such as the
//! Mastermind lookup tables) may be shared between them.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mastermind_rl::env::{
//!     mastermind::{MastermindConfig, MastermindEnv, MastermindTables},
//!     pool::EnvPool,
//! };
//!
//! let config = MastermindConfig::default();
//! let tables = Arc::new(MastermindTables::build(&config).unwrap());
//! let mut pool = EnvPool::new(
//!     || MastermindEnv::with_tables(config.clone(), Arc::clone(&tables)).unwrap(),
//!     4,
//! );
//!
//! let observations = pool.reset().unwrap();
//! assert_eq!(observations.len(), 4);
//!
//! let actions = vec![vec![0.0; 8]; 4];
//! let results = pool.step(&actions).unwrap();
//! assert_eq!(results.len(), 4);
//! ```

use anyhow::Result;
use rayon::prelude::*;

use crate::env::{Environment, SpaceInfo, StepResult};

/// A pool of environments for parallel execution
pub struct EnvPool<E: Environment> {
    /// Vector of environment instances
    envs: Vec<E>,

    /// Number of environments
    num_envs: usize,
}

impl<E> EnvPool<E>
where
    E: Environment + Send,
    E::Observation: Send,
    E::Action: Clone + Sync,
{
    /// Create a new environment pool
    ///
    /// # Arguments
    ///
    /// * `env_fn` - Factory function to create environment instances
    /// * `num_envs` - Number of parallel environments
    pub fn new<F>(env_fn: F, num_envs: usize) -> Self
    where
        F: Fn() -> E,
    {
        let envs = (0..num_envs).map(|_| env_fn()).collect();
        Self { envs, num_envs }
    }

    /// Reset all environments in parallel
    ///
    /// Returns one initial observation per environment.
    pub fn reset(&mut self) -> Result<Vec<E::Observation>> {
        self.envs.par_iter_mut().map(|env| env.reset()).collect()
    }

    /// Step all environments in parallel with given actions
    ///
    /// # Panics
    ///
    /// Panics if the number of actions doesn't match the number of
    /// environments.
    pub fn step(&mut self, actions: &[E::Action]) -> Result<Vec<StepResult<E::Observation>>> {
        assert_eq!(
            actions.len(),
            self.num_envs,
            "Number of actions must match number of environments"
        );

        self.envs
            .par_iter_mut()
            .zip(actions.par_iter())
            .map(|(env, action)| env.step(action.clone()))
            .collect()
    }

    /// Seed environment `i` with `base + i`
    ///
    /// Returns the seed used by each environment.
    pub fn seed(&mut self, base: u64) -> Vec<u64> {
        self.envs
            .iter_mut()
            .enumerate()
            .flat_map(|(i, env)| env.seed(Some(base.wrapping_add(i as u64))))
            .collect()
    }

    /// Get the number of environments in the pool
    pub fn num_envs(&self) -> usize {
        self.num_envs
    }

    /// Get observation space information from first environment
    pub fn observation_space(&self) -> Option<SpaceInfo> {
        self.envs.first().map(|env| env.observation_space())
    }

    /// Get action space information from first environment
    pub fn action_space(&self) -> Option<SpaceInfo> {
        self.envs.first().map(|env| env.action_space())
    }

    /// Reset a specific environment by index
    ///
    /// # Returns
    ///
    /// Initial observation from the reset environment
    pub fn reset_env(&mut self, env_id: usize) -> Result<E::Observation> {
        match self.envs.get_mut(env_id) {
            Some(env) => env.reset(),
            None => anyhow::bail!("environment {} out of range (pool has {})", env_id, self.num_envs),
        }
    }

    /// Access one environment
    pub fn env(&self, env_id: usize) -> Option<&E> {
        self.envs.get(env_id)
    }
}

/// Result of stepping an environment pool
///
/// Contains observations, rewards, and termination flags for all
/// environments.
#[derive(Debug, Clone)]
pub struct PoolStepResult<O> {
    /// Observations for each environment
    pub observations: Vec<O>,

    /// Rewards for each environment
    pub rewards: Vec<f32>,

    /// Termination flags for each environment
    pub terminated: Vec<bool>,
}

impl<E> EnvPool<E>
where
    E: Environment + Send,
    E::Observation: Send,
    E::Action: Clone + Sync,
{
    /// Step all environments and return structured result
    ///
    /// Unpacks individual StepResults into parallel vectors.
    pub fn step_structured(&mut self, actions: &[E::Action]) -> Result<PoolStepResult<E::Observation>> {
        let results = self.step(actions)?;

        let mut observations = Vec::with_capacity(self.num_envs);
        let mut rewards = Vec::with_capacity(self.num_envs);
        let mut terminated = Vec::with_capacity(self.num_envs);

        for result in results {
            observations.push(result.observation);
            rewards.push(result.reward);
            terminated.push(result.terminated);
        }

        Ok(PoolStepResult { observations, rewards, terminated })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::env::mastermind::{MastermindConfig, MastermindEnv, MastermindTables};

    fn pool(num_envs: usize) -> EnvPool<MastermindEnv> {
        let config = MastermindConfig::default();
        let tables = Arc::new(MastermindTables::build(&config).unwrap());
        EnvPool::new(
            || MastermindEnv::with_tables(config.clone(), Arc::clone(&tables)).unwrap(),
            num_envs,
        )
    }

    #[test]
    fn test_pool_creation() {
        let pool = pool(4);
        assert_eq!(pool.num_envs(), 4);
    }

    #[test]
    fn test_pool_shares_tables() {
        let pool = pool(3);
        let first = pool.env(0).unwrap().tables();
        let last = pool.env(2).unwrap().tables();
        assert!(Arc::ptr_eq(first, last));
    }

    #[test]
    fn test_pool_reset() {
        let mut pool = pool(4);
        let observations = pool.reset().unwrap();

        assert_eq!(observations.len(), 4);
        for obs in observations {
            assert_eq!(obs, vec![0.0; 13]);
        }
    }

    #[test]
    fn test_pool_step() {
        let mut pool = pool(4);
        pool.reset().unwrap();

        let actions = vec![vec![0.0; 8], vec![1.0; 8], vec![0.2; 8], vec![0.7; 8]];
        let results = pool.step(&actions).unwrap();

        assert_eq!(results.len(), 4);
        for result in results {
            assert_eq!(result.observation.len(), 13);
            assert_eq!(result.observation[0], 1.0);
            assert!(!result.terminated);
        }
    }

    #[test]
    fn test_pool_step_structured() {
        let mut pool = pool(4);
        pool.reset().unwrap();

        let result = pool.step_structured(&vec![vec![0.0; 8]; 4]).unwrap();

        assert_eq!(result.observations.len(), 4);
        assert_eq!(result.rewards, vec![-1.0; 4]);
        assert_eq!(result.terminated, vec![false; 4]);
    }

    #[test]
    fn test_pool_step_propagates_errors() {
        let mut pool = pool(2);
        pool.reset().unwrap();
        let actions = vec![vec![0.0; 8], vec![3.0; 8]];
        assert!(pool.step(&actions).is_err());
    }

    #[test]
    #[should_panic(expected = "Number of actions must match number of environments")]
    fn test_pool_step_wrong_action_count() {
        let mut pool = pool(4);
        pool.reset().unwrap();

        let actions = vec![vec![0.0; 8]; 2];
        let _ = pool.step(&actions);
    }

    #[test]
    fn test_pool_seeding_is_reproducible() {
        let mut a = pool(4);
        let mut b = pool(4);
        assert_eq!(a.seed(100), vec![100, 101, 102, 103]);
        b.seed(100);
        a.reset().unwrap();
        b.reset().unwrap();
        for i in 0..4 {
            assert_eq!(a.env(i).unwrap().secret(), b.env(i).unwrap().secret());
        }
    }

    #[test]
    fn test_pool_reset_env() {
        let mut pool = pool(2);
        assert!(pool.reset_env(1).is_ok());
        assert!(pool.reset_env(2).is_err());
    }

    #[test]
    fn test_pool_spaces() {
        let pool = pool(2);
        assert_eq!(pool.observation_space().unwrap().shape, vec![13]);
        assert_eq!(pool.action_space().unwrap().shape, vec![8]);
    }
}
