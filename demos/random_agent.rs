//! Random agent baseline for Mastermind
//!
//! Drives a pool of environments with uniformly random actions and reports
//! the reward statistics, then runs one exhaustive sweep over every secret.
//! Useful as the floor any learned policy has to beat.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example random_agent --release
//! RUST_LOG=mastermind_rl=debug cargo run --example random_agent
//! ```

use std::sync::{Arc, Mutex};

use anyhow::Result;
use mastermind_rl::{env::mastermind::MastermindTables, prelude::*};
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

const NUM_ENVS: usize = 8;
const TOTAL_EPISODES: usize = 2_000;
const SEED: u64 = 1235;

/// Random action whose thresholded bits address a valid code
fn random_action<R: Rng>(rng: &mut R, width: usize, codes: usize) -> Vec<f32> {
    let index = rng.gen_range(0..codes);
    (0..width)
        .rev()
        .map(|shift| if (index >> shift) & 1 == 1 { rng.gen_range(0.5..=1.0) } else { rng.gen_range(0.0..0.5) })
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = MastermindConfig::default();
    config.validate()?;
    let tables = Arc::new(MastermindTables::build(&config)?);
    let width = tables.codes().width();
    let codes = tables.codes().len();

    tracing::info!("Environment: Mastermind");
    tracing::info!("  Values: {}  Size: {}  Guesses: {}", config.values, config.size, config.guess_max);
    tracing::info!("  Codes: {}  Action bits: {}", codes, width);
    tracing::info!("  Feedback outcomes: {}  Feedback bits: {}", tables.feedback().len(), tables.feedback().width());
    tracing::info!("  Observation size: {}", tables.layout().len());

    let history = Arc::new(Mutex::new(RewardHistory::default()));
    let mut pool = EnvPool::new(
        || {
            let mut env = MastermindEnv::with_tables(config.clone(), Arc::clone(&tables))
                .expect("tables match config");
            env.add_observer(Box::new(Arc::clone(&history)));
            env
        },
        NUM_ENVS,
    );
    pool.seed(SEED);
    pool.reset()?;

    let mut rng = rand::rngs::StdRng::seed_from_u64(SEED);
    let mut finished = 0;
    while finished < TOTAL_EPISODES {
        let actions: Vec<Vec<f32>> =
            (0..NUM_ENVS).map(|_| random_action(&mut rng, width, codes)).collect();
        let results = pool.step(&actions)?;
        for (env_id, result) in results.iter().enumerate() {
            if result.terminated {
                finished += 1;
                pool.reset_env(env_id)?;
            }
        }
    }

    {
        let history = history.lock().map_err(|_| anyhow::anyhow!("reward history poisoned"))?;
        tracing::info!("Random agent over {} episodes:", history.episodes());
        tracing::info!("  Solve rate: {:.3}", history.solve_rate());
        tracing::info!("  Recent weighted reward mean: {:.3}", history.recent_mean());
        let mean_len = history.episode_lengths().iter().sum::<usize>() as f32
            / history.episodes().max(1) as f32;
        tracing::info!("  Mean guesses per episode: {:.2}", mean_len);
    }

    // One pass over every secret
    let sweep_config = config.clone().secret_schedule(SecretSchedule::Sweep);
    let mut env = MastermindEnv::with_tables(sweep_config, Arc::clone(&tables))?;
    env.seed(Some(SEED));
    for episode in 0..codes {
        if episode > 0 {
            env.reset()?;
        }
        loop {
            let result = env.step(random_action(&mut rng, width, codes))?;
            if result.terminated {
                break;
            }
        }
    }
    env.reset()?;

    let log = env.evaluation_log();
    tracing::info!("Sweep: {} secrets, solve rate {:.3}, mean guesses {:.2}", log.len(), log.solve_rate(), log.mean_guesses());
    if let Some(entry) = log.entries().first() {
        tracing::info!("First sweep episode: {}", serde_json::to_string(entry)?);
    }

    Ok(())
}
