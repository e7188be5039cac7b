//! Monte-Carlo opening book construction
//!
//! Every round walks a random line of play from the starting position down
//! to a fixed ply depth, finishes the game with a random rollout, and backs
//! the result up the line with alternating sign. Each position on the line
//! credits the reward to the action taken there.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{ensure, Context, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::ai::simulate;
use crate::core::{Loc, State};
use crate::utils::entropy_seed;

use super::{OpeningBook, TallyStore};

pub const DEFAULT_ROUNDS: usize = 100;
pub const DEFAULT_PLIES: u32 = 4;
pub const DEFAULT_OUTPUT: &str = "data.bin";

/// Parameters of an offline book build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub rounds: usize,
    pub plies: u32,
    pub output: PathBuf,
    pub seed: Option<u64>,
    /// Number of independent tally shards built in parallel
    pub threads: usize,
}

impl BuildOptions {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.rounds > 0, "Number of rounds must be positive");
        ensure!(self.plies > 3, "Number of plies must be greater than 3, got {}", self.plies);
        ensure!(!self.output.as_os_str().is_empty(), "Output path must not be empty");
        ensure!(self.threads > 0, "Number of threads must be positive");
        Ok(())
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            plies: DEFAULT_PLIES,
            output: PathBuf::from(DEFAULT_OUTPUT),
            seed: None,
            threads: 1,
        }
    }
}

/// Samples one random line of `depth` plies below `state`, recording each
/// (state, action, reward) on the way. Returns the reward seen by the
/// caller, which plays for the opponent of the player to move in `state`.
pub fn build_tree<R: Rng + ?Sized>(
    state: &State,
    store: &mut TallyStore,
    depth: u32,
    rng: &mut R,
) -> Result<i64> {
    build_tree_with(state, store, depth, None, rng)
}

/// Like [`build_tree`], but plays `first_action` at the top instead of a
/// random action.
pub fn build_tree_with<R: Rng + ?Sized>(
    state: &State,
    store: &mut TallyStore,
    depth: u32,
    first_action: Option<Loc>,
    rng: &mut R,
) -> Result<i64> {
    if depth == 0 || state.terminal_test() {
        return Ok(-i64::from(simulate(state, rng)?));
    }

    let action = match first_action {
        Some(action) => action,
        None => state.random_action(rng)?,
    };
    let next = state.result(action)?;

    let reward = build_tree_with(&next, store, depth - 1, None, rng)?;
    store.add(state, action, reward);
    Ok(-reward)
}

/// Runs `rounds` independent rounds from `start` into one shared store
pub fn collect_tallies<R: Rng + ?Sized>(
    start: &State,
    rounds: usize,
    plies: u32,
    rng: &mut R,
) -> Result<TallyStore> {
    let mut store = TallyStore::new();
    let report_every = (rounds / 10).max(1);

    for round in 0..rounds {
        build_tree(start, &mut store, plies, rng)?;

        if (round + 1) % report_every == 0 {
            debug!(
                round = round + 1,
                rounds,
                states = store.len(),
                "opening book progress"
            );
        }
    }

    Ok(store)
}

/// Builds a book from the empty standard board
pub fn build_table<R: Rng + ?Sized>(rounds: usize, plies: u32, rng: &mut R) -> Result<OpeningBook> {
    let start_time = Instant::now();
    let store = collect_tallies(&State::default(), rounds, plies, rng)?;

    info!(
        rounds,
        plies,
        states = store.len(),
        entries = store.num_entries(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "opening book built"
    );

    Ok(store.reduce())
}

/// Splits `rounds` across `threads` workers, each filling its own shard
/// with a generator seeded from `seed + worker`, then merges the shards.
pub fn collect_tallies_parallel(
    start: &State,
    rounds: usize,
    plies: u32,
    seed: u64,
    threads: usize,
) -> Result<TallyStore> {
    ensure!(threads > 0, "Number of threads must be positive");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build worker pool")?;

    let shards: Vec<Result<TallyStore>> = pool.install(|| {
        (0..threads)
            .into_par_iter()
            .map(|worker| {
                let share = rounds / threads + usize::from(worker < rounds % threads);
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(worker as u64));
                collect_tallies(start, share, plies, &mut rng)
            })
            .collect()
    });

    let mut store = TallyStore::new();
    for shard in shards {
        store.merge(shard?);
    }
    Ok(store)
}

/// Parallel counterpart of [`build_table`]
pub fn build_table_parallel(rounds: usize, plies: u32, seed: u64, threads: usize) -> Result<OpeningBook> {
    let store = collect_tallies_parallel(&State::default(), rounds, plies, seed, threads)?;
    info!(rounds, plies, threads, states = store.len(), "opening book built");
    Ok(store.reduce())
}

/// Builds the tallies described by `options`, in parallel when more than
/// one thread is requested
pub fn build_tallies(options: &BuildOptions, rng: &mut StdRng) -> Result<TallyStore> {
    options.validate()?;
    let start_time = Instant::now();
    let start = State::default();

    let store = if options.threads > 1 {
        let seed = options.seed.unwrap_or_else(entropy_seed);
        collect_tallies_parallel(&start, options.rounds, options.plies, seed, options.threads)?
    } else {
        collect_tallies(&start, options.rounds, options.plies, rng)?
    };

    info!(
        rounds = options.rounds,
        plies = options.plies,
        threads = options.threads,
        states = store.len(),
        entries = store.num_entries(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "opening book tallies collected"
    );

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardSpec, Player};

    #[test]
    fn test_terminal_state_adds_nothing() {
        let state: State = "xPx/x1x/xxp 3x3 0 8".parse().unwrap();
        let mut store = TallyStore::new();
        let mut rng = StdRng::seed_from_u64(1);

        // the player to move has lost, so the caller gains
        assert_eq!(build_tree(&state, &mut store, 4, &mut rng).unwrap(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_depth_zero_only_simulates() {
        let mut store = TallyStore::new();
        let mut rng = StdRng::seed_from_u64(2);
        let reward = build_tree(&State::default(), &mut store, 0, &mut rng).unwrap();
        assert!(reward == 1 || reward == -1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_one_entry_per_ply_with_alternating_sign() {
        let start = State::default();
        let mut store = TallyStore::new();
        let mut rng = StdRng::seed_from_u64(3);

        let top = build_tree(&start, &mut store, 4, &mut rng).unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(store.num_entries(), 4);

        // walk the recorded line and check the rewards alternate
        let mut state = start;
        let mut expected = -top;
        for _ in 0..4 {
            let tally = store.get(&state).unwrap();
            let (&action, &reward) = tally.iter().next().unwrap();
            assert_eq!(reward, expected);
            state = state.result(action).unwrap();
            expected = -expected;
        }
    }

    #[test]
    fn test_forced_first_action_is_credited() {
        let start = State::default();
        let mut store = TallyStore::new();
        let mut rng = StdRng::seed_from_u64(4);

        build_tree_with(&start, &mut store, 4, Some(Loc::new(5, 4)), &mut rng).unwrap();
        let tally = store.get(&start).unwrap();
        assert_eq!(tally.len(), 1);
        assert_ne!(tally.get(Loc::new(5, 4)), 0);
    }

    #[test]
    fn test_rewards_match_the_rollout_from_the_child() {
        // on this board the second player wins every line, whatever is played
        let state: State = "xPx/p2/x2 3x3 1 5".parse().unwrap();
        assert_eq!(state.player(), Player::Second);

        let mut store = TallyStore::new();
        let mut rng = StdRng::seed_from_u64(5);
        let reward = build_tree(&state, &mut store, 4, &mut rng).unwrap();

        let child = state.result(Loc::new(2, 2)).unwrap();
        let outcome = simulate(&child, &mut rng).unwrap();
        assert_eq!(store.get(&state).unwrap().get(Loc::new(2, 2)), -i64::from(outcome));
        assert_eq!(reward, i64::from(outcome));
    }

    #[test]
    fn test_seeded_builds_are_reproducible() {
        let a = build_table(30, 4, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = build_table(30, 4, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
        assert!(a.contains(&State::default()));
    }

    #[test]
    fn test_rounds_accumulate_into_one_store() {
        let mut rng = StdRng::seed_from_u64(6);
        let board = BoardSpec::new(4, 4).unwrap();
        let store = collect_tallies(&State::new(board), 200, 4, &mut rng).unwrap();

        let root = store.get(&State::new(board)).unwrap();
        let magnitude: i64 = root.iter().map(|(_, reward)| reward.abs()).sum();
        assert!(root.len() > 1);
        assert!(magnitude > 0);
        assert!(magnitude <= 200);
    }

    #[test]
    fn test_parallel_shards_are_deterministic() {
        let start = State::default();
        let a = collect_tallies_parallel(&start, 40, 4, 17, 3).unwrap();
        let b = collect_tallies_parallel(&start, 40, 4, 17, 3).unwrap();
        assert_eq!(a, b);

        let total: i64 = a.get(&start).unwrap().iter().map(|(_, reward)| reward.abs()).sum();
        assert!(total <= 40);
        assert_eq!(total % 2, 0);
    }

    #[test]
    fn test_parallel_table_covers_the_start() {
        let book = build_table_parallel(20, 4, 11, 2).unwrap();
        let action = book.get(&State::default()).unwrap();
        assert!(State::default().is_legal(action));
    }

    #[test]
    fn test_build_options_validation() {
        assert!(BuildOptions::default().validate().is_ok());
        assert!(BuildOptions { rounds: 0, ..Default::default() }.validate().is_err());
        assert!(BuildOptions { plies: 3, ..Default::default() }.validate().is_err());
        assert!(BuildOptions { output: PathBuf::new(), ..Default::default() }.validate().is_err());
    }
}
