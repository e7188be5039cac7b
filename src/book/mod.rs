//! Opening book: tallies, reduction, construction and storage

pub mod builder;
mod opening;
pub mod storage;
pub mod tally;

pub use builder::{
    build_table, build_table_parallel, build_tallies, build_tree, build_tree_with, collect_tallies,
    collect_tallies_parallel, BuildOptions, DEFAULT_OUTPUT, DEFAULT_PLIES, DEFAULT_ROUNDS,
};
pub use opening::OpeningBook;
pub use tally::{RewardTally, TallyStore};
