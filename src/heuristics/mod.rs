pub mod mobility;

mod traits;
pub use mobility::MobilityHeuristic;
pub use traits::*;
