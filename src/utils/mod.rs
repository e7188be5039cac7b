mod deadline;
mod logging;
mod rng;

pub use deadline::Deadline;
pub use logging::init_tracing;
pub use rng::{entropy_seed, make_rng};
