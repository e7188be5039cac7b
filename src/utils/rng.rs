use rand::{rngs::StdRng, rngs::SysRng, SeedableRng, TryRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// A seeded generator when `seed` is given, otherwise one seeded from the OS
pub fn make_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(entropy_seed))
}

/// A fresh seed from the OS, falling back to the clock
pub fn entropy_seed() -> u64 {
    SysRng::try_next_u64(&mut SysRng).unwrap_or_else(|_| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    })
}
