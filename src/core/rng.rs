//! Random source for node placement and one-shot particle bursts

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Fixed `seed` for reproducible scenes, otherwise seeded from the OS
/// (`crypto.getRandomValues` in the browser)
pub fn field_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
