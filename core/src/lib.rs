//! Shared types, constants, and logic for the tunnel layout calculator
//!
//! This crate holds everything deterministic: seed derivation from player
//! inputs, the glibc-compatible pseudo-random generator, and the mapping
//! from raw draws to per-area branch directions.
//!
//! The crate is no_std compatible so the generator can be reused from any
//! frontend.

#![no_std]

// Re-export shared modules
pub mod layout;
pub mod rng;
pub mod seed;

// Re-export commonly used types for convenience
pub use layout::{CreeperCount, Direction, TunnelLayout, AREA_COUNT};
pub use rng::{GnuRand, DRAW_MAX};
pub use seed::derive_seed;

/// Number of raw draws consumed per layout calculation
pub const DRAW_COUNT: usize = 3;

/// The seed and raw draws behind one layout calculation
///
/// Draws are in draw order; reducing and labeling them is the layout
/// module's concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sequence {
    pub seed: u32,
    pub draws: [u32; DRAW_COUNT],
}

/// Derive the seed for a player and level and take the first draws
///
/// Constructs one generator per call; generator state never outlives the
/// calculation that created it.
pub fn compute_sequence(player_id: u32, level: u32) -> Sequence {
    let seed = derive_seed(player_id, level);
    let mut rng = GnuRand::new(seed);

    let mut draws = [0u32; DRAW_COUNT];
    for draw in draws.iter_mut() {
        *draw = rng.next();
    }

    Sequence { seed, draws }
}
