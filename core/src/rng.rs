//! Deterministic random number generation.
//!
//! RULE: Nothing in the core may call any platform RNG.
//! All randomness flows through SubsystemRng instances derived
//! from the single master seed the engine was built with.
//!
//! Each subsystem gets its own RNG stream per day, seeded
//! deterministically from (master_seed, subsystem_index, day_index).
//! This means:
//!   - Adding a new subsystem never changes existing subsystems' streams.
//!   - Each subsystem's stream for any day is reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single subsystem.
pub struct SubsystemRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SubsystemRng {
    /// Create a subsystem RNG from the master seed, a stable subsystem
    /// index, and the current day index. The subsystem index must never
    /// change once assigned.
    pub fn new(master_seed: u64, subsystem_index: u64, day_index: u64) -> Self {
        let derived_seed = master_seed
            ^ subsystem_index.wrapping_mul(0x9e37_79b9_7f4a_7c15)
            ^ day_index.wrapping_mul(0xbf58_476d_1ce4_e5b9);
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        use rand::RngCore;
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll an i64 in [lo, hi).
    pub fn next_i64_in(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo < hi, "empty range");
        lo + self.next_u64_below((hi - lo) as u64) as i64
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// All subsystem RNGs for a single run, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_subsystem_at_day(&self, slot: SubsystemSlot, day_index: u64) -> SubsystemRng {
        SubsystemRng::new(self.master_seed, slot as u64, day_index).with_name(slot.name())
    }
}

/// Stable subsystem slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every subsystem's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum SubsystemSlot {
    Market = 0,
    Posting = 1,
    Service = 2,
    Command = 3,
    // Add new subsystems here — append only.
}

impl SubsystemSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Posting => "posting",
            Self::Service => "service",
            Self::Command => "command",
        }
    }
}
