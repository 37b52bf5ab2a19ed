//! Deterministic candidate name generation using curated name lists.
//!
//! Names must be unique within a generation scope AND disjoint from the
//! caller-supplied taken set (the live roster). Generation never fails:
//! once the combination space is effectively exhausted, names degrade to
//! numeric suffixes instead of erroring.

use crate::rng::SubsystemRng;
use std::collections::HashSet;

/// How many fresh draws to attempt before falling back to suffixing.
const DRAW_ATTEMPTS: usize = 24;

/// Deterministic name pool backed by curated first/last lists.
pub struct NamePool;

impl NamePool {
    /// Draw a full name not present in `taken`. The caller owns the
    /// taken set and must insert the returned name before the next draw.
    pub fn draw_unique(rng: &mut SubsystemRng, taken: &HashSet<String>) -> String {
        for _ in 0..DRAW_ATTEMPTS {
            let name = Self::full_name(rng);
            if !taken.contains(&name) {
                return name;
            }
        }
        // Pool exhausted (or unlucky streak): suffix a random base name
        // with an increasing counter until unused.
        let base = Self::full_name(rng);
        let mut n = 2u32;
        loop {
            let name = format!("{base} {n}");
            if !taken.contains(&name) {
                return name;
            }
            n += 1;
        }
    }

    fn full_name(rng: &mut SubsystemRng) -> String {
        let first = Self::first_names();
        let last = Self::last_names();
        let f = first[rng.next_u64_below(first.len() as u64) as usize];
        let l = last[rng.next_u64_below(last.len() as u64) as usize];
        format!("{f} {l}")
    }

    fn first_names() -> &'static [&'static str] {
        &[
            "Avery", "Bennett", "Caleb", "Dana", "Elena", "Felix", "Gwen", "Hugo",
            "Iris", "Jonah", "Kara", "Liam", "Mira", "Nolan", "Opal", "Pierce",
            "Quinn", "Rosa", "Silas", "Tessa", "Umar", "Vera", "Wade", "Ximena",
            "Yusuf", "Zoe", "Arlo", "Bianca", "Cormac", "Delia", "Ewan", "Freya",
            "Gideon", "Hazel", "Ivo", "June", "Kell", "Lorna", "Marcus", "Nadia",
        ]
    }

    fn last_names() -> &'static [&'static str] {
        &[
            "Ashford", "Birch", "Calloway", "Dunmore", "Ellison", "Fairbanks",
            "Granger", "Holloway", "Ibarra", "Jennings", "Kessler", "Lockhart",
            "Mercer", "Northcott", "Okafor", "Pemberton", "Quill", "Rasmussen",
            "Sandoval", "Thatcher", "Umezawa", "Vance", "Whitfield", "Xiang",
            "Yarrow", "Zielinski", "Abbott", "Briggs", "Castellan", "Draper",
            "Everhart", "Fontaine", "Galloway", "Hartley", "Ingram", "Juarez",
            "Kirby", "Lowell", "Mendel", "Navarro",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, SubsystemSlot};

    fn rng() -> SubsystemRng {
        RngBank::new(12345).for_subsystem_at_day(SubsystemSlot::Market, 1)
    }

    #[test]
    fn name_generation_is_deterministic() {
        let taken = HashSet::new();
        let a = NamePool::draw_unique(&mut rng(), &taken);
        let b = NamePool::draw_unique(&mut rng(), &taken);
        assert_eq!(a, b, "Same seed should produce same name");
    }

    #[test]
    fn draws_avoid_the_taken_set() {
        let mut rng = rng();
        let mut taken = HashSet::new();
        for _ in 0..500 {
            let name = NamePool::draw_unique(&mut rng, &taken);
            assert!(!taken.contains(&name), "duplicate name: {name}");
            taken.insert(name);
        }
    }

    #[test]
    fn exhausted_pool_degrades_to_suffixes() {
        // Pre-fill the taken set with the entire combination space so
        // every fresh draw collides and the suffix path must fire.
        let mut taken: HashSet<String> = HashSet::new();
        for f in NamePool::first_names() {
            for l in NamePool::last_names() {
                taken.insert(format!("{f} {l}"));
            }
        }
        let mut rng = rng();
        let name = NamePool::draw_unique(&mut rng, &taken);
        assert!(!taken.contains(&name));
        assert!(
            name.rsplit(' ').next().unwrap().parse::<u32>().is_ok(),
            "expected numeric suffix, got: {name}"
        );
    }
}
