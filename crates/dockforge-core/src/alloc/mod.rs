//! Allocation and collection types for Dockforge.
//!
//! This module provides:
//! - Re-exports of optimized hash collections using AHash
//! - [`Arena`], a generational slot arena addressed by stable [`Handle`]s

pub mod arena;

pub use arena::{Arena, Handle};

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert("key", "value");
        assert_eq!(map.get("key"), Some(&"value"));
    }

    #[test]
    fn test_hashset_ahash() {
        let mut set = HashSet::new();
        set.insert(42);
        assert!(set.contains(&42));
    }
}
