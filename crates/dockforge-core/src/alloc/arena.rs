use crate::profiling::profile_function;
use std::{fmt, num::NonZeroU64};

/// Stable generational handle into an [`Arena`].
///
/// The upper 32 bits carry the slot generation, the lower 32 bits the slot
/// index offset by one so the value is never zero.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(NonZeroU64);

impl Handle {
    pub fn new(generation: u32, idx: u32) -> Self {
        assert!(idx < u32::MAX, "arena index overflow");
        let bits = ((generation as u64) << 32) | (idx as u64 + 1);
        match NonZeroU64::new(bits) {
            Some(bits) => Self(bits),
            None => unreachable!("low bits are always non-zero"),
        }
    }

    pub fn generation(&self) -> u32 {
        (self.0.get() >> 32) as u32
    }

    pub fn index(&self) -> u32 {
        (self.0.get() & u32::MAX as u64) as u32 - 1
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index(), self.generation())
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Generational arena.
///
/// Removing a value bumps the slot generation, so handles to removed values
/// never resolve again even after the slot is reused.
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Arena<T> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> Handle {
        profile_function!();
        self.len += 1;
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.value = Some(value);
            Handle::new(slot.generation, idx)
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                value: Some(value),
            });
            Handle::new(0, idx)
        }
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        profile_function!();
        let index = handle.index();
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.len -= 1;
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(idx as u32);
            }
        }
        self.len = 0;
    }

    /// Iterates live values in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.value
                .as_ref()
                .map(|value| (Handle::new(slot.generation, idx as u32), value))
        })
    }

    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        self.iter().map(|(handle, _)| handle)
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_eq_size!(Handle, Option<Handle>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_insert() {
        let mut arena = Arena::<u8>::new();
        let handle = arena.insert(15);
        assert_eq!(handle.generation(), 0);
        assert_eq!(handle.index(), 0);
        assert_eq!(arena.get(handle), Some(&15));
    }

    #[test]
    fn test_arena_stale_handle() {
        let mut arena = Arena::<u8>::new();
        let _ = arena.insert(15);
        let stale = Handle::new(1, 0);
        assert_eq!(arena.get(stale), None);
        assert_eq!(arena.remove(stale), None);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_arena_remove_reuses_slot() {
        let mut arena = Arena::<u8>::new();
        let handle = arena.insert(15);
        assert_eq!(arena.remove(handle), Some(15));
        let new_handle = arena.insert(45);
        assert_eq!(handle.index(), new_handle.index());
        assert_ne!(handle.generation(), new_handle.generation());
        assert_eq!(arena.get(handle), None);
        assert_eq!(arena.get(new_handle), Some(&45));
    }

    #[test]
    fn test_arena_iter_skips_free_slots() {
        let mut arena = Arena::<u8>::new();
        let handles: Vec<_> = (0..100).map(|i| arena.insert(i)).collect();
        arena.remove(handles[0]);
        arena.remove(handles[1]);
        let values: Vec<_> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values.len(), 98);
        assert_eq!(values[0], 2);
        assert_eq!(arena.len(), 98);
    }

    #[test]
    fn test_arena_clear_invalidates_handles() {
        let mut arena = Arena::<u8>::new();
        let a = arena.insert(1);
        let b = arena.insert(2);
        arena.clear();
        assert!(arena.is_empty());
        assert!(!arena.contains(a));
        assert!(!arena.contains(b));
        let c = arena.insert(3);
        assert_ne!(c, a);
        assert_ne!(c, b);
    }
}
