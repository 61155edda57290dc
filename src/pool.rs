/// Fixed-capacity character pools.
///
/// Slots are created once and recycled through `life`: a slot with
/// `life <= 0` is free.  Allocation is first-fit from index 0 with no
/// rotating cursor, so low slots are always reused first.

use log::trace;

use crate::entities::Character;
use crate::surface::{ImageHandle, Readiness};

#[derive(Clone, Debug)]
pub struct Pool {
    slots: Vec<Character>,
}

impl Pool {
    pub fn new(slots: Vec<Character>) -> Self {
        Self { slots }
    }

    /// Build `capacity` slots with `make`.
    pub fn filled(capacity: usize, mut make: impl FnMut() -> Character) -> Self {
        Self { slots: (0..capacity).map(|_| make()).collect() }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|c| c.body.is_alive()).count()
    }

    pub fn get(&self, index: usize) -> Option<&Character> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Character> {
        self.slots.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Character> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Character> {
        self.slots.iter_mut()
    }

    pub fn as_mut_slice(&mut self) -> &mut [Character] {
        &mut self.slots
    }

    /// Activate the lowest-indexed free slot with `activate`.
    ///
    /// Returns the slot index, or `None` when every slot is busy; the request
    /// is then dropped.  A slot whose image is not ready yet is not eligible.
    pub fn allocate(&mut self, activate: impl FnOnce(&mut Character)) -> Option<usize> {
        let index = self.slots.iter().position(is_free)?;
        activate(&mut self.slots[index]);
        trace!("pool slot {index} activated");
        Some(index)
    }

    /// Readiness query with no timeout; callers poll.
    pub fn are_all_ready(&self) -> bool {
        self.slots.iter().all(|c| c.body.is_ready())
    }

    pub fn first_failed(&self) -> Option<&ImageHandle> {
        self.slots
            .iter()
            .map(|c| &c.body.image)
            .find(|image| image.readiness() == Readiness::Failed)
    }
}

fn is_free(slot: &Character) -> bool {
    !slot.body.is_alive() && slot.body.is_ready()
}
