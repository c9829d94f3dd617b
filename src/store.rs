//! The loaded location list and the navigation cursor over it.

use crate::types::{Direction, Location};

/// Ordered locations plus a 1-based selection index, 0 meaning none.
/// The index always stays within `0..=len`.
#[derive(Debug, Default)]
pub struct LocationStore {
    /// Current selection, 1-based; 0 when nothing is selected.
    current: usize,
    /// Locations in file order, which is also navigation order.
    locations: Vec<Location>,
}

impl LocationStore {
    /// Empty store with no selection.
    pub fn new() -> Self {
        return Self::default();
    }

    /// Step to the next or previous entry, wrapping at both ends.
    /// With no selection, `Next` lands on the first entry and `Previous` on the last.
    /// Returns `None` when the store is empty.
    pub fn advance(&mut self, direction: Direction) -> Option<&Location> {
        let len = self.locations.len();
        if len == 0 {
            return None;
        }
        self.current = match direction {
            Direction::Next if self.current >= len => 1,
            Direction::Next => self.current.saturating_add(1),
            Direction::Previous if self.current <= 1 => len,
            Direction::Previous => self.current.saturating_sub(1),
        };
        return self.current();
    }

    /// The selected location, if any.
    pub fn current(&self) -> Option<&Location> {
        let idx = self.current.checked_sub(1)?;
        return self.locations.get(idx);
    }

    /// 1-based index of the selection, 0 when none.
    pub const fn current_index(&self) -> usize {
        return self.current;
    }

    /// Whether no locations are loaded.
    pub fn is_empty(&self) -> bool {
        return self.locations.is_empty();
    }

    /// Number of loaded locations.
    pub fn len(&self) -> usize {
        return self.locations.len();
    }

    /// All loaded locations in navigation order.
    pub fn locations(&self) -> &[Location] {
        return &self.locations;
    }

    /// Replace the whole set. The previous selection is looked up by position
    /// (file, line, column) in the new set and kept if present, else cleared.
    pub fn reload(&mut self, locations: Vec<Location>) {
        let previous = self.current().cloned();
        self.locations = locations;
        self.current = previous
            .and_then(|prev| {
                return self
                    .locations
                    .iter()
                    .position(|l| return l.same_position(&prev));
            })
            .map_or(0, |idx| return idx.saturating_add(1));
        tracing::debug!(count = self.locations.len(), current = self.current, "locations reloaded");
    }

    /// Select by 1-based index. Out-of-range requests change nothing and return `None`,
    /// since numeric shortcuts are not checked against the list length by callers.
    pub fn select(&mut self, index: usize) -> Option<&Location> {
        if index == 0 || index > self.locations.len() {
            return None;
        }
        self.current = index;
        return self.current();
    }
}
