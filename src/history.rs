use crate::GameState;
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Bounded undo stack of game snapshots. The oldest snapshot is dropped once the
/// capacity is exceeded.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<GameState>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a copy of `state`.
    pub fn push(&mut self, state: &GameState) {
        if self.capacity == 0 {
            return;
        }
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(state.clone());
    }

    /// Take the most recent snapshot.
    pub fn pop(&mut self) -> Option<GameState> {
        self.snapshots.pop_back()
    }

    pub fn peek(&self) -> Option<&GameState> {
        self.snapshots.back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &GameState> {
        self.snapshots.iter()
    }
}
