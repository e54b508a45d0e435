//! Identifiers for mounted lessons.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LessonId(pub u32);

/// Monotonic allocator; ids are never reused within one stage.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> LessonId {
        let id = LessonId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}
