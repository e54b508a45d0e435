//! Pause gate: one writer owned by the controller, read-only handles for runners.

use std::cell::Cell;
use std::rc::Rc;

/// Anything a runner can poll for the current pause level.
pub trait PauseSource {
    fn is_paused(&self) -> bool;
}

/// Writer side. Dropping it leaves handles reading the last value.
#[derive(Debug, Default)]
pub struct PauseGate {
    flag: Rc<Cell<bool>>,
}

impl PauseGate {
    pub fn new(paused: bool) -> Self {
        Self {
            flag: Rc::new(Cell::new(paused)),
        }
    }

    #[inline]
    pub fn set(&self, paused: bool) {
        self.flag.set(paused);
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.flag.get()
    }

    pub fn handle(&self) -> PauseHandle {
        PauseHandle {
            flag: Rc::clone(&self.flag),
        }
    }
}

/// Read-only view of a [`PauseGate`].
#[derive(Clone, Debug)]
pub struct PauseHandle {
    flag: Rc<Cell<bool>>,
}

impl PauseHandle {
    /// Handle not tied to any controller; never paused.
    pub fn detached() -> Self {
        Self {
            flag: Rc::new(Cell::new(false)),
        }
    }
}

impl PauseSource for PauseHandle {
    #[inline]
    fn is_paused(&self) -> bool {
        self.flag.get()
    }
}
