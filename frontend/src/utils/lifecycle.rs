use std::{cell::Cell, rc::Rc};

/// Tracks whether the page that started an async task is still mounted.
///
/// Clones share one flag. The owning view model calls [`PageLifetime::end`]
/// from `on_cleanup`; tasks check [`PageLifetime::is_alive`] before touching
/// page state when they resume.
#[derive(Clone, Debug)]
pub struct PageLifetime {
    alive: Rc<Cell<bool>>,
}

impl Default for PageLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl PageLifetime {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub fn end(&self) {
        self.alive.set(false);
    }
}
