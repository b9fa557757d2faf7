//! Accordion state
//!
//! Headers in one `.accordion` scope are mutually exclusive: opening one
//! closes the rest, clicking the open one closes it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accordion {
    headers: usize,
    open: Option<usize>,
}

impl Accordion {
    /// Initial state: everything closed
    pub fn new(headers: usize) -> Self {
        Self {
            headers,
            open: None,
        }
    }

    /// Handle a click on header `index`, returning the new open header
    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        if index < self.headers {
            self.open = if self.open == Some(index) {
                None
            } else {
                Some(index)
            };
        }
        self.open
    }

    pub fn open(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    pub fn len(&self) -> usize {
        self.headers
    }

    pub fn is_empty(&self) -> bool {
        self.headers == 0
    }
}
