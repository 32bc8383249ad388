//! The set of named, styleable elements the effects write to.
//!
//! A [`Stage`] stands in for the page's element tree: the renderer registers
//! the elements it draws, effects apply transforms and marker classes by
//! name, and the renderer reads them back on the next draw.  Writing to an
//! element that was never registered is a silent no-op so effects can be
//! wired up on pages that lack their element.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::transform::Transform;

#[derive(Debug, Default)]
struct Element {
    transform: Transform,
    classes: HashSet<&'static str>,
}

/// Shared handle onto the element table.  Clones see the same elements.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    elements: Rc<RefCell<HashMap<&'static str, Element>>>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with an identity transform.  Re-registering keeps the
    /// element's current state.
    pub fn register(&self, name: &'static str) {
        self.elements.borrow_mut().entry(name).or_default();
    }

    pub fn remove(&self, name: &str) {
        self.elements.borrow_mut().remove(name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.elements.borrow().contains_key(name)
    }

    /// Apply `transform` to `name`.  Returns `false` when the element is
    /// missing, in which case nothing happens.
    pub fn apply(&self, name: &str, transform: Transform) -> bool {
        match self.elements.borrow_mut().get_mut(name) {
            Some(element) => {
                element.transform = transform;
                true
            }
            None => {
                tracing::trace!(element = name, %transform, "skipped update for missing element");
                false
            }
        }
    }

    pub fn transform(&self, name: &str) -> Option<Transform> {
        self.elements.borrow().get(name).map(|e| e.transform)
    }

    /// Add or remove a marker class.  Missing elements are ignored.
    pub fn set_class(&self, name: &str, class: &'static str, on: bool) {
        if let Some(element) = self.elements.borrow_mut().get_mut(name) {
            if on {
                element.classes.insert(class);
            } else {
                element.classes.remove(class);
            }
        }
    }

    pub fn has_class(&self, name: &str, class: &str) -> bool {
        self.elements
            .borrow()
            .get(name)
            .is_some_and(|e| e.classes.contains(class))
    }
}
