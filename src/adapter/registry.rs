// SPDX-License-Identifier: MPL-2.0
//! Named adapters and the active selection.

use std::rc::Rc;

use super::{FeedbackAdapter, SlotProps};
use crate::error::{Error, Result};
use crate::feedback::FeedbackKind;

/// Shared adapter producing `O`.
pub type SharedAdapter<O> = Rc<dyn FeedbackAdapter<Output = O>>;

/// Adapters available to the host, one of which is active.
///
/// The first registered adapter becomes active until another is selected.
pub struct AdapterRegistry<O> {
    adapters: Vec<SharedAdapter<O>>,
    active: Option<usize>,
}

impl<O> Default for AdapterRegistry<O> {
    fn default() -> Self {
        Self {
            adapters: Vec::new(),
            active: None,
        }
    }
}

impl<O> AdapterRegistry<O> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an adapter, replacing any adapter with the same name.
    pub fn register(&mut self, adapter: SharedAdapter<O>) {
        match self.position(adapter.name()) {
            Some(index) => self.adapters[index] = adapter,
            None => {
                self.adapters.push(adapter);
                if self.active.is_none() {
                    self.active = Some(self.adapters.len() - 1);
                }
            }
        }
    }

    /// Makes the adapter called `name` active.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAdapter`] if nothing is registered under `name`.
    pub fn select(&mut self, name: &str) -> Result<()> {
        let index = self
            .position(name)
            .ok_or_else(|| Error::UnknownAdapter(name.to_string()))?;
        self.active = Some(index);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<SharedAdapter<O>> {
        self.position(name).map(|index| Rc::clone(&self.adapters[index]))
    }

    #[must_use]
    pub fn active(&self) -> Option<SharedAdapter<O>> {
        self.active.map(|index| Rc::clone(&self.adapters[index]))
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Renders through the active adapter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAdapter`] if no adapter is registered and
    /// [`Error::MissingSlot`] if the active adapter cannot render `kind`.
    pub fn render(&self, kind: FeedbackKind, props: &SlotProps) -> Result<O> {
        let adapter = self
            .active()
            .ok_or_else(|| Error::UnknownAdapter(String::new()))?;
        render_slot(adapter.as_ref(), kind, props)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.adapters.iter().position(|a| a.name() == name)
    }
}

/// Calls the adapter's slot for `kind`, mapping a missing slot to an error.
pub(crate) fn render_slot<O>(
    adapter: &dyn FeedbackAdapter<Output = O>,
    kind: FeedbackKind,
    props: &SlotProps,
) -> Result<O> {
    adapter.render(kind, props).ok_or_else(|| Error::MissingSlot {
        adapter: adapter.name().to_string(),
        kind,
    })
}

impl<O> std::fmt::Debug for AdapterRegistry<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("adapters", &self.names())
            .field("active", &self.active)
            .finish()
    }
}
