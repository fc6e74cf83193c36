// SPDX-License-Identifier: MPL-2.0
//! Awaitable dialogs.
//!
//! [`Dialogs`] opens a confirm, popconfirm or prompt and hands back a future
//! that resolves with the user's answer. Each future settles exactly once:
//! with the answer, or with `ExternallyRemoved` when the dialog disappears
//! any other way (`remove`, `remove_all`, [`Dialogs::close`], a timeout,
//! `reset`). Settlement happens synchronously inside the manager call that
//! caused it, so the future is ready as soon as that call returns.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::Result;
use crate::events::{EventKind, Subscription};
use crate::feedback::{FeedbackId, FeedbackKind, FeedbackOptions};
use crate::manager::FeedbackManager;

/// Answer to a confirm or popconfirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Confirmed,
    Cancelled,
    /// The dialog was closed without an answer.
    ExternallyRemoved,
}

impl DialogOutcome {
    #[must_use]
    pub fn is_confirmed(self) -> bool {
        self == DialogOutcome::Confirmed
    }
}

impl From<DialogOutcome> for bool {
    fn from(outcome: DialogOutcome) -> Self {
        outcome.is_confirmed()
    }
}

/// Answer to a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Submitted(String),
    Cancelled,
    /// The prompt was closed without an answer.
    ExternallyRemoved,
}

impl PromptOutcome {
    #[must_use]
    pub fn into_value(self) -> Option<String> {
        match self {
            PromptOutcome::Submitted(value) => Some(value),
            PromptOutcome::Cancelled | PromptOutcome::ExternallyRemoved => None,
        }
    }
}

impl From<PromptOutcome> for Option<String> {
    fn from(outcome: PromptOutcome) -> Self {
        outcome.into_value()
    }
}

/// Settle-once guard shared by the dialog's callbacks and removal watcher.
struct Settle<T> {
    sender: RefCell<Option<oneshot::Sender<T>>>,
    watch: RefCell<Option<Subscription>>,
}

impl<T> Settle<T> {
    fn settle(&self, outcome: T) {
        let Some(sender) = self.sender.borrow_mut().take() else {
            return;
        };
        let _ = sender.send(outcome);
        let watch = self.watch.borrow_mut().take();
        drop(watch);
    }

    fn detach(&self) {
        let watch = self.watch.borrow_mut().take();
        drop(watch);
    }
}

/// Pending answer to a confirm or popconfirm.
#[derive(Debug)]
#[must_use = "dropping the pending dialog discards its answer"]
pub struct PendingConfirm {
    id: FeedbackId,
    rx: oneshot::Receiver<DialogOutcome>,
}

impl PendingConfirm {
    #[must_use]
    pub fn id(&self) -> FeedbackId {
        self.id
    }

    /// Waits for the answer, collapsed to "did the user confirm".
    pub async fn confirmed(self) -> bool {
        self.await.is_confirmed()
    }
}

impl Future for PendingConfirm {
    type Output = DialogOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.unwrap_or(DialogOutcome::ExternallyRemoved))
    }
}

/// Pending answer to a prompt.
#[derive(Debug)]
#[must_use = "dropping the pending prompt discards its answer"]
pub struct PendingPrompt {
    id: FeedbackId,
    rx: oneshot::Receiver<PromptOutcome>,
}

impl PendingPrompt {
    #[must_use]
    pub fn id(&self) -> FeedbackId {
        self.id
    }

    /// Waits for the answer, collapsed to the submitted value.
    pub async fn value(self) -> Option<String> {
        self.await.into_value()
    }
}

impl Future for PendingPrompt {
    type Output = PromptOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.unwrap_or(PromptOutcome::ExternallyRemoved))
    }
}

/// Opens dialogs whose answers can be awaited.
#[derive(Debug, Clone)]
pub struct Dialogs {
    manager: FeedbackManager,
}

impl Dialogs {
    #[must_use]
    pub fn new(manager: FeedbackManager) -> Self {
        Self { manager }
    }

    /// Opens a confirm dialog.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidOptions` if `options` has no message.
    pub fn confirm(&self, options: FeedbackOptions) -> Result<PendingConfirm> {
        self.open_confirm(FeedbackKind::Confirm, options)
    }

    /// Opens a popconfirm anchored next to its trigger.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidOptions` if `options` has no message.
    pub fn popconfirm(&self, options: FeedbackOptions) -> Result<PendingConfirm> {
        self.open_confirm(FeedbackKind::Popconfirm, options)
    }

    /// Opens a prompt.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidOptions` if `options` has no message.
    pub fn prompt(&self, mut options: FeedbackOptions) -> Result<PendingPrompt> {
        let fallback = PromptOutcome::ExternallyRemoved;
        let (id, rx) = self.open(FeedbackKind::Prompt, &mut options, fallback, |options, settle| {
            let user_submit = options.on_submit.take();
            let on_submit = Rc::clone(&settle);
            options.on_submit = Some(Rc::new(move |value: String| {
                if let Some(f) = &user_submit {
                    f(value.clone());
                }
                on_submit.settle(PromptOutcome::Submitted(value));
            }));

            let user_cancel = options.on_cancel.take();
            options.on_cancel = Some(Rc::new(move || {
                if let Some(f) = &user_cancel {
                    f();
                }
                settle.settle(PromptOutcome::Cancelled);
            }));
        })?;
        Ok(PendingPrompt { id, rx })
    }

    /// Dismisses a pending dialog without answering it.
    ///
    /// Its awaiter resolves as `ExternallyRemoved`.
    pub fn close(&self, id: FeedbackId) {
        self.manager.remove(id);
    }

    fn open_confirm(
        &self,
        kind: FeedbackKind,
        mut options: FeedbackOptions,
    ) -> Result<PendingConfirm> {
        let fallback = DialogOutcome::ExternallyRemoved;
        let (id, rx) = self.open(kind, &mut options, fallback, |options, settle| {
            let user_confirm = options.on_confirm.take();
            let on_confirm = Rc::clone(&settle);
            options.on_confirm = Some(Rc::new(move || {
                if let Some(f) = &user_confirm {
                    f();
                }
                on_confirm.settle(DialogOutcome::Confirmed);
            }));

            let user_cancel = options.on_cancel.take();
            options.on_cancel = Some(Rc::new(move || {
                if let Some(f) = &user_cancel {
                    f();
                }
                settle.settle(DialogOutcome::Cancelled);
            }));
        })?;
        Ok(PendingConfirm { id, rx })
    }

    /// Watches for removal, wires the answer callbacks, then adds the item.
    ///
    /// The removal watcher exists before the item does, and matches against
    /// an id slot filled in as soon as `add` returns.
    fn open<T: Clone + 'static>(
        &self,
        kind: FeedbackKind,
        options: &mut FeedbackOptions,
        fallback: T,
        wire: impl FnOnce(&mut FeedbackOptions, Rc<Settle<T>>),
    ) -> Result<(FeedbackId, oneshot::Receiver<T>)> {
        let (tx, rx) = oneshot::channel();
        let settle = Rc::new(Settle {
            sender: RefCell::new(Some(tx)),
            watch: RefCell::new(None),
        });
        let slot: Rc<Cell<Option<FeedbackId>>> = Rc::new(Cell::new(None));

        let watch = {
            let settle = Rc::clone(&settle);
            let slot = Rc::clone(&slot);
            self.manager.on(EventKind::Removed, move |event| {
                if slot.get() == Some(event.item().id()) {
                    settle.settle(fallback.clone());
                }
            })
        };
        *settle.watch.borrow_mut() = Some(watch);

        options.dedupe_key = None;
        wire(options, Rc::clone(&settle));

        match self.manager.add(kind, std::mem::take(options)) {
            Ok(id) => {
                slot.set(Some(id));
                Ok((id, rx))
            }
            Err(err) => {
                settle.detach();
                Err(err)
            }
        }
    }
}
