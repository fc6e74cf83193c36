// SPDX-License-Identifier: MPL-2.0
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use feedback_core::bridge::Dialogs;
use feedback_core::config::{self, Config};
use feedback_core::feedback::QueueFamily;
use feedback_core::resources::{ModalResources, ScrollLock, ScrollSnapshot, ScrollSurface};
use feedback_core::timer::ManualClock;
use feedback_core::{
    AnimationSpec, DialogOutcome, EventKind, FeedbackEvent, FeedbackId, FeedbackKind,
    FeedbackManager, FeedbackOptions, Position, PromptOutcome, Status,
};
use futures_util::FutureExt;
use tempfile::tempdir;

const ANIMATION: Duration = Duration::from_millis(300);

fn manager_with(config: &Config, animation: Duration) -> (FeedbackManager, ManualClock) {
    let clock = ManualClock::new();
    let manager = FeedbackManager::with_clock(
        config,
        AnimationSpec::default().with_duration(animation),
        Rc::new(clock.clone()),
    );
    (manager, clock)
}

fn advance(manager: &FeedbackManager, clock: &ManualClock, millis: u64) {
    clock.advance(Duration::from_millis(millis));
    manager.tick();
}

fn status(manager: &FeedbackManager, id: FeedbackId) -> Option<Status> {
    manager.get(id).map(|item| item.status())
}

#[test]
fn saved_toast_walks_the_whole_lifecycle() {
    let (manager, clock) = manager_with(&Config::default(), ANIMATION);
    let id = manager
        .add(
            FeedbackKind::Toast,
            FeedbackOptions::message("Saved").with_duration(Duration::from_millis(2000)),
        )
        .expect("valid toast");

    assert_eq!(status(&manager, id), Some(Status::Entering));
    advance(&manager, &clock, 300);
    assert_eq!(status(&manager, id), Some(Status::Visible));
    advance(&manager, &clock, 1700);
    assert_eq!(status(&manager, id), Some(Status::Exiting));
    advance(&manager, &clock, 300);
    assert_eq!(status(&manager, id), None);
}

#[test]
fn removing_twice_emits_a_single_removed_event() {
    let (manager, clock) = manager_with(&Config::default(), ANIMATION);
    let removed = Rc::new(Cell::new(0));
    let counter = Rc::clone(&removed);
    let _sub = manager.on(EventKind::Removed, move |_| counter.set(counter.get() + 1));

    let id = manager
        .add(FeedbackKind::Toast, FeedbackOptions::message("once"))
        .expect("valid toast");
    manager.remove(id);
    manager.remove(id);
    advance(&manager, &clock, 300);
    manager.remove(id);

    assert_eq!(removed.get(), 1);
    assert_eq!(status(&manager, id), None);
}

#[test]
fn confirm_settles_once_even_if_removed_afterwards() {
    let (manager, _clock) = manager_with(&Config::default(), ANIMATION);
    let dialogs = Dialogs::new(manager.clone());
    let confirmed = Rc::new(Cell::new(0));
    let counter = Rc::clone(&confirmed);

    let pending = dialogs
        .confirm(
            FeedbackOptions::message("Delete file?").on_confirm(move || counter.set(counter.get() + 1)),
        )
        .expect("valid confirm");
    let id = pending.id();

    manager.confirm(id);
    manager.confirm(id);
    manager.remove_all();

    assert_eq!(pending.now_or_never(), Some(DialogOutcome::Confirmed));
    assert_eq!(confirmed.get(), 1);
}

#[test]
fn external_removal_resolves_pending_dialogs_in_the_same_turn() {
    let (manager, _clock) = manager_with(&Config::default(), ANIMATION);
    let dialogs = Dialogs::new(manager.clone());

    let confirm = dialogs
        .confirm(FeedbackOptions::message("Leave page?"))
        .expect("valid confirm");
    let prompt = dialogs
        .prompt(FeedbackOptions::message("Rename to"))
        .expect("valid prompt");

    manager.remove_where(|item| item.kind().is_dialog());

    assert_eq!(confirm.now_or_never(), Some(DialogOutcome::ExternallyRemoved));
    assert_eq!(prompt.now_or_never(), Some(PromptOutcome::ExternallyRemoved));
    assert_eq!(manager.store().len(), 0);
}

#[test]
fn prompt_resolves_with_submitted_value() {
    let (manager, _clock) = manager_with(&Config::default(), Duration::ZERO);
    let dialogs = Dialogs::new(manager.clone());
    let pending = dialogs
        .prompt(FeedbackOptions::message("Name").with_value("draft"))
        .expect("valid prompt");
    let id = pending.id();

    manager.set_value(id, "final");
    manager.submit(id);

    let value = pending.now_or_never().and_then(PromptOutcome::into_value);
    assert_eq!(value.as_deref(), Some("final"));
}

#[test]
fn queue_cap_promotes_in_arrival_order() {
    let config = Config {
        toast_max_visible: Some(3),
        ..Config::default()
    };
    let (manager, clock) = manager_with(&config, ANIMATION);
    let ids: Vec<FeedbackId> = (0..5)
        .map(|n| {
            manager
                .add(FeedbackKind::Toast, FeedbackOptions::message(format!("toast {n}")))
                .expect("valid toast")
        })
        .collect();

    let stack = (QueueFamily::Toast, Position::TopRight);
    assert_eq!(manager.visible_count(stack.0, stack.1), 3);
    assert_eq!(manager.queued_count(stack.0, stack.1), 2);
    assert_eq!(status(&manager, ids[3]), Some(Status::Queued));

    manager.remove(ids[0]);
    // The exiting toast still holds its slot.
    assert_eq!(status(&manager, ids[3]), Some(Status::Queued));

    advance(&manager, &clock, 300);
    assert_eq!(status(&manager, ids[3]), Some(Status::Entering));
    assert_eq!(status(&manager, ids[4]), Some(Status::Queued));

    manager.remove(ids[1]);
    advance(&manager, &clock, 300);
    assert_eq!(status(&manager, ids[4]), Some(Status::Entering));
    assert_eq!(manager.queued_count(stack.0, stack.1), 0);
}

#[test]
fn statuses_only_move_forward() {
    let config = Config {
        toast_max_visible: Some(1),
        ..Config::default()
    };
    let (manager, clock) = manager_with(&config, ANIMATION);
    let seen: Rc<RefCell<HashMap<FeedbackId, Vec<Status>>>> = Rc::default();
    let log = Rc::clone(&seen);
    let _sub = manager.on_any(move |event| {
        if matches!(
            event,
            FeedbackEvent::Added(_) | FeedbackEvent::StatusChanged { .. }
        ) {
            let item = event.item();
            log.borrow_mut()
                .entry(item.id())
                .or_default()
                .push(item.status());
        }
    });

    let first = manager
        .add(
            FeedbackKind::Toast,
            FeedbackOptions::message("first").with_duration(Duration::from_millis(1000)),
        )
        .expect("valid toast");
    let second = manager
        .add(
            FeedbackKind::Toast,
            FeedbackOptions::message("second").with_duration(Duration::from_millis(1000)),
        )
        .expect("valid toast");
    let third = manager
        .add(FeedbackKind::Toast, FeedbackOptions::message("third"))
        .expect("valid toast");

    for _ in 0..20 {
        advance(&manager, &clock, 100);
    }
    manager.remove_all();

    let seen = seen.borrow();
    for id in [first, second, third] {
        let walk = &seen[&id];
        assert!(
            walk.windows(2).all(|pair| pair[1].is_after(pair[0])),
            "{id} went {walk:?}"
        );
    }
    assert_eq!(
        seen[&first],
        vec![
            Status::Entering,
            Status::Visible,
            Status::Exiting,
            Status::Removed
        ]
    );
    assert_eq!(seen[&second][0], Status::Queued);
}

#[derive(Clone, Default)]
struct Page {
    restored: Rc<RefCell<Vec<ScrollSnapshot>>>,
}

impl ScrollSurface for Page {
    fn capture(&self) -> ScrollSnapshot {
        ScrollSnapshot {
            offset_x: 0.0,
            offset_y: 512.0,
            overflow: Some("scroll".into()),
        }
    }

    fn disable(&self) {}

    fn restore(&self, snapshot: ScrollSnapshot) {
        self.restored.borrow_mut().push(snapshot);
    }
}

#[test]
fn scroll_lock_survives_until_the_last_modal_closes() {
    let (manager, clock) = manager_with(&Config::default(), ANIMATION);
    let page = Page::default();
    let lock = ScrollLock::new(page.clone());
    let _resources = ModalResources::attach(&manager, lock.clone(), None);

    let first = manager
        .add(FeedbackKind::Modal, FeedbackOptions::message("first"))
        .expect("valid modal");
    advance(&manager, &clock, 300);
    let second = manager
        .add(FeedbackKind::Modal, FeedbackOptions::message("second"))
        .expect("valid modal");
    assert_eq!(lock.count(), 2);

    manager.remove(first);
    assert_eq!(lock.count(), 1);
    assert!(page.restored.borrow().is_empty());

    manager.remove(second);
    assert_eq!(lock.count(), 0);
    let restored = page.restored.borrow();
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].offset_y, 512.0);
    assert_eq!(restored[0].overflow.as_deref(), Some("scroll"));
}

#[test]
fn hover_preserves_remaining_budget() {
    let (manager, clock) = manager_with(&Config::default(), Duration::ZERO);
    let id = manager
        .add(
            FeedbackKind::Toast,
            FeedbackOptions::message("hover me").with_duration(Duration::from_millis(3000)),
        )
        .expect("valid toast");

    advance(&manager, &clock, 1000);
    manager.pause(id);
    advance(&manager, &clock, 500);
    manager.resume(id);

    advance(&manager, &clock, 1999);
    assert_eq!(status(&manager, id), Some(Status::Visible));
    advance(&manager, &clock, 1);
    assert_eq!(status(&manager, id), None);
}

#[test]
fn config_round_trips_through_disk() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("nested").join("settings.toml");

    let config = Config {
        toast_max_visible: Some(5),
        toast_duration_ms: Some(4500),
        default_position: Some(Position::BottomCenter),
        ..Config::default()
    };
    config::save_to_path(&config, &path).expect("Failed to write config file");
    let loaded = config::load_from_path(&path).expect("Failed to load config file");
    assert_eq!(loaded, config);

    let (manager, _clock) = manager_with(&loaded, Duration::ZERO);
    let id = manager
        .add(FeedbackKind::Toast, FeedbackOptions::message("placed"))
        .expect("valid toast");
    assert_eq!(
        manager.get(id).map(|item| item.position()),
        Some(Position::BottomCenter)
    );
}
