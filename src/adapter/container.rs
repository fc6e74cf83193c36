// SPDX-License-Identifier: MPL-2.0
//! Store consumer that renders one region of the screen.
//!
//! A container watches the items belonging to its [`Region`], marks itself
//! dirty when they change and renders every displayed item through its
//! adapter. Queued items are never rendered.

use std::cell::Cell;
use std::rc::Rc;

use super::registry::{render_slot, SharedAdapter};
use super::{FeedbackHandle, SlotProps, ThemeMode};
use crate::error::Result;
use crate::feedback::{FeedbackItem, FeedbackKind, Position, QueueFamily};
use crate::manager::FeedbackManager;
use crate::store::StoreWatch;

/// The part of the store a container is responsible for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    /// One toast or alert stack.
    Stack(QueueFamily, Position),
    /// Every item of the listed kinds.
    Kinds(Vec<FeedbackKind>),
    All,
}

impl Region {
    #[must_use]
    pub fn matches(&self, item: &FeedbackItem) -> bool {
        match self {
            Region::Stack(family, position) => {
                item.kind().queue_family() == Some(*family) && item.position() == *position
            }
            Region::Kinds(kinds) => kinds.contains(&item.kind()),
            Region::All => true,
        }
    }
}

pub struct FeedbackContainer<O> {
    manager: FeedbackManager,
    adapter: SharedAdapter<O>,
    region: Region,
    dirty: Rc<Cell<bool>>,
    _watch: StoreWatch,
}

impl<O> FeedbackContainer<O> {
    /// Mounts a container: injects the adapter's styles and starts watching.
    ///
    /// A freshly mounted container is dirty.
    pub fn mount(manager: &FeedbackManager, adapter: SharedAdapter<O>, region: Region) -> Self {
        adapter.inject_styles();

        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let selector = region.clone();
        let watch = manager.store().watch(
            move |item| selector.matches(item) && item.status().is_displayed(),
            move |_| flag.set(true),
        );

        Self {
            manager: manager.clone(),
            adapter,
            region,
            dirty,
            _watch: watch,
        }
    }

    #[must_use]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Whether the region changed since the last [`FeedbackContainer::render`].
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Items this container currently shows, in arrival order.
    #[must_use]
    pub fn items(&self) -> Vec<FeedbackItem> {
        let mut items = self
            .manager
            .store()
            .select(|item| self.region.matches(item) && item.status().is_displayed());
        items.sort_by_key(FeedbackItem::group_order);
        items
    }

    /// Renders every displayed item and clears the dirty flag.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingSlot` if the adapter cannot render one of the
    /// items.
    pub fn render(&self) -> Result<Vec<O>> {
        self.dirty.set(false);
        let dark_mode = match self.manager.config().theme() {
            ThemeMode::System => self.adapter.is_dark_mode(),
            forced => forced.is_dark(),
        };
        self.items()
            .into_iter()
            .map(|item| {
                let props = SlotProps {
                    id: item.id(),
                    kind: item.kind(),
                    status: item.status(),
                    created_at: item.created_at(),
                    options: item.options().clone(),
                    dark_mode,
                    handle: FeedbackHandle::new(self.manager.clone(), item.id()),
                };
                render_slot(self.adapter.as_ref(), item.kind(), &props)
            })
            .collect()
    }
}

impl<O> std::fmt::Debug for FeedbackContainer<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackContainer")
            .field("adapter", &self.adapter.name())
            .field("region", &self.region)
            .field("dirty", &self.dirty.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{AnimationSpec, FeedbackAdapter, InjectOnce};
    use crate::config::Config;
    use crate::feedback::{FeedbackOptions, Status};

    static STYLES: InjectOnce = InjectOnce::new();

    struct Text {
        injected: Cell<usize>,
        dark: Cell<Option<bool>>,
    }

    impl FeedbackAdapter for Text {
        type Output = String;

        fn name(&self) -> &str {
            "text"
        }

        fn render(&self, kind: FeedbackKind, props: &SlotProps) -> Option<String> {
            self.dark.set(Some(props.dark_mode));
            match kind {
                FeedbackKind::Toast | FeedbackKind::Modal => Some(format!(
                    "{kind}:{}:{}",
                    props.status,
                    props.options.message.as_deref().unwrap_or_default()
                )),
                _ => None,
            }
        }

        fn is_dark_mode(&self) -> bool {
            true
        }

        fn inject_styles(&self) {
            STYLES.run(|| {});
            self.injected.set(self.injected.get() + 1);
        }
    }

    fn text_adapter() -> Rc<Text> {
        Rc::new(Text {
            injected: Cell::new(0),
            dark: Cell::new(None),
        })
    }

    fn shared(adapter: &Rc<Text>) -> SharedAdapter<String> {
        adapter.clone()
    }

    fn manager() -> FeedbackManager {
        FeedbackManager::new(&Config::default(), AnimationSpec::instant())
    }

    #[test]
    fn mount_injects_styles_and_starts_dirty() {
        let manager = manager();
        let adapter = text_adapter();
        let container = FeedbackContainer::mount(&manager, shared(&adapter), Region::All);
        assert!(container.is_dirty());
        assert_eq!(adapter.injected.get(), 1);
        assert!(STYLES.is_done());
    }

    #[test]
    fn renders_only_its_region() {
        let manager = manager();
        let container = FeedbackContainer::mount(
            &manager,
            shared(&text_adapter()),
            Region::Stack(QueueFamily::Toast, Position::TopRight),
        );
        manager
            .add(FeedbackKind::Toast, FeedbackOptions::message("here"))
            .expect("valid");
        manager
            .add(
                FeedbackKind::Toast,
                FeedbackOptions::message("elsewhere").at(Position::BottomLeft),
            )
            .expect("valid");

        assert_eq!(
            container.render().expect("toast slot"),
            vec!["toast:visible:here".to_string()]
        );
        assert!(!container.is_dirty());
    }

    #[test]
    fn queued_items_are_not_rendered() {
        let config = Config {
            toast_max_visible: Some(1),
            ..Config::default()
        };
        let manager = FeedbackManager::new(&config, AnimationSpec::instant());
        let container = FeedbackContainer::mount(&manager, shared(&text_adapter()), Region::All);
        let first = manager
            .add(FeedbackKind::Toast, FeedbackOptions::message("a"))
            .expect("valid");
        let second = manager
            .add(FeedbackKind::Toast, FeedbackOptions::message("b"))
            .expect("valid");

        assert_eq!(manager.get(second).map(|i| i.status()), Some(Status::Queued));
        let ids: Vec<_> = container.items().iter().map(FeedbackItem::id).collect();
        assert_eq!(ids, vec![first]);
    }

    #[test]
    fn items_follow_arrival_order() {
        let manager = manager();
        let container = FeedbackContainer::mount(&manager, shared(&text_adapter()), Region::All);
        let ids: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|message| {
                manager
                    .add(FeedbackKind::Toast, FeedbackOptions::message(message))
                    .expect("valid")
            })
            .collect();

        let items = container.items();
        assert_eq!(items.iter().map(FeedbackItem::id).collect::<Vec<_>>(), ids);
        assert!(items
            .windows(2)
            .all(|pair| pair[0].group_order() < pair[1].group_order()
                && pair[0].created_at() <= pair[1].created_at()));
    }

    #[test]
    fn changes_mark_container_dirty() {
        let manager = manager();
        let container = FeedbackContainer::mount(
            &manager,
            shared(&text_adapter()),
            Region::Kinds(vec![FeedbackKind::Modal]),
        );
        container.render().expect("nothing to render");
        assert!(!container.is_dirty());

        manager
            .add(FeedbackKind::Toast, FeedbackOptions::message("t"))
            .expect("valid");
        assert!(!container.is_dirty());

        manager
            .add(FeedbackKind::Modal, FeedbackOptions::message("m"))
            .expect("valid");
        assert!(container.is_dirty());
    }

    #[test]
    fn configured_theme_overrides_adapter() {
        let config = Config {
            theme: Some(ThemeMode::Light),
            ..Config::default()
        };
        let manager = FeedbackManager::new(&config, AnimationSpec::instant());
        let adapter = text_adapter();
        let container = FeedbackContainer::mount(&manager, shared(&adapter), Region::All);
        manager
            .add(FeedbackKind::Toast, FeedbackOptions::message("hi"))
            .expect("valid");

        container.render().expect("toast slot");
        assert_eq!(adapter.dark.get(), Some(false));
    }

    #[test]
    fn missing_slot_surfaces_as_error() {
        let manager = manager();
        let container = FeedbackContainer::mount(&manager, shared(&text_adapter()), Region::All);
        manager
            .add(FeedbackKind::Banner, FeedbackOptions::message("b"))
            .expect("valid");
        assert!(container.render().is_err());
    }
}
