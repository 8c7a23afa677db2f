//! Fixed-size pool of reusable decorative elements.
//!
//! Recurring effects (grid glow cells, form glints, pointer particles) check a
//! hidden element out of the pool, show it for a fixed duration and hand it
//! back. When every element is busy the effect is simply skipped, which caps
//! how much the page ever has to paint at once.

use std::{cell::RefCell, rc::Rc};

/// A renderable element the pool can toggle between visible and hidden.
pub trait EffectHandle {
    fn show(&self);
    fn hide(&self);
}

/// Index of a pool slot. Only meaningful for the pool that returned it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

struct Slot<H> {
    handle: H,
    in_use: bool,
}

pub struct EffectPool<H> {
    slots: Box<[Slot<H>]>,
}

impl<H: EffectHandle> EffectPool<H> {
    /// Creates every handle up front and hides it. Stops at the first handle
    /// the factory fails to create.
    pub fn try_new<E>(
        capacity: usize,
        mut factory: impl FnMut(usize) -> Result<H, E>,
    ) -> Result<Self, E> {
        let mut slots = Vec::with_capacity(capacity);
        for index in 0..capacity {
            let handle = factory(index)?;
            handle.hide();
            slots.push(Slot {
                handle,
                in_use: false,
            });
        }

        Ok(Self {
            slots: slots.into_boxed_slice(),
        })
    }

    /// Checks out the lowest-indexed idle slot and makes it visible.
    ///
    /// Returns `None` when every slot is busy; callers skip the effect.
    pub fn acquire(&mut self) -> Option<SlotId> {
        let index = self.slots.iter().position(|slot| !slot.in_use)?;
        let slot = &mut self.slots[index];
        slot.in_use = true;
        slot.handle.show();
        Some(SlotId(index))
    }

    /// Hides the slot and makes it available again. Releasing an idle slot
    /// does nothing.
    pub fn release(&mut self, id: SlotId) {
        let Some(slot) = self.slots.get_mut(id.0) else {
            return;
        };

        if !slot.in_use {
            return;
        }

        slot.in_use = false;
        slot.handle.hide();
    }

    pub fn handle(&self, id: SlotId) -> Option<&H> {
        self.slots.get(id.0).map(|slot| &slot.handle)
    }

    #[cfg(test)]
    pub fn is_in_use(&self, id: SlotId) -> bool {
        self.slots.get(id.0).is_some_and(|slot| slot.in_use)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub fn in_use(&self) -> usize {
        self.slots.iter().filter(|slot| slot.in_use).count()
    }
}

/// Runs a task once after a delay.
pub trait Scheduler {
    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

pub type SharedPool<H> = Rc<RefCell<EffectPool<H>>>;

/// Shows one pooled effect for `duration_ms`, positioned by `place`.
///
/// The release is scheduled at acquisition time, so each successful call is
/// paired with exactly one release. Returns `None` without scheduling
/// anything when the pool is exhausted.
pub fn flash<H, S>(
    pool: &SharedPool<H>,
    scheduler: &S,
    duration_ms: u32,
    place: impl FnOnce(&H),
) -> Option<SlotId>
where
    H: EffectHandle + 'static,
    S: Scheduler + ?Sized,
{
    let id = pool.borrow_mut().acquire();
    let Some(id) = id else {
        tracing::trace!(capacity = pool.borrow().capacity(), "effect pool exhausted, skipping effect");
        return None;
    };

    if let Some(handle) = pool.borrow().handle(id) {
        place(handle);
    }

    let pool = Rc::clone(pool);
    scheduler.defer(
        duration_ms,
        Box::new(move || pool.borrow_mut().release(id)),
    );

    Some(id)
}

#[cfg(target_arch = "wasm32")]
pub use self::dom::{dom_pool, TimerScheduler};

#[cfg(target_arch = "wasm32")]
mod dom {
    use super::{EffectHandle, EffectPool};
    use crate::error::{DomResultExt, SetupError};
    use wasm_bindgen::JsCast;
    use web_sys::{Element, HtmlElement};

    impl EffectHandle for HtmlElement {
        fn show(&self) {
            let _ = self.style().set_property("display", "block");
        }

        fn hide(&self) {
            let _ = self.style().set_property("display", "none");
        }
    }

    /// One-shot browser timers.
    pub struct TimerScheduler;

    impl super::Scheduler for TimerScheduler {
        fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            gloo_timers::callback::Timeout::new(delay_ms, task).forget();
        }
    }

    /// Builds a pool of hidden `div.{class}` elements appended to `container`.
    pub fn dom_pool(
        container: &Element,
        capacity: usize,
        class: &str,
    ) -> Result<EffectPool<HtmlElement>, SetupError> {
        let document = container
            .owner_document()
            .ok_or(SetupError::NoDocument)?;

        EffectPool::try_new(capacity, |_| {
            let element = document
                .create_element("div")
                .context("create pooled element")?
                .dyn_into::<HtmlElement>()
                .map_err(|_| SetupError::dom("create pooled element", "not an HtmlElement"))?;
            element.set_class_name(class);
            container
                .append_child(&element)
                .context("attach pooled element")?;
            Ok(element)
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{EffectHandle, Scheduler};
    use std::cell::{Cell, RefCell};

    #[derive(Clone, Default)]
    pub struct FakeHandle {
        pub id: usize,
        pub visible: std::rc::Rc<Cell<bool>>,
        pub hides: std::rc::Rc<Cell<u32>>,
    }

    impl FakeHandle {
        pub fn new(id: usize) -> Self {
            Self {
                id,
                visible: std::rc::Rc::new(Cell::new(true)),
                hides: std::rc::Rc::default(),
            }
        }
    }

    impl EffectHandle for FakeHandle {
        fn show(&self) {
            self.visible.set(true);
        }

        fn hide(&self) {
            self.visible.set(false);
            self.hides.set(self.hides.get() + 1);
        }
    }

    /// Deferred tasks run only when the test advances time.
    #[derive(Default)]
    pub struct ManualScheduler {
        now: Cell<u32>,
        pending: RefCell<Vec<(u32, Box<dyn FnOnce()>)>>,
    }

    impl ManualScheduler {
        pub fn advance(&self, elapsed_ms: u32) {
            let now = self.now.get() + elapsed_ms;
            self.now.set(now);

            let due = {
                let mut pending = self.pending.borrow_mut();
                let (due, waiting): (Vec<_>, Vec<_>) =
                    pending.drain(..).partition(|(at, _)| *at <= now);
                *pending = waiting;
                due
            };

            for (_, task) in due {
                task();
            }
        }

        pub fn pending(&self) -> usize {
            self.pending.borrow().len()
        }
    }

    impl Scheduler for ManualScheduler {
        fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            let at = self.now.get() + delay_ms;
            self.pending.borrow_mut().push((at, task));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{FakeHandle, ManualScheduler};
    use super::*;
    use std::convert::Infallible;

    fn pool(capacity: usize) -> EffectPool<FakeHandle> {
        match EffectPool::try_new(capacity, |index| Ok::<_, Infallible>(FakeHandle::new(index))) {
            Ok(pool) => pool,
            Err(never) => match never {},
        }
    }

    fn visible_count(pool: &EffectPool<FakeHandle>) -> usize {
        (0..pool.capacity())
            .filter(|index| pool.handle(SlotId(*index)).is_some_and(|h| h.visible.get()))
            .count()
    }

    #[test]
    fn exhausted_pool_refuses_extra_acquire() {
        let mut pool = pool(3);

        assert!(pool.acquire().is_some());
        assert!(pool.acquire().is_some());
        assert!(pool.acquire().is_some());
        assert_eq!(pool.acquire(), None);
        assert_eq!(pool.in_use(), 3);
    }

    #[test]
    fn release_then_acquire_reuses_lowest_free_slot() {
        let mut pool = pool(3);
        let slots: Vec<_> = (0..3).filter_map(|_| pool.acquire()).collect();

        pool.release(slots[1]);
        let reused = pool.acquire().expect("a slot was freed");

        assert_eq!(reused, slots[1]);
        assert_eq!(pool.handle(reused).map(|h| h.id), Some(1));
    }

    #[test]
    fn release_is_idempotent() {
        let mut pool = pool(2);
        let slot = pool.acquire().expect("fresh pool");

        pool.release(slot);
        let hides_after_first = pool.handle(slot).map(|h| h.hides.get());
        pool.release(slot);

        assert_eq!(pool.handle(slot).map(|h| h.hides.get()), hides_after_first);
        assert!(!pool.is_in_use(slot));
        assert_eq!(pool.in_use(), 0);
        assert_eq!(pool.acquire(), Some(slot));
        assert_eq!(pool.acquire(), Some(SlotId(1)));
    }

    #[test]
    fn releasing_unknown_slot_is_ignored() {
        let mut pool = pool(1);
        pool.release(SlotId(7));
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    fn new_pool_starts_idle_and_hidden() {
        let pool = pool(10);

        assert_eq!(pool.capacity(), 10);
        assert_eq!(pool.in_use(), 0);
        assert_eq!(visible_count(&pool), 0);
    }

    #[test]
    fn visible_handles_never_exceed_capacity() {
        let mut pool = pool(4);
        let mut held = Vec::new();

        for step in 0..40 {
            if step % 3 == 2 {
                if let Some(slot) = held.pop() {
                    pool.release(slot);
                }
            } else if let Some(slot) = pool.acquire() {
                held.push(slot);
            }

            assert!(visible_count(&pool) <= pool.capacity());
            assert_eq!(visible_count(&pool), pool.in_use());
        }
    }

    #[test]
    fn failing_factory_aborts_construction() {
        let result = EffectPool::try_new(5, |index| {
            if index == 3 {
                Err("no document")
            } else {
                Ok(FakeHandle::new(index))
            }
        });

        assert_eq!(result.err(), Some("no document"));
    }

    #[test]
    fn flash_releases_once_after_duration() {
        let pool: SharedPool<FakeHandle> = Rc::new(RefCell::new(pool(2)));
        let scheduler = ManualScheduler::default();
        let mut placed = None;

        let slot = flash(&pool, &scheduler, 2_000, |handle| placed = Some(handle.id))
            .expect("pool has room");
        let handle = pool.borrow().handle(slot).cloned().expect("valid slot");
        let hides_before = handle.hides.get();

        assert_eq!(placed, Some(0));
        assert!(handle.visible.get());

        scheduler.advance(1_999);
        assert!(pool.borrow().is_in_use(slot));

        scheduler.advance(1);
        assert!(!pool.borrow().is_in_use(slot));
        assert!(!handle.visible.get());
        assert_eq!(handle.hides.get(), hides_before + 1);
        assert_eq!(scheduler.pending(), 0);

        scheduler.advance(10_000);
        assert_eq!(handle.hides.get(), hides_before + 1);
    }

    #[test]
    fn flash_on_exhausted_pool_schedules_nothing() {
        let pool: SharedPool<FakeHandle> = Rc::new(RefCell::new(pool(1)));
        let scheduler = ManualScheduler::default();

        assert!(flash(&pool, &scheduler, 1_000, |_| {}).is_some());
        let mut placed = false;
        assert!(flash(&pool, &scheduler, 1_000, |_| placed = true).is_none());

        assert!(!placed);
        assert_eq!(scheduler.pending(), 1);
    }
}
