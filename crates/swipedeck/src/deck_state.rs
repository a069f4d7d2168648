//! Deck state: head cursor, drag offset, and the swipe decision machine.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use swipedeck_animation::{Animatable, AnimationSpec, AnimationType, SpringSpec};
use swipedeck_graphics::Point;
use swipedeck_runtime::RuntimeHandle;

use crate::constants::{SWIPE_OUT_DISTANCE_FACTOR, SWIPE_OUT_MILLIS, SWIPE_THRESHOLD_FRACTION};

/// Stable rendering key for a deck item.
pub trait CardKey {
    fn key(&self) -> u64;
}

impl CardKey for u64 {
    fn key(&self) -> u64 {
        *self
    }
}

impl CardKey for u32 {
    fn key(&self) -> u64 {
        u64::from(*self)
    }
}

/// Decision a committed swipe resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// The per-head-item interaction state machine.
///
/// `Idle` → `Dragging` on gesture start; `Dragging` → `AnimatingCommit` or
/// `AnimatingCancel` on release; both animations end in `Idle`. A cancel
/// spring may be grabbed back into `Dragging`; a commit always runs to
/// completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    AnimatingCommit(SwipeDirection),
    AnimatingCancel,
}

struct DeckInner<T> {
    runtime: RuntimeHandle,
    /// Shared so a swipe callback can be handed the committed item without
    /// keeping the deck borrowed while it runs.
    items: Rc<[T]>,
    head: usize,
    phase: DragPhase,
    offset: Animatable<Point>,
    viewport_width: f32,
    /// Bumped on every deck replacement; completion callbacks from a
    /// previous deck compare against it and bail out.
    generation: u64,
    /// Bumped whenever the visible window changes (head advance or deck
    /// replacement). Hosts key restack transitions off this.
    restack_epoch: u64,
    on_swipe_left: Option<Rc<dyn Fn(&T)>>,
    on_swipe_right: Option<Rc<dyn Fn(&T)>>,
}

/// State holder for a swipeable card deck.
///
/// Cheap to clone; clones share the same deck. All mutation goes through
/// this type: the item collection is read-only from the deck's perspective
/// and the head cursor only advances on a committed swipe.
///
/// Swipe callbacks are invoked synchronously when the commit animation
/// completes, before the head advances, and may call back into the deck —
/// replacing the items from inside a callback skips the pending advance and
/// starts the new deck at its first card.
pub struct DeckState<T: CardKey + 'static> {
    inner: Rc<RefCell<DeckInner<T>>>,
}

impl<T: CardKey + 'static> DeckState<T> {
    /// Creates an empty deck. `viewport_width` drives the commit threshold,
    /// the swipe-out distance, and the rotation domain.
    pub fn new(runtime: RuntimeHandle, viewport_width: f32) -> Self {
        let offset = Animatable::new(Point::ZERO, runtime.clone());
        Self {
            inner: Rc::new(RefCell::new(DeckInner {
                runtime,
                items: Vec::new().into(),
                head: 0,
                phase: DragPhase::Idle,
                offset,
                viewport_width,
                generation: 0,
                restack_epoch: 0,
                on_swipe_left: None,
                on_swipe_right: None,
            })),
        }
    }

    /// Replaces the deck's items. Always treated as an identity change:
    /// the head cursor resets to 0, the drag offset snaps to zero, and any
    /// in-flight drag or animation is abandoned.
    pub fn set_items(&self, items: Vec<T>) {
        let mut inner = self.inner.borrow_mut();
        debug!("deck replaced: {} items", items.len());
        inner.items = items.into();
        inner.head = 0;
        inner.generation += 1;
        inner.restack_epoch += 1;
        inner.phase = DragPhase::Idle;
        inner.offset.snap_to(Point::ZERO);
    }

    /// Callback invoked once per left-committed swipe with the swiped item.
    pub fn set_on_swipe_left(&self, callback: impl Fn(&T) + 'static) {
        self.inner.borrow_mut().on_swipe_left = Some(Rc::new(callback));
    }

    /// Callback invoked once per right-committed swipe with the swiped item.
    pub fn set_on_swipe_right(&self, callback: impl Fn(&T) + 'static) {
        self.inner.borrow_mut().on_swipe_right = Some(Rc::new(callback));
    }

    pub fn runtime(&self) -> RuntimeHandle {
        self.inner.borrow().runtime.clone()
    }

    pub fn viewport_width(&self) -> f32 {
        self.inner.borrow().viewport_width
    }

    /// Horizontal displacement a release must exceed to commit.
    pub fn threshold(&self) -> f32 {
        self.inner.borrow().viewport_width * SWIPE_THRESHOLD_FRACTION
    }

    pub fn head_index(&self) -> usize {
        self.inner.borrow().head
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().items.is_empty()
    }

    /// Whether every item has been swiped away (also true for an empty
    /// deck with no prior swipes).
    pub fn is_exhausted(&self) -> bool {
        let inner = self.inner.borrow();
        inner.head >= inner.items.len()
    }

    pub fn phase(&self) -> DragPhase {
        self.inner.borrow().phase
    }

    /// The head card's live displacement from rest.
    pub fn drag_offset(&self) -> Point {
        self.inner.borrow().offset.value()
    }

    /// Monotonic counter that changes whenever the visible window does.
    pub fn restack_epoch(&self) -> u64 {
        self.inner.borrow().restack_epoch
    }

    /// Begins a drag on the head card.
    ///
    /// Ignored while a commit animation is in flight and once the deck is
    /// exhausted. Starting a gesture during a cancel spring grabs the card:
    /// the spring is dropped and the offset resets for the new gesture.
    pub fn on_gesture_start(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.head >= inner.items.len() {
            debug!("gesture start ignored: deck exhausted");
            return;
        }
        match inner.phase {
            DragPhase::AnimatingCommit(_) => {
                debug!("gesture start ignored: commit animation in flight");
            }
            DragPhase::Idle | DragPhase::Dragging | DragPhase::AnimatingCancel => {
                inner.phase = DragPhase::Dragging;
                inner.offset.snap_to(Point::ZERO);
            }
        }
    }

    /// Overwrites the drag offset with the displacement from gesture start.
    /// O(1); no window recomputation happens here. Ignored outside a drag.
    pub fn on_gesture_move(&self, dx: f32, dy: f32) {
        let inner = self.inner.borrow();
        if inner.phase == DragPhase::Dragging {
            inner.offset.snap_to(Point::new(dx, dy));
        }
    }

    /// Classifies the release and starts the commit or cancel animation.
    ///
    /// Only the final horizontal displacement participates in the decision;
    /// `dy` is visual-only. A release exactly at the threshold cancels.
    pub fn on_gesture_end(&self, dx: f32, dy: f32) {
        let decision = {
            let inner = self.inner.borrow();
            if inner.phase != DragPhase::Dragging {
                return;
            }
            inner.offset.snap_to(Point::new(dx, dy));
            let threshold = inner.viewport_width * SWIPE_THRESHOLD_FRACTION;
            if dx > threshold {
                Some(SwipeDirection::Right)
            } else if dx < -threshold {
                Some(SwipeDirection::Left)
            } else {
                None
            }
        };

        match decision {
            Some(direction) => self.force_swipe(direction),
            None => self.reset_position(),
        }
    }

    /// Drives the head card off-screen and advances the deck on completion.
    pub fn force_swipe(&self, direction: SwipeDirection) {
        let mut inner = self.inner.borrow_mut();
        if inner.head >= inner.items.len() {
            return;
        }
        debug!("swipe committed: {direction:?}");
        inner.phase = DragPhase::AnimatingCommit(direction);

        let distance = inner.viewport_width * SWIPE_OUT_DISTANCE_FACTOR;
        let target_x = match direction {
            SwipeDirection::Right => distance,
            SwipeDirection::Left => -distance,
        };
        let generation = inner.generation;
        let weak = Rc::downgrade(&self.inner);
        inner.offset.animate_to_with_end(
            Point::new(target_x, 0.0),
            AnimationType::Tween(AnimationSpec::linear(SWIPE_OUT_MILLIS)),
            move || {
                if let Some(strong) = weak.upgrade() {
                    Self::complete_swipe(&strong, direction, generation);
                }
            },
        );
    }

    /// Springs the head card back to rest without advancing.
    fn reset_position(&self) {
        let mut inner = self.inner.borrow_mut();
        debug!("swipe cancelled, springing back");
        inner.phase = DragPhase::AnimatingCancel;

        let generation = inner.generation;
        let weak = Rc::downgrade(&self.inner);
        inner.offset.animate_to_with_end(
            Point::ZERO,
            AnimationType::Spring(SpringSpec::default_spring()),
            move || {
                if let Some(strong) = weak.upgrade() {
                    let mut inner = strong.borrow_mut();
                    if inner.generation == generation
                        && inner.phase == DragPhase::AnimatingCancel
                    {
                        inner.phase = DragPhase::Idle;
                    }
                }
            },
        );
    }

    fn complete_swipe(
        this: &Rc<RefCell<DeckInner<T>>>,
        direction: SwipeDirection,
        generation: u64,
    ) {
        // Notify first, with no borrow outstanding, so the callback can call
        // back into the deck. The head still points at the committed item
        // while the callback runs.
        let notified = {
            let inner = this.borrow();
            if inner.generation != generation {
                debug!("stale commit completion dropped");
                return;
            }
            if inner.phase != DragPhase::AnimatingCommit(direction) {
                return;
            }
            let callback = match direction {
                SwipeDirection::Left => inner.on_swipe_left.clone(),
                SwipeDirection::Right => inner.on_swipe_right.clone(),
            };
            callback.map(|callback| (callback, Rc::clone(&inner.items), inner.head))
        };

        if let Some((callback, items, committed)) = notified {
            if let Some(item) = items.get(committed) {
                callback(item);
            }
        }

        let mut inner = this.borrow_mut();
        if inner.generation != generation {
            debug!("deck replaced from swipe callback, advance dropped");
            return;
        }
        if inner.phase != DragPhase::AnimatingCommit(direction) {
            return;
        }
        inner.head += 1;
        inner.restack_epoch += 1;
        inner.phase = DragPhase::Idle;
        inner.offset.snap_to(Point::ZERO);
        debug!("head advanced to {}", inner.head);
    }

    pub(crate) fn with_inner<R>(&self, f: impl FnOnce(&[T], usize, Point, f32, u64) -> R) -> R {
        let inner = self.inner.borrow();
        f(
            &inner.items,
            inner.head,
            inner.offset.value(),
            inner.viewport_width,
            inner.restack_epoch,
        )
    }
}

impl<T: CardKey + 'static> Clone for DeckState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
