//! Pointer-event adapter for the swipe gesture.
//!
//! Converts Down/Move/Up events in local coordinates into the deck's
//! gesture lifecycle, tracking displacement from the press position. Capture
//! is unconditional: every Down begins a gesture (the deck itself decides
//! whether to accept it).

use log::trace;
use swipedeck_graphics::Point;

use crate::deck_state::{CardKey, DeckState};
use crate::pointer::{PointerEvent, PointerEventKind};

pub struct SwipePointerNode<T: CardKey + 'static> {
    deck: DeckState<T>,
    press_position: Option<Point>,
}

impl<T: CardKey + 'static> SwipePointerNode<T> {
    pub fn new(deck: DeckState<T>) -> Self {
        Self {
            deck,
            press_position: None,
        }
    }

    pub fn deck(&self) -> &DeckState<T> {
        &self.deck
    }

    /// Whether a pointer is currently held down on the deck.
    pub fn is_tracking(&self) -> bool {
        self.press_position.is_some()
    }

    /// Feeds one pointer event. Returns true if the node consumed it.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => {
                self.press_position = Some(event.position);
                self.deck.on_gesture_start();
                true
            }
            PointerEventKind::Move => match self.press_position {
                Some(press) => {
                    let delta = event.position - press;
                    trace!("drag delta ({}, {})", delta.x, delta.y);
                    self.deck.on_gesture_move(delta.x, delta.y);
                    true
                }
                None => false,
            },
            PointerEventKind::Up => match self.press_position.take() {
                Some(press) => {
                    let delta = event.position - press;
                    self.deck.on_gesture_end(delta.x, delta.y);
                    true
                }
                None => false,
            },
            PointerEventKind::Cancel => match self.press_position.take() {
                // A revoked gesture releases at rest, which is always a
                // cancel decision.
                Some(_) => {
                    self.deck.on_gesture_end(0.0, 0.0);
                    true
                }
                None => false,
            },
        }
    }
}
