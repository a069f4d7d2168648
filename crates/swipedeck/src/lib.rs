//! Swipedeck: a gesture-driven stacked-card selector.
//!
//! A finite ordered collection of items is presented one at a time atop a
//! visual stack. The user drags the topmost card; a horizontal drag past a
//! threshold commits the card to a left or right decision and advances to
//! the next item, while a drag below the threshold springs back.
//!
//! [`DeckState`] owns the decision state machine and the animated drag
//! offset; [`SwipePointerNode`] adapts raw pointer events into gesture
//! updates; the render pass derives per-card [`CardStyle`] values for the
//! visible window each frame. Card content itself is caller-supplied, see
//! [`DeckState::render_with`].

pub mod constants;
mod deck_state;
mod gesture;
mod pointer;
mod render;

pub use deck_state::{CardKey, DeckState, DragPhase, SwipeDirection};
pub use gesture::SwipePointerNode;
pub use pointer::{PointerEvent, PointerEventKind};
pub use render::{style_for, CardVisual, DeckRender};

// Re-export the pieces callers need to construct and drive a deck.
pub use swipedeck_graphics::{CardStyle, Point};
pub use swipedeck_runtime::{Runtime, RuntimeHandle};

#[cfg(test)]
#[path = "tests/deck_tests.rs"]
mod deck_tests;

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod render_tests;

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod gesture_tests;
