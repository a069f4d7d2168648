//! Animation system for Swipedeck.
//!
//! Time-based tweens with easing curves, physics-based springs, and the
//! piecewise-linear value mapping used for drag-to-rotation interpolation.
//! Animations are driven by the runtime's frame callbacks; there is no
//! internal clock.

mod animation;
pub mod mapping;

pub use animation::{
    Animatable, AnimationSpec, AnimationType, Easing, Lerp, SpringSpec, SpringValue,
};
pub use mapping::map_range;

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod animation_tests;

#[cfg(test)]
#[path = "tests/mapping_tests.rs"]
mod mapping_tests;
