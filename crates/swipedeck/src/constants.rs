//! Shared deck constants for consistent gesture and stacking behavior.
//!
//! Distances are in logical pixels unless stated otherwise. Anything derived
//! from the viewport width is computed at runtime from these fractions.

/// Fraction of the viewport width a release must exceed horizontally to
/// commit a swipe. A quarter of the screen matches the classic card-swipe
/// feel: far enough to rule out accidental flicks, close enough that a
/// deliberate drag commits without reaching the edge.
///
/// The comparison is strict on both sides; a release exactly at the
/// threshold is a cancel.
pub const SWIPE_THRESHOLD_FRACTION: f32 = 0.25;

/// Duration of the commit (swipe-out) tween in milliseconds.
pub const SWIPE_OUT_MILLIS: u64 = 250;

/// The commit tween drives the card to this many viewport widths off-screen,
/// guaranteeing it clears the viewport at any rotation.
pub const SWIPE_OUT_DISTANCE_FACTOR: f32 = 2.0;

/// Horizontal drag domain for the rotation mapping, in viewport widths.
/// A drag of 1.5 viewport widths rotates the card to the full angle; drags
/// beyond that clamp.
pub const ROTATION_DOMAIN_FACTOR: f32 = 1.5;

/// Rotation at the edge of the drag domain, in degrees.
pub const MAX_ROTATION_DEGREES: f32 = 90.0;

/// Vertical stagger and per-side horizontal inset applied per position for
/// cards behind the head, producing the fanned stack illusion.
pub const STACK_STAGGER: f32 = 5.0;

/// Number of cards that receive visual treatment per frame, head included.
/// Items beyond the window stay in the deck but are not rendered.
pub const VISIBLE_WINDOW: usize = 3;
