//! Per-card visual parameters derived by the stack renderer.

use crate::geometry::Point;

/// Visual parameters for one card in the stack for one frame.
///
/// The host maps these onto whatever layout system it draws with:
/// `translation` is the card's displacement from the deck origin,
/// `rotation_degrees` rotates around the card center, and `width` is the
/// laid-out card width (behind-cards shrink to produce the fanned stack).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardStyle {
    pub translation: Point,
    pub rotation_degrees: f32,
    pub width: f32,
}

impl CardStyle {
    /// A card at rest with the given width: no displacement, no rotation.
    pub const fn at_rest(width: f32) -> Self {
        Self {
            translation: Point::ZERO,
            rotation_degrees: 0.0,
            width,
        }
    }
}
