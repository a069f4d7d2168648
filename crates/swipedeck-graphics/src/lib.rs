//! Geometry and styling data shared by the Swipedeck crates.
//!
//! Pure data, no behavior beyond small constructors and arithmetic. Anything
//! that owns state or drives animation lives in the other crates.

pub mod geometry;
pub mod style;

pub use geometry::Point;
pub use style::CardStyle;
