//! Single-threaded frame-callback runtime.
//!
//! Everything in Swipedeck runs on one interaction/render thread. Animations
//! register one-shot callbacks here and the host (or a test) pumps them with
//! [`RuntimeHandle::drain_frame_callbacks`], passing the frame time in
//! nanoseconds. There is no wall clock inside the runtime; all time arrives
//! from the caller.

mod frame_clock;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle};

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
