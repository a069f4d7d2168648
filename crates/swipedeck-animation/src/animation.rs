use std::cell::RefCell;
use std::rc::Rc;

use log::trace;
use swipedeck_graphics::Point;
use swipedeck_runtime::{FrameCallbackRegistration, RuntimeHandle};

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

impl Lerp for Point {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Point::new(
            self.x.lerp(&target.x, fraction),
            self.y.lerp(&target.y, fraction),
        )
    }
}

/// Trait for values that can participate in spring animations.
///
/// The spring integrates in progress space (0 at `start`, 1 at `target`), so
/// a value type only needs to report where `current` sits between the two.
pub trait SpringValue: Lerp + Clone {
    /// Progress of `current` between `start` and `target`.
    fn progress_between(start: &Self, target: &Self, current: &Self) -> f32;

    /// Whether `current` is close enough to `target` to consider the spring
    /// finished. `threshold` is in value units.
    fn is_near(current: &Self, target: &Self, threshold: f32) -> bool;
}

impl SpringValue for f32 {
    fn progress_between(start: &Self, target: &Self, current: &Self) -> f32 {
        if (target - start).abs() < f32::EPSILON {
            1.0
        } else {
            (current - start) / (target - start)
        }
    }

    fn is_near(current: &Self, target: &Self, threshold: f32) -> bool {
        (current - target).abs() < threshold
    }
}

impl SpringValue for f64 {
    fn progress_between(start: &Self, target: &Self, current: &Self) -> f32 {
        if (target - start).abs() < f64::EPSILON {
            1.0
        } else {
            ((current - start) / (target - start)) as f32
        }
    }

    fn is_near(current: &Self, target: &Self, threshold: f32) -> bool {
        (current - target).abs() < threshold as f64
    }
}

impl SpringValue for Point {
    /// Projection of `current` onto the `start` → `target` segment.
    fn progress_between(start: &Self, target: &Self, current: &Self) -> f32 {
        let axis = *target - *start;
        let len_sq = axis.x * axis.x + axis.y * axis.y;
        if len_sq < f32::EPSILON {
            return 1.0;
        }
        let travelled = *current - *start;
        (travelled.x * axis.x + travelled.y * axis.y) / len_sq
    }

    fn is_near(current: &Self, target: &Self, threshold: f32) -> bool {
        current.distance_to(target) < threshold
    }
}

/// Easing functions for tween animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Ease out using a cubic curve.
    EaseOut,
    /// Ease in and out using a cubic curve.
    EaseInOut,
    /// Fast out, slow in (material design standard).
    FastOutSlowIn,
}

impl Easing {
    /// Apply the easing function to a linear fraction in [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Cubic bezier easing with control points (x1, y1) and (x2, y2).
///
/// Solves the parametric `t` for the given x fraction by bisection; the
/// curve's x component is monotonic for control x values in [0, 1].
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    fn sample(p1: f32, p2: f32, t: f32) -> f32 {
        let inv = 1.0 - t;
        3.0 * inv * inv * t * p1 + 3.0 * inv * t * t * p2 + t * t * t
    }

    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut t = fraction;
    for _ in 0..24 {
        let x = sample(x1, x2, t);
        if (x - fraction).abs() < 1e-5 {
            break;
        }
        if x > fraction {
            hi = t;
        } else {
            lo = t;
        }
        t = 0.5 * (lo + hi);
    }

    sample(y1, y2, t)
}

/// Tween specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowIn)
    }
}

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy).
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values settle faster.
    pub stiffness: f32,
    /// Velocity threshold (progress units per second) to stop the animation.
    pub velocity_threshold: f32,
    /// Position threshold (value units) to stop the animation.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    /// A stiff spring (fast, no bounce).
    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default_spring()
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// Animation type specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    /// Time-based tween animation.
    Tween(AnimationSpec),
    /// Physics-based spring animation.
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

/// Generic animatable value holder.
///
/// Reads are O(1) against the last computed value; writes either snap
/// (gesture updates) or start a frame-driven animation toward a target.
/// Cloning shares the underlying value.
pub struct Animatable<T: SpringValue + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: SpringValue + 'static> {
    runtime: RuntimeHandle,
    current: T,
    /// Spring velocity in progress units per second.
    velocity: f32,
    start: T,
    target: T,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    last_frame_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_end: Option<Box<dyn FnOnce()>>,
}

impl<T: SpringValue + 'static> Animatable<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            runtime,
            current: initial.clone(),
            velocity: 0.0,
            start: initial.clone(),
            target: initial,
            animation_type: AnimationType::default(),
            start_time_nanos: None,
            last_frame_time_nanos: None,
            registration: None,
            on_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// The value as of the most recent frame (or snap).
    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    /// The current animation target.
    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn animation_type(&self) -> AnimationType {
        self.inner.borrow().animation_type
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().registration.is_some()
    }

    /// Animate toward `target`. Replaces any in-flight animation; the
    /// replaced animation's end notification is dropped, not fired.
    pub fn animate_to(&self, target: T, animation: AnimationType) {
        self.start_animation(target, animation, None);
    }

    /// Like [`Animatable::animate_to`], with `on_end` invoked once when the
    /// animation reaches its target. `on_end` does not fire if the animation
    /// is replaced or stopped first.
    pub fn animate_to_with_end(
        &self,
        target: T,
        animation: AnimationType,
        on_end: impl FnOnce() + 'static,
    ) {
        self.start_animation(target, animation, Some(Box::new(on_end)));
    }

    /// Set the value immediately, cancelling any in-flight animation.
    pub fn snap_to(&self, target: T) {
        let mut inner = self.inner.borrow_mut();
        if let Some(registration) = inner.registration.take() {
            registration.cancel();
        }
        inner.on_end = None;
        inner.velocity = 0.0;
        inner.current = target.clone();
        inner.start = target.clone();
        inner.target = target;
        inner.start_time_nanos = None;
        inner.last_frame_time_nanos = None;
    }

    /// Cancel any in-flight animation, keeping the current value.
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(registration) = inner.registration.take() {
            registration.cancel();
        }
        inner.on_end = None;
        inner.velocity = 0.0;
        let current = inner.current.clone();
        inner.start = current.clone();
        inner.target = current;
        inner.start_time_nanos = None;
        inner.last_frame_time_nanos = None;
    }

    fn start_animation(
        &self,
        target: T,
        animation: AnimationType,
        on_end: Option<Box<dyn FnOnce()>>,
    ) {
        {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.start = inner.current.clone();
            inner.target = target;
            inner.animation_type = animation;
            inner.velocity = 0.0;
            inner.start_time_nanos = None;
            inner.last_frame_time_nanos = None;
            inner.on_end = on_end;
        }
        Self::schedule_frame(&self.inner);
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let mut schedule_next = false;
        let mut finished_on_end: Option<Box<dyn FnOnce()>> = None;
        {
            let mut inner = this.borrow_mut();
            inner.registration = None;

            match inner.animation_type {
                AnimationType::Tween(spec) => {
                    let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
                    let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
                    let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
                    let linear_progress =
                        (elapsed_nanos as f32 / duration_nanos as f32).clamp(0.0, 1.0);
                    let progress = spec.easing.transform(linear_progress);

                    inner.current = inner.start.lerp(&inner.target, progress);
                    trace!("tween frame: progress {progress:.3}");

                    if linear_progress >= 1.0 {
                        Self::settle(&mut inner);
                        finished_on_end = inner.on_end.take();
                    } else {
                        schedule_next = true;
                    }
                }
                AnimationType::Spring(spec) => {
                    let dt = match inner.last_frame_time_nanos.replace(frame_time_nanos) {
                        None => 0.0,
                        Some(prev) => frame_time_nanos.saturating_sub(prev) as f32 / 1e9,
                    };

                    if dt <= 0.0 {
                        schedule_next = true;
                    } else {
                        // Damped harmonic oscillator in progress space,
                        // integrated with semi-implicit Euler in fixed
                        // substeps for stability.
                        let stiffness = spec.stiffness;
                        let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();
                        const SUBSTEP: f32 = 0.016;

                        let mut progress = <T as SpringValue>::progress_between(
                            &inner.start,
                            &inner.target,
                            &inner.current,
                        );
                        let mut remaining = dt;
                        while remaining > 0.0 {
                            let step = SUBSTEP.min(remaining);
                            let displacement = progress - 1.0;
                            let acceleration =
                                -stiffness * displacement - damping * inner.velocity;
                            inner.velocity += acceleration * step;
                            progress += inner.velocity * step;
                            remaining -= step;
                        }

                        inner.current =
                            inner.start.lerp(&inner.target, progress.clamp(-1.0, 2.0));
                        trace!("spring frame: progress {progress:.4}");

                        let at_rest = inner.velocity.abs() < spec.velocity_threshold;
                        let near_target = <T as SpringValue>::is_near(
                            &inner.current,
                            &inner.target,
                            spec.position_threshold,
                        );

                        if at_rest && near_target {
                            Self::settle(&mut inner);
                            finished_on_end = inner.on_end.take();
                        } else {
                            schedule_next = true;
                        }
                    }
                }
            }
        }

        if schedule_next {
            Self::schedule_frame(this);
        }
        if let Some(on_end) = finished_on_end {
            on_end();
        }
    }

    fn settle(inner: &mut AnimatableInner<T>) {
        inner.current = inner.target.clone();
        inner.start = inner.target.clone();
        inner.velocity = 0.0;
        inner.start_time_nanos = None;
        inner.last_frame_time_nanos = None;
    }
}

impl<T: SpringValue + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
