use crate::{CardKey, DeckState, DragPhase, Point, Runtime, RuntimeHandle, SwipeDirection};

use std::cell::RefCell;
use std::rc::Rc;

const FRAME_NANOS: u64 = 16_666_667;
const VIEWPORT: f32 = 400.0;

#[derive(Clone, Debug, PartialEq)]
struct TestCard {
    id: u64,
    name: &'static str,
}

impl CardKey for TestCard {
    fn key(&self) -> u64 {
        self.id
    }
}

fn cards(names: &[&'static str]) -> Vec<TestCard> {
    names
        .iter()
        .enumerate()
        .map(|(id, name)| TestCard {
            id: id as u64,
            name,
        })
        .collect()
}

fn new_deck(handle: &RuntimeHandle, names: &[&'static str]) -> DeckState<TestCard> {
    let deck = DeckState::new(handle.clone(), VIEWPORT);
    deck.set_items(cards(names));
    deck
}

/// Pumps frames until no callback is pending, returning the last frame time.
fn settle(handle: &RuntimeHandle, mut frame_time: u64) -> u64 {
    for _ in 0..600 {
        if !handle.has_frame_callbacks() {
            return frame_time;
        }
        frame_time += FRAME_NANOS;
        handle.drain_frame_callbacks(frame_time);
    }
    panic!("animations did not settle within 600 frames");
}

/// Full gesture: start, drag to (dx, dy), release there.
fn swipe(deck: &DeckState<TestCard>, dx: f32, dy: f32) {
    deck.on_gesture_start();
    deck.on_gesture_move(dx, dy);
    deck.on_gesture_end(dx, dy);
}

#[test]
fn release_past_threshold_commits() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let deck = new_deck(&handle, &["a", "b"]);

    // Threshold is a quarter of the viewport.
    assert_eq!(deck.threshold(), 100.0);

    swipe(&deck, 150.0, 0.0);
    assert_eq!(deck.phase(), DragPhase::AnimatingCommit(SwipeDirection::Right));
    settle(&handle, 0);
    assert_eq!(deck.head_index(), 1);

    swipe(&deck, -101.0, 0.0);
    assert_eq!(deck.phase(), DragPhase::AnimatingCommit(SwipeDirection::Left));
}

#[test]
fn boundary_release_is_a_cancel() {
    let runtime = Runtime::new();
    let handle = runtime.handle();

    for dx in [100.0, -100.0, 50.0, -99.9, 0.0] {
        let deck = new_deck(&handle, &["a", "b"]);
        swipe(&deck, dx, 0.0);
        assert_eq!(
            deck.phase(),
            DragPhase::AnimatingCancel,
            "dx {dx} must not commit"
        );
        settle(&handle, 0);
        assert_eq!(deck.head_index(), 0, "dx {dx} must not advance");
    }
}

#[test]
fn vertical_offset_never_participates_in_the_decision() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let deck = new_deck(&handle, &["a", "b"]);

    swipe(&deck, 0.0, 500.0);
    assert_eq!(deck.phase(), DragPhase::AnimatingCancel);
    settle(&handle, 0);
    assert_eq!(deck.head_index(), 0);
}

#[test]
fn commits_fire_callbacks_in_order_with_the_right_items() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let deck = new_deck(&handle, &["a", "b", "c"]);
    let events: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    let left_events = Rc::clone(&events);
    deck.set_on_swipe_left(move |card: &TestCard| {
        left_events.borrow_mut().push(format!("left:{}", card.name));
    });
    let right_events = Rc::clone(&events);
    deck.set_on_swipe_right(move |card: &TestCard| {
        right_events.borrow_mut().push(format!("right:{}", card.name));
    });

    swipe(&deck, 200.0, 0.0);
    let t = settle(&handle, 0);
    swipe(&deck, -200.0, 0.0);
    settle(&handle, t);

    assert_eq!(events.borrow().as_slice(), &["right:a", "left:b"]);
    assert_eq!(deck.head_index(), 2);
}

#[test]
fn each_commit_notifies_exactly_once() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let deck = new_deck(&handle, &["a", "b"]);
    let count = Rc::new(RefCell::new(0u32));

    let count_slot = Rc::clone(&count);
    deck.set_on_swipe_right(move |_| *count_slot.borrow_mut() += 1);

    swipe(&deck, 300.0, 0.0);
    let t = settle(&handle, 0);
    // Extra frames after completion must not re-notify.
    handle.drain_frame_callbacks(t + FRAME_NANOS);
    handle.drain_frame_callbacks(t + 2 * FRAME_NANOS);

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn cancel_is_idempotent_and_springs_back_to_rest() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let deck = new_deck(&handle, &["a", "b"]);

    let mut t = 0;
    for _ in 0..3 {
        swipe(&deck, 60.0, 20.0);
        assert_eq!(deck.drag_offset(), Point::new(60.0, 20.0));
        t = settle(&handle, t);
        assert_eq!(deck.head_index(), 0);
        assert_eq!(deck.drag_offset(), Point::ZERO);
        assert_eq!(deck.phase(), DragPhase::Idle);
    }
}

#[test]
fn full_session_traverses_the_deck() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let deck = new_deck(&handle, &["a", "b", "c"]);
    let events: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    let left_events = Rc::clone(&events);
    deck.set_on_swipe_left(move |card: &TestCard| {
        left_events.borrow_mut().push(format!("left:{}", card.name));
    });
    let right_events = Rc::clone(&events);
    deck.set_on_swipe_right(move |card: &TestCard| {
        right_events.borrow_mut().push(format!("right:{}", card.name));
    });

    swipe(&deck, 150.0, 0.0);
    let mut t = settle(&handle, 0);
    assert_eq!(deck.head_index(), 1);

    swipe(&deck, 50.0, 0.0);
    t = settle(&handle, t);
    assert_eq!(deck.head_index(), 1);
    assert_eq!(deck.drag_offset(), Point::ZERO);

    swipe(&deck, -120.0, 0.0);
    t = settle(&handle, t);
    assert_eq!(deck.head_index(), 2);

    swipe(&deck, 150.0, 0.0);
    settle(&handle, t);
    assert_eq!(deck.head_index(), 3);
    assert!(deck.is_exhausted());
    assert!(deck.visible_cards().exhausted);

    assert_eq!(
        events.borrow().as_slice(),
        &["right:a", "left:b", "right:c"]
    );
}

#[test]
fn exhausted_deck_ignores_gestures() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let deck = new_deck(&handle, &["a"]);

    swipe(&deck, 300.0, 0.0);
    settle(&handle, 0);
    assert!(deck.is_exhausted());

    swipe(&deck, 300.0, 0.0);
    assert_eq!(deck.phase(), DragPhase::Idle);
    assert_eq!(deck.head_index(), 1);
    assert!(deck.visible_cards().exhausted);
}

#[test]
fn empty_deck_is_exhausted_with_zero_swipes() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let deck: DeckState<TestCard> = DeckState::new(handle.clone(), VIEWPORT);

    assert!(deck.is_exhausted());
    assert!(deck.visible_cards().exhausted);

    deck.set_items(Vec::new());
    assert!(deck.is_exhausted());
    deck.on_gesture_start();
    assert_eq!(deck.phase(), DragPhase::Idle);
}

#[test]
fn gesture_during_commit_animation_is_ignored() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let deck = new_deck(&handle, &["a", "b"]);

    swipe(&deck, 200.0, 0.0);
    handle.drain_frame_callbacks(0);
    handle.drain_frame_callbacks(FRAME_NANOS);
    assert!(matches!(deck.phase(), DragPhase::AnimatingCommit(_)));

    let mid_flight = deck.drag_offset();
    deck.on_gesture_start();
    deck.on_gesture_move(10.0, 10.0);
    assert!(matches!(deck.phase(), DragPhase::AnimatingCommit(_)));
    assert_eq!(deck.drag_offset(), mid_flight);

    settle(&handle, FRAME_NANOS);
    assert_eq!(deck.head_index(), 1);
}

#[test]
fn grabbing_a_cancel_spring_starts_a_fresh_drag() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let deck = new_deck(&handle, &["a", "b"]);

    swipe(&deck, 80.0, 0.0);
    handle.drain_frame_callbacks(0);
    handle.drain_frame_callbacks(FRAME_NANOS);
    assert_eq!(deck.phase(), DragPhase::AnimatingCancel);

    deck.on_gesture_start();
    assert_eq!(deck.phase(), DragPhase::Dragging);
    assert_eq!(deck.drag_offset(), Point::ZERO);

    deck.on_gesture_move(150.0, 0.0);
    deck.on_gesture_end(150.0, 0.0);
    settle(&handle, FRAME_NANOS);
    assert_eq!(deck.head_index(), 1);
}

#[test]
fn deck_replacement_resets_traversal() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let deck = new_deck(&handle, &["a", "b", "c"]);

    swipe(&deck, 200.0, 0.0);
    let t = settle(&handle, 0);
    assert_eq!(deck.head_index(), 1);

    deck.set_items(cards(&["x", "y"]));
    assert_eq!(deck.head_index(), 0);
    assert_eq!(deck.len(), 2);
    assert_eq!(deck.drag_offset(), Point::ZERO);
    assert_eq!(deck.phase(), DragPhase::Idle);

    swipe(&deck, 200.0, 0.0);
    settle(&handle, t);
    assert_eq!(deck.head_index(), 1);
}

#[test]
fn deck_replacement_mid_animation_aborts_it() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let deck = new_deck(&handle, &["a", "b"]);
    let notified = Rc::new(RefCell::new(0u32));

    let notified_slot = Rc::clone(&notified);
    deck.set_on_swipe_right(move |_| *notified_slot.borrow_mut() += 1);

    swipe(&deck, 200.0, 0.0);
    handle.drain_frame_callbacks(0);
    assert!(matches!(deck.phase(), DragPhase::AnimatingCommit(_)));

    deck.set_items(cards(&["x", "y"]));
    settle(&handle, 0);

    // The old commit neither advances the new deck nor notifies.
    assert_eq!(deck.head_index(), 0);
    assert_eq!(*notified.borrow(), 0);
    assert_eq!(deck.phase(), DragPhase::Idle);
}

#[test]
fn swipe_callback_can_refill_the_deck() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let deck = new_deck(&handle, &["a", "b"]);

    let refill = deck.clone();
    deck.set_on_swipe_right(move |card: &TestCard| {
        assert_eq!(card.name, "a");
        refill.set_items(cards(&["x", "y", "z"]));
    });

    swipe(&deck, 200.0, 0.0);
    let t = settle(&handle, 0);

    // The refill is a deck replacement: traversal restarts at the first new
    // card and the finished commit does not carry its advance over.
    assert_eq!(deck.head_index(), 0);
    assert_eq!(deck.len(), 3);
    assert_eq!(deck.phase(), DragPhase::Idle);
    assert_eq!(deck.drag_offset(), Point::ZERO);

    swipe(&deck, 200.0, 0.0);
    settle(&handle, t);
    assert_eq!(deck.head_index(), 1);
}

#[test]
fn swipe_callback_runs_before_the_head_advances() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let deck = new_deck(&handle, &["a", "b"]);
    let seen: Rc<RefCell<Vec<(&'static str, usize)>>> = Rc::new(RefCell::new(Vec::new()));

    let seen_slot = Rc::clone(&seen);
    let reader = deck.clone();
    deck.set_on_swipe_right(move |card: &TestCard| {
        seen_slot
            .borrow_mut()
            .push((card.name, reader.head_index()));
    });

    swipe(&deck, 200.0, 0.0);
    let t = settle(&handle, 0);
    swipe(&deck, 200.0, 0.0);
    settle(&handle, t);

    // Each callback still sees the committed card at the head.
    assert_eq!(seen.borrow().as_slice(), &[("a", 0), ("b", 1)]);
    assert_eq!(deck.head_index(), 2);
}

#[test]
fn head_index_matches_commit_count() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let deck = new_deck(&handle, &["a", "b", "c", "d", "e"]);

    let mut t = 0;
    for (n, dx) in [250.0, -250.0, 250.0, -250.0].iter().enumerate() {
        swipe(&deck, *dx, 0.0);
        t = settle(&handle, t);
        assert_eq!(deck.head_index(), n + 1);
    }
    assert!(!deck.is_exhausted());
}

#[test]
fn gesture_moves_overwrite_the_offset() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let deck = new_deck(&handle, &["a"]);

    deck.on_gesture_start();
    deck.on_gesture_move(40.0, 5.0);
    deck.on_gesture_move(-20.0, 80.0);
    assert_eq!(deck.drag_offset(), Point::new(-20.0, 80.0));

    // Moves outside a drag are ignored.
    deck.on_gesture_end(0.0, 0.0);
    settle(&handle, 0);
    deck.on_gesture_move(999.0, 0.0);
    assert_eq!(deck.drag_offset(), Point::ZERO);
}
