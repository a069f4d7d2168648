//! Headless Swipedeck demo.
//!
//! Builds a small deck, replays a scripted gesture session through the
//! frame-callback runtime, and logs what a host would draw each step.
//! Run with `RUST_LOG=debug` to see the deck's internal decisions too.

use log::info;
use swipedeck::{CardKey, DeckState, PointerEvent, Runtime, RuntimeHandle, SwipePointerNode};

const FRAME_NANOS: u64 = 16_666_667;
const VIEWPORT_WIDTH: f32 = 400.0;

#[derive(Clone, Debug)]
struct DemoCard {
    id: u64,
    title: &'static str,
}

impl CardKey for DemoCard {
    fn key(&self) -> u64 {
        self.id
    }
}

fn pump(handle: &RuntimeHandle, frame_time: &mut u64) {
    while handle.has_frame_callbacks() {
        *frame_time += FRAME_NANOS;
        handle.drain_frame_callbacks(*frame_time);
    }
}

fn print_deck(deck: &DeckState<DemoCard>) {
    let lines = deck.render_with(
        |card, visual| {
            format!(
                "[{}] {:<10} at ({:>6.1}, {:>5.1}) rot {:>5.1}° width {:>5.1}",
                visual.position_in_window,
                card.title,
                visual.style.translation.x,
                visual.style.translation.y,
                visual.style.rotation_degrees,
                visual.style.width,
            )
        },
        || "-- no more cards --".to_string(),
    );
    for line in lines {
        info!("{line}");
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let runtime = Runtime::new();
    let handle = runtime.handle();

    let deck = DeckState::new(handle.clone(), VIEWPORT_WIDTH);
    deck.set_items(vec![
        DemoCard { id: 1, title: "espresso" },
        DemoCard { id: 2, title: "cortado" },
        DemoCard { id: 3, title: "flat white" },
        DemoCard { id: 4, title: "cold brew" },
    ]);
    deck.set_on_swipe_left(|card: &DemoCard| info!("rejected: {}", card.title));
    deck.set_on_swipe_right(|card: &DemoCard| info!("accepted: {}", card.title));

    let mut node = SwipePointerNode::new(deck.clone());
    let mut frame_time = 0;

    // (label, drag end x) — threshold is a quarter of the viewport, 100px.
    let script: &[(&str, f32)] = &[
        ("drag right past the threshold", 160.0),
        ("hesitate below the threshold", 60.0),
        ("drag left past the threshold", -140.0),
        ("another decisive right", 220.0),
        ("finish the deck", 180.0),
    ];

    info!("deck ready, {} cards:", deck.len());
    print_deck(&deck);

    for (label, end_x) in script {
        info!("-- {label} (release at dx {end_x})");
        node.on_pointer_event(&PointerEvent::down(200.0, 300.0));
        node.on_pointer_event(&PointerEvent::moved(200.0 + end_x / 2.0, 310.0));
        node.on_pointer_event(&PointerEvent::moved(200.0 + end_x, 305.0));
        node.on_pointer_event(&PointerEvent::up(200.0 + end_x, 305.0));
        pump(&handle, &mut frame_time);
        print_deck(&deck);
    }

    info!(
        "session done: head {} of {}, exhausted: {}",
        deck.head_index(),
        deck.len(),
        deck.is_exhausted()
    );
}
