//! Per-frame style derivation and the visible-window render pass.

use smallvec::SmallVec;
use swipedeck_animation::map_range;
use swipedeck_graphics::{CardStyle, Point};

use crate::constants::{
    MAX_ROTATION_DEGREES, ROTATION_DOMAIN_FACTOR, STACK_STAGGER, VISIBLE_WINDOW,
};
use crate::deck_state::{CardKey, DeckState};

/// One card's rendering parameters for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardVisual {
    /// Stable item key, for host-side element identity.
    pub key: u64,
    /// 0 for the head card, 1.. for cards behind it.
    pub position_in_window: usize,
    pub style: CardStyle,
}

/// The visible window for one frame, emitted in reverse stacking order:
/// farthest-back card first, head card last, so that drawing the list in
/// order makes nearer cards occlude farther ones.
#[derive(Clone, Debug, Default)]
pub struct DeckRender {
    pub cards: SmallVec<[CardVisual; VISIBLE_WINDOW]>,
    /// True once every item has been swiped away (or the deck is empty);
    /// the host shows its no-more-cards placeholder instead of `cards`.
    pub exhausted: bool,
    /// See [`DeckState::restack_epoch`].
    pub restack_epoch: u64,
}

/// Derives the visual parameters for the card at `position_in_window`.
///
/// The head card follows the drag offset directly and rotates with it: the
/// horizontal offset maps from `±1.5 × viewport` to `±90°`, clamped beyond.
/// Cards behind the head ignore the offset and sit in a fanned stack, each
/// staggered down and inset from both sides.
pub fn style_for(position_in_window: usize, offset: Point, viewport_width: f32) -> CardStyle {
    if position_in_window == 0 {
        let domain = viewport_width * ROTATION_DOMAIN_FACTOR;
        let rotation = map_range(
            offset.x,
            &[
                (-domain, -MAX_ROTATION_DEGREES),
                (0.0, 0.0),
                (domain, MAX_ROTATION_DEGREES),
            ],
        );
        CardStyle {
            translation: offset,
            rotation_degrees: rotation,
            width: viewport_width,
        }
    } else {
        let stagger = STACK_STAGGER * position_in_window as f32;
        CardStyle {
            translation: Point::new(stagger, stagger),
            rotation_degrees: 0.0,
            width: viewport_width - 2.0 * stagger,
        }
    }
}

impl<T: CardKey + 'static> DeckState<T> {
    /// Computes the visible window's styles for the current frame.
    ///
    /// Items before the head are gone and occupy no visual space; items past
    /// the window are skipped for the frame but stay in the deck.
    pub fn visible_cards(&self) -> DeckRender {
        self.with_inner(|items, head, offset, viewport_width, restack_epoch| {
            let mut render = DeckRender {
                cards: SmallVec::new(),
                exhausted: false,
                restack_epoch,
            };
            if head >= items.len() {
                render.exhausted = true;
                return render;
            }
            for position in (0..VISIBLE_WINDOW).rev() {
                let index = head + position;
                if index >= items.len() {
                    continue;
                }
                render.cards.push(CardVisual {
                    key: items[index].key(),
                    position_in_window: position,
                    style: style_for(position, offset, viewport_width),
                });
            }
            render
        })
    }

    /// Renders the visible window through caller-supplied content closures.
    ///
    /// `render_card` receives each visible item with its frame visual, in
    /// reverse stacking order (head last). Once the deck is exhausted the
    /// result is a single `render_no_more_cards()` visual.
    pub fn render_with<V>(
        &self,
        mut render_card: impl FnMut(&T, CardVisual) -> V,
        render_no_more_cards: impl FnOnce() -> V,
    ) -> Vec<V> {
        self.with_inner(|items, head, offset, viewport_width, _| {
            if head >= items.len() {
                return vec![render_no_more_cards()];
            }
            let mut visuals = Vec::with_capacity(VISIBLE_WINDOW);
            for position in (0..VISIBLE_WINDOW).rev() {
                let index = head + position;
                if index >= items.len() {
                    continue;
                }
                let visual = CardVisual {
                    key: items[index].key(),
                    position_in_window: position,
                    style: style_for(position, offset, viewport_width),
                };
                visuals.push(render_card(&items[index], visual));
            }
            visuals
        })
    }
}
