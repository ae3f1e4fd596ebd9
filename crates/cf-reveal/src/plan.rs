//! Roll planning — filler strip and animation geometry

use rand::Rng;
use serde::{Deserialize, Serialize};

use cf_core::{CfResult, Item};

use crate::selector::select_weighted;
use crate::timing::RevealTiming;

/// Geometry of the scrolling reveal strip
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Fixed slot the winning item is placed at
    pub win_slot_index: usize,
    /// Filler slots generated past the win slot so the strip does not end
    /// exactly on the winner
    pub filler_padding: usize,
    /// Rendered width of one item card in pixels
    pub item_width_px: f64,
    /// Maximum absolute landing jitter in pixels
    pub jitter_px: f64,
}

impl RevealConfig {
    /// Total filler strip length
    pub fn strip_len(&self) -> usize {
        self.win_slot_index + self.filler_padding
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            win_slot_index: 155,
            filler_padding: 20,
            item_width_px: 200.0,
            jitter_px: 25.0,
        }
    }
}

/// Cubic bezier easing curve, CSS `cubic-bezier(x1, y1, x2, y2)` convention
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    /// The reference reveal curve: fast launch, long decelerating tail
    pub const CASE_REVEAL: CubicBezier = CubicBezier {
        x1: 0.08,
        y1: 0.6,
        x2: 0.0,
        y2: 1.0,
    };

    /// CSS transition-timing-function string
    pub fn as_css(&self) -> String {
        format!(
            "cubic-bezier({}, {}, {}, {})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

/// Everything the presentation layer needs to play one reveal.
///
/// Ephemeral: created at roll start, discarded after the animation
/// completes, never persisted. The winner is already decided when this plan
/// exists — the filler slots look correctly weighted but carry no meaning.
#[derive(Debug, Clone, Serialize)]
pub struct RollPlan {
    /// Ordered strip of decoy items, winner included at `win_slot_index`
    pub filler: Vec<Item>,
    /// The predetermined winning item
    pub winning_item: Item,
    /// Position of the winner inside `filler`
    pub win_slot_index: usize,
    /// How far the strip scrolls left, in pixels
    pub travel_distance_px: f64,
    /// Scroll duration; engine completion fires on the same value
    pub duration_ms: f64,
    /// The bounded random landing offset baked into the travel distance
    pub jitter_px: f64,
    /// Easing curve the presentation layer should declare
    pub easing: CubicBezier,
}

/// Build a complete roll plan for one case opening.
///
/// Fixes the winner with a single weighted draw first, then fills every
/// other slot of the strip by independent draws, and computes the travel so
/// the win slot centers in the viewport — plus a small jitter so repeated
/// rolls do not land pixel-identically.
pub fn build_roll_plan<R: Rng>(
    pool: &[Item],
    viewport_width_px: f64,
    config: &RevealConfig,
    timing: &RevealTiming,
    rng: &mut R,
) -> CfResult<RollPlan> {
    // Winner first. The animation never influences this.
    let winning_item = select_weighted(pool, rng)?.clone();

    let strip_len = config.strip_len();
    let mut filler = Vec::with_capacity(strip_len);
    for slot in 0..strip_len {
        if slot == config.win_slot_index {
            filler.push(winning_item.clone());
        } else {
            filler.push(select_weighted(pool, rng)?.clone());
        }
    }

    let jitter_px = rng.gen_range(-config.jitter_px..=config.jitter_px);
    let target_center =
        config.win_slot_index as f64 * config.item_width_px + config.item_width_px / 2.0;
    let travel_distance_px = target_center - viewport_width_px / 2.0 + jitter_px;

    Ok(RollPlan {
        filler,
        winning_item,
        win_slot_index: config.win_slot_index,
        travel_distance_px,
        duration_ms: timing.roll_duration_ms,
        jitter_px,
        easing: CubicBezier::CASE_REVEAL,
    })
}
