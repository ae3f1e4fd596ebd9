//! Reveal engine — single-flight roll state machine

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;

use cf_core::{CfResult, Item};

use crate::plan::{RevealConfig, RollPlan, build_roll_plan};
use crate::scheduler::{ScheduleHandle, Scheduler};
use crate::timing::{RevealProfile, RevealTiming};

/// Engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealState {
    /// No roll has run or the last result was consumed
    Idle,
    /// A roll is in flight; further start_roll calls are no-ops
    Rolling,
    /// Momentary notification state after the timer fires; the next
    /// start_roll transitions straight back to Rolling
    Revealed,
}

/// Outcome of a start_roll call
#[derive(Debug)]
pub enum StartRoll {
    /// Roll accepted; play this plan
    Started(RollPlan),
    /// A roll was already in flight; nothing changed, nothing is queued
    InFlight,
}

type RevealCallback = Arc<dyn Fn(&Item) + Send + Sync>;

struct EngineInner {
    config: RevealConfig,
    timing: RevealTiming,
    rng: StdRng,
    state: RevealState,
    pending_winner: Option<Item>,
    timer: Option<ScheduleHandle>,
    on_reveal: Option<RevealCallback>,
    roll_count: u64,
}

/// Orchestrates one roll at a time.
///
/// `start_roll` fixes the winner synchronously — before any animation — so
/// the eventual Revealed notification is guaranteed to match what was
/// decided at roll start, no matter how long the timer takes. The internal
/// state is the system's only mutual-exclusion primitive: it flips to
/// Rolling before any timer work begins and clears only on completion, so a
/// second call arriving synchronously (a double click) is always rejected.
pub struct RevealEngine {
    inner: Arc<Mutex<EngineInner>>,
    scheduler: Arc<dyn Scheduler>,
}

impl RevealEngine {
    /// Create an engine with reference geometry and timing
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self::with_config(RevealConfig::default(), RevealTiming::normal(), scheduler)
    }

    /// Create with specific geometry and timing
    pub fn with_config(
        config: RevealConfig,
        timing: RevealTiming,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(EngineInner {
                config,
                timing,
                rng: StdRng::from_entropy(),
                state: RevealState::Idle,
                pending_winner: None,
                timer: None,
                on_reveal: None,
                roll_count: 0,
            })),
            scheduler,
        }
    }

    /// Seed the RNG for reproducible rolls
    pub fn seed(&self, seed: u64) {
        self.inner.lock().rng = StdRng::seed_from_u64(seed);
    }

    /// Switch timing profile (does not affect a roll already in flight)
    pub fn set_timing(&self, profile: RevealProfile) {
        self.inner.lock().timing = RevealTiming::from_profile(profile);
    }

    pub fn timing(&self) -> RevealTiming {
        self.inner.lock().timing
    }

    pub fn config(&self) -> RevealConfig {
        self.inner.lock().config
    }

    pub fn state(&self) -> RevealState {
        self.inner.lock().state
    }

    pub fn is_rolling(&self) -> bool {
        self.state() == RevealState::Rolling
    }

    /// Rolls completed or in flight since creation
    pub fn roll_count(&self) -> u64 {
        self.inner.lock().roll_count
    }

    /// Register the completion callback. Called with the winning item once
    /// per roll, after the single-flight state has cleared.
    pub fn set_on_reveal(&self, callback: impl Fn(&Item) + Send + Sync + 'static) {
        self.inner.lock().on_reveal = Some(Arc::new(callback));
    }

    /// Start one roll.
    ///
    /// Picks the winner with a single weighted draw, builds the filler strip
    /// and animation plan, transitions to Rolling, and schedules completion
    /// after exactly the plan's duration. While Rolling, further calls
    /// return [`StartRoll::InFlight`] without touching anything. An empty
    /// pool fails synchronously and does not transition state.
    pub fn start_roll(&self, pool: &[Item], viewport_width_px: f64) -> CfResult<StartRoll> {
        let mut inner = self.inner.lock();
        if inner.state == RevealState::Rolling {
            log::debug!("start_roll ignored: roll already in flight");
            return Ok(StartRoll::InFlight);
        }

        let plan = {
            let EngineInner {
                config,
                timing,
                rng,
                ..
            } = &mut *inner;
            build_roll_plan(pool, viewport_width_px, config, timing, rng)?
        };

        inner.state = RevealState::Rolling;
        inner.pending_winner = Some(plan.winning_item.clone());
        inner.roll_count += 1;
        log::info!(
            "roll {} started: winner fixed ({}), {}ms travel {:.0}px",
            inner.roll_count,
            plan.winning_item.name,
            plan.duration_ms,
            plan.travel_distance_px,
        );

        let shared = Arc::clone(&self.inner);
        let handle = self.scheduler.schedule_after(
            Duration::from_secs_f64(plan.duration_ms / 1000.0),
            Box::new(move || finish_roll(&shared)),
        );
        inner.timer = Some(handle);

        Ok(StartRoll::Started(plan))
    }
}

fn finish_roll(inner: &Mutex<EngineInner>) {
    let (item, callback) = {
        let mut guard = inner.lock();
        if guard.state != RevealState::Rolling {
            return;
        }
        guard.state = RevealState::Revealed;
        guard.timer = None;
        let Some(item) = guard.pending_winner.take() else {
            return;
        };
        (item, guard.on_reveal.clone())
    };

    // Single-flight state is already cleared; the callback may start the
    // next roll or mutate the collection without deadlocking.
    log::info!("reveal complete: {}", item.name);
    if let Some(callback) = callback {
        callback(&item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use cf_core::{CfError, Rarity};

    fn pool() -> Vec<Item> {
        vec![
            Item::new("Common", Rarity::Common),
            Item::new("Uncommon", Rarity::Uncommon),
            Item::new("Rare", Rarity::Rare),
            Item::new("Legendary", Rarity::Legendary),
        ]
    }

    fn engine_with_manual() -> (RevealEngine, ManualScheduler) {
        let scheduler = ManualScheduler::new();
        let engine = RevealEngine::new(Arc::new(scheduler.clone()));
        engine.seed(1234);
        (engine, scheduler)
    }

    #[test]
    fn test_roll_lands_on_precomputed_winner() {
        let (engine, scheduler) = engine_with_manual();
        let revealed: Arc<Mutex<Option<Item>>> = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&revealed);
        engine.set_on_reveal(move |item| *sink.lock() = Some(item.clone()));

        let plan = match engine.start_roll(&pool(), 800.0).unwrap() {
            StartRoll::Started(plan) => plan,
            StartRoll::InFlight => panic!("first roll must start"),
        };
        assert_eq!(engine.state(), RevealState::Rolling);

        scheduler.advance(6300.0);
        assert_eq!(engine.state(), RevealState::Revealed);
        assert_eq!(revealed.lock().as_ref(), Some(&plan.winning_item));
    }

    #[test]
    fn test_second_start_roll_is_a_noop() {
        let (engine, scheduler) = engine_with_manual();

        let first = engine.start_roll(&pool(), 800.0).unwrap();
        assert!(matches!(first, StartRoll::Started(_)));
        let count = engine.roll_count();

        // Double click: rejected, nothing queued, state untouched.
        let second = engine.start_roll(&pool(), 800.0).unwrap();
        assert!(matches!(second, StartRoll::InFlight));
        assert_eq!(engine.roll_count(), count);
        assert_eq!(engine.state(), RevealState::Rolling);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_empty_pool_fails_without_transition() {
        let (engine, scheduler) = engine_with_manual();

        let result = engine.start_roll(&[], 800.0);
        assert!(matches!(result, Err(CfError::InvalidPool(_))));
        assert_eq!(engine.state(), RevealState::Idle);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_winner_survives_slow_animation() {
        // Completion matches the roll-start decision no matter how the
        // timer elapses.
        let (engine, scheduler) = engine_with_manual();
        let revealed: Arc<Mutex<Vec<Item>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&revealed);
        engine.set_on_reveal(move |item| sink.lock().push(item.clone()));

        let plan = match engine.start_roll(&pool(), 800.0).unwrap() {
            StartRoll::Started(plan) => plan,
            StartRoll::InFlight => unreachable!(),
        };

        // Crawl forward in uneven chunks.
        for _ in 0..9 {
            scheduler.advance(700.0);
        }
        assert_eq!(engine.state(), RevealState::Rolling);
        scheduler.advance(700.0);

        let revealed = revealed.lock();
        assert_eq!(revealed.len(), 1);
        assert_eq!(revealed[0], plan.winning_item);
    }

    #[test]
    fn test_revealed_is_momentary() {
        let (engine, scheduler) = engine_with_manual();

        engine.start_roll(&pool(), 800.0).unwrap();
        scheduler.advance(6300.0);
        assert_eq!(engine.state(), RevealState::Revealed);

        // Next roll goes straight back to Rolling.
        let next = engine.start_roll(&pool(), 800.0).unwrap();
        assert!(matches!(next, StartRoll::Started(_)));
        assert_eq!(engine.state(), RevealState::Rolling);
    }

    #[test]
    fn test_studio_timing_shortens_timer() {
        let scheduler = ManualScheduler::new();
        let engine = RevealEngine::new(Arc::new(scheduler.clone()));
        engine.seed(5);
        engine.set_timing(RevealProfile::Studio);

        engine.start_roll(&pool(), 800.0).unwrap();
        scheduler.advance(10.0);
        assert_eq!(engine.state(), RevealState::Revealed);
    }
}
