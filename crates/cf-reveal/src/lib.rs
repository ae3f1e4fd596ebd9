//! # cf-reveal — Reveal & Selection Engine for CaseForge
//!
//! Implements the case-opening core: weighted random selection, roll
//! planning with deterministic winner placement, and the single-flight
//! reveal state machine.
//!
//! ## Design
//!
//! The winning item is fixed by one weighted draw *before* any animation
//! begins. The scrolling reveal only displays that decision: the plan places
//! the winner at a fixed slot inside a filler strip and describes how far
//! and how long the presentation layer should scroll to land on it. Engine
//! state advances on a scheduled timer tied to the same duration as the
//! visual transition, so state and presentation stay in lockstep by
//! construction, never by observing animation frames.
//!
//! ```text
//! RevealEngine (Idle ── start_roll ──> Rolling ── timer ──> Revealed)
//!     │
//!     ├── select_weighted (winner fixed up front)
//!     ├── RollPlan (filler strip, travel distance, duration, easing)
//!     └── Scheduler (real tokio timer, or virtual time in tests)
//! ```

pub mod engine;
pub mod odds;
pub mod plan;
pub mod scheduler;
pub mod selector;
pub mod timing;

pub use engine::*;
pub use odds::*;
pub use plan::*;
pub use scheduler::*;
pub use selector::*;
pub use timing::*;
