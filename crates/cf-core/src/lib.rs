//! cf-core: Shared types and errors for CaseForge
//!
//! This crate provides the foundational data model used across all CaseForge
//! crates: rarity tiers, items, cases, the in-memory catalog, and the core
//! error type. It has no I/O and no randomness — those live in cf-reveal and
//! cf-store.

mod catalog;
mod error;
mod item;
mod rarity;

pub use catalog::*;
pub use error::*;
pub use item::*;
pub use rarity::*;
