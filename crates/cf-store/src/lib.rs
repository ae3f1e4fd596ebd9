//! # cf-store — Persistence layer for CaseForge
//!
//! Talks to a key-addressed remote document store (two operations per path:
//! GET → JSON | absent, PUT ← JSON) and maintains the two local caches built
//! from it:
//!
//! - [`CatalogStore`] loads the case catalog once at startup, resolving the
//!   two backward-compatible payload shapes into one canonical form.
//! - [`CollectionStore`] owns the user's collection of won items and syncs
//!   it back wholesale on every mutation, fire-and-forget.
//!
//! Every remote failure is caught here, logged, and degraded to local-only
//! continuation — nothing in this crate's error handling ever reaches the
//! reveal engine, and a reveal always completes with the store unreachable.

pub mod catalog;
pub mod collection;
pub mod credentials;
pub mod error;
pub mod remote;

pub use catalog::*;
pub use collection::*;
pub use credentials::*;
pub use error::*;
pub use remote::*;
