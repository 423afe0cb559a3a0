//! In-memory project store for a DIY home-improvement tracker.
//!
//! All domain state lives in a [`store::ProjectStore`]: projects with their
//! materials and build steps, persisted as one JSON snapshot and reloaded
//! at session start. The embedding presentation layer drives the store
//! through plain input structs and reads everything back by reference.

pub mod error;
pub mod models;
pub mod store;
