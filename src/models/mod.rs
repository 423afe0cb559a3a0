//! Domain models for the project store.
//!
//! # Core Concepts
//!
//! - [`Project`]: A DIY undertaking with a budget, schedule, and status.
//!   The top-level unit of organization; owns everything below it.
//! - [`Material`]: A purchasable item on a project's shopping list.
//! - [`Step`]: An ordered unit of work on a project's build plan.
//!
//! Materials and steps never exist outside a project: they are created
//! through the owning project's store operations and deleted with it.
//!
//! Status and difficulty are closed enums. Project categories, material
//! categories, and units are open string sets: each carries a suggested
//! list the UI offers, but callers may introduce their own labels.

mod material;
mod project;
mod step;

pub use material::*;
pub use project::*;
pub use step::*;
