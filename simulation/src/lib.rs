//! Genealogy Simulation Engine
//!
//! Population evolution over an ECS world: yearly aging, mortality,
//! matchmaking and births, behind a shared store with a change feed.
//! Also computes generation levels and renders the family tree as SVG.

pub mod calendar_runner;
pub mod components;
pub mod config;
pub mod error;
pub mod layout;
pub mod names;
pub mod population;
pub mod records;
pub mod scoring;
pub mod store;
pub mod svg;
pub mod systems;
pub mod world;

pub use calendar_runner::CalendarRunner;
pub use components::*;
pub use config::SimulationConfig;
pub use error::ValidationError;
pub use records::{Counts, Family, Individual, NewFamily, NewIndividual, Snapshot, StateView, Status};
pub use store::{ChangeFeed, PopulationStore};
pub use world::{SimulationWorld, TickSummary};
