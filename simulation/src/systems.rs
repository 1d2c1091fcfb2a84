//! ECS Systems - the four phases of one simulated year
//!
//! `SimulationWorld::simulate_year` runs them in this order after
//! advancing the calendar: aging, death, matchmaking, birth.

pub mod aging;
pub mod birth;
pub mod death;
pub mod matchmaking;

pub use aging::aging_system;
pub use birth::{birth_probability, birth_system};
pub use death::{death_system, mortality_rate};
pub use matchmaking::matchmaking_system;
