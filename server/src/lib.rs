//! Genealogy Server
//!
//! Axum front end over a shared [`simulation::PopulationStore`]: dashboard,
//! bounded state reads, creation endpoints, the SVG tree and a
//! Server-Sent Events change feed.

pub mod commands;
pub mod config;
pub mod error;
pub mod router;
pub mod state;
pub mod stream;
