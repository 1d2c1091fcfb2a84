//! Death System
//!
//! Linear age-scaled hazard, one draw per living individual per year.

use hecs::Entity;
use rand::Rng;
use tracing::debug;

use crate::components::{Alive, Dead, MaritalStatus, Widowed};
use crate::population::Population;

/// Hazard at age zero
const BASE_MORTALITY: f64 = 0.002;

/// Added hazard per year of age. Uncapped.
const MORTALITY_PER_YEAR: f64 = 0.0005;

/// Annual probability of death at `age`.
pub fn mortality_rate(age: u32) -> f64 {
    BASE_MORTALITY + age as f64 * MORTALITY_PER_YEAR
}

/// Process death for all living individuals. Returns the number of deaths.
pub fn death_system<R: Rng + ?Sized>(population: &mut Population, year: i32, rng: &mut R) -> u32 {
    let candidates: Vec<Entity> = population.entries().map(|(_, entity)| entity).collect();
    let mut deaths = 0;

    for entity in candidates {
        if !population.is_living(entity) {
            continue;
        }
        let Some(age) = population.age(entity) else {
            continue;
        };
        if rng.gen::<f64>() < mortality_rate(age) {
            die(population, entity, year);
            deaths += 1;
        }
    }

    deaths
}

/// Marks `entity` dead in `year` and widows a living spouse.
///
/// Spouse references stay in place on both sides.
fn die(population: &mut Population, entity: Entity, year: i32) {
    let _ = population.world.remove_one::<Alive>(entity);
    let _ = population.world.insert_one(entity, Dead { year });
    population.record(entity, year, "died");
    debug!(name = ?population.name(entity), year, "death");

    let Some(spouse) = population
        .spouse(entity)
        .and_then(|id| population.entity(&id))
    else {
        return;
    };
    if !population.is_living(spouse) {
        return;
    }
    if let Ok(mut status) = population.world.get::<&mut MaritalStatus>(spouse) {
        *status = MaritalStatus::Widowed;
    }
    let _ = population.world.insert_one(spouse, Widowed);
    population.record(spouse, year, "widowed");
}
