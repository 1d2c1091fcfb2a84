//! Simulation World - main orchestrator
//!
//! Holds the population, the clock, the version counter and the random
//! source. Every externally visible mutation batch bumps the version
//! exactly once.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::components::*;
use crate::config::SimulationConfig;
use crate::error::ValidationError;
use crate::layout;
use crate::names;
use crate::population::Population;
use crate::records::{
    Counts, Family, Individual, NewFamily, NewIndividual, Snapshot, StateView, Status,
};
use crate::systems;

/// Display name for individuals created without one.
const DEFAULT_NAME: &str = "Unnamed";

/// Founders are seeded with ages below this.
const FOUNDER_MAX_AGE: u32 = 60;

/// Outcome of one simulated year.
#[derive(Debug, Clone, Serialize)]
pub struct TickSummary {
    pub year: i32,
    pub tick: u64,
    pub version: u64,
    pub births: u32,
    pub deaths: u32,
    pub unions_formed: u32,
    pub population: usize,
    pub living: usize,
    pub completed_at: DateTime<Utc>,
}

pub struct SimulationWorld {
    pub population: Population,
    pub calendar: Calendar,
    version: u64,
    rng: StdRng,
}

impl SimulationWorld {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic world: same seed, same history.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        let mut world = match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        };
        if config.initial_population > 0 {
            world.seed_population(config.initial_population);
        }
        world
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            population: Population::new(),
            calendar: Calendar::default(),
            version: 0,
            rng,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn current_year(&self) -> i32 {
        self.calendar.year
    }

    pub fn tick_count(&self) -> u64 {
        self.calendar.tick
    }

    pub fn bump_version(&mut self) {
        self.version += 1;
    }

    pub fn advance_year(&mut self) {
        self.calendar.advance_year();
    }

    /// Back to the empty 1990 state. The version keeps counting up so
    /// listeners see the reset as a change.
    pub fn reset(&mut self) {
        self.population.clear();
        self.calendar = Calendar::default();
        self.bump_version();
        info!(version = self.version, "world reset");
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    pub fn counts(&self) -> Counts {
        self.population.counts()
    }

    pub fn status(&self) -> Status {
        Status {
            version: self.version,
            year: self.calendar.year,
            counts: self.counts(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            year: self.calendar.year,
            tick: self.calendar.tick,
            version: self.version,
            individuals: self.population.individuals(),
            unions: self.population.unions().iter().cloned().collect(),
            families: self.population.families().cloned().collect(),
        }
    }

    /// Year, counts, version and the first `limit` individuals in store order.
    pub fn state_view(&self, limit: usize) -> StateView {
        let people = self
            .population
            .entries()
            .filter_map(|(_, entity)| self.population.individual(entity))
            .take(limit)
            .collect();
        StateView {
            year: self.calendar.year,
            counts: self.counts(),
            people,
            version: self.version,
        }
    }

    pub fn individual(&self, id: &IndividualId) -> Option<Individual> {
        self.population.individual_by_id(id)
    }

    /// Generation level of every individual.
    pub fn levels(&self) -> HashMap<IndividualId, u32> {
        layout::compute_levels(&self.population.individuals())
    }

    // ------------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------------

    fn fresh_individual_id(&mut self) -> IndividualId {
        loop {
            let id = IndividualId::random(&mut self.rng);
            if !self.population.contains(&id) {
                return id;
            }
        }
    }

    fn fresh_family_id(&mut self) -> FamilyId {
        loop {
            let id = FamilyId::random(&mut self.rng);
            if !self.population.has_family(&id) {
                return id;
            }
        }
    }

    /// Materializes a partial description with defaults and inserts it.
    ///
    /// Ages whose birth year cannot be represented are rejected without
    /// mutating.
    pub fn create_individual(&mut self, new: NewIndividual) -> Result<Individual, ValidationError> {
        let age = new.age.unwrap_or(0);
        let birth_year = match new.birth_year {
            Some(year) => year,
            None => i32::try_from(age)
                .ok()
                .and_then(|age| self.calendar.year.checked_sub(age))
                .ok_or(ValidationError::AgeOutOfRange(age))?,
        };
        let id = match new.id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => self.fresh_individual_id(),
        };
        let genome = match new.genome.filter(|genome| !genome.is_empty()) {
            Some(genome) => genome,
            None => Genome::random(&mut self.rng),
        };

        let record = Individual {
            id,
            name: new
                .name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            age,
            birth_year,
            death_year: None,
            alive: true,
            sex: new.sex.unwrap_or_default(),
            region: new.region.unwrap_or_default(),
            marital_status: new.marital_status.unwrap_or_default(),
            parents: new.parents.into_iter().filter(|p| !p.is_empty()).collect(),
            children: Vec::new(),
            spouse: None,
            interests: new.interests.into_iter().collect(),
            genome,
            history: Vec::new(),
            family_id: new.family_id.filter(|id| !id.as_str().is_empty()),
            widowed: false,
        };

        self.population.insert_individual(record.clone());
        self.bump_version();
        debug!(id = %record.id, name = %record.name, "individual created");
        Ok(record)
    }

    /// Creates a named family. Blank names are rejected without mutating.
    pub fn create_family(&mut self, new: NewFamily) -> Result<Family, ValidationError> {
        let name = new.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let family = Family {
            id: self.fresh_family_id(),
            name: name.to_string(),
            members: Default::default(),
        };
        self.population.insert_family(family.clone());
        self.bump_version();
        debug!(id = %family.id, name = %family.name, "family created");
        Ok(family)
    }

    /// Seeds `count` random founders as one mutation batch.
    pub fn seed_population(&mut self, count: usize) {
        for _ in 0..count {
            let id = self.fresh_individual_id();
            let sex = Sex::random(&mut self.rng);
            let age = self.rng.gen_range(0..FOUNDER_MAX_AGE);
            let record = Individual {
                id,
                name: names::founder_name(&mut self.rng, sex),
                age,
                birth_year: self.calendar.year - age as i32,
                death_year: None,
                alive: true,
                sex,
                region: Region::random(&mut self.rng),
                marital_status: MaritalStatus::Single,
                parents: Vec::new(),
                children: Vec::new(),
                spouse: None,
                interests: Interests::random(&mut self.rng),
                genome: Genome::random(&mut self.rng),
                history: Vec::new(),
                family_id: None,
                widowed: false,
            };
            self.population.insert_individual(record);
        }
        self.bump_version();
        info!(count, population = self.population.len(), "population seeded");
    }

    // ------------------------------------------------------------------------
    // Evolution
    // ------------------------------------------------------------------------

    /// Advances the world by one year: aging, death, matchmaking, birth.
    pub fn simulate_year(&mut self) -> TickSummary {
        self.advance_year();
        let year = self.calendar.year;

        systems::aging_system(&mut self.population.world);
        let deaths = systems::death_system(&mut self.population, year, &mut self.rng);
        let unions_formed = systems::matchmaking_system(&mut self.population, year, &mut self.rng);
        let births = systems::birth_system(&mut self.population, year, &mut self.rng);

        self.bump_version();

        TickSummary {
            year,
            tick: self.calendar.tick,
            version: self.version,
            births: births.len() as u32,
            deaths,
            unions_formed,
            population: self.population.len(),
            living: self.population.living_count(),
            completed_at: Utc::now(),
        }
    }

    /// Counts a scheduler tick, then simulates one year.
    pub fn tick(&mut self) -> TickSummary {
        self.calendar.tick += 1;
        self.simulate_year()
    }

    /// Get entity count (every individual, living or dead)
    pub fn entity_count(&self) -> usize {
        self.population.len()
    }
}

impl Default for SimulationWorld {
    fn default() -> Self {
        Self::new()
    }
}
