//! Matchmaking System
//!
//! Pairs unpartnered adults. Each eligible individual, in shuffled order,
//! inspects a handful of random candidates and forms a union with the first
//! one that passes every check.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::components::{Age, Genome, IndividualId, Interests, Lineage, Spouse, Widowed};
use crate::population::Population;
use crate::scoring::{are_siblings, compatibility_score, Profile};

/// Minimum age for a union
const MARRIAGE_AGE: u32 = 18;

/// Maximum age difference for a union
const MAX_AGE_DIFF: u32 = 15;

/// Candidates inspected per individual per year
const CANDIDATE_SAMPLE: usize = 6;

/// Score a pair needs after widowhood penalties
const PAIRING_THRESHOLD: f64 = 70.0;

/// Subtracted once for each widowed party
const WIDOWED_PENALTY: f64 = 10.0;

struct Candidate {
    id: IndividualId,
    age: u32,
    interests: Interests,
    genome: Genome,
    parents: Vec<IndividualId>,
    widowed: bool,
}

impl Candidate {
    fn profile(&self) -> Profile<'_> {
        Profile {
            age: self.age,
            alive: true,
            interests: &self.interests,
            genome: &self.genome,
        }
    }
}

/// Compatibility after widowhood penalties.
fn pairing_score(a: &Candidate, b: &Candidate) -> f64 {
    let widowed = [a.widowed, b.widowed].iter().filter(|w| **w).count();
    compatibility_score(&a.profile(), &b.profile()) - widowed as f64 * WIDOWED_PENALTY
}

fn accepts(a: &Candidate, b: &Candidate) -> bool {
    a.age.abs_diff(b.age) <= MAX_AGE_DIFF
        && !are_siblings(&a.parents, &b.parents)
        && pairing_score(a, b) >= PAIRING_THRESHOLD
}

/// Living adults without a spouse, in store order.
fn eligible(population: &Population) -> Vec<Candidate> {
    population
        .entries()
        .filter(|(_, entity)| population.is_living(*entity))
        .filter_map(|(id, entity)| {
            let e = population.world.entity(entity).ok()?;
            if e.has::<Spouse>() {
                return None;
            }
            let age = e.get::<&Age>()?.years;
            if age < MARRIAGE_AGE {
                return None;
            }
            Some(Candidate {
                id: id.clone(),
                age,
                interests: (*e.get::<&Interests>()?).clone(),
                genome: (*e.get::<&Genome>()?).clone(),
                parents: e.get::<&Lineage>()?.parents.clone(),
                widowed: e.has::<Widowed>(),
            })
        })
        .collect()
}

/// Process matchmaking. Returns the number of unions formed.
pub fn matchmaking_system<R: Rng + ?Sized>(
    population: &mut Population,
    year: i32,
    rng: &mut R,
) -> u32 {
    let mut pool = eligible(population);
    pool.shuffle(rng);

    let mut paired: HashSet<usize> = HashSet::new();
    let mut formed = 0;

    for a in 0..pool.len() {
        if paired.contains(&a) {
            continue;
        }
        let others: Vec<usize> = (0..pool.len())
            .filter(|b| *b != a && !paired.contains(b))
            .collect();

        let partner = others
            .choose_multiple(rng, CANDIDATE_SAMPLE)
            .copied()
            .find(|b| accepts(&pool[a], &pool[*b]));

        if let Some(b) = partner {
            paired.insert(a);
            paired.insert(b);
            population.form_union(&pool[a].id, &pool[b].id, year);
            debug!(a = %pool[a].id, b = %pool[b].id, year, "union formed");
            formed += 1;
        }
    }

    formed
}
