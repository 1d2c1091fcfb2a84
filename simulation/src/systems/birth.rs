//! Birth System
//!
//! Each union with two living, fertile-age partners may produce one child a
//! year. Probability rises with compatibility and is capped.

use std::ops::RangeInclusive;

use rand::Rng;
use tracing::debug;

use crate::components::*;
use crate::names;
use crate::population::Population;
use crate::records::Individual;
use crate::scoring::{compatibility_score, Profile};

/// Both partners must be inside this age range
const FERTILE_AGES: RangeInclusive<u32> = 18..=45;

const BASE_BIRTH_RATE: f64 = 0.02;

/// Per-union, per-year ceiling
const MAX_BIRTH_RATE: f64 = 0.10;

/// Probability that a union produces a child this year.
///
/// Zero unless both partners are alive and of fertile age.
pub fn birth_probability(a: &Profile<'_>, b: &Profile<'_>) -> f64 {
    let fertile = |p: &Profile<'_>| p.alive && FERTILE_AGES.contains(&p.age);
    if !fertile(a) || !fertile(b) {
        return 0.0;
    }
    (BASE_BIRTH_RATE + compatibility_score(a, b) / 1000.0).min(MAX_BIRTH_RATE)
}

/// Process births for every union, including ones formed this year.
/// Returns the ids of the newborns.
pub fn birth_system<R: Rng + ?Sized>(
    population: &mut Population,
    year: i32,
    rng: &mut R,
) -> Vec<IndividualId> {
    let unions: Vec<Union> = population.unions().iter().cloned().collect();
    let mut born = Vec::new();

    for union in unions {
        let (a_id, b_id) = union.partners();
        let (Some(a), Some(b)) = (population.entity(a_id), population.entity(b_id)) else {
            continue;
        };
        let Some(probability) = population.with_profiles(a, b, birth_probability) else {
            continue;
        };
        if probability <= 0.0 {
            continue;
        }

        if rng.gen::<f64>() < probability {
            let parent_name = population.name(a);
            let child = newborn(population, rng, year, [a_id.clone(), b_id.clone()], parent_name);
            debug!(child = %child.id, name = %child.name, year, "birth");
            born.push(child.id.clone());
            population.insert_individual(child);
        }
    }

    born
}

fn newborn<R: Rng + ?Sized>(
    population: &Population,
    rng: &mut R,
    year: i32,
    parents: [IndividualId; 2],
    parent_name: Option<String>,
) -> Individual {
    let mut id = IndividualId::random(rng);
    while population.contains(&id) {
        id = IndividualId::random(rng);
    }
    let sex = Sex::random(rng);
    let mut history = History::default();
    history.record(year, "born");

    Individual {
        id,
        name: names::newborn_name(rng, sex, parent_name.as_deref()),
        age: 0,
        birth_year: year,
        death_year: None,
        alive: true,
        sex,
        region: Region::random(rng),
        marital_status: MaritalStatus::Single,
        parents: parents.to_vec(),
        children: Vec::new(),
        spouse: None,
        interests: Interests::random(rng),
        genome: Genome::random(rng),
        history: history.0,
        family_id: None,
        widowed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn partner(id: &str, age: u32, genome: &str) -> Individual {
        Individual {
            id: id.into(),
            name: format!("{id} Rojas"),
            age,
            birth_year: 2000 - age as i32,
            death_year: None,
            alive: true,
            sex: Sex::Female,
            region: Region::default(),
            marital_status: MaritalStatus::Married,
            parents: Vec::new(),
            children: Vec::new(),
            spouse: None,
            interests: ["art", "music"].into_iter().collect(),
            genome: genome.into(),
            history: Vec::new(),
            family_id: None,
            widowed: false,
        }
    }

    fn couple(age_a: u32, age_b: u32) -> Population {
        let mut population = Population::new();
        population.insert_individual(partner("a", age_a, "AAAAAAAAAAAAAAAAAAAA"));
        population.insert_individual(partner("b", age_b, "CCCCCCCCCCCCCCCCCCCC"));
        population.form_union(&"a".into(), &"b".into(), 1995);
        population
    }

    #[test]
    fn test_fertility_age_check() {
        let interests = Interests::default();
        let genome = Genome::from("ACGT");
        let p = |age, alive| Profile {
            age,
            alive,
            interests: &interests,
            genome: &genome,
        };

        assert!(birth_probability(&p(25, true), &p(30, true)) > 0.0);
        assert_eq!(birth_probability(&p(17, true), &p(30, true)), 0.0);
        assert_eq!(birth_probability(&p(25, true), &p(46, true)), 0.0);
        assert_eq!(birth_probability(&p(25, false), &p(30, true)), 0.0);
        assert!(birth_probability(&p(18, true), &p(45, true)) > 0.0);
    }

    #[test]
    fn test_probability_is_capped() {
        let tags: Interests = ["music", "sports", "film", "reading", "cooking"]
            .into_iter()
            .collect();
        let g1 = Genome::from("AAAAAAAAAAAAAAAAAAAAAAAAA");
        let g2 = Genome::from("CCCCCCCCCCCCCCCCCCCCCCCCC");
        let a = Profile { age: 30, alive: true, interests: &tags, genome: &g1 };
        let b = Profile { age: 30, alive: true, interests: &tags, genome: &g2 };
        // 0.02 + 100 / 1000 = 0.12 before the cap
        assert!((birth_probability(&a, &b) - MAX_BIRTH_RATE).abs() < 1e-12);

        let none = Interests::default();
        let c = Profile { age: 30, alive: true, interests: &none, genome: &g1 };
        let d = Profile { age: 30, alive: true, interests: &none, genome: &g1 };
        // 0.02 + 25 / 1000
        assert!((birth_probability(&c, &d) - 0.045).abs() < 1e-12);
    }

    #[test]
    fn test_zero_roll_produces_child_linked_to_both_parents() {
        let mut population = couple(30, 32);

        let born = birth_system(&mut population, 2001, &mut StepRng::new(0, 0));

        assert_eq!(born.len(), 1);
        let child = population.individual_by_id(&born[0]).unwrap();
        assert_eq!(child.age, 0);
        assert_eq!(child.birth_year, 2001);
        assert!(child.alive);
        assert_eq!(child.marital_status, MaritalStatus::Single);
        assert_eq!(child.parents, vec![IndividualId::from("a"), IndividualId::from("b")]);
        assert_eq!(child.interests.len(), NEWBORN_INTERESTS);
        assert_eq!(child.genome.as_str().len(), GENOME_LENGTH);
        assert_eq!(child.history, vec![HistoryEntry { year: 2001, event: "born".into() }]);
        assert!(child.name.ends_with(" Rojas"));

        for parent in ["a", "b"] {
            let parent = population.individual_by_id(&parent.into()).unwrap();
            assert_eq!(parent.children, vec![child.id.clone()]);
        }
    }

    #[test]
    fn test_infertile_or_dead_unions_never_produce() {
        let mut too_old = couple(30, 50);
        assert!(birth_system(&mut too_old, 2001, &mut StepRng::new(0, 0)).is_empty());

        let mut widowed = couple(30, 30);
        let a = widowed.entity(&"a".into()).unwrap();
        let _ = widowed.world.remove_one::<Alive>(a);
        let _ = widowed.world.insert_one(a, Dead { year: 2000 });
        assert!(birth_system(&mut widowed, 2001, &mut StepRng::new(0, 0)).is_empty());
        assert_eq!(widowed.unions().len(), 1);
    }

    #[test]
    fn test_union_with_missing_partner_is_skipped() {
        let mut population = Population::new();
        population.insert_individual(partner("a", 30, "ACGT"));
        population.form_union(&"a".into(), &"ghost".into(), 1999);

        assert!(birth_system(&mut population, 2001, &mut StepRng::new(0, 0)).is_empty());
    }
}
