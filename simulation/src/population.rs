//! Population - the ECS-backed dataset behind the store
//!
//! Owns the hecs world, the id registry (which also fixes store iteration
//! order), the union set and the families. Lookups that miss return `None`
//! and mutations through missing ids are skipped.

use std::collections::BTreeSet;

use hecs::{Entity, World};
use indexmap::IndexMap;

use crate::components::*;
use crate::records::{Counts, Family, Individual};
use crate::scoring::Profile;

#[derive(Default)]
pub struct Population {
    pub world: World,
    registry: IndexMap<IndividualId, Entity>,
    unions: BTreeSet<Union>,
    families: IndexMap<FamilyId, Family>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.world.clear();
        self.registry.clear();
        self.unions.clear();
        self.families.clear();
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn entity(&self, id: &IndividualId) -> Option<Entity> {
        self.registry.get(id).copied()
    }

    pub fn contains(&self, id: &IndividualId) -> bool {
        self.registry.contains_key(id)
    }

    pub fn has_family(&self, id: &FamilyId) -> bool {
        self.families.contains_key(id)
    }

    /// Registry entries in store order.
    pub fn entries(&self) -> impl Iterator<Item = (&IndividualId, Entity)> + '_ {
        self.registry.iter().map(|(id, entity)| (id, *entity))
    }

    pub fn unions(&self) -> &BTreeSet<Union> {
        &self.unions
    }

    pub fn families(&self) -> impl Iterator<Item = &Family> + '_ {
        self.families.values()
    }

    /// Alive marker present and no death recorded.
    pub fn is_living(&self, entity: Entity) -> bool {
        self.world.get::<&Alive>(entity).is_ok() && self.world.get::<&Dead>(entity).is_err()
    }

    pub fn living_count(&self) -> usize {
        self.registry
            .values()
            .filter(|entity| self.is_living(**entity))
            .count()
    }

    pub fn counts(&self) -> Counts {
        Counts {
            families: self.families.len(),
            people: self.registry.len(),
            unions: self.unions.len(),
            living: self.living_count(),
        }
    }

    // ------------------------------------------------------------------------
    // Mutation primitives
    // ------------------------------------------------------------------------

    /// Spawns an individual from a full record.
    ///
    /// An id already in the registry is replaced in place and keeps its store
    /// position. The new id is appended to every existing parent's child list
    /// and to its family's member set when that family exists.
    pub fn insert_individual(&mut self, record: Individual) -> Entity {
        let Individual {
            id,
            name,
            age,
            birth_year,
            death_year,
            alive,
            sex,
            region,
            marital_status,
            parents,
            children,
            spouse,
            interests,
            genome,
            history,
            family_id,
            widowed,
        } = record;

        let entity = self.world.spawn((
            Identity {
                id: id.clone(),
                name,
            },
            sex,
            region,
            Age::new(age),
            BirthYear(birth_year),
            marital_status,
            Lineage {
                parents: parents.clone(),
                children,
            },
            interests,
            genome,
            History(history),
        ));

        match death_year {
            Some(year) => {
                let _ = self.world.insert_one(entity, Dead { year });
            }
            None if !alive => {
                let _ = self.world.insert_one(entity, Dead { year: birth_year });
            }
            None => {
                let _ = self.world.insert_one(entity, Alive);
            }
        }
        if let Some(partner) = spouse {
            let _ = self.world.insert_one(entity, Spouse(partner));
        }
        if widowed {
            let _ = self.world.insert_one(entity, Widowed);
        }
        if let Some(family_id) = family_id {
            if let Some(family) = self.families.get_mut(&family_id) {
                family.members.insert(id.clone());
            }
            let _ = self.world.insert_one(entity, FamilyMember(family_id));
        }

        if let Some(previous) = self.registry.insert(id.clone(), entity) {
            let _ = self.world.despawn(previous);
        }

        for parent in &parents {
            if let Some(parent_entity) = self.entity(parent) {
                if let Ok(mut lineage) = self.world.get::<&mut Lineage>(parent_entity) {
                    lineage.children.push(id.clone());
                }
            }
        }

        entity
    }

    pub fn insert_family(&mut self, family: Family) {
        self.families.insert(family.id.clone(), family);
    }

    /// Records the union and points both partners at each other.
    ///
    /// Idempotent on the union set. Any earlier spouse reference is
    /// overwritten without dissolving the earlier union. Returns `true` when
    /// the pair was new.
    pub fn form_union(&mut self, a: &IndividualId, b: &IndividualId, year: i32) -> bool {
        let inserted = self.unions.insert(Union::new(a.clone(), b.clone()));
        for (me, partner) in [(a, b), (b, a)] {
            let Some(entity) = self.entity(me) else {
                continue;
            };
            let _ = self.world.insert_one(entity, Spouse(partner.clone()));
            if inserted {
                self.record(entity, year, format!("union with {partner}"));
            }
        }
        inserted
    }

    /// Appends a history entry; missing entities are ignored.
    pub fn record(&mut self, entity: Entity, year: i32, event: impl Into<String>) {
        if let Ok(mut history) = self.world.get::<&mut History>(entity) {
            history.record(year, event);
        }
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    pub fn age(&self, entity: Entity) -> Option<u32> {
        self.world.get::<&Age>(entity).ok().map(|age| age.years)
    }

    pub fn spouse(&self, entity: Entity) -> Option<IndividualId> {
        self.world
            .get::<&Spouse>(entity)
            .ok()
            .map(|spouse| spouse.0.clone())
    }

    pub fn name(&self, entity: Entity) -> Option<String> {
        self.world
            .get::<&Identity>(entity)
            .ok()
            .map(|identity| identity.name.clone())
    }

    /// Runs `f` on the scoring profiles of two entities, if both exist.
    pub fn with_profiles<T>(
        &self,
        a: Entity,
        b: Entity,
        f: impl FnOnce(&Profile<'_>, &Profile<'_>) -> T,
    ) -> Option<T> {
        let mut query_a = self
            .world
            .query_one::<(&Age, &Interests, &Genome, Option<&Alive>)>(a)
            .ok()?;
        let mut query_b = self
            .world
            .query_one::<(&Age, &Interests, &Genome, Option<&Alive>)>(b)
            .ok()?;
        let (age_a, interests_a, genome_a, alive_a) = query_a.get()?;
        let (age_b, interests_b, genome_b, alive_b) = query_b.get()?;

        let profile_a = Profile {
            age: age_a.years,
            alive: alive_a.is_some() && self.world.get::<&Dead>(a).is_err(),
            interests: interests_a,
            genome: genome_a,
        };
        let profile_b = Profile {
            age: age_b.years,
            alive: alive_b.is_some() && self.world.get::<&Dead>(b).is_err(),
            interests: interests_b,
            genome: genome_b,
        };
        let result = f(&profile_a, &profile_b);
        Some(result)
    }

    /// Materializes the flat record of one entity.
    pub fn individual(&self, entity: Entity) -> Option<Individual> {
        let e = self.world.entity(entity).ok()?;
        let identity = e.get::<&Identity>()?;
        let age = e.get::<&Age>()?;
        let birth_year = e.get::<&BirthYear>()?;
        let lineage = e.get::<&Lineage>()?;
        let dead = e.get::<&Dead>().map(|dead| dead.year);

        Some(Individual {
            id: identity.id.clone(),
            name: identity.name.clone(),
            age: age.years,
            birth_year: birth_year.0,
            death_year: dead,
            alive: e.has::<Alive>() && dead.is_none(),
            sex: e.get::<&Sex>().map(|sex| *sex).unwrap_or_default(),
            region: e.get::<&Region>().map(|r| (*r).clone()).unwrap_or_default(),
            marital_status: e
                .get::<&MaritalStatus>()
                .map(|status| *status)
                .unwrap_or_default(),
            parents: lineage.parents.clone(),
            children: lineage.children.clone(),
            spouse: e.get::<&Spouse>().map(|spouse| spouse.0.clone()),
            interests: e
                .get::<&Interests>()
                .map(|i| (*i).clone())
                .unwrap_or_default(),
            genome: e.get::<&Genome>().map(|g| (*g).clone()).unwrap_or_default(),
            history: e.get::<&History>().map(|h| h.0.clone()).unwrap_or_default(),
            family_id: e.get::<&FamilyMember>().map(|member| member.0.clone()),
            widowed: e.has::<Widowed>(),
        })
    }

    pub fn individual_by_id(&self, id: &IndividualId) -> Option<Individual> {
        self.individual(self.entity(id)?)
    }

    /// All individuals in store order.
    pub fn individuals(&self) -> Vec<Individual> {
        self.registry
            .values()
            .filter_map(|entity| self.individual(*entity))
            .collect()
    }
}
