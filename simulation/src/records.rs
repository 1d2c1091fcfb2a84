//! Flat records materialized from the ECS world
//!
//! Snapshots, creation requests and change-feed payloads. These are the
//! shapes read paths see; the engine itself works on components.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::scoring::Profile;

/// Upper bound on individual records returned by a state read.
pub const STATE_PEOPLE_LIMIT: usize = 120;

// ============================================================================
// Individuals and families
// ============================================================================

/// One individual with all of its components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub id: IndividualId,
    pub name: String,
    pub age: u32,
    pub birth_year: i32,
    pub death_year: Option<i32>,
    pub alive: bool,
    pub sex: Sex,
    pub region: Region,
    pub marital_status: MaritalStatus,
    pub parents: Vec<IndividualId>,
    pub children: Vec<IndividualId>,
    pub spouse: Option<IndividualId>,
    pub interests: Interests,
    pub genome: Genome,
    pub history: Vec<HistoryEntry>,
    pub family_id: Option<FamilyId>,
    /// Outlived a spouse
    #[serde(default)]
    pub widowed: bool,
}

impl Individual {
    /// Alive flag set and no death year recorded.
    pub fn is_living(&self) -> bool {
        self.alive && self.death_year.is_none()
    }

    pub fn profile(&self) -> Profile<'_> {
        Profile {
            age: self.age,
            alive: self.is_living(),
            interests: &self.interests,
            genome: &self.genome,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub id: FamilyId,
    pub name: String,
    pub members: BTreeSet<IndividualId>,
}

/// Partial individual description accepted by the creation path.
///
/// Absent fields take defaults: age 0, sex `M`, status `single`, the default
/// region, no interests, a fresh id and genome, and a birth year derived from
/// the current year and the age.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewIndividual {
    #[serde(alias = "cedula")]
    pub id: Option<IndividualId>,
    #[serde(alias = "nombre")]
    pub name: Option<String>,
    #[serde(alias = "edad")]
    pub age: Option<u32>,
    #[serde(alias = "fecha_nac")]
    pub birth_year: Option<i32>,
    #[serde(alias = "genero")]
    pub sex: Option<Sex>,
    #[serde(alias = "provincia")]
    pub region: Option<Region>,
    #[serde(alias = "estado_civil")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(alias = "padres")]
    pub parents: Vec<IndividualId>,
    #[serde(alias = "intereses")]
    pub interests: Vec<String>,
    pub genome: Option<Genome>,
    #[serde(alias = "familia_id")]
    pub family_id: Option<FamilyId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewFamily {
    pub name: Option<String>,
}

// ============================================================================
// Read views
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub families: usize,
    pub people: usize,
    pub unions: usize,
    pub living: usize,
}

/// Change-feed payload: version, year and counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub version: u64,
    pub year: i32,
    pub counts: Counts,
}

/// Bounded state read served to dashboards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateView {
    pub year: i32,
    pub counts: Counts,
    pub people: Vec<Individual>,
    pub version: u64,
}

/// Complete consistent view of the store, taken under one lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub year: i32,
    pub tick: u64,
    pub version: u64,
    pub individuals: Vec<Individual>,
    pub unions: Vec<Union>,
    pub families: Vec<Family>,
}

impl Snapshot {
    pub fn counts(&self) -> Counts {
        Counts {
            families: self.families.len(),
            people: self.individuals.len(),
            unions: self.unions.len(),
            living: self.individuals.iter().filter(|p| p.is_living()).count(),
        }
    }

    pub fn individual(&self, id: &IndividualId) -> Option<&Individual> {
        self.individuals.iter().find(|p| &p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_individual_accepts_spanish_aliases() {
        let json = r#"{
            "cedula": "123456789",
            "nombre": "Ana Mora",
            "edad": 31,
            "genero": "F",
            "provincia": "CA",
            "estado_civil": "single",
            "padres": ["111", ""],
            "intereses": ["art", "music"],
            "familia_id": null
        }"#;
        let parsed: NewIndividual = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, Some(IndividualId::from("123456789")));
        assert_eq!(parsed.name.as_deref(), Some("Ana Mora"));
        assert_eq!(parsed.age, Some(31));
        assert_eq!(parsed.sex, Some(Sex::Female));
        assert_eq!(parsed.region, Some(Region("CA".into())));
        assert_eq!(parsed.parents.len(), 2);
        assert!(parsed.family_id.is_none());
    }

    #[test]
    fn test_empty_body_uses_defaults() {
        let parsed: NewIndividual = serde_json::from_str("{}").unwrap();
        assert!(parsed.id.is_none());
        assert!(parsed.parents.is_empty());

        let family: NewFamily = serde_json::from_str("{}").unwrap();
        assert!(family.name.is_none());
    }
}
