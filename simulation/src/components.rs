//! ECS Components for individuals in the genealogy
//!
//! Every individual is a hecs entity. Cross-references between individuals
//! (parents, children, spouse) are plain ids resolved through the
//! population registry, so a missing id is just a lookup miss.

use std::collections::BTreeSet;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Year the simulation clock starts from after a reset.
pub const START_YEAR: i32 = 1990;

/// Number of symbols in a generated genome.
pub const GENOME_LENGTH: usize = 20;

/// Symbols a generated genome is drawn from.
pub const GENOME_ALPHABET: &[u8] = b"ACGT";

/// Region codes newborns are assigned from. The first entry is the default.
pub const REGIONS: &[&str] = &["SJ", "AL", "CA", "HE", "LI", "PU", "GU"];

/// Interest tags newborns draw from.
pub const INTEREST_VOCABULARY: &[&str] = &[
    "music", "sports", "film", "reading", "cooking", "travel", "art", "gardening", "technology",
];

/// Number of interests a newborn starts with.
pub const NEWBORN_INTERESTS: usize = 3;

fn random_digits<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

// ============================================================================
// Identity Components
// ============================================================================

/// National-id style identifier (`cedula`) of an individual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndividualId(pub String);

impl IndividualId {
    /// Nine random digits.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(random_digits(rng, 9))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IndividualId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilyId(pub String);

impl FamilyId {
    /// Six random digits.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(random_digits(rng, 6))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FamilyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// ============================================================================
// Person Components
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: IndividualId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen::<bool>() {
            Sex::Male
        } else {
            Sex::Female
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(pub String);

impl Region {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = REGIONS.choose(rng).copied().unwrap_or(REGIONS[0]);
        Self(code.to_string())
    }
}

impl Default for Region {
    fn default() -> Self {
        Self(REGIONS[0].to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Age {
    pub years: u32,
}

impl Age {
    pub fn new(years: u32) -> Self {
        Self { years }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthYear(pub i32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    #[default]
    Single,
    Married,
    Divorced,
    Widowed,
}

/// Parent and child links of one individual.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lineage {
    pub parents: Vec<IndividualId>,
    pub children: Vec<IndividualId>,
}

/// Back-reference to the current partner. Not an ownership relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spouse(pub IndividualId);

/// Marker: outlived a spouse. Penalizes pairing odds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Widowed;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interests(pub BTreeSet<String>);

impl Interests {
    /// Draws [`NEWBORN_INTERESTS`] distinct tags from the vocabulary.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(
            INTEREST_VOCABULARY
                .choose_multiple(rng, NEWBORN_INTERESTS)
                .map(|tag| tag.to_string())
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Interests {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Genetic sequence over `A`, `C`, `G`, `T`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genome(pub String);

impl Genome {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(
            (0..GENOME_LENGTH)
                .map(|_| char::from(GENOME_ALPHABET[rng.gen_range(0..GENOME_ALPHABET.len())]))
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Genome {
    fn from(sequence: &str) -> Self {
        Self(sequence.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub year: i32,
    pub event: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History(pub Vec<HistoryEntry>);

impl History {
    pub fn record(&mut self, year: i32, event: impl Into<String>) {
        self.0.push(HistoryEntry {
            year,
            event: event.into(),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyMember(pub FamilyId);

/// Marker: entity is alive
#[derive(Debug, Clone, Copy, Default)]
pub struct Alive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dead {
    pub year: i32,
}

// ============================================================================
// Unions
// ============================================================================

/// Unordered partner pair, stored normalized so `(a, b)` and `(b, a)` are one union.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Union(IndividualId, IndividualId);

impl Union {
    pub fn new(a: IndividualId, b: IndividualId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn partners(&self) -> (&IndividualId, &IndividualId) {
        (&self.0, &self.1)
    }

    pub fn contains(&self, id: &IndividualId) -> bool {
        &self.0 == id || &self.1 == id
    }
}

// ============================================================================
// Calendar
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub year: i32,
    pub tick: u64,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            year: START_YEAR,
            tick: 0,
        }
    }
}

impl Calendar {
    pub fn advance_year(&mut self) {
        self.year += 1;
    }
}
