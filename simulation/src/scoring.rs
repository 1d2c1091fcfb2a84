//! Compatibility scoring between two individuals
//!
//! Pure functions. The score is the sum of three capped components
//! (interests up to 50, age gap up to 25, genetic distance up to 25), so it
//! always lies in `[0, 100]`.

use crate::components::{Genome, IndividualId, Interests};

/// Shared interests beyond this count add nothing.
const MAX_SHARED_INTERESTS: usize = 5;
const INTEREST_POINTS: f64 = 50.0;

/// Age gap (years) at which the age component reaches zero.
const AGE_POINTS: u32 = 25;

/// Genetic distance is worth one point per differing symbol, up to this cap.
const GENOME_POINTS: usize = 25;

/// The parts of an individual scoring and fertility look at.
#[derive(Debug, Clone, Copy)]
pub struct Profile<'a> {
    pub age: u32,
    /// Not part of the score; birth odds require both partners alive.
    pub alive: bool,
    pub interests: &'a Interests,
    pub genome: &'a Genome,
}

/// Number of interest tags both individuals hold.
pub fn interests_overlap(a: &Interests, b: &Interests) -> usize {
    a.0.intersection(&b.0).count()
}

/// Hamming distance over the common prefix plus the length difference.
pub fn genetic_distance(a: &Genome, b: &Genome) -> usize {
    let mismatches = a
        .as_str()
        .chars()
        .zip(b.as_str().chars())
        .filter(|(x, y)| x != y)
        .count();
    let len_a = a.as_str().chars().count();
    let len_b = b.as_str().chars().count();
    mismatches + len_a.abs_diff(len_b)
}

pub fn compatibility_score(a: &Profile<'_>, b: &Profile<'_>) -> f64 {
    let shared = interests_overlap(a.interests, b.interests).min(MAX_SHARED_INTERESTS);
    let interest_part = shared as f64 / MAX_SHARED_INTERESTS as f64 * INTEREST_POINTS;

    let age_gap = a.age.abs_diff(b.age);
    let age_part = AGE_POINTS.saturating_sub(age_gap.min(AGE_POINTS)) as f64;

    let genome_part = genetic_distance(a.genome, b.genome).min(GENOME_POINTS) as f64;

    interest_part + age_part + genome_part
}

/// Any shared parent makes two individuals siblings (half-siblings included).
pub fn are_siblings(a_parents: &[IndividualId], b_parents: &[IndividualId]) -> bool {
    a_parents.iter().any(|parent| b_parents.contains(parent))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile<'a>(age: u32, interests: &'a Interests, genome: &'a Genome) -> Profile<'a> {
        Profile {
            age,
            alive: true,
            interests,
            genome,
        }
    }

    #[test]
    fn test_genetic_distance_counts_mismatches_and_length() {
        assert_eq!(genetic_distance(&"ACGT".into(), &"ACGT".into()), 0);
        assert_eq!(genetic_distance(&"ACGT".into(), &"AGGA".into()), 2);
        assert_eq!(genetic_distance(&"ACGT".into(), &"AC".into()), 2);
        assert_eq!(genetic_distance(&"".into(), &"ACG".into()), 3);
    }

    #[test]
    fn test_score_for_thirty_and_thirty_two() {
        let a_interests: Interests = ["music", "art", "film", "travel"].into_iter().collect();
        let b_interests: Interests = ["music", "art", "film", "cooking"].into_iter().collect();
        let a_genome: Genome = "AAAAAAAAAAAAAAAAAAAA".into();
        let b_genome: Genome = "CCCCCCCCCCAAAAAAAAAA".into();
        assert_eq!(interests_overlap(&a_interests, &b_interests), 3);
        assert_eq!(genetic_distance(&a_genome, &b_genome), 10);

        let score = compatibility_score(
            &profile(30, &a_interests, &a_genome),
            &profile(32, &b_interests, &b_genome),
        );
        assert!((score - 63.0).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn test_score_bounds_and_symmetry() {
        let tags = ["music", "sports", "film", "reading", "cooking", "travel"];
        let full: Interests = tags.into_iter().collect();
        let none = Interests::default();
        let g1: Genome = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAA".into();
        let g2: Genome = "CCCCCCCCCCCCCCCCCCCCCCCCCCCCCC".into();

        let best = compatibility_score(&profile(40, &full, &g1), &profile(40, &full, &g2));
        assert!((best - 100.0).abs() < 1e-9);

        let worst = compatibility_score(&profile(20, &none, &g1), &profile(80, &full, &g1));
        assert!(worst.abs() < 1e-9);

        for (age_a, age_b) in [(0, 0), (18, 45), (90, 3), (33, 34)] {
            let ab = compatibility_score(&profile(age_a, &full, &g1), &profile(age_b, &none, &g2));
            let ba = compatibility_score(&profile(age_b, &none, &g2), &profile(age_a, &full, &g1));
            assert_eq!(ab, ba);
            assert!((0.0..=100.0).contains(&ab));
        }
    }

    #[test]
    fn test_liveness_does_not_change_score() {
        let tags: Interests = ["music", "art"].into_iter().collect();
        let genome: Genome = "ACGTACGT".into();
        let living = profile(30, &tags, &genome);
        let dead = Profile {
            alive: false,
            ..living
        };
        assert_eq!(
            compatibility_score(&living, &living),
            compatibility_score(&dead, &living)
        );
    }

    #[test]
    fn test_siblings_share_any_parent() {
        let a = vec![IndividualId::from("1"), IndividualId::from("2")];
        let half = vec![IndividualId::from("2"), IndividualId::from("3")];
        let stranger = vec![IndividualId::from("4")];
        assert!(are_siblings(&a, &half));
        assert!(!are_siblings(&a, &stranger));
        assert!(!are_siblings(&[], &[]));
    }
}
