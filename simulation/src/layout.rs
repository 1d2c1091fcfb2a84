//! Generation layout
//!
//! Assigns a generation level to every individual for drawing the tree.
//! Roots (no parents) sit at level 0 and levels grow breadth-first along
//! child links. Anything the walk never reaches, such as members of a
//! parent/child cycle, falls back to level 0, so every individual gets a
//! level even when the graph is not a forest.

use std::collections::{BTreeMap, HashMap};

use crate::components::IndividualId;
use crate::records::Individual;

/// Frontier expansions before the walk gives up.
pub const MAX_DEPTH: usize = 50;

pub fn compute_levels(individuals: &[Individual]) -> HashMap<IndividualId, u32> {
    let by_id: HashMap<&IndividualId, &Individual> =
        individuals.iter().map(|p| (&p.id, p)).collect();

    let mut level: HashMap<IndividualId, u32> = HashMap::with_capacity(individuals.len());
    let mut frontier: Vec<&IndividualId> = individuals
        .iter()
        .filter(|p| p.parents.is_empty())
        .map(|p| &p.id)
        .collect();
    for root in &frontier {
        level.insert((*root).clone(), 0);
    }

    let mut depth = 0;
    while !frontier.is_empty() && depth < MAX_DEPTH {
        let mut next = Vec::new();
        for parent in frontier {
            let Some(parent_level) = level.get(parent).copied() else {
                continue;
            };
            let Some(record) = by_id.get(parent).copied() else {
                continue;
            };
            for child in &record.children {
                // dangling child links name no one to draw
                if !by_id.contains_key(child) {
                    continue;
                }
                if !level.contains_key(child) {
                    level.insert(child.clone(), parent_level + 1);
                    next.push(child);
                }
            }
        }
        frontier = next;
        depth += 1;
    }

    for p in individuals {
        level.entry(p.id.clone()).or_insert(0);
    }
    level
}

/// Groups ids by level, each layer sorted by id for a stable drawing.
pub fn layers(levels: &HashMap<IndividualId, u32>) -> BTreeMap<u32, Vec<IndividualId>> {
    let mut layers: BTreeMap<u32, Vec<IndividualId>> = BTreeMap::new();
    for (id, level) in levels {
        layers.entry(*level).or_default().push(id.clone());
    }
    for row in layers.values_mut() {
        row.sort();
    }
    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::*;

    fn node(id: &str, parents: &[&str], children: &[&str]) -> Individual {
        Individual {
            id: id.into(),
            name: id.to_string(),
            age: 1,
            birth_year: 1990,
            death_year: None,
            alive: true,
            sex: Sex::Male,
            region: Region::default(),
            marital_status: MaritalStatus::Single,
            parents: parents.iter().map(|p| IndividualId::from(*p)).collect(),
            children: children.iter().map(|c| IndividualId::from(*c)).collect(),
            spouse: None,
            interests: Interests::default(),
            genome: Genome::default(),
            history: Vec::new(),
            family_id: None,
            widowed: false,
        }
    }

    fn level_of(levels: &HashMap<IndividualId, u32>, id: &str) -> u32 {
        levels[&IndividualId::from(id)]
    }

    #[test]
    fn test_isolated_individual_is_level_zero() {
        let levels = compute_levels(&[node("solo", &[], &[])]);
        assert_eq!(level_of(&levels, "solo"), 0);
    }

    #[test]
    fn test_child_of_level_two_parent_is_level_three() {
        let people = [
            node("g", &[], &["p"]),
            node("p", &["g"], &["c"]),
            node("c", &["p"], &["k"]),
            node("k", &["c"], &[]),
        ];
        let levels = compute_levels(&people);
        assert_eq!(level_of(&levels, "c"), 2);
        assert_eq!(level_of(&levels, "k"), 3);
    }

    #[test]
    fn test_descendants_sit_below_their_parents() {
        let people = [
            node("a", &[], &["c", "d"]),
            node("b", &[], &["c", "d"]),
            node("c", &["a", "b"], &["e"]),
            node("d", &["a", "b"], &[]),
            node("e", &["c"], &["f"]),
            node("f", &["e"], &[]),
        ];
        let levels = compute_levels(&people);
        assert_eq!(levels.len(), people.len());
        for p in &people {
            if p.parents.is_empty() {
                assert_eq!(levels[&p.id], 0);
            }
            for parent in &p.parents {
                assert!(levels[&p.id] > levels[parent], "{} not below {}", p.id, parent);
            }
        }
    }

    #[test]
    fn test_first_parent_reached_sets_the_level() {
        let people = [
            node("a", &[], &["c"]),
            node("c", &["a"], &["e"]),
            node("x", &[], &["e"]),
            node("e", &["c", "x"], &[]),
        ];
        let levels = compute_levels(&people);
        // root x reaches e in the first expansion
        assert_eq!(level_of(&levels, "e"), 1);
    }

    #[test]
    fn test_cycles_and_dangling_ids_fall_back_to_zero() {
        let people = [
            node("a", &["b"], &["b"]),
            node("b", &["a"], &["a", "ghost"]),
            node("orphan", &["missing"], &[]),
        ];
        let levels = compute_levels(&people);
        assert_eq!(levels.len(), 3);
        assert_eq!(level_of(&levels, "a"), 0);
        assert_eq!(level_of(&levels, "b"), 0);
        assert_eq!(level_of(&levels, "orphan"), 0);
    }

    #[test]
    fn test_dangling_child_gets_no_level() {
        let people = [node("r", &[], &["ghost", "c"]), node("c", &["r"], &[])];
        let levels = compute_levels(&people);
        assert_eq!(levels.len(), 2);
        assert!(!levels.contains_key(&IndividualId::from("ghost")));
        assert_eq!(level_of(&levels, "c"), 1);
        assert_eq!(layers(&levels)[&1].len(), 1);
    }

    #[test]
    fn test_walk_stops_at_max_depth() {
        let ids: Vec<String> = (0..60).map(|i| format!("n{i:02}")).collect();
        let people: Vec<Individual> = (0..ids.len())
            .map(|i| {
                let parents: Vec<&str> = if i == 0 { vec![] } else { vec![ids[i - 1].as_str()] };
                let children: Vec<&str> = ids.get(i + 1).map(|c| vec![c.as_str()]).unwrap_or_default();
                node(&ids[i], &parents, &children)
            })
            .collect();
        let levels = compute_levels(&people);
        assert_eq!(level_of(&levels, "n50"), 50);
        // beyond the depth limit
        assert_eq!(level_of(&levels, "n51"), 0);
    }

    #[test]
    fn test_layers_are_sorted_by_id() {
        let people = [node("z", &[], &[]), node("m", &[], &[]), node("a", &[], &[])];
        let layers = layers(&compute_levels(&people));
        let row: Vec<&str> = layers[&0].iter().map(IndividualId::as_str).collect();
        assert_eq!(row, vec!["a", "m", "z"]);
    }
}
