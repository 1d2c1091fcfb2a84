//! Name Generation for founders and newborns
//!
//! Simple random names from predefined lists.

use rand::Rng;

use crate::components::Sex;

/// First names for males
const MALE_FIRST_NAMES: &[&str] = &[
    "Andres", "Carlos", "Diego", "Esteban", "Felipe", "Gabriel", "Ignacio", "Jorge",
    "Luis", "Manuel", "Mauricio", "Oscar", "Pablo", "Rafael", "Sergio", "Tomas",
    "Victor", "Alonso", "Bernardo", "Cristian", "Emilio", "Fabian", "Hector", "Joaquin",
];

/// First names for females
const FEMALE_FIRST_NAMES: &[&str] = &[
    "Adriana", "Beatriz", "Carolina", "Daniela", "Elena", "Fernanda", "Gabriela", "Isabel",
    "Julia", "Laura", "Lucia", "Mariana", "Natalia", "Paola", "Rebeca", "Sofia",
    "Tatiana", "Valeria", "Ximena", "Ana", "Camila", "Diana", "Lorena", "Silvia",
];

/// Surnames
const LAST_NAMES: &[&str] = &[
    "Alfaro", "Araya", "Arias", "Brenes", "Calderon", "Campos", "Castro", "Chaves",
    "Cordero", "Fallas", "Gomez", "Granados", "Hernandez", "Jimenez", "Leiva", "Madrigal",
    "Monge", "Mora", "Navarro", "Quesada", "Ramirez", "Rojas", "Salas", "Solano",
    "Soto", "Ugalde", "Valverde", "Vargas", "Vega", "Zamora", "Zuniga", "Umana",
];

/// Random first name matching `sex`
pub fn random_first_name<R: Rng + ?Sized>(rng: &mut R, sex: Sex) -> &'static str {
    let names = match sex {
        Sex::Male => MALE_FIRST_NAMES,
        Sex::Female => FEMALE_FIRST_NAMES,
    };
    names[rng.gen_range(0..names.len())]
}

pub fn random_last_name<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())]
}

/// Founder name: random first and last name.
pub fn founder_name<R: Rng + ?Sized>(rng: &mut R, sex: Sex) -> String {
    format!("{} {}", random_first_name(rng, sex), random_last_name(rng))
}

/// Newborn name: random first name plus the parent's surname (the last word
/// of the parent's display name), or a random surname when there is none.
pub fn newborn_name<R: Rng + ?Sized>(rng: &mut R, sex: Sex, parent_name: Option<&str>) -> String {
    let first = random_first_name(rng, sex);
    let surname = parent_name
        .and_then(|name| name.split_whitespace().last())
        .map(str::to_string)
        .unwrap_or_else(|| random_last_name(rng).to_string());
    format!("{first} {surname}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_name_generation() {
        let mut rng = StdRng::seed_from_u64(3);
        let first = random_first_name(&mut rng, Sex::Male);
        assert!(MALE_FIRST_NAMES.contains(&first));

        let first = random_first_name(&mut rng, Sex::Female);
        assert!(FEMALE_FIRST_NAMES.contains(&first));

        let last = random_last_name(&mut rng);
        assert!(LAST_NAMES.contains(&last));
    }

    #[test]
    fn test_newborn_carries_parent_surname() {
        let mut rng = StdRng::seed_from_u64(5);
        let name = newborn_name(&mut rng, Sex::Female, Some("Maria Jimenez"));
        assert!(name.ends_with(" Jimenez"));

        let orphan = newborn_name(&mut rng, Sex::Male, None);
        let surname = orphan.split_whitespace().last().unwrap();
        assert!(LAST_NAMES.contains(&surname));
    }
}
