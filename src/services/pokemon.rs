use anyhow::Result;
use rand::Rng;
use tracing::debug;

use crate::db::Store;
use crate::entities::pokemon;

const FIRST: [&str; 12] = [
    "Tiny", "Small", "Little", "Big", "Giant", "Skinny", "Chubby", "Tall", "Short", "Super",
    "Ultra", "Mega",
];

const SECOND: [&str; 10] = [
    "fire", "water", "sand", "air", "wind", "grass", "leaf", "tree", "rock", "stone",
];

const THIRD: [&str; 19] = [
    "cat",
    "dog",
    "rat",
    "bird",
    "horse",
    "pig",
    "cow",
    "chicken",
    "lion",
    "tiger",
    "wolf",
    "deer",
    "hippopotamus",
    "octopus",
    "squid",
    "fish",
    "shark",
    "meerkat",
    "lemur",
];

pub const NAME_SUFFIX: &str = "mon";

pub const TYPES: [&str; 17] = [
    "Fire", "Water", "Electric", "Grass", "Rock", "Ground", "Fighting", "Poison", "Ghost",
    "Psychic", "Bug", "Flying", "Ice", "Dragon", "Dark", "Steel", "Normal",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPokemon {
    pub name: String,
    pub number: i32,
    pub poke_type: String,
}

/// Compose one random record: a word from each list glued together with the
/// literal suffix, a number in 1..=9999, and a type from the fixed list.
/// No uniqueness check; collisions are expected.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> GeneratedPokemon {
    let first = FIRST[rng.random_range(0..FIRST.len())];
    let second = SECOND[rng.random_range(0..SECOND.len())];
    let third = THIRD[rng.random_range(0..THIRD.len())];

    GeneratedPokemon {
        name: format!("{first}{second}{third}{NAME_SUFFIX}"),
        number: rng.random_range(1..=9999),
        poke_type: TYPES[rng.random_range(0..TYPES.len())].to_string(),
    }
}

#[derive(Clone)]
pub struct PokemonGenerator {
    store: Store,
}

impl PokemonGenerator {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create_random(&self) -> Result<pokemon::Model> {
        let generated = generate(&mut rand::rng());
        debug!(
            "Generated pokemon: {} (#{}, {})",
            generated.name, generated.number, generated.poke_type
        );

        self.store
            .add_pokemon(&generated.name, generated.number, &generated.poke_type)
            .await
    }
}
