use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, QueryOrder, QuerySelect, Set};

use crate::entities::pokemon;

pub struct PokemonRepository {
    conn: DatabaseConnection,
}

impl PokemonRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Rows are insert-only; duplicates by name or number are allowed.
    pub async fn add(&self, name: &str, number: i32, poke_type: &str) -> Result<pokemon::Model> {
        let record = pokemon::ActiveModel {
            name: Set(name.to_string()),
            number: Set(number),
            poke_type: Set(poke_type.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        record
            .insert(&self.conn)
            .await
            .context("Failed to insert pokemon")
    }

    pub async fn recent(&self, limit: u64) -> Result<Vec<pokemon::Model>> {
        use sea_orm::EntityTrait;
        pokemon::Entity::find()
            .order_by_desc(pokemon::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list recent pokemon")
    }

    pub async fn count(&self) -> Result<u64> {
        use sea_orm::{EntityTrait, PaginatorTrait};
        pokemon::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count pokemon")
    }
}
