use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{facebook_users, pokemon};

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let path_str = db_url.trim_start_matches("sqlite:");
        if !path_str.starts_with(":memory:") {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn pokemon_repo(&self) -> repositories::pokemon::PokemonRepository {
        repositories::pokemon::PokemonRepository::new(self.conn.clone())
    }

    pub async fn upsert_user(&self, user: facebook_users::ActiveModel) -> Result<()> {
        self.user_repo().upsert(user).await
    }

    pub async fn update_user(&self, user: facebook_users::ActiveModel) -> Result<()> {
        self.user_repo().update(user).await
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<facebook_users::Model>> {
        self.user_repo().get(id).await
    }

    pub async fn list_users(&self) -> Result<Vec<facebook_users::Model>> {
        self.user_repo().list_all().await
    }

    pub async fn find_users_matching(&self, needle: &str) -> Result<Vec<facebook_users::Model>> {
        self.user_repo().find_matching(needle).await
    }

    pub async fn user_count(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    pub async fn add_pokemon(
        &self,
        name: &str,
        number: i32,
        poke_type: &str,
    ) -> Result<pokemon::Model> {
        self.pokemon_repo().add(name, number, poke_type).await
    }

    pub async fn recent_pokemon(&self, limit: u64) -> Result<Vec<pokemon::Model>> {
        self.pokemon_repo().recent(limit).await
    }

    pub async fn pokemon_count(&self) -> Result<u64> {
        self.pokemon_repo().count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Set;

    fn user(id: i64, name: &str, username: &str) -> facebook_users::ActiveModel {
        facebook_users::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            username: Set(username.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_upsert_overwrites_existing_row() {
        let store = Store::new("sqlite::memory:").await.unwrap();

        store.upsert_user(user(4, "Mark", "zuck")).await.unwrap();
        store
            .upsert_user(user(4, "Mark Zuckerberg", "zuck"))
            .await
            .unwrap();

        assert_eq!(store.user_count().await.unwrap(), 1);
        let stored = store.get_user(4).await.unwrap().unwrap();
        assert_eq!(stored.name, "Mark Zuckerberg");
    }

    #[tokio::test]
    async fn test_find_matching_is_case_insensitive_substring() {
        let store = Store::new("sqlite::memory:").await.unwrap();

        store.upsert_user(user(4, "Mark", "zuck")).await.unwrap();
        store.upsert_user(user(5, "Chris", "schrep")).await.unwrap();

        let hits = store.find_users_matching("ZUC").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 4);

        // Metacharacters are literal, not patterns.
        assert!(store.find_users_matching(".*").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pokemon_rows_are_insert_only_and_ordered() {
        let store = Store::new("sqlite::memory:").await.unwrap();

        store.add_pokemon("Tinyfirecat", 12, "Fire").await.unwrap();
        store.add_pokemon("Tinyfirecat", 12, "Fire").await.unwrap();
        store.add_pokemon("Bigrockdog", 999, "Rock").await.unwrap();

        assert_eq!(store.pokemon_count().await.unwrap(), 3);
        let recent = store.recent_pokemon(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].name, "Bigrockdog");
    }
}
