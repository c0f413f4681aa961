use anyhow::{Context, Result};
use regex::RegexBuilder;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

use crate::entities::facebook_users;

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert the record, or overwrite every non-key column if a row with the
    /// same id already exists. Re-adding a user is an update, never a
    /// duplicate.
    pub async fn upsert(&self, user: facebook_users::ActiveModel) -> Result<()> {
        facebook_users::Entity::insert(user)
            .on_conflict(
                OnConflict::column(facebook_users::Column::Id)
                    .update_columns([
                        facebook_users::Column::Name,
                        facebook_users::Column::Username,
                        facebook_users::Column::Description,
                        facebook_users::Column::About,
                        facebook_users::Column::IsPublished,
                        facebook_users::Column::Website,
                        facebook_users::Column::Link,
                        facebook_users::Column::Number,
                        facebook_users::Column::TalkingAboutCount,
                        facebook_users::Column::Likes,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await
            .context("Failed to upsert user")?;

        Ok(())
    }

    /// Persist in-place changes to an existing row. Only the columns the
    /// caller actually set are written.
    pub async fn update(&self, user: facebook_users::ActiveModel) -> Result<()> {
        user.update(&self.conn)
            .await
            .context("Failed to update user")?;
        Ok(())
    }

    pub async fn get(&self, id: i64) -> Result<Option<facebook_users::Model>> {
        facebook_users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by id")
    }

    pub async fn list_all(&self) -> Result<Vec<facebook_users::Model>> {
        facebook_users::Entity::find()
            .order_by_asc(facebook_users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")
    }

    /// Case-insensitive substring match of `needle` against every stored
    /// username. Metacharacters in the needle are taken literally. Results
    /// keep id order, so the first entry is stable across calls.
    pub async fn find_matching(&self, needle: &str) -> Result<Vec<facebook_users::Model>> {
        let pattern = RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(true)
            .build()
            .context("Failed to build username pattern")?;

        let users = self.list_all().await?;
        Ok(users
            .into_iter()
            .filter(|u| pattern.is_match(&u.username))
            .collect())
    }

    pub async fn count(&self) -> Result<u64> {
        use sea_orm::PaginatorTrait;
        facebook_users::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count users")
    }
}
