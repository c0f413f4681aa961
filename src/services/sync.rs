use std::sync::Arc;

use anyhow::Result;
use sea_orm::ActiveModelTrait;
use tracing::{debug, info, warn};

use crate::clients::graph::{ProfileError, ProfileSource};
use crate::db::Store;
use crate::entities::facebook_users;
use crate::merge::merge_profile_fields;

/// Outcome of one sync pass. A failed record never fails the pass; it only
/// shows up in `skipped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub total: usize,
    pub synced: usize,
    pub skipped: usize,
}

/// Refreshes every stored user from the Graph API.
#[derive(Clone)]
pub struct SyncService {
    store: Store,
    source: Arc<dyn ProfileSource>,
}

impl SyncService {
    #[must_use]
    pub fn new(store: Store, source: Arc<dyn ProfileSource>) -> Self {
        Self { store, source }
    }

    /// Run one pass over a snapshot of the user table. Profiles are fetched
    /// strictly one at a time; an unreachable or missing profile leaves that
    /// row untouched and moves on. A body that is not valid JSON aborts the
    /// pass; only the add-user page recovers from decode failures.
    pub async fn sync_users(&self) -> Result<SyncReport> {
        let users = self.store.list_users().await?;
        let total = users.len();
        info!("Syncing {} stored users from the Graph API", total);

        let mut synced = 0;
        let mut skipped = 0;

        for user in users {
            let username = user.username.clone();

            match self.source.fetch_profile(&username).await {
                Ok(profile) => {
                    let mut active: facebook_users::ActiveModel = user.into();
                    merge_profile_fields(&mut active, &profile);
                    // A profile sharing no keys with the field table is a
                    // successful no-op, not an empty UPDATE.
                    if active.is_changed() {
                        self.store.update_user(active).await?;
                    }
                    debug!("Synced profile for {}", username);
                    synced += 1;
                }
                Err(e @ (ProfileError::Http(_) | ProfileError::Network(_))) => {
                    warn!("Skipping {}: {}", username, e);
                    skipped += 1;
                }
                Err(e @ ProfileError::UnexpectedShape) => {
                    warn!("Skipping {}: {}", username, e);
                    skipped += 1;
                }
                Err(e @ ProfileError::Decode(_)) => {
                    return Err(e.into());
                }
            }
        }

        info!("Sync pass complete: {}/{} updated", synced, total);
        Ok(SyncReport {
            total,
            synced,
            skipped,
        })
    }
}
