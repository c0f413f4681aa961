use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, interval};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::config::SchedulerConfig;
use crate::state::SharedState;

/// Drives the two periodic jobs: the Graph sync pass and the random pokemon
/// generator. Runs either on plain intervals or, for the sync job, on a cron
/// expression when one is configured.
pub struct Scheduler {
    state: Arc<SharedState>,
    config: SchedulerConfig,
    running: Arc<RwLock<bool>>,
}

impl Scheduler {
    #[must_use]
    pub fn new(state: Arc<SharedState>, config: SchedulerConfig) -> Self {
        Self {
            state,
            config,
            running: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn start(&self) -> Result<()> {
        if !self.config.enabled {
            info!("Scheduler is disabled in config");
            return Ok(());
        }

        *self.running.write().await = true;
        info!("Starting background scheduler");

        if let Some(cron_expr) = &self.config.sync_cron_expression {
            self.run_with_cron(cron_expr).await
        } else {
            self.run_with_interval().await
        }
    }

    async fn run_with_cron(&self, cron_expr: &str) -> Result<()> {
        let mut sched = JobScheduler::new().await?;

        let state = Arc::clone(&self.state);
        let running = Arc::clone(&self.running);

        let sync_job = Job::new_async(cron_expr, move |_uuid, _lock| {
            let state = Arc::clone(&state);
            let running = Arc::clone(&running);
            Box::pin(async move {
                if !*running.read().await {
                    return;
                }
                if let Err(e) = state.sync.sync_users().await {
                    error!("Scheduled user sync failed: {}", e);
                }
            })
        })?;

        sched.add(sync_job).await?;
        sched.start().await?;

        info!("Sync job running with cron: {}", cron_expr);

        let mut pokemon_interval =
            interval(Duration::from_secs(self.config.pokemon_interval_seconds.into()));

        loop {
            if !*self.running.read().await {
                break;
            }
            pokemon_interval.tick().await;
            if let Err(e) = self.state.pokemon.create_random().await {
                error!("Scheduled pokemon generation failed: {}", e);
            }
        }

        sched.shutdown().await?;
        Ok(())
    }

    async fn run_with_interval(&self) -> Result<()> {
        let sync_mins = self.config.sync_interval_minutes;
        let pokemon_secs = self.config.pokemon_interval_seconds;

        info!(
            "Scheduler running (sync every {} min, pokemon every {} sec)",
            sync_mins, pokemon_secs
        );

        let mut sync_interval = interval(Duration::from_secs(u64::from(sync_mins) * 60));
        let mut pokemon_interval = interval(Duration::from_secs(pokemon_secs.into()));

        loop {
            tokio::select! {
                _ = sync_interval.tick() => {
                    if !*self.running.read().await {
                        break;
                    }
                    if let Err(e) = self.state.sync.sync_users().await {
                        error!("Scheduled user sync failed: {}", e);
                    }
                }
                _ = pokemon_interval.tick() => {
                    if !*self.running.read().await {
                        break;
                    }
                    if let Err(e) = self.state.pokemon.create_random().await {
                        error!("Scheduled pokemon generation failed: {}", e);
                    }
                }
            }
        }

        Ok(())
    }

    pub async fn stop(&self) {
        info!("Stopping scheduler...");
        *self.running.write().await = false;
    }

    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }

    /// Fire both jobs once, outside the schedule.
    pub async fn run_once(&self) -> Result<()> {
        info!("Running manual check...");

        self.state.sync.sync_users().await?;
        self.state.pokemon.create_random().await?;

        Ok(())
    }
}
