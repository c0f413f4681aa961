use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::Set;
use serde_json::{Map, Value, json};

use graphsync::clients::graph::{ProfileError, ProfileSource};
use graphsync::config::Config;
use graphsync::entities::facebook_users;
use graphsync::scheduler::Scheduler;
use graphsync::state::SharedState;

struct StubSource {
    profiles: HashMap<String, Value>,
}

#[async_trait]
impl ProfileSource for StubSource {
    async fn fetch_profile(&self, username: &str) -> Result<Map<String, Value>, ProfileError> {
        match self.profiles.get(username) {
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(_) => Err(ProfileError::UnexpectedShape),
            None => Err(ProfileError::Http(reqwest::StatusCode::NOT_FOUND)),
        }
    }
}

async fn shared_state(config: Config, profiles: HashMap<String, Value>) -> Arc<SharedState> {
    let source = Arc::new(StubSource { profiles });
    Arc::new(
        SharedState::with_profile_source(config, source)
            .await
            .expect("failed to create shared state"),
    )
}

fn memory_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.scheduler.pokemon_interval_seconds = 1;
    config
}

#[tokio::test]
async fn test_run_once_fires_both_jobs() {
    let mut profiles = HashMap::new();
    profiles.insert(
        "zuck".to_string(),
        json!({"id": 4, "name": "Mark Zuckerberg", "username": "zuck", "likes": 42}),
    );

    let shared = shared_state(memory_config(), profiles).await;
    shared
        .store
        .upsert_user(facebook_users::ActiveModel {
            id: Set(4),
            name: Set("Mark".to_string()),
            username: Set("zuck".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let scheduler = Scheduler::new(shared.clone(), shared.config.scheduler.clone());
    scheduler.run_once().await.unwrap();

    let user = shared.store.get_user(4).await.unwrap().unwrap();
    assert_eq!(user.name, "Mark Zuckerberg");
    assert_eq!(user.likes, Some(42));
    assert_eq!(shared.store.pokemon_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_disabled_scheduler_returns_without_running() {
    let mut config = memory_config();
    config.scheduler.enabled = false;

    let shared = shared_state(config, HashMap::new()).await;
    let scheduler = Scheduler::new(shared.clone(), shared.config.scheduler.clone());

    scheduler.start().await.unwrap();

    assert!(!scheduler.is_running().await);
    assert_eq!(shared.store.pokemon_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_stop_ends_a_running_scheduler() {
    let shared = shared_state(memory_config(), HashMap::new()).await;
    let scheduler = Arc::new(Scheduler::new(
        shared.clone(),
        shared.config.scheduler.clone(),
    ));

    let runner = Arc::clone(&scheduler);
    let handle = tokio::spawn(async move { runner.start().await });

    for _ in 0..100 {
        if scheduler.is_running().await {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(scheduler.is_running().await);

    scheduler.stop().await;

    // The loop notices the flag on its next tick (pokemon interval is 1s).
    tokio::time::timeout(Duration::from_secs(10), handle)
        .await
        .expect("scheduler did not stop")
        .unwrap()
        .unwrap();
    assert!(!scheduler.is_running().await);
}
