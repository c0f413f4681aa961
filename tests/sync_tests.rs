use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::Set;
use serde_json::{Map, Value, json};

use graphsync::clients::graph::{ProfileError, ProfileSource};
use graphsync::db::Store;
use graphsync::entities::facebook_users;
use graphsync::services::SyncService;

enum Canned {
    Profile(Value),
    NotFound,
    Garbage,
}

struct StubSource {
    responses: HashMap<String, Canned>,
}

#[async_trait]
impl ProfileSource for StubSource {
    async fn fetch_profile(&self, username: &str) -> Result<Map<String, Value>, ProfileError> {
        match self.responses.get(username) {
            Some(Canned::Profile(Value::Object(map))) => Ok(map.clone()),
            Some(Canned::Profile(_)) => Err(ProfileError::UnexpectedShape),
            Some(Canned::Garbage) => Err(ProfileError::Decode(
                "expected value at line 1 column 1".to_string(),
            )),
            Some(Canned::NotFound) | None => {
                Err(ProfileError::Http(reqwest::StatusCode::NOT_FOUND))
            }
        }
    }
}

async fn seeded_store() -> Store {
    let store = Store::new("sqlite::memory:").await.unwrap();

    for (id, name, username) in [
        (4, "Mark", "zuck"),
        (5, "Chris", "schrep"),
        (6, "Ghost", "ghost"),
    ] {
        store
            .upsert_user(facebook_users::ActiveModel {
                id: Set(id),
                name: Set(name.to_string()),
                username: Set(username.to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    store
}

#[tokio::test]
async fn test_sync_updates_reachable_users_and_skips_the_rest() {
    let store = seeded_store().await;

    let mut responses = HashMap::new();
    responses.insert(
        "zuck".to_string(),
        Canned::Profile(json!({
            "id": 4,
            "name": "Mark Zuckerberg",
            "username": "zuck",
            "likes": 1234,
            "hometown": "ignored",
        })),
    );
    responses.insert("ghost".to_string(), Canned::NotFound);
    responses.insert(
        "schrep".to_string(),
        Canned::Profile(json!({"id": 5, "name": "Mike Schroepfer", "username": "schrep"})),
    );

    let sync = SyncService::new(store.clone(), Arc::new(StubSource { responses }));
    let report = sync.sync_users().await.unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.synced, 2);
    assert_eq!(report.skipped, 1);

    let zuck = store.get_user(4).await.unwrap().unwrap();
    assert_eq!(zuck.name, "Mark Zuckerberg");
    assert_eq!(zuck.likes, Some(1234));

    let schrep = store.get_user(5).await.unwrap().unwrap();
    assert_eq!(schrep.name, "Mike Schroepfer");

    // The unreachable user is exactly as it was before the pass.
    let ghost = store.get_user(6).await.unwrap().unwrap();
    assert_eq!(
        ghost,
        facebook_users::Model {
            id: 6,
            name: "Ghost".to_string(),
            username: "ghost".to_string(),
            description: None,
            about: None,
            is_published: None,
            website: None,
            link: None,
            number: None,
            talking_about_count: None,
            likes: None,
        }
    );
}

#[tokio::test]
async fn test_sync_with_no_users_is_a_noop() {
    let store = Store::new("sqlite::memory:").await.unwrap();
    let sync = SyncService::new(
        store,
        Arc::new(StubSource {
            responses: HashMap::new(),
        }),
    );

    let report = sync.sync_users().await.unwrap();
    assert_eq!(report.total, 0);
    assert_eq!(report.synced, 0);
}

#[tokio::test]
async fn test_decode_failure_aborts_the_pass() {
    let store = seeded_store().await;

    let mut responses = HashMap::new();
    responses.insert("zuck".to_string(), Canned::Garbage);

    let sync = SyncService::new(store.clone(), Arc::new(StubSource { responses }));
    let err = sync.sync_users().await.unwrap_err();

    assert!(err.to_string().contains("not valid JSON"));
}

#[tokio::test]
async fn test_non_object_profile_is_skipped_not_fatal() {
    let store = seeded_store().await;

    let mut responses = HashMap::new();
    responses.insert("zuck".to_string(), Canned::Profile(json!(["array"])));
    responses.insert(
        "schrep".to_string(),
        Canned::Profile(json!({"id": 5, "likes": 7})),
    );

    let sync = SyncService::new(store.clone(), Arc::new(StubSource { responses }));
    let report = sync.sync_users().await.unwrap();

    assert_eq!(report.synced, 1);
    assert_eq!(report.skipped, 2);
    assert_eq!(store.get_user(5).await.unwrap().unwrap().likes, Some(7));
}
