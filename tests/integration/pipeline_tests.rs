//! Integration tests for the load pipeline
//!
//! These tests use wiremock to stand in for the Star Wars API and a
//! provisioned SQLite database in a temporary directory.

use serde_json::json;
use std::time::Duration;
use swapi_loader::config::{Config, DatabaseConfig, SourceConfig};
use swapi_loader::run_load;
use swapi_loader::storage::{connect_store, provision_database, RecordStore};
use swapi_loader::{Character, LoaderError, RetryPolicy};
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server and a temp database
fn create_test_config(server: &MockServer, dir: &TempDir) -> Config {
    Config {
        source: SourceConfig {
            base_url: format!("{}/api/people/", server.uri()),
            accept_invalid_certs: true,
            user_agent: Some("TestLoader/1.0".to_string()),
            request_timeout_secs: Some(10),
        },
        database: DatabaseConfig {
            path: dir.path().join("starwars.db").to_string_lossy().into_owned(),
        },
        retry: RetryPolicy::fixed(2, Duration::from_millis(5)),
    }
}

async fn provisioned_config(server: &MockServer) -> (Config, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(server, &dir);
    provision_database(&config.database, &config.retry)
        .await
        .expect("Failed to provision database");
    (config, dir)
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_load_resolves_references() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_json(&server, "/api/people/", json!({ "count": 2 })).await;
    mount_json(
        &server,
        "/api/people/1/",
        json!({
            "url": format!("{}/api/people/1/", base),
            "name": "Luke",
            "films": [],
            "homeworld": null
        }),
    )
    .await;
    mount_json(
        &server,
        "/api/people/2/",
        json!({
            "url": format!("{}/api/people/2/", base),
            "name": "Leia",
            "films": [format!("{}/api/films/1/", base)],
            "homeworld": format!("{}/api/planets/2/", base)
        }),
    )
    .await;
    mount_json(&server, "/api/films/1/", json!({ "name": "A New Hope" })).await;
    mount_json(&server, "/api/planets/2/", json!({ "name": "Alderaan" })).await;

    let (config, _dir) = provisioned_config(&server).await;
    let summary = run_load(&config).await.expect("Load failed");

    assert_eq!(summary.reported_count, 2);
    assert_eq!(summary.fetched, 2);
    assert_eq!(summary.saved(), 2);
    assert!(summary.is_success());

    let store = connect_store(&config.database, &config.retry)
        .await
        .expect("Failed to open DB");
    assert_eq!(store.count_characters().unwrap(), 2);

    let luke = store.get_character(1).unwrap().expect("Luke missing");
    assert_eq!(luke.character.name, "Luke");
    assert_eq!(luke.character.films, "");
    assert_eq!(luke.character.homeworld, "");

    let leia = store.get_character(2).unwrap().expect("Leia missing");
    assert_eq!(leia.character.name, "Leia");
    assert_eq!(leia.character.films, "A New Hope");
    assert_eq!(leia.character.homeworld, "Alderaan");
}

#[tokio::test]
async fn test_every_reference_group_lands_in_its_column() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_json(&server, "/api/people/", json!({ "count": 1 })).await;
    mount_json(
        &server,
        "/api/people/1/",
        json!({
            "url": format!("{}/api/people/1/", base),
            "name": "Luke Skywalker",
            "birth_year": "19BBY",
            "eye_color": "blue",
            "gender": "male",
            "hair_color": "blond",
            "height": "172",
            "mass": "77",
            "skin_color": "fair",
            "films": [format!("{}/api/films/1/", base), format!("{}/api/films/2/", base)],
            "species": [format!("{}/api/species/1/", base)],
            "starships": [format!("{}/api/starships/12/", base)],
            "vehicles": [format!("{}/api/vehicles/14/", base)],
            "homeworld": format!("{}/api/planets/1/", base)
        }),
    )
    .await;
    mount_json(&server, "/api/films/1/", json!({ "name": "A New Hope" })).await;
    mount_json(&server, "/api/films/2/", json!({ "name": "The Empire Strikes Back" })).await;
    mount_json(&server, "/api/species/1/", json!({ "name": "Human" })).await;
    mount_json(&server, "/api/starships/12/", json!({ "name": "X-wing" })).await;
    mount_json(&server, "/api/vehicles/14/", json!({ "name": "Snowspeeder" })).await;
    mount_json(&server, "/api/planets/1/", json!({ "name": "Tatooine" })).await;

    let (config, _dir) = provisioned_config(&server).await;
    let summary = run_load(&config).await.expect("Load failed");
    assert_eq!(summary.saved(), 1);

    let store = connect_store(&config.database, &config.retry).await.unwrap();
    let luke = store.get_character(1).unwrap().expect("Luke missing").character;

    assert_eq!(
        luke,
        Character {
            id: 1,
            name: "Luke Skywalker".to_string(),
            birth_year: "19BBY".to_string(),
            eye_color: "blue".to_string(),
            gender: "male".to_string(),
            hair_color: "blond".to_string(),
            height: "172".to_string(),
            homeworld: "Tatooine".to_string(),
            mass: "77".to_string(),
            skin_color: "fair".to_string(),
            films: "A New Hope, The Empire Strikes Back".to_string(),
            species: "Human".to_string(),
            starships: "X-wing".to_string(),
            vehicles: "Snowspeeder".to_string(),
        }
    );
}

#[tokio::test]
async fn test_numeric_attributes_are_stored_as_text() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/people/", json!({ "count": 1 })).await;
    mount_json(
        &server,
        "/api/people/1/",
        json!({
            "url": format!("{}/api/people/1/", server.uri()),
            "name": "Luke Skywalker",
            "height": 172,
            "mass": 77
        }),
    )
    .await;

    let (config, _dir) = provisioned_config(&server).await;
    let summary = run_load(&config).await.expect("Load failed");
    assert_eq!(summary.saved(), 1);

    let store = connect_store(&config.database, &config.retry).await.unwrap();
    let luke = store.get_character(1).unwrap().unwrap().character;
    assert_eq!(luke.height, "172");
    assert_eq!(luke.mass, "77");
}

#[tokio::test]
async fn test_empty_collection_saves_nothing() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/people/", json!({ "count": 0 })).await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/people/\d+/$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (config, _dir) = provisioned_config(&server).await;
    let summary = run_load(&config).await.expect("Load failed");

    assert_eq!(summary.fetched, 0);
    assert_eq!(summary.saved(), 0);

    let store = connect_store(&config.database, &config.retry).await.unwrap();
    assert_eq!(store.count_characters().unwrap(), 0);
}

#[tokio::test]
async fn test_failed_item_fetch_does_not_abort_load() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_json(&server, "/api/people/", json!({ "count": 3 })).await;
    for (index, name) in [(1, "Luke Skywalker"), (3, "R2-D2")] {
        mount_json(
            &server,
            &format!("/api/people/{}/", index),
            json!({ "url": format!("{}/api/people/{}/", base, index), "name": name }),
        )
        .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/people/2/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let (config, _dir) = provisioned_config(&server).await;
    let summary = run_load(&config).await.expect("Load failed");

    assert_eq!(summary.reported_count, 3);
    assert_eq!(summary.fetched, 2);
    assert_eq!(summary.saved(), 2);

    let store = connect_store(&config.database, &config.retry).await.unwrap();
    assert!(store.get_character(1).unwrap().is_some());
    assert!(store.get_character(2).unwrap().is_none());
    assert!(store.get_character(3).unwrap().is_some());
}

#[tokio::test]
async fn test_rerun_overwrites_rows_without_duplicates() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/api/people/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 1 })))
        .mount(&server)
        .await;
    // first run sees the old homeworld, second run the new one
    Mock::given(method("GET"))
        .and(path("/api/people/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": format!("{}/api/people/1/", base),
            "name": "Luke Skywalker",
            "homeworld": format!("{}/api/planets/1/", base)
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/people/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": format!("{}/api/people/1/", base),
            "name": "Luke Skywalker",
            "homeworld": format!("{}/api/planets/2/", base)
        })))
        .mount(&server)
        .await;
    mount_json(&server, "/api/planets/1/", json!({ "name": "Tatooine" })).await;
    mount_json(&server, "/api/planets/2/", json!({ "name": "Dagobah" })).await;

    let (config, _dir) = provisioned_config(&server).await;
    run_load(&config).await.expect("First load failed");

    let store = connect_store(&config.database, &config.retry).await.unwrap();
    let first = store.get_character(1).unwrap().unwrap();
    assert_eq!(first.character.homeworld, "Tatooine");
    drop(store);

    // age the row so the refresh on re-upsert is observable
    let conn = rusqlite::Connection::open(&config.database.path).unwrap();
    conn.execute(
        "UPDATE characters SET updated_at = ?1 WHERE id = 1",
        ["2000-01-01T00:00:00.000Z"],
    )
    .unwrap();
    drop(conn);

    run_load(&config).await.expect("Second load failed");

    let store = connect_store(&config.database, &config.retry).await.unwrap();
    assert_eq!(store.count_characters().unwrap(), 1);
    let second = store.get_character(1).unwrap().unwrap();
    assert_eq!(second.character.homeworld, "Dagobah");
    assert_eq!(second.created_at, first.created_at);
    assert_ne!(second.updated_at, "2000-01-01T00:00:00.000Z");
}

#[tokio::test]
async fn test_load_fails_without_provisioned_database() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 0 })))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir);

    let result = run_load(&config).await;
    assert!(matches!(result, Err(LoaderError::Storage(_))));
}
