//! HTTP integration tests.
//!
//! Starts an axum fake of the record collection and drives a session
//! through `HttpCollection`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use roster_client::{HttpCollection, RemoteCollection, Session};
use roster_engine::{Age, Field, RecordId, RecordInput};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct FakeDb {
    records: Vec<Value>,
    next_id: i64,
}

type Db = Arc<Mutex<FakeDb>>;

async fn list(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(db.lock().unwrap().records.clone())
}

async fn create(State(db): State<Db>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut db = db.lock().unwrap();
    db.next_id += 1;
    let record = json!({
        "id": db.next_id,
        "name": body["name"],
        "age": body["age"],
        "image": format!("https://img.example/{}.png", db.next_id),
        "createdAt": "2024-01-01"
    });
    db.records.push(record.clone());
    (StatusCode::CREATED, Json(record))
}

async fn update(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut db = db.lock().unwrap();
    let slot = db
        .records
        .iter_mut()
        .find(|r| r["id"] == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    slot["name"] = body["name"].clone();
    slot["age"] = body["age"].clone();
    Ok(Json(slot.clone()))
}

async fn remove(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Value>, StatusCode> {
    let mut db = db.lock().unwrap();
    let pos = db
        .records
        .iter()
        .position(|r| r["id"] == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(db.records.remove(pos)))
}

async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn garbage() -> &'static str {
    "<html>not json</html>"
}

/// Bind to port 0 and return the collection's base address.
async fn start_server(seed: Vec<Value>) -> (String, Db) {
    let db: Db = Arc::new(Mutex::new(FakeDb {
        next_id: seed.len() as i64,
        records: seed,
    }));

    let app = Router::new()
        .route("/users", get(list).post(create))
        .route("/users/{id}", axum::routing::put(update).delete(remove))
        .route("/broken", get(broken))
        .route("/garbage", get(garbage))
        .with_state(Arc::clone(&db));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), db)
}

fn seed() -> Vec<Value> {
    vec![
        json!({"id": 1, "name": "Ann", "age": 30, "image": "https://img.example/1.png"}),
        json!({"id": 2, "name": "Bo", "age": 25, "image": "https://img.example/2.png"}),
    ]
}

fn remote(url: String) -> HttpCollection {
    HttpCollection::new(url, Duration::from_secs(5)).unwrap()
}

fn ids(records: &[roster_engine::Record]) -> Vec<RecordId> {
    records.iter().filter_map(|r| r.id.clone()).collect()
}

#[tokio::test]
async fn list_parses_records() {
    let (base, _db) = start_server(seed()).await;
    let records = remote(format!("{base}/users")).list().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Ann");
    assert_eq!(records[0].age, Age::from(30));
    assert_eq!(records[1].image.as_deref(), Some("https://img.example/2.png"));
}

#[tokio::test]
async fn full_session_flow() {
    let (base, db) = start_server(seed()).await;
    let session = Session::new(remote(format!("{base}/users")));
    session.activate().await.unwrap();
    assert_eq!(session.view().visible.len(), 2);

    // Create
    session.on_field_change(Field::Name, "Cy");
    session.on_field_change(Field::Age, "41");
    let created = session.on_submit().await.unwrap();
    assert_eq!(created.id, Some(RecordId::Int(3)));
    assert_eq!(created.age, Age::from_input("41"));
    assert_eq!(created.extra.get("createdAt"), Some(&json!("2024-01-01")));
    assert!(session.view().form.is_blank());

    // Search
    session.on_search_change("4");
    assert_eq!(ids(&session.view().visible), vec![RecordId::Int(3)]);
    session.on_search_change("");

    // Edit
    let bo = session.find_by_label("2").unwrap();
    session.on_edit(&bo);
    session.on_field_change(Field::Name, "Bob");
    session.on_submit().await.unwrap();
    {
        let store = session.store();
        assert_eq!(store.records()[1].name, "Bob");
        assert_eq!(store.records()[1].age, Age::from_input("25"));
        assert!(!store.is_editing());
    }

    // Delete
    session.on_delete(&RecordId::Int(1)).await.unwrap();
    assert_eq!(
        ids(session.store().records()),
        vec![RecordId::Int(2), RecordId::Int(3)]
    );

    let server_ids: Vec<Value> = db
        .lock()
        .unwrap()
        .records
        .iter()
        .map(|r| r["id"].clone())
        .collect();
    assert_eq!(server_ids, vec![json!(2), json!(3)]);
}

#[tokio::test]
async fn write_body_carries_raw_age_text() {
    let (base, db) = start_server(vec![]).await;
    let remote = remote(format!("{base}/users"));

    remote
        .create(&RecordInput::new("Dee", "twelve"))
        .await
        .unwrap();

    let stored = db.lock().unwrap().records[0].clone();
    assert_eq!(stored["name"], "Dee");
    assert_eq!(stored["age"], "twelve");
}

#[tokio::test]
async fn delete_ack_is_returned() {
    let (base, _db) = start_server(seed()).await;
    let ack = remote(format!("{base}/users"))
        .delete(&RecordId::Int(2))
        .await
        .unwrap();
    assert_eq!(ack["name"], "Bo");
}

#[tokio::test]
async fn not_found_update_keeps_edit_session() {
    let (base, db) = start_server(seed()).await;
    let session = Session::new(remote(format!("{base}/users")));
    session.activate().await.unwrap();

    let ann = session.find_by_label("1").unwrap();
    session.on_edit(&ann);
    session.on_field_change(Field::Name, "Annie");

    // Removed behind our back
    db.lock().unwrap().records.retain(|r| r["id"] != 1);

    let err = session.on_submit().await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    let store = session.store();
    assert_eq!(store.edit_target(), Some(&RecordId::Int(1)));
    assert_eq!(store.form().name, "Annie");
    assert_eq!(store.records()[0].name, "Ann");
}

#[tokio::test]
async fn not_found_delete_keeps_record() {
    let (base, _db) = start_server(seed()).await;
    let session = Session::new(remote(format!("{base}/users")));
    session.activate().await.unwrap();

    let err = session.on_delete(&RecordId::Int(9)).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(session.store().records().len(), 2);
}

#[tokio::test]
async fn server_error_on_list() {
    let (base, _db) = start_server(seed()).await;
    let session = Session::new(remote(format!("{base}/broken")));

    let err = session.activate().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(session.view().visible.is_empty());
}

#[tokio::test]
async fn malformed_payload_on_list() {
    let (base, _db) = start_server(seed()).await;
    let session = Session::new(remote(format!("{base}/garbage")));

    let err = session.activate().await.unwrap_err();
    assert!(err.message().starts_with("malformed payload"));
    assert_eq!(err.status(), None);
    assert!(session.store().records().is_empty());
}

#[tokio::test]
async fn unreachable_service() {
    let session = Session::new(remote("http://127.0.0.1:1/users".to_string()));

    assert!(session.activate().await.is_err());
    session.on_field_change(Field::Name, "Cy");
    assert!(session.on_submit().await.is_err());
    assert_eq!(session.view().form.name, "Cy");
}
