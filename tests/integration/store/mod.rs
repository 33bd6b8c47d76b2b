//! Document store contract tests
//!
//! Every backend must behave the same. The in-memory store always runs; the
//! PostgreSQL store joins when `TEST_DATABASE_URL` or `DATABASE_URL` is set.
//! Each test works in its own freshly generated team collection.

use std::sync::Arc;

use rosterboard_docstore::{
    generate_id, layout, to_fields, CollectionPath, Direction, DocumentStore, FieldUpdate,
    MemoryStore, PostgresStore, Query, SharedStore, StoreError, WriteOp,
};
use serde_json::{json, Value};

use crate::common::TestConfig;

/// All backends under test
async fn stores() -> Vec<SharedStore> {
    let mut stores: Vec<SharedStore> = vec![Arc::new(MemoryStore::new())];
    if let Some(url) = TestConfig::from_env().database_url {
        let postgres = PostgresStore::connect(&url)
            .await
            .expect("Failed to connect to test database");
        stores.push(Arc::new(postgres));
    }
    stores
}

fn players() -> CollectionPath {
    layout::players(&generate_id()).unwrap()
}

fn fields(value: Value) -> rosterboard_docstore::Fields {
    to_fields(&value).unwrap()
}

async fn ids(store: &SharedStore, collection: &CollectionPath, query: &Query) -> Vec<Value> {
    store
        .query(collection, query)
        .await
        .unwrap()
        .into_iter()
        .map(|doc| doc.data["name"].clone())
        .collect()
}

#[tokio::test]
async fn test_set_update_get_delete() {
    for store in stores().await {
        let backend = store.backend_name();
        let path = layout::user(&generate_id()).unwrap();

        store
            .set(&path, fields(json!({ "name": "Ann", "teamCodes": [] })), false)
            .await
            .unwrap();
        store
            .update(
                &path,
                vec![
                    FieldUpdate::append("teamIds", "t1"),
                    FieldUpdate::append("teamIds", "t1"),
                    FieldUpdate::set("skills.catches", 7),
                ],
            )
            .await
            .unwrap();

        let doc = store.get(&path).await.unwrap().unwrap();
        assert_eq!(
            Value::Object(doc.data),
            json!({
                "name": "Ann",
                "teamCodes": [],
                "teamIds": ["t1", "t1"],
                "skills": { "catches": 7 },
            }),
            "{}",
            backend
        );

        store.delete(&path).await.unwrap();
        assert!(store.get(&path).await.unwrap().is_none(), "{}", backend);
    }
}

#[tokio::test]
async fn test_update_missing_document_is_not_found() {
    for store in stores().await {
        let path = layout::user(&generate_id()).unwrap();
        let result = store
            .update(&path, vec![FieldUpdate::set("name", "Ann")])
            .await;
        assert!(
            matches!(result, Err(StoreError::NotFound(_))),
            "{}",
            store.backend_name()
        );
    }
}

#[tokio::test]
async fn test_failed_batch_writes_nothing() {
    for store in stores().await {
        let backend = store.backend_name();
        let team = layout::team(&generate_id()).unwrap();

        let result = store
            .commit(vec![
                WriteOp::Create {
                    path: team.clone(),
                    data: fields(json!({ "name": "Hawks" })),
                },
                WriteOp::Update {
                    path: layout::user(&generate_id()).unwrap(),
                    updates: vec![FieldUpdate::append("teamIds", team.id().to_string())],
                },
            ])
            .await;

        assert!(matches!(result, Err(StoreError::NotFound(_))), "{}", backend);
        assert!(store.get(&team).await.unwrap().is_none(), "{}", backend);
    }
}

#[tokio::test]
async fn test_create_existing_document_fails() {
    for store in stores().await {
        let collection = players();
        let path = store
            .add(&collection, fields(json!({ "name": "Ann" })))
            .await
            .unwrap();

        let result = store
            .commit(vec![WriteOp::Create {
                path,
                data: fields(json!({ "name": "Bo" })),
            }])
            .await;
        assert!(
            matches!(result, Err(StoreError::AlreadyExists(_))),
            "{}",
            store.backend_name()
        );
    }
}

#[tokio::test]
async fn test_ordered_query_and_highest_rank() {
    for store in stores().await {
        let backend = store.backend_name();
        let collection = players();
        for (name, rank) in [("Cy", json!(3)), ("Ann", json!(1)), ("Bo", json!(2.5))] {
            store
                .add(&collection, fields(json!({ "name": name, "rank": rank })))
                .await
                .unwrap();
        }
        store
            .add(&collection, fields(json!({ "name": "Unranked" })))
            .await
            .unwrap();

        let ascending = Query::new().order_by("rank", Direction::Ascending);
        assert_eq!(
            ids(&store, &collection, &ascending).await,
            vec![json!("Ann"), json!("Bo"), json!("Cy")],
            "{}",
            backend
        );

        let highest = Query::new().order_by("rank", Direction::Descending).limit(1);
        assert_eq!(
            ids(&store, &collection, &highest).await,
            vec![json!("Cy")],
            "{}",
            backend
        );

        let everything = store.query(&collection, &Query::new()).await.unwrap();
        assert_eq!(everything.len(), 4, "{}", backend);
    }
}

#[tokio::test]
async fn test_mixed_type_order_agrees_across_backends() {
    for store in stores().await {
        let collection = players();
        for (name, rank) in [
            ("bool", json!(true)),
            ("number", json!(5)),
            ("string", json!("x")),
            ("null", Value::Null),
        ] {
            store
                .add(&collection, fields(json!({ "name": name, "rank": rank })))
                .await
                .unwrap();
        }

        let ascending = Query::new().order_by("rank", Direction::Ascending);
        assert_eq!(
            ids(&store, &collection, &ascending).await,
            vec![json!("null"), json!("string"), json!("number"), json!("bool")],
            "{}",
            store.backend_name()
        );
    }
}
