//! API integration tests against a running server and database

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// Create a book with a unique ISBN and return its JSON representation
async fn create_book(client: &Client, isbn: &str) -> Value {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "publication_date": "1965-08-01",
            "isbn": isbn
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
}

async fn delete_book(client: &Client, id: i64) {
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await;
}

/// ISBN unlikely to collide with earlier runs
fn unique_isbn(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("Clock before epoch")
        .subsec_nanos();
    format!("{}{:09}", tag, nanos)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_and_fetch_book() {
    let client = Client::new();
    let isbn = unique_isbn("978");

    let created = create_book(&client, &isbn).await;
    let id = created["id"].as_i64().expect("No book ID");

    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let by_id: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(by_id["title"], "Dune");
    assert_eq!(by_id["author"], "Frank Herbert");
    assert_eq!(by_id["publication_date"], "1965-08-01");
    assert_eq!(by_id["isbn"], isbn.as_str());

    let response = client
        .get(format!("{}/books/isbn/{}", BASE_URL, isbn))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let by_isbn: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(by_isbn, by_id);

    delete_book(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_conflict() {
    let client = Client::new();
    let isbn = unique_isbn("979");

    let created = create_book(&client, &isbn).await;
    let id = created["id"].as_i64().expect("No book ID");

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Another",
            "author": "Someone",
            "publication_date": "2001-01-01",
            "isbn": isbn
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    delete_book(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_update_book() {
    let client = Client::new();
    let isbn = unique_isbn("977");

    let created = create_book(&client, &isbn).await;
    let id = created["id"].as_i64().expect("No book ID");

    let update = json!({
        "id": id + 1000,
        "title": "Dune Messiah",
        "author": "Frank Herbert",
        "publication_date": "1969-10-15",
        "isbn": isbn
    });

    for _ in 0..2 {
        let response = client
            .put(format!("{}/books/{}", BASE_URL, id))
            .json(&update)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["id"], id);
        assert_eq!(body["title"], "Dune Messiah");
    }

    delete_book(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_update_missing_book() {
    let client = Client::new();

    let response = client
        .put(format!("{}/books/{}", BASE_URL, i32::MAX))
        .json(&json!({
            "title": "Ghost",
            "author": "Nobody",
            "publication_date": "2000-01-01",
            "isbn": unique_isbn("000")
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_delete_book() {
    let client = Client::new();
    let created = create_book(&client, &unique_isbn("976")).await;
    let id = created["id"].as_i64().expect("No book ID");

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_invalid_id() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/not-a-number", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}
