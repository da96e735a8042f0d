mod common;

use std::collections::HashSet;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_returns_201_with_location() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.create(common::user("John", "Doe", "john@x.com")).await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let location = res
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = res.json::<Value>().await?;

    let id = body["id"].as_i64().expect("id should be an integer");
    assert_eq!(location.as_deref(), Some(format!("/users/{}", id).as_str()));
    assert_eq!(body["firstName"], "John");
    assert_eq!(body["email"], "john@x.com");
    assert!(body["createdAt"].is_string(), "createdAt missing: {}", body);
    assert!(body["updatedAt"].is_null(), "updatedAt should be null: {}", body);

    // Repeating the same POST collides on email
    let res = server.create(common::user("John", "Doe", "john@x.com")).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Email is already in use.");

    Ok(())
}

#[tokio::test]
async fn create_validation_messages() -> Result<()> {
    let server = common::spawn_server().await?;

    let cases = [
        (json!({ "lastName": "Doe", "email": "a@x.com" }), "FirstName and LastName are required."),
        (json!({ "firstName": "A", "lastName": " ", "email": "a@x.com" }), "FirstName and LastName are required."),
        (json!({ "firstName": "A", "lastName": "B" }), "Email is required."),
        (json!({ "firstName": "A", "lastName": "B", "email": "not-an-email" }), "Email format is invalid."),
        (json!({ "firstName": "A", "lastName": "B", "email": " a@x.com" }), "Email format is invalid."),
    ];

    for (payload, expected) in cases {
        let res = server.create(payload.clone()).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "payload {}", payload);
        let body = res.json::<Value>().await?;
        assert_eq!(body["error"], expected, "payload {}", payload);
    }

    Ok(())
}

#[tokio::test]
async fn create_accepts_quoted_ip_literal_and_utf8_addresses() -> Result<()> {
    let server = common::spawn_server().await?;

    for email in ["\"john doe\"@x.com", "user@[192.168.0.1]", "josé@x.com"] {
        let res = server.create(common::user("A", "B", email)).await?;
        assert_eq!(res.status(), StatusCode::CREATED, "email {}", email);
        assert_eq!(res.json::<Value>().await?["email"], email);
    }

    let res = server.create(common::user("A", "B", "user@[999.0.0.1]")).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Email format is invalid.");

    Ok(())
}

#[tokio::test]
async fn ids_are_unique() -> Result<()> {
    let server = common::spawn_server().await?;

    let mut ids = HashSet::new();
    for i in 0..5 {
        let res = server
            .create(common::user("User", "Number", &format!("user{}@x.com", i)))
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body = res.json::<Value>().await?;
        assert!(ids.insert(body["id"].as_i64().unwrap()), "duplicate id in {}", body);
    }

    let listed = server.get("/users").await?.json::<Value>().await?;
    assert_eq!(listed.as_array().map(|a| a.len()), Some(5));
    Ok(())
}

#[tokio::test]
async fn get_missing_user_is_404() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.get("/users/999").await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "User with ID 999 not found.");
    Ok(())
}

#[tokio::test]
async fn update_rules() -> Result<()> {
    let server = common::spawn_server().await?;

    let first = server.create(common::user("Ann", "Lee", "ann@x.com")).await?.json::<Value>().await?;
    server.create(common::user("Bob", "Ray", "bob@x.com")).await?;
    let id = first["id"].as_i64().unwrap();
    let path = format!("/users/{}", id);

    // Unknown id wins over a bad body
    let res = server.put("/users/999", json!({})).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server.put(&path, json!({ "firstName": "Ann", "lastName": "" , "email": "ann@x.com" })).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "FirstName and LastName are required.");

    let res = server.put(&path, json!({ "firstName": "Ann", "lastName": "Lee", "email": "bad" })).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Email is required and must be valid.");

    // Someone else's email
    let res = server.put(&path, common::user("Ann", "Lee", "bob@x.com")).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Email is already in use.");

    // Own email is fine
    let res = server
        .put(&path, json!({ "firstName": "Annie", "lastName": "Lee", "email": "ann@x.com", "department": "R&D" }))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(updated["id"], first["id"]);
    assert_eq!(updated["firstName"], "Annie");
    assert_eq!(updated["department"], "R&D");
    assert_eq!(updated["createdAt"], first["createdAt"]);
    assert!(updated["updatedAt"].is_string());

    // The stored row reflects the update
    let fetched = server.get(&path).await?.json::<Value>().await?;
    assert_eq!(fetched, updated);

    Ok(())
}

#[tokio::test]
async fn updated_at_tracks_latest_update() -> Result<()> {
    let server = common::spawn_server().await?;

    let created = server.create(common::user("Cy", "Ng", "cy@x.com")).await?.json::<Value>().await?;
    let path = format!("/users/{}", created["id"]);

    let first = server.put(&path, common::user("Cy", "Ng", "cy@x.com")).await?.json::<Value>().await?;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = server.put(&path, common::user("Cyrus", "Ng", "cy@x.com")).await?.json::<Value>().await?;

    let t1 = chrono::DateTime::parse_from_rfc3339(first["updatedAt"].as_str().unwrap())?;
    let t2 = chrono::DateTime::parse_from_rfc3339(second["updatedAt"].as_str().unwrap())?;
    assert!(t2 > t1);
    assert_eq!(second["createdAt"], created["createdAt"]);

    // Same resolution a TIMESTAMPTZ column keeps
    assert_eq!(t2.timestamp_subsec_nanos() % 1_000, 0);

    Ok(())
}

#[tokio::test]
async fn delete_then_get_is_404() -> Result<()> {
    let server = common::spawn_server().await?;

    let created = server.create(common::user("Dee", "Oh", "dee@x.com")).await?.json::<Value>().await?;
    let path = format!("/users/{}", created["id"]);

    let res = server.delete(&path).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["message"], "User deleted successfully.");

    let res = server.get(&path).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server.delete(&path).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Email is free again once the owner is gone
    let res = server.create(common::user("Dee", "Oh", "dee@x.com")).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let recreated = res.json::<Value>().await?;
    assert_ne!(recreated["id"], created["id"]);

    Ok(())
}
