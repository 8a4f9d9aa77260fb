//! Invoices and the client book over HTTP.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{build_test_app, delete, get, post_json, put_json, register_client, register_freelancer};

#[sqlx::test(migrations = "../../db/migrations")]
async fn invoice_totals_are_computed_server_side(pool: PgPool) {
    let app = build_test_app(pool);
    let (fid, ftoken) = register_freelancer(&app, "in1").await;
    let (cid, ctoken) = register_client(&app, "in1").await;

    let (status, body) = post_json(
        &app,
        &format!("/api/v1/freelancers/{fid}/clients/{cid}/invoices"),
        Some(&ftoken),
        json!({
            "invoice_number": "INV-001",
            "items": [
                { "description": "Design", "quantity": 2, "price": 50 },
                { "description": "Hosting", "quantity": 1, "price": 30 }
            ],
            "taxRate": 10
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "invoice creation failed: {body}");
    assert_eq!(body["sub_total"], 130.0);
    assert_eq!(body["tax_amount"], 13.0);
    assert_eq!(body["grand_total"], 143.0);
    assert_eq!(body["items"][0]["total"], 100.0);
    assert_eq!(body["items"][1]["total"], 30.0);

    // Both parties see it in their listing.
    let (_, body) = get(
        &app,
        &format!("/api/v1/freelancers/{fid}/invoices"),
        Some(&ftoken),
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = get(&app, &format!("/api/v1/clients/{cid}/invoices"), Some(&ctoken)).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["invoice_number"], "INV-001");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invoice_requires_items_and_a_real_client(pool: PgPool) {
    let app = build_test_app(pool);
    let (fid, ftoken) = register_freelancer(&app, "in2").await;
    let (cid, _) = register_client(&app, "in2").await;

    let (status, body) = post_json(
        &app,
        &format!("/api/v1/freelancers/{fid}/clients/{cid}/invoices"),
        Some(&ftoken),
        json!({ "items": [], "taxRate": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION");

    let (status, _) = post_json(
        &app,
        &format!("/api/v1/freelancers/{fid}/clients/99999/invoices"),
        Some(&ftoken),
        json!({ "items": [{ "description": "X", "quantity": 1, "price": 1 }] }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_book_crud_and_restrict_delete(pool: PgPool) {
    let app = build_test_app(pool);
    let (fid, ftoken) = register_freelancer(&app, "bk1").await;

    let (status, body) = post_json(
        &app,
        &format!("/api/v1/freelancers/{fid}/clients"),
        Some(&ftoken),
        json!({
            "name": "Book Client",
            "email": "book@client.test",
            "mobile": "+15559000",
            "password": "correct-horse",
            "companyName": "Book Ltd"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "book creation failed: {body}");
    assert!(body.get("password_hash").is_none());
    let book_cid = body["id"].as_i64().unwrap();

    // The book lists the live row.
    let (_, body) = get(&app, &format!("/api/v1/freelancers/{fid}/clients"), Some(&ftoken)).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["company_name"], "Book Ltd");

    // Partial update with an empty bio is applied verbatim.
    let (status, body) = put_json(
        &app,
        &format!("/api/v1/freelancers/{fid}/clients/{book_cid}"),
        Some(&ftoken),
        json!({ "bio": "" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bio"], "");
    assert_eq!(body["name"], "Book Client");

    // An invoice pins the client in place.
    post_json(
        &app,
        &format!("/api/v1/freelancers/{fid}/clients/{book_cid}/invoices"),
        Some(&ftoken),
        json!({ "items": [{ "description": "Work", "quantity": 1, "price": 10 }] }),
    )
    .await;

    let (status, body) = delete(
        &app,
        &format!("/api/v1/freelancers/{fid}/clients/{book_cid}"),
        Some(&ftoken),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn directory_lists_all_clients_to_any_actor(pool: PgPool) {
    let app = build_test_app(pool);
    let (_fid, ftoken) = register_freelancer(&app, "dir1").await;
    register_client(&app, "dir1").await;
    register_client(&app, "dir2").await;

    let (status, body) = get(&app, "/api/v1/clients", Some(&ftoken)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    for client in body.as_array().unwrap() {
        assert!(client.get("password_hash").is_none());
    }

    let (status, _) = get(&app, "/api/v1/clients", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
