mod common;

use axum::http::StatusCode;
use common::{create_post, register, register_and_login, send, setup_test_app_with_store};
use postboard_db::Store;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_register_twice_on_postgres(pool: PgPool) {
    let app = setup_test_app_with_store(Store::postgres(pool));
    register(&app, "a@b.com", "123123", "A").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": "a@b.com", "password": "123123", "name": "A" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "User exist");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_post_lifecycle_on_postgres(pool: PgPool) {
    let app = setup_test_app_with_store(Store::postgres(pool.clone()));
    let (token, user_id) = register_and_login(&app).await;

    let keep = create_post(&app, &token, "Keep this", "Good item").await;
    let removed = create_post(&app, &token, "Drop this", "Good item").await;
    assert_eq!(removed["creator"]["posts"], json!([keep["_id"], removed["_id"]]));

    let (status, list) = send(&app, "GET", "/api/posts", Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = list["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Keep this", "Drop this"]);
    assert_eq!(list["posts"][0]["creator"]["_id"], user_id.as_str());

    let uri = format!("/api/posts/{}", removed["_id"].as_str().unwrap());
    let (status, body) = send(&app, "DELETE", &uri, Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));

    let (_, list) = send(&app, "GET", "/api/posts", Some(token.as_str()), None).await;
    assert_eq!(list["posts"].as_array().unwrap().len(), 1);
    assert_eq!(list["posts"][0]["creator"]["posts"], json!([keep["_id"]]));

    let owner_posts: Vec<uuid::Uuid> =
        sqlx::query_scalar("SELECT posts FROM users WHERE id = $1::uuid")
            .bind(&user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(owner_posts.len(), 1);
    assert_eq!(owner_posts[0].to_string(), keep["_id"].as_str().unwrap());
}
