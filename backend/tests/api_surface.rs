//! End-to-end coverage of the HTTP surface: production routes, session
//! middleware, and domain services over in-memory stores.

mod support;

use actix_web::http::{StatusCode, header};
use actix_web::test;

use backend::domain::NOT_AUTHORIZED_MESSAGE;
use support::{ADMIN_EMAIL, allow_email, login_as, spawn_app};

#[actix_web::test]
async fn admin_manages_the_allow_list() {
    let app = spawn_app().await;
    let admin = login_as(&app, ADMIN_EMAIL).await;

    allow_email(&app, &admin, "ada@example.com").await;

    // Re-adding is a no-op; the entry appears exactly once.
    allow_email(&app, &admin, "ada@example.com").await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/users")
            .cookie(admin.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let value: serde_json::Value = test::read_body_json(res).await;
    let users = value["users"].as_array().expect("users array");
    let matches = users
        .iter()
        .filter(|user| user["email"] == "ada@example.com")
        .count();
    assert_eq!(matches, 1);

    // Deleting an absent email succeeds; deleting the admin's does not.
    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/users/ghost@example.com")
            .cookie(admin.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/users/{ADMIN_EMAIL}"))
            .cookie(admin)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let value: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(value["error"], "Cannot delete admin email");
}

#[actix_web::test]
async fn unlisted_identity_cannot_log_in_until_allowed() {
    let app = spawn_app().await;

    // Before allow-listing: verified but rejected, no session established.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(serde_json::json!({ "credential": "token-for:ada@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert!(
        !res.response()
            .cookies()
            .any(|cookie| cookie.name() == "session")
    );
    let value: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(value["error"], NOT_AUTHORIZED_MESSAGE);

    // After allow-listing the same identity logs in.
    let admin = login_as(&app, ADMIN_EMAIL).await;
    allow_email(&app, &admin, "ada@example.com").await;
    login_as(&app, "ada@example.com").await;
}

#[actix_web::test]
async fn malformed_credentials_are_unauthorised() {
    let app = spawn_app().await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(serde_json::json!({ "credential": "not-a-real-token" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let value: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(value["error"], "Invalid token");
}

#[actix_web::test]
async fn member_sessions_cannot_reach_the_admin_api() {
    let app = spawn_app().await;
    let admin = login_as(&app, ADMIN_EMAIL).await;
    allow_email(&app, &admin, "ada@example.com").await;
    let member = login_as(&app, "ada@example.com").await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/users")
            .cookie(member)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let value: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(value["error"], "Admin access required");
}

#[actix_web::test]
async fn history_crud_round_trip() {
    let app = spawn_app().await;
    let admin = login_as(&app, ADMIN_EMAIL).await;
    allow_email(&app, &admin, "ada@example.com").await;
    let member = login_as(&app, "ada@example.com").await;

    // Create a record dated 2024-01-10, three weeks before the fixed now.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/history")
            .cookie(member.clone())
            .set_json(serde_json::json!({
                "name": "Trip",
                "description": "Paris",
                "date": "2024-01-10T00:00:00Z"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let created: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(created["success"], true);
    assert_eq!(created["item"]["createdAt"], 1_704_844_800_000_i64);
    assert_eq!(created["item"]["userId"], "ada@example.com");
    let id = created["item"]["id"].as_str().expect("record id").to_owned();

    // The default window (now - 14d) excludes it.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/history")
            .cookie(member.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let value: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(value["items"], serde_json::json!([]));

    // An explicit range containing the creation time returns it.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/history?startDate=2024-01-01T00:00:00Z&endDate=2024-01-31T00:00:00Z")
            .cookie(member.clone())
            .to_request(),
    )
    .await;
    let value: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(value["items"][0]["name"], "Trip");

    // A name search without any date filter also finds it.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/search?name=Trip")
            .cookie(member.clone())
            .to_request(),
    )
    .await;
    let value: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(value["items"][0]["name"], "Trip");

    // Update overwrites name and description only.
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/history/{id}"))
            .cookie(member.clone())
            .set_json(serde_json::json!({
                "createdAt": 1_704_844_800_000_i64,
                "name": "Trip (edited)",
                "description": "Paris in winter"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let value: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(value["item"]["name"], "Trip (edited)");
    assert_eq!(value["item"]["description"], "Paris in winter");
    assert_eq!(value["item"]["createdAt"], 1_704_844_800_000_i64);
    assert_eq!(value["item"]["userId"], "ada@example.com");

    // Delete twice: both succeed, the record is gone.
    for _ in 0..2 {
        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/api/history/{id}?createdAt=1704844800000"))
                .cookie(member.clone())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/search?name=Trip")
            .cookie(member)
            .to_request(),
    )
    .await;
    let value: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(value["items"], serde_json::json!([]));
}

#[actix_web::test]
async fn records_are_scoped_to_their_owner() {
    let app = spawn_app().await;
    let admin = login_as(&app, ADMIN_EMAIL).await;
    allow_email(&app, &admin, "ada@example.com").await;
    let member = login_as(&app, "ada@example.com").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/history")
            .cookie(member.clone())
            .set_json(serde_json::json!({ "name": "private", "date": "2024-01-25T00:00:00Z" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let created: serde_json::Value = test::read_body_json(res).await;
    let id = created["item"]["id"].as_str().expect("record id").to_owned();
    let created_at = created["item"]["createdAt"].as_i64().expect("createdAt");

    // Another session cannot see the record through list or search.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/search?name=private")
            .cookie(admin.clone())
            .to_request(),
    )
    .await;
    let value: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(value["items"], serde_json::json!([]));

    // Nor update it: the composite key alone does not cross accounts.
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/history/{id}"))
            .cookie(admin)
            .set_json(serde_json::json!({ "createdAt": created_at, "name": "stolen" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The owner still sees it untouched.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/search?name=private")
            .cookie(member)
            .to_request(),
    )
    .await;
    let value: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(value["items"][0]["name"], "private");
}

#[actix_web::test]
async fn search_combines_criteria_under_both_modes() {
    let app = spawn_app().await;
    let admin = login_as(&app, ADMIN_EMAIL).await;
    allow_email(&app, &admin, "ada@example.com").await;
    let member = login_as(&app, "ada@example.com").await;

    for (name, description, date) in [
        ("Trip", "Paris", "2024-01-10T00:00:00Z"),
        ("groceries", "weekly shop", "2024-01-20T00:00:00Z"),
    ] {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/history")
                .cookie(member.clone())
                .set_json(serde_json::json!({
                    "name": name,
                    "description": description,
                    "date": date
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    // Contradictory criteria: name matches one record, range the other.
    let contradictory =
        "/api/search?name=Trip&startDate=2024-01-15T00:00:00Z&endDate=2024-01-31T00:00:00Z";
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(contradictory)
            .cookie(member.clone())
            .to_request(),
    )
    .await;
    let value: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(value["items"], serde_json::json!([]));

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("{contradictory}&matchMode=any"))
            .cookie(member.clone())
            .to_request(),
    )
    .await;
    let value: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(value["items"].as_array().expect("items").len(), 2);

    // Case sensitivity: "trip" misses when sensitive, hits when not.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/search?name=trip&caseSensitive=true")
            .cookie(member.clone())
            .to_request(),
    )
    .await;
    let value: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(value["items"], serde_json::json!([]));

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/search?name=trip&caseSensitive=false")
            .cookie(member.clone())
            .to_request(),
    )
    .await;
    let value: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(value["items"][0]["name"], "Trip");

    // Zero criteria: everything, newest first.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/search")
            .cookie(member)
            .to_request(),
    )
    .await;
    let value: serde_json::Value = test::read_body_json(res).await;
    let items = value["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "groceries");
    assert_eq!(items[1]["name"], "Trip");
}

#[actix_web::test]
async fn logout_ends_the_session() {
    let app = spawn_app().await;
    let admin = login_as(&app, ADMIN_EMAIL).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/logout")
            .cookie(admin.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/login")
    );

    // The purge response carries a removal cookie; a client that honours
    // it is anonymous again.
    let removal = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("removal cookie");
    assert_eq!(removal.value(), "");

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/history").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
}

#[actix_web::test]
async fn index_routes_by_session_presence() {
    let app = spawn_app().await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/login")
    );

    let admin = login_as(&app, ADMIN_EMAIL).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(admin).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/data")
    );
}
