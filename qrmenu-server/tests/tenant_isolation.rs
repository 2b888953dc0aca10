//! Tenant scoping through the HTTP API

mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::json;

struct Tenants {
    r1: i64,
    r2: i64,
    b1: i64,
    b1b: i64,
    b2: i64,
}

async fn two_tenants(app: &TestApp, admin: &str) -> Tenants {
    let r1 = app.restaurant(admin, "Alpha").await;
    let r2 = app.restaurant(admin, "Beta").await;
    Tenants {
        r1,
        r2,
        b1: app.branch(admin, r1, "Alpha Downtown").await,
        b1b: app.branch(admin, r1, "Alpha Uptown").await,
        b2: app.branch(admin, r2, "Beta Central").await,
    }
}

#[tokio::test]
async fn test_owner_lists_only_own_restaurant_rows() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let t = two_tenants(&app, &admin).await;
    let owner = app
        .staff(&admin, "owner@alpha.test", "restaurant_owner", t.r1, None)
        .await;

    let (status, body) = app.get("/api/admin/restaurants", Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], t.r1);

    // asking for the other tenant does not widen scope
    let uri = format!("/api/admin/branches?restaurant_id={}", t.r2);
    let (status, body) = app.get(&uri, Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|b| b["restaurant_id"] == t.r1));
}

#[tokio::test]
async fn test_super_admin_sees_every_tenant() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    two_tenants(&app, &admin).await;

    let (_, body) = app.get("/api/admin/branches", Some(&admin)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_foreign_branch_reads_as_not_found() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let t = two_tenants(&app, &admin).await;
    let manager = app
        .staff(&admin, "manager@alpha.test", "manager", t.r1, None)
        .await;

    let (status, body) = app
        .get(&format!("/api/admin/branches/{}", t.b2), Some(&manager))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 3002);

    let (status, _) = app
        .get(&format!("/api/admin/branches/{}", t.b1), Some(&manager))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_payload_naming_another_tenant_is_forbidden() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let t = two_tenants(&app, &admin).await;
    let owner = app
        .staff(&admin, "owner@alpha.test", "restaurant_owner", t.r1, None)
        .await;

    let before = app.count("branches").await;
    let (status, body) = app
        .post(
            "/api/admin/branches",
            Some(&owner),
            json!({
                "restaurant_id": t.r2,
                "name": "Sneaky",
                "address": "x",
                "phone": "y"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 3003);
    assert_eq!(app.count("branches").await, before);

    let (status, _) = app
        .post(
            "/api/admin/menu/categories",
            Some(&owner),
            json!({"restaurant_id": t.r2, "name": "Mains"}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // updates that name another tenant change nothing
    let (status, body) = app
        .put(
            &format!("/api/admin/branches/{}", t.b1),
            Some(&owner),
            json!({"restaurant_id": t.r2, "name": "Renamed"}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 3003);
    let (_, body) = app
        .get(&format!("/api/admin/branches/{}", t.b1), Some(&owner))
        .await;
    assert_eq!(body["data"]["name"], "Alpha Downtown");

    let cid = app.category(&admin, t.r1, "Mains").await;
    let (status, body) = app
        .put(
            &format!("/api/admin/menu/categories/{cid}"),
            Some(&owner),
            json!({"restaurant_id": t.r2, "name": "Moved"}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 3003);

    let (_, body) = app
        .get("/api/admin/users?role=restaurant_owner", Some(&owner))
        .await;
    let owner_id = body["data"][0]["id"].as_i64().unwrap();
    let (status, _) = app
        .put(
            &format!("/api/admin/users/{owner_id}"),
            Some(&owner),
            json!({"restaurant_id": t.r2}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // repeating the own tenant is accepted
    let (status, _) = app
        .put(
            &format!("/api/admin/branches/{}", t.b1),
            Some(&owner),
            json!({"restaurant_id": t.r1, "name": "Alpha Central"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_branch_pinned_user_sees_only_their_branch() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let t = two_tenants(&app, &admin).await;
    let bm = app
        .staff(&admin, "bm@alpha.test", "branch_manager", t.r1, Some(t.b1))
        .await;

    let (_, body) = app.get("/api/admin/branches", Some(&bm)).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], t.b1);

    let (status, _) = app
        .get(&format!("/api/admin/branches/{}", t.b1b), Some(&bm))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_restaurant_staff_cannot_create_menu_items() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let t = two_tenants(&app, &admin).await;
    let staff = app
        .staff(&admin, "staff@alpha.test", "restaurant_staff", t.r1, None)
        .await;

    let (status, body) = app
        .post(
            "/api/admin/menu/categories",
            Some(&staff),
            json!({"name": "Desserts"}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2001);

    // reads are allowed with view_menu
    let (status, _) = app.get("/api/admin/menu/categories", Some(&staff)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_non_super_cannot_create_restaurant() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let t = two_tenants(&app, &admin).await;
    let owner = app
        .staff(&admin, "owner@alpha.test", "restaurant_owner", t.r1, None)
        .await;

    let (status, _) = app
        .post(
            "/api/admin/restaurants",
            Some(&owner),
            json!({"name": "Gamma", "address": "a", "phone": "p"}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_owner_cannot_grant_super_admin() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let t = two_tenants(&app, &admin).await;
    let owner = app
        .staff(&admin, "owner@alpha.test", "restaurant_owner", t.r1, None)
        .await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            Some(&owner),
            json!({
                "name": "Boss",
                "email": "boss@alpha.test",
                "password": "secret123",
                "role": "super_admin"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);

    let (status, _) = app
        .post(
            "/api/auth/register",
            Some(&owner),
            json!({
                "name": "Cook",
                "email": "cook@alpha.test",
                "password": "secret123",
                "role": "chef"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}
