//! Settings, modules, dashboard, public reads and delete restrictions

mod common;

use common::TestApp;
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_settings_are_seeded_and_super_only_to_change() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let rid = app.restaurant(&admin, "Alpha").await;
    let owner = app
        .staff(&admin, "owner@alpha.test", "restaurant_owner", rid, None)
        .await;

    let (status, body) = app.get("/api/admin/settings", Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["currency"], "BDT");
    assert_eq!(body["data"]["tax_rate"], "15");

    let (status, body) = app
        .put("/api/admin/settings", Some(&owner), json!({"tax_rate": 5}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);

    let (status, _) = app
        .put(
            "/api/admin/settings",
            Some(&admin),
            json!({"tax_rate": 5, "maintenance_mode": true}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app.get("/api/admin/settings", Some(&admin)).await;
    assert_eq!(body["data"]["tax_rate"], "5");
    assert_eq!(body["data"]["maintenance_mode"], "1");
}

#[tokio::test]
async fn test_module_management() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, body) = app.get("/api/modules", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    let modules = body["data"].as_array().unwrap();
    assert!(modules
        .iter()
        .any(|m| m["id"] == "loyalty" && m["enabled"] == false));

    let (status, body) = app
        .request(Method::POST, "/api/modules/nope/enable", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 9101);

    app.request(Method::POST, "/api/modules/loyalty/enable", Some(&admin), None)
        .await;
    let (_, body) = app.get("/api/modules/enabled", Some(&admin)).await;
    assert_eq!(body["data"], json!(["loyalty"]));

    app.request(Method::POST, "/api/modules/loyalty/disable", Some(&admin), None)
        .await;
    let (_, body) = app.get("/api/modules/enabled", Some(&admin)).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_modules_api_refuses_non_super() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let rid = app.restaurant(&admin, "Alpha").await;
    let owner = app
        .staff(&admin, "owner@alpha.test", "restaurant_owner", rid, None)
        .await;

    let (status, _) = app.get("/api/modules", Some(&owner)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_public_menu_nests_available_items() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let rid = app.restaurant(&admin, "Alpha").await;
    let bid = app.branch(&admin, rid, "Downtown").await;
    let mains = app.category(&admin, rid, "Mains").await;
    let drinks = app.category(&admin, rid, "Drinks").await;
    app.item(&admin, rid, mains, "Chicken Curry", 12.5).await;
    app.item(&admin, rid, drinks, "Lassi", 3.0).await;
    let hidden = app.item(&admin, rid, drinks, "Old Lassi", 2.0).await;
    app.put(
        &format!("/api/admin/menu/items/{hidden}"),
        Some(&admin),
        json!({"available": false}),
    )
    .await;

    let (status, body) = app
        .get(
            &format!("/api/public/menu?restaurant_id={rid}&branch_id={bid}"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["restaurant"]["name"], "Alpha");
    assert_eq!(body["data"]["branch"]["id"], bid);
    let sections = body["data"]["categories"].as_array().unwrap();
    assert_eq!(sections.len(), 2);
    let item_count: usize = sections
        .iter()
        .map(|s| s["items"].as_array().unwrap().len())
        .sum();
    assert_eq!(item_count, 2);

    let (status, body) = app
        .get(&format!("/api/public/search?restaurant_id={rid}&q=curry"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let hits = body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "Chicken Curry");

    let (status, body) = app.get("/api/public/branches", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Restaurant ID required");

    let (status, _) = app
        .get("/api/public/branches?restaurant_id=abc", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_is_restricted_while_dependents_exist() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let rid = app.restaurant(&admin, "Alpha").await;
    let cid = app.category(&admin, rid, "Mains").await;
    let item = app.item(&admin, rid, cid, "Soup", 4.0).await;

    let (status, body) = app
        .delete(&format!("/api/admin/menu/categories/{cid}"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6004);

    let (status, _) = app
        .delete(&format!("/api/admin/restaurants/{rid}"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .delete(&format!("/api/admin/menu/items/{item}"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .delete(&format!("/api/admin/menu/categories/{cid}"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .delete(&format!("/api/admin/restaurants/{rid}"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_dashboard_is_scoped() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let r1 = app.restaurant(&admin, "Alpha").await;
    let b1 = app.branch(&admin, r1, "Downtown").await;
    let c1 = app.category(&admin, r1, "Mains").await;
    let i1 = app.item(&admin, r1, c1, "Soup", 10.0).await;
    let r2 = app.restaurant(&admin, "Beta").await;
    let b2 = app.branch(&admin, r2, "Central").await;
    let c2 = app.category(&admin, r2, "Mains").await;
    let i2 = app.item(&admin, r2, c2, "Stew", 30.0).await;

    for (rid, bid, item) in [(r1, b1, i1), (r2, b2, i2)] {
        let (status, _) = app
            .post(
                "/api/public/orders",
                None,
                json!({"restaurant_id": rid, "branch_id": bid, "items": [{"menu_item_id": item}]}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let owner = app
        .staff(&admin, "owner@alpha.test", "restaurant_owner", r1, None)
        .await;
    let (status, body) = app.get("/api/admin/dashboard", Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["all_time"]["orders"], 1);
    assert_eq!(body["data"]["recent_orders"].as_array().unwrap().len(), 1);

    let (_, body) = app.get("/api/admin/dashboard", Some(&admin)).await;
    assert_eq!(body["data"]["all_time"]["orders"], 2);
}
