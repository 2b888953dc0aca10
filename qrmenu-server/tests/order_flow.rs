//! Order placement end to end: staff and public paths, atomicity, price
//! snapshots and the order modules

mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::json;

struct Menu {
    restaurant: i64,
    branch: i64,
    soup: i64,
    steak: i64,
    sold_out: i64,
}

async fn menu(app: &TestApp, admin: &str) -> Menu {
    let restaurant = app.restaurant(admin, "Alpha").await;
    let branch = app.branch(admin, restaurant, "Downtown").await;
    let category = app.category(admin, restaurant, "Mains").await;
    let soup = app.item(admin, restaurant, category, "Soup", 50.00).await;
    let steak = app.item(admin, restaurant, category, "Steak", 100.00).await;
    let sold_out = app.item(admin, restaurant, category, "Truffle", 80.00).await;
    let (status, _) = app
        .put(
            &format!("/api/admin/menu/items/{sold_out}"),
            Some(admin),
            json!({"available": false}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    Menu {
        restaurant,
        branch,
        soup,
        steak,
        sold_out,
    }
}

#[tokio::test]
async fn test_waiter_order_totals_and_snapshots_prices() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let m = menu(&app, &admin).await;
    let waiter = app
        .staff(&admin, "waiter@alpha.test", "waiter", m.restaurant, Some(m.branch))
        .await;

    let (status, body) = app
        .post(
            "/api/admin/orders",
            Some(&waiter),
            json!({
                "table_number": "7",
                "items": [
                    {"menu_item_id": m.soup, "quantity": 2},
                    {"menu_item_id": m.steak, "quantity": 1}
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["total_amount"], 200.0);
    let order_id = body["data"]["order_id"].as_i64().unwrap();

    // a later price change does not touch the stored lines
    let (status, _) = app
        .put(
            &format!("/api/admin/menu/items/{}", m.soup),
            Some(&admin),
            json!({"price": 65.0}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .get(&format!("/api/admin/orders/{order_id}"), Some(&waiter))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_amount"], 200.0);
    assert_eq!(body["data"]["branch_id"], m.branch);
    let lines = body["data"]["items"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    let soup_line = lines.iter().find(|l| l["menu_item_id"] == m.soup).unwrap();
    assert_eq!(soup_line["unit_price"], 50.0);
    assert_eq!(soup_line["total_price"], 100.0);
    assert_eq!(soup_line["quantity"], 2);
}

#[tokio::test]
async fn test_empty_order_writes_nothing() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let m = menu(&app, &admin).await;

    let (status, body) = app
        .post(
            "/api/public/orders",
            None,
            json!({"restaurant_id": m.restaurant, "branch_id": m.branch, "items": []}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);
    assert_eq!(app.count("orders").await, 0);
    assert_eq!(app.count("order_items").await, 0);
}

#[tokio::test]
async fn test_unavailable_line_rolls_back_whole_order() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let m = menu(&app, &admin).await;

    let (status, body) = app
        .post(
            "/api/public/orders",
            None,
            json!({
                "restaurant_id": m.restaurant,
                "branch_id": m.branch,
                "items": [
                    {"menu_item_id": m.soup, "quantity": 1},
                    {"menu_item_id": m.sold_out, "quantity": 1}
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4003);
    assert_eq!(app.count("orders").await, 0);
    assert_eq!(app.count("order_items").await, 0);
}

#[tokio::test]
async fn test_public_order_ignores_client_price_and_clamps_quantity() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let m = menu(&app, &admin).await;

    let (status, body) = app
        .post(
            "/api/public/orders",
            None,
            json!({
                "restaurant_id": m.restaurant,
                "branch_id": m.branch,
                "items": [
                    {"menu_item_id": m.steak, "quantity": 0, "price": 0.01},
                    {"menu_item_id": m.soup, "quantity": -3}
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["total_amount"], 150.0);

    let order_id = body["data"]["order_id"].as_i64().unwrap();
    let (status, body) = app
        .get(&format!("/api/public/orders/{order_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["restaurant_name"], "Alpha");
    assert_eq!(body["data"]["branch_name"], "Downtown");
    let lines = body["data"]["items"].as_array().unwrap();
    assert!(lines.iter().all(|l| l["quantity"] == 1));
}

#[tokio::test]
async fn test_public_order_branch_must_belong_to_restaurant() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let m = menu(&app, &admin).await;
    let other = app.restaurant(&admin, "Beta").await;
    let other_branch = app.branch(&admin, other, "Beta Central").await;

    let (status, body) = app
        .post(
            "/api/public/orders",
            None,
            json!({
                "restaurant_id": m.restaurant,
                "branch_id": other_branch,
                "items": [{"menu_item_id": m.soup}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3002);
    assert_eq!(app.count("orders").await, 0);
}

#[tokio::test]
async fn test_order_status_updates_are_validated() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let m = menu(&app, &admin).await;
    let (_, body) = app
        .post(
            "/api/public/orders",
            None,
            json!({
                "restaurant_id": m.restaurant,
                "branch_id": m.branch,
                "items": [{"menu_item_id": m.soup}]
            }),
        )
        .await;
    let uri = format!("/api/admin/orders/{}", body["data"]["order_id"]);

    let (status, body) = app.put(&uri, Some(&admin), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No data provided for update");

    let (status, body) = app
        .put(&uri, Some(&admin), json!({"status": "teleported"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4004);

    let (status, _) = app
        .put(
            &uri,
            Some(&admin),
            json!({"status": "served", "payment_status": "paid"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get(&uri, Some(&admin)).await;
    assert_eq!(body["data"]["status"], "served");
    assert_eq!(body["data"]["payment_status"], "paid");

    let (status, _) = app.delete(&uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.count("order_items").await, 0);
}

#[tokio::test]
async fn test_loyalty_module_credits_points_when_enabled() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let m = menu(&app, &admin).await;

    let order = json!({
        "restaurant_id": m.restaurant,
        "branch_id": m.branch,
        "customer_email": "Guest@Example.com",
        "items": [{"menu_item_id": m.steak, "quantity": 2}]
    });

    // disabled: nothing credited
    let (status, _) = app.post("/api/public/orders", None, order.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.count("loyalty_accounts").await, 0);

    let (status, _) = app
        .request(
            http::Method::POST,
            "/api/modules/loyalty/enable",
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.post("/api/public/orders", None, order).await;
    assert_eq!(status, StatusCode::OK);

    let points: i64 = sqlx::query_scalar(
        "SELECT points_balance FROM loyalty_accounts WHERE email = 'guest@example.com'",
    )
    .fetch_one(&app.state.pool)
    .await
    .unwrap();
    assert_eq!(points, 200);
}

#[tokio::test]
async fn test_analytics_module_feeds_daily_report() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let m = menu(&app, &admin).await;
    let chef = app
        .staff(&admin, "chef@alpha.test", "chef", m.restaurant, Some(m.branch))
        .await;

    let order = json!({
        "restaurant_id": m.restaurant,
        "branch_id": m.branch,
        "customer_name": "Ana",
        "items": [
            {"menu_item_id": m.steak, "quantity": 2},
            {"menu_item_id": m.soup, "quantity": 1}
        ]
    });

    // disabled: nothing recorded
    let (status, _) = app.post("/api/public/orders", None, order.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.count("analytics_orders").await, 0);

    let (status, _) = app
        .request(
            http::Method::POST,
            "/api/modules/analytics/enable",
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.post("/api/public/orders", None, order).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.count("analytics_orders").await, 1);

    let created_at: i64 = sqlx::query_scalar("SELECT created_at FROM analytics_orders")
        .fetch_one(&app.state.pool)
        .await
        .unwrap();
    let uri = format!(
        "/api/admin/analytics/daily?date={}",
        shared::util::format_day(created_at)
    );
    let (status, body) = app.get(&uri, Some(&chef)).await;
    assert_eq!(status, StatusCode::OK);
    let report = &body["data"];
    assert_eq!(report["sales"]["total_orders"], 1);
    assert_eq!(report["sales"]["total_revenue"], 250.0);
    assert_eq!(report["popular_items"].as_array().unwrap().len(), 2);
    assert_eq!(report["hourly_sales"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .get("/api/admin/analytics/daily?date=yesterday", Some(&chef))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}
