//! Fixtures for unit tests

use std::sync::Arc;

use shared::models::{BranchCreate, MenuCategoryCreate, MenuItemCreate, RestaurantCreate, Role};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::auth::permissions::permissions_for;
use crate::db::DbService;
use crate::db::repository::{branch, menu, restaurant};
use crate::modules::ModuleRegistry;

pub async fn pool() -> SqlitePool {
    DbService::in_memory().await.unwrap().pool
}

pub async fn restaurant(pool: &SqlitePool, name: &str) -> i64 {
    restaurant::create(
        pool,
        &RestaurantCreate {
            name: Some(name.into()),
            address: Some("1 Main St".into()),
            phone: Some("555-0100".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

pub async fn branch(pool: &SqlitePool, restaurant_id: i64, name: &str) -> i64 {
    branch::create(
        pool,
        restaurant_id,
        &BranchCreate {
            name: Some(name.into()),
            address: Some("2 Side St".into()),
            phone: Some("555-0101".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

pub async fn category(pool: &SqlitePool, restaurant_id: i64, name: &str) -> i64 {
    menu::create_category(
        pool,
        restaurant_id,
        &MenuCategoryCreate {
            name: Some(name.into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

pub async fn item(
    pool: &SqlitePool,
    restaurant_id: i64,
    category_id: i64,
    name: &str,
    price: f64,
    available: bool,
) -> i64 {
    menu::create_item(
        pool,
        restaurant_id,
        category_id,
        price,
        &MenuItemCreate {
            name: Some(name.into()),
            available: Some(available),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

pub fn user(role: Role, restaurant_id: Option<i64>, branch_id: Option<i64>) -> CurrentUser {
    CurrentUser {
        id: 9_000,
        email: format!("{role}@example.com"),
        name: role.to_string(),
        role,
        restaurant_id,
        branch_id,
        permissions: permissions_for(role).iter().map(|p| p.to_string()).collect(),
    }
}

/// Registry with no modules, backed by a file that does not exist
pub fn no_modules() -> Arc<ModuleRegistry> {
    let file = std::env::temp_dir().join(format!(
        "qrmenu_no_modules_{}.json",
        uuid::Uuid::new_v4().simple()
    ));
    Arc::new(ModuleRegistry::load(file, Vec::new()).unwrap())
}
