//! Menu Models (categories and items)

use super::Status;
use serde::{Deserialize, Serialize};

/// Menu category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuCategory {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub display_order: i64,
    pub status: Status,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuCategoryCreate {
    pub restaurant_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub display_order: Option<i64>,
    pub status: Option<Status>,
}

/// Update category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuCategoryUpdate {
    /// Must match the current owner when given
    pub restaurant_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub display_order: Option<i64>,
    pub status: Option<Status>,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub restaurant_id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub ingredients: Option<String>,
    pub allergens: Option<String>,
    pub spicy_level: i64,
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub available: bool,
    pub featured: bool,
    pub display_order: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub restaurant_id: Option<i64>,
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub ingredients: Option<String>,
    pub allergens: Option<String>,
    pub spicy_level: Option<i64>,
    pub vegetarian: Option<bool>,
    pub vegan: Option<bool>,
    pub gluten_free: Option<bool>,
    pub available: Option<bool>,
    pub featured: Option<bool>,
    pub display_order: Option<i64>,
}

/// Update item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    /// Must match the current owner when given
    pub restaurant_id: Option<i64>,
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub ingredients: Option<String>,
    pub allergens: Option<String>,
    pub spicy_level: Option<i64>,
    pub vegetarian: Option<bool>,
    pub vegan: Option<bool>,
    pub gluten_free: Option<bool>,
    pub available: Option<bool>,
    pub featured: Option<bool>,
    pub display_order: Option<i64>,
}

/// Category with its available items, as served to customers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSection {
    #[serde(flatten)]
    pub category: MenuCategory,
    pub items: Vec<MenuItem>,
}
