//! Permission Definitions (role catalog)
//!
//! Each role carries a fixed set of permission tokens. The table is static:
//! roles are not editable at runtime.

use shared::models::Role;

pub const ALL: &str = "all";
pub const MANAGE_RESTAURANT: &str = "manage_restaurant";
pub const MANAGE_BRANCHES: &str = "manage_branches";
pub const MANAGE_MENU: &str = "manage_menu";
pub const MANAGE_ORDERS: &str = "manage_orders";
pub const MANAGE_STAFF: &str = "manage_staff";
pub const VIEW_REPORTS: &str = "view_reports";
pub const VIEW_MENU: &str = "view_menu";
pub const VIEW_ORDERS: &str = "view_orders";

const SUPER_ADMIN: &[&str] = &[ALL];

const RESTAURANT_OWNER: &[&str] = &[
    MANAGE_RESTAURANT,
    MANAGE_BRANCHES,
    MANAGE_MENU,
    MANAGE_ORDERS,
    MANAGE_STAFF,
    VIEW_REPORTS,
];

const MANAGER: &[&str] = &[
    MANAGE_BRANCHES,
    MANAGE_MENU,
    MANAGE_ORDERS,
    MANAGE_STAFF,
    VIEW_REPORTS,
];

const BRANCH_MANAGER: &[&str] = &[MANAGE_MENU, MANAGE_ORDERS, MANAGE_STAFF, VIEW_REPORTS];

const CHEF: &[&str] = &[VIEW_MENU, MANAGE_ORDERS, VIEW_REPORTS];

const WAITER: &[&str] = &[VIEW_MENU, MANAGE_ORDERS];

const RESTAURANT_STAFF: &[&str] = &[VIEW_MENU, VIEW_ORDERS];

/// Permission tokens granted to `role`
pub fn permissions_for(role: Role) -> &'static [&'static str] {
    match role {
        Role::SuperAdmin => SUPER_ADMIN,
        Role::RestaurantOwner => RESTAURANT_OWNER,
        Role::Manager => MANAGER,
        Role::BranchManager => BRANCH_MANAGER,
        Role::Chef => CHEF,
        Role::Waiter => WAITER,
        Role::RestaurantStaff => RESTAURANT_STAFF,
    }
}

/// The role exempt from tenant scoping
pub fn is_super_role(role: Role) -> bool {
    role.is_super()
}
