//! First-run seed data: site settings and the initial super_admin

use shared::models::Role;
use sqlx::SqlitePool;

use super::repository::{setting, user};
use crate::error::ServiceResult;
use crate::util::hash_password;

const DEFAULT_SETTINGS: &[(&str, &str, &str)] = &[
    ("site_name", "QR Menu System", "Website name"),
    ("site_description", "Digital menu ordering system", "Website description"),
    ("currency", "BDT", "Default currency"),
    ("currency_symbol", "৳", "Currency symbol"),
    ("tax_rate", "15", "Tax rate percentage"),
    ("service_charge", "10", "Service charge percentage"),
    ("qr_expiry_time", "24", "QR code expiry time in hours"),
    ("max_order_items", "50", "Maximum items per order"),
    ("enable_notifications", "1", "Enable order notifications"),
    ("maintenance_mode", "0", "Maintenance mode"),
];

/// Insert default settings and the admin account; safe to run on every start
pub async fn run(pool: &SqlitePool, admin_email: &str, admin_password: &str) -> ServiceResult<()> {
    for (key, value, description) in DEFAULT_SETTINGS {
        setting::insert_default(pool, key, value, description).await?;
    }

    let email = admin_email.trim().to_lowercase();
    if !user::email_exists(pool, &email).await? {
        let password_hash = hash_password(admin_password)?;
        let id = user::create(
            pool,
            &user::NewUser {
                email: &email,
                password_hash: &password_hash,
                name: "Super Admin",
                phone: None,
                role: Role::SuperAdmin,
                restaurant_id: None,
                branch_id: None,
            },
        )
        .await?;
        tracing::info!(user_id = id, email = %email, "Seeded initial super_admin account");
    }

    Ok(())
}
