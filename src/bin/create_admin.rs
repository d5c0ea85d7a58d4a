//! Provisions the portal's admin account: inserts the profile if the email
//! is unknown, promotes it to admin if it already exists. Run once against
//! the target database; credentials come from the environment.

use anyhow::{Context, Result, anyhow};
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use dotenvy::dotenv;
use sqlx::MySqlPool;
use std::env;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let email = env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@vitc.ac.in".to_string());
    let password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string());
    let full_name = env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin".to_string());

    println!("Creating admin account...");

    let pool = MySqlPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {e}"))?
        .to_string();

    sqlx::query(
        r#"
        INSERT INTO profiles (full_name, email, password, role_id)
        VALUES (?, ?, ?, 1)
        ON DUPLICATE KEY UPDATE role_id = 1
        "#,
    )
    .bind(&full_name)
    .bind(&email)
    .bind(&hashed)
    .execute(&pool)
    .await
    .context("Failed to create admin profile")?;

    println!("✓ Admin account ready");
    println!("Email: {email}");
    println!("Change the password after first login.");

    Ok(())
}
