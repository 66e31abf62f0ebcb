//! Settings table access

use sqlx::SqlitePool;

use crate::{Error, Result};

/// Raw value of a setting, `None` when absent or NULL
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let value: Option<Option<String>> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(value.flatten())
}

/// Setting parsed into `T`, falling back to `default` when absent
pub async fn get_setting_or<T>(pool: &SqlitePool, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
{
    match get_setting(pool, key).await? {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| Error::Config(format!("Setting '{}' has invalid value '{}'", key, raw))),
        None => Ok(default),
    }
}

/// Insert or replace a setting
pub async fn set_setting(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO settings (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;
    Ok(())
}
