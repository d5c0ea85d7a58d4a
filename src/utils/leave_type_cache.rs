use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;

use crate::model::leave_type::LeaveType;

/// Leave types are seeded reference data and never change at runtime, so the
/// whole catalog is cached under a single key with a long TTL.
static LEAVE_TYPE_CACHE: Lazy<Cache<&'static str, Arc<Vec<LeaveType>>>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(1)
        .time_to_live(Duration::from_secs(3600))
        .build()
});

const ALL_KEY: &str = "all";

async fn load_all(pool: &MySqlPool) -> Result<Vec<LeaveType>, sqlx::Error> {
    let mut stream = sqlx::query_as::<_, LeaveType>(
        r#"
        SELECT id, name, description, max_days_per_year
        FROM leave_types
        ORDER BY id
        "#,
    )
    .fetch(pool);

    let mut types = Vec::new();
    while let Some(row) = stream.next().await {
        types.push(row?);
    }

    Ok(types)
}

pub async fn all(pool: &MySqlPool) -> Result<Arc<Vec<LeaveType>>, sqlx::Error> {
    if let Some(types) = LEAVE_TYPE_CACHE.get(ALL_KEY).await {
        return Ok(types);
    }

    let types = Arc::new(load_all(pool).await?);
    LEAVE_TYPE_CACHE.insert(ALL_KEY, types.clone()).await;
    Ok(types)
}

pub async fn find(pool: &MySqlPool, id: u64) -> Result<Option<LeaveType>, sqlx::Error> {
    Ok(all(pool).await?.iter().find(|t| t.id == id).cloned())
}

/// Populate the catalog cache at startup so the first request doesn't pay
/// the load.
pub async fn warmup_leave_type_cache(pool: &MySqlPool) -> Result<()> {
    let types = all(pool).await?;

    log::info!("Leave type cache warmup complete: {} types", types.len());

    Ok(())
}
