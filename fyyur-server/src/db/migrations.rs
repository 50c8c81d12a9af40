//! Schema bootstrap for the booking tables
//!
//! Idempotent `CREATE ... IF NOT EXISTS` statements run at startup.
//! Show foreign keys are `ON DELETE RESTRICT`: a venue or artist with
//! shows cannot be deleted.

use sqlx::PgPool;

/// Create tables and indexes if they are missing.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Bootstrapping booking schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
            name TEXT NOT NULL,
            city VARCHAR(120) NOT NULL,
            state VARCHAR(120),
            address VARCHAR(120),
            phone VARCHAR(120),
            image_link VARCHAR(500),
            facebook_link VARCHAR(120)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
            name TEXT NOT NULL,
            city VARCHAR(120),
            state VARCHAR(120),
            phone VARCHAR(120),
            genres VARCHAR(120),
            image_link VARCHAR(500),
            facebook_link VARCHAR(120)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shows (
            id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
            venue_id INTEGER NOT NULL REFERENCES venues(id) ON DELETE RESTRICT,
            artist_id INTEGER NOT NULL REFERENCES artists(id) ON DELETE RESTRICT,
            start_time TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Booking schema ready");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Area grouping
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_venues_area ON venues(state, city)")
        .execute(pool)
        .await?;

    // Show history lookups
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id, start_time)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id, start_time)")
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn bootstrap_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        run(&pool).await.expect("first run failed");
        run(&pool).await.expect("second run failed");
    }
}
