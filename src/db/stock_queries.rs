use sqlx::PgPool;
use crate::models::Stock;

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Stock>, sqlx::Error> {
    sqlx::query_as::<_, Stock>(
        "SELECT id::BIGINT AS id, ticker, name
         FROM stocks
         ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

/// Exact, case-sensitive ticker match.
pub async fn fetch_id_by_ticker(
    pool: &PgPool,
    ticker: &str,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT id::BIGINT FROM stocks WHERE ticker = $1")
        .bind(ticker)
        .fetch_optional(pool)
        .await
}
