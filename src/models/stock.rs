use serde::Serialize;
use sqlx::FromRow;

// Reference data for a listed stock. Rows are maintained outside this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Stock {
    pub id: i64,
    pub ticker: String,
    pub name: String,
}
