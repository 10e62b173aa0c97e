use sqlx::PgPool;

/// Executes database query objects (see [`crate::entities`]) against a pool.
#[derive(Clone)]
pub struct DatabaseProcessor {
    pub pool: PgPool,
}
