use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use crate::common::{DatabaseError, DatabaseResult};

/// Ping the database to verify the connection is alive.
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    db.ping()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}

/// Verify the database can execute queries, not just accept connections.
pub async fn check_health_with_query(db: &DatabaseConnection) -> DatabaseResult<()> {
    db.execute_raw(Statement::from_string(
        db.get_database_backend(),
        "SELECT 1".to_owned(),
    ))
    .await
    .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;

    Ok(())
}
