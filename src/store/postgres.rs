//! PostgreSQL store. Each root is one row whose `document` column holds the
//! whole JSONB document; `version` is bumped on every write.

use super::{DocumentStore, RenameOutcome, Stored};
use crate::error::AppError;
use crate::model::{Plant, UserDocument};
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    /// `schema` must already be a validated identifier (see `Config`).
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgStore {
            pool,
            schema: schema.into(),
        }
    }

    fn table(&self, name: &str) -> String {
        format!("{}.{}", self.schema, name)
    }

    /// Create the schema and tables if they do not exist.
    pub async fn ensure_tables(&self) -> Result<(), AppError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", self.schema))
            .execute(&self.pool)
            .await?;

        let users_ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                username TEXT PRIMARY KEY,
                document JSONB NOT NULL,
                version BIGINT NOT NULL DEFAULT 1,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.table("users")
        );
        sqlx::query(&users_ddl).execute(&self.pool).await?;

        let catalog_ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                name TEXT PRIMARY KEY,
                document JSONB NOT NULL,
                version BIGINT NOT NULL DEFAULT 1,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.table("catalog_plants")
        );
        sqlx::query(&catalog_ddl).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn find_user(&self, username: &str) -> Result<Option<Stored<UserDocument>>, AppError> {
        let sql = format!("SELECT document, version FROM {} WHERE username = $1", self.table("users"));
        tracing::debug!(sql = %sql, username, "query");
        let row: Option<(Json<UserDocument>, i64)> = sqlx::query_as(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(Json(doc), version)| Stored { doc, version }))
    }

    async fn insert_user(&self, doc: &UserDocument) -> Result<bool, AppError> {
        let sql = format!(
            "INSERT INTO {} (username, document) VALUES ($1, $2) ON CONFLICT (username) DO NOTHING",
            self.table("users")
        );
        tracing::debug!(sql = %sql, username = %doc.username, "query");
        let result = sqlx::query(&sql)
            .bind(&doc.username)
            .bind(Json(doc))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn replace_user(&self, doc: &UserDocument, expected_version: i64) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE {} SET document = $2, version = version + 1, updated_at = NOW() WHERE username = $1 AND version = $3",
            self.table("users")
        );
        tracing::debug!(sql = %sql, username = %doc.username, expected_version, "query");
        let result = sqlx::query(&sql)
            .bind(&doc.username)
            .bind(Json(doc))
            .bind(expected_version)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn rename_user(&self, from: &str, to: &str) -> Result<RenameOutcome, AppError> {
        let sql = format!(
            r#"
            UPDATE {} SET
                username = $2,
                document = jsonb_set(document, '{{username}}', to_jsonb($2::text)),
                version = version + 1,
                updated_at = NOW()
            WHERE username = $1
            "#,
            self.table("users")
        );
        tracing::debug!(sql = %sql, from, to, "query");
        match sqlx::query(&sql).bind(from).bind(to).execute(&self.pool).await {
            Ok(result) if result.rows_affected() == 0 => Ok(RenameOutcome::NotFound),
            Ok(_) => Ok(RenameOutcome::Renamed),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(RenameOutcome::Taken),
            Err(e) => Err(AppError::Db(e)),
        }
    }

    async fn delete_user(&self, username: &str) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE username = $1", self.table("users"));
        tracing::debug!(sql = %sql, username, "query");
        let result = sqlx::query(&sql).bind(username).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_catalog(&self) -> Result<Vec<Plant>, AppError> {
        let sql = format!(
            "SELECT document FROM {} ORDER BY created_at, name",
            self.table("catalog_plants")
        );
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<(Json<Plant>,)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(Json(plant),)| plant).collect())
    }

    async fn find_catalog_plant(&self, name: &str) -> Result<Option<Stored<Plant>>, AppError> {
        let sql = format!(
            "SELECT document, version FROM {} WHERE name = $1",
            self.table("catalog_plants")
        );
        tracing::debug!(sql = %sql, name, "query");
        let row: Option<(Json<Plant>, i64)> = sqlx::query_as(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(Json(doc), version)| Stored { doc, version }))
    }

    async fn insert_catalog_plant(&self, plant: &Plant) -> Result<bool, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, document) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING",
            self.table("catalog_plants")
        );
        tracing::debug!(sql = %sql, name = %plant.name, "query");
        let result = sqlx::query(&sql)
            .bind(&plant.name)
            .bind(Json(plant))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn replace_catalog_plant(&self, plant: &Plant, expected_version: i64) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE {} SET document = $2, version = version + 1, updated_at = NOW() WHERE name = $1 AND version = $3",
            self.table("catalog_plants")
        );
        tracing::debug!(sql = %sql, name = %plant.name, expected_version, "query");
        let result = sqlx::query(&sql)
            .bind(&plant.name)
            .bind(Json(plant))
            .bind(expected_version)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_name_is_split_from_url() {
        let (admin, db) = parse_db_name_from_url("postgres://u:p@localhost:5432/plants?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(db, "plants");
    }

    #[test]
    fn url_without_path_is_rejected() {
        assert!(parse_db_name_from_url("postgres:localhost").is_err());
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("my\"db"), "\"my\"\"db\"");
    }
}
