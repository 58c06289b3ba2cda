use sqlx::Row;

use super::Database;
use crate::errors::DbError;
use crate::models::{CreateUser, User};

impl Database {
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let row = sqlx::query("SELECT id, name, email, password FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(User {
                id: row.get("id"),
                name: row.get("name"),
                email: row.get("email"),
                password: row.get("password"),
            })),
            None => Ok(None),
        }
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, DbError> {
        let row = sqlx::query("SELECT id, name, email, password FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(User {
                id: row.get("id"),
                name: row.get("name"),
                email: row.get("email"),
                password: row.get("password"),
            })),
            None => Ok(None),
        }
    }

    pub async fn create_user(&self, user: CreateUser) -> Result<User, DbError> {
        if user.name.trim().is_empty() {
            return Err(DbError::validation("name", "must not be empty"));
        }
        if user.email.trim().is_empty() {
            return Err(DbError::validation("email", "must not be empty"));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if DbError::is_unique_violation(&e) {
                DbError::duplicate_email(&user.email)
            } else {
                DbError::Execution(e)
            }
        })?;

        Ok(User {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            password: row.get("password"),
        })
    }
}
