use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::db::DbError;
use crate::entity::{sessions, users};

/// Repository for user accounts and their sessions
#[derive(Clone)]
pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Find a user by login email
    pub async fn get_by_email(&self, email: &str) -> Result<Option<users::Model>, DbError> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await?;
        Ok(user)
    }

    /// Find a user by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<users::Model>, DbError> {
        let user = users::Entity::find_by_id(id).one(&self.conn).await?;
        Ok(user)
    }

    /// Get all users, newest first
    pub async fn find_all(&self) -> Result<Vec<users::Model>, DbError> {
        let users = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(users)
    }

    /// Insert a new user account
    pub async fn insert(&self, model: users::ActiveModel) -> Result<users::Model, DbError> {
        let user = model.insert(&self.conn).await?;
        Ok(user)
    }

    /// Apply an update to an existing user
    pub async fn update(&self, model: users::ActiveModel) -> Result<users::Model, DbError> {
        let user = model.update(&self.conn).await?;
        Ok(user)
    }

    /// Record a new session token for a user
    pub async fn create_session(
        &self,
        user_id: i32,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DbError> {
        let session = sessions::ActiveModel {
            token: Set(token.to_string()),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
            expires_at: Set(expires_at),
        };
        session.insert(&self.conn).await?;
        Ok(())
    }

    /// Resolve a session token to its user. Expired sessions resolve to None.
    pub async fn get_session_user(&self, token: &str) -> Result<Option<users::Model>, DbError> {
        let session = sessions::Entity::find_by_id(token.to_string())
            .one(&self.conn)
            .await?;

        let session = match session {
            Some(s) if s.expires_at > Utc::now() => s,
            _ => return Ok(None),
        };

        self.get_by_id(session.user_id).await
    }

    /// Drop a session token (logout)
    pub async fn delete_session(&self, token: &str) -> Result<(), DbError> {
        sessions::Entity::delete_by_id(token.to_string())
            .exec(&self.conn)
            .await?;
        Ok(())
    }
}
