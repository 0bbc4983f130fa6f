use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

use crate::db::DbError;
use crate::entity::operators::{ActiveModel, Column, Entity as Operators, Model};

/// Repository for operator database operations
#[derive(Clone)]
pub struct OperatorRepository {
    conn: DatabaseConnection,
}

impl OperatorRepository {
    /// Create a new operator repository instance
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get all operators, newest first
    pub async fn find_all(&self) -> Result<Vec<Model>, DbError> {
        let operators = Operators::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(operators)
    }

    /// Find operator by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Model>, DbError> {
        let operator = Operators::find_by_id(id).one(&self.conn).await?;
        Ok(operator)
    }

    /// Insert a new operator
    pub async fn insert(&self, model: ActiveModel) -> Result<Model, DbError> {
        let operator = model.insert(&self.conn).await?;
        Ok(operator)
    }

    /// Apply an update to an existing operator
    pub async fn update(&self, model: ActiveModel) -> Result<Model, DbError> {
        let operator = model.update(&self.conn).await?;
        Ok(operator)
    }

    /// Delete an operator by ID, returning the number of rows removed
    pub async fn delete_by_id(&self, id: i32) -> Result<u64, DbError> {
        let res = Operators::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected)
    }
}
