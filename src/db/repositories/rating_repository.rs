use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::entity::ratings::{self, Column, Entity as Ratings, Model};

/// Repository for managing operator ratings in the database
pub struct RatingRepository {
    db: DatabaseConnection,
}

impl RatingRepository {
    /// Creates a new rating repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Writes the user's rating for an operator, replacing any earlier one.
    /// Keyed on the (operator, user) unique index.
    pub async fn upsert(
        &self,
        operator_id: i32,
        user_id: i32,
        rating: i16,
        comment: Option<String>,
    ) -> Result<Model, DbErr> {
        let now = chrono::Utc::now();
        let row = ratings::ActiveModel {
            operator_id: Set(operator_id),
            user_id: Set(user_id),
            rating: Set(rating),
            comment: Set(comment.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ratings::insert(row)
            .on_conflict(
                OnConflict::columns([Column::OperatorId, Column::UserId])
                    .update_columns([Column::Rating, Column::Comment, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        // Read the row back; the upsert path does not return the model
        let stored = Ratings::find()
            .filter(Column::OperatorId.eq(operator_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("rating row after upsert".to_string()))?;

        Ok(stored)
    }

    /// All ratings for an operator, newest first
    pub async fn find_by_operator(&self, operator_id: i32) -> Result<Vec<Model>, DbErr> {
        Ratings::find()
            .filter(Column::OperatorId.eq(operator_id))
            .order_by_desc(Column::UpdatedAt)
            .all(&self.db)
            .await
    }

    /// The rating a user gave an operator, if any
    pub async fn get_user_rating(
        &self,
        operator_id: i32,
        user_id: i32,
    ) -> Result<Option<Model>, DbErr> {
        Ratings::find()
            .filter(Column::OperatorId.eq(operator_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }
}
