// Operator rating upserts and summaries

use rust_decimal::Decimal;
use serde::Serialize;

use crate::entity::{ratings, users};
use crate::error::{MarketError, MarketResult};
use crate::handlers::AppState;

#[derive(Debug, Serialize)]
pub struct RatingItem {
    pub user_id: i32,
    pub rating: i16,
    pub comment: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct RatingSummary {
    pub operator_id: i32,
    pub average: Option<Decimal>,
    pub count: usize,
    pub ratings: Vec<RatingItem>,
}

/// Writes or replaces the caller's rating for an operator.
pub async fn rate_operator(
    state: &AppState,
    operator_id: i32,
    user: &users::Model,
    rating: i16,
    comment: Option<String>,
) -> MarketResult<ratings::Model> {
    if !(1..=5).contains(&rating) {
        return Err(MarketError::InvalidRequest(
            "rating must be between 1 and 5".to_string(),
        ));
    }

    ensure_operator_exists(state, operator_id).await?;

    let comment = comment.filter(|c| !c.trim().is_empty());
    let stored = state
        .repositories
        .ratings
        .upsert(operator_id, user.id, rating, comment)
        .await?;

    Ok(stored)
}

/// All ratings for an operator plus their average.
pub async fn operator_ratings(state: &AppState, operator_id: i32) -> MarketResult<RatingSummary> {
    ensure_operator_exists(state, operator_id).await?;

    let rows = state
        .repositories
        .ratings
        .find_by_operator(operator_id)
        .await?;

    let values: Vec<i16> = rows.iter().map(|r| r.rating).collect();
    let ratings = rows
        .into_iter()
        .map(|r| RatingItem {
            user_id: r.user_id,
            rating: r.rating,
            comment: r.comment,
            updated_at: r.updated_at,
        })
        .collect::<Vec<_>>();

    Ok(RatingSummary {
        operator_id,
        average: average(&values),
        count: ratings.len(),
        ratings,
    })
}

async fn ensure_operator_exists(state: &AppState, operator_id: i32) -> MarketResult<()> {
    state
        .repositories
        .operators
        .get_by_id(operator_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| MarketError::NotFound(format!("operator {} not found", operator_id)))
}

/// Mean rating rounded to two decimals; None when nobody has rated yet.
pub fn average(ratings: &[i16]) -> Option<Decimal> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
    Some((Decimal::from(sum) / Decimal::from(ratings.len() as i64)).round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_no_ratings_is_none() {
        assert_eq!(average(&[]), None);
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        assert_eq!(average(&[5]), Some(Decimal::from(5)));
        assert_eq!(average(&[4, 5]).unwrap().to_string(), "4.5");
        assert_eq!(average(&[3, 4, 4]).unwrap().to_string(), "3.67");
    }
}
