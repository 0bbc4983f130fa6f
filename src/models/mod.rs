// Shared API request/response models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Common pagination parameters for API endpoints
#[derive(Debug, Deserialize, Default)]
pub struct PaginationParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PaginationParams {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> u64 {
        (self.page() - 1) * self.limit()
    }
}

/// Pagination envelope for list responses
#[derive(Debug, Serialize)]
pub struct PaginationInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationInfo {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        }
    }
}

/// Converts integer euro cents to a two-decimal display amount
pub fn cents_to_eur(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Converts basis points to a percentage (825 -> 8.25)
pub fn bps_to_percent(bps: i32) -> Decimal {
    Decimal::new(bps as i64, 2)
}

/// Share of supply sold as a percentage, rounded to two decimals.
/// A zero or negative supply reads as nothing sold.
pub fn percent_sold(sold: i64, total: i64) -> Decimal {
    if total <= 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(sold) * Decimal::from(100) / Decimal::from(total)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_convert_to_two_decimal_euros() {
        assert_eq!(cents_to_eur(1250).to_string(), "12.50");
        assert_eq!(cents_to_eur(0).to_string(), "0.00");
        assert_eq!(cents_to_eur(99).to_string(), "0.99");
    }

    #[test]
    fn percent_sold_rounds_to_two_decimals() {
        assert_eq!(percent_sold(1, 3).to_string(), "33.33");
        assert_eq!(percent_sold(500, 1000), Decimal::from(50));
        assert_eq!(percent_sold(1000, 1000), Decimal::from(100));
    }

    #[test]
    fn percent_sold_handles_empty_supply() {
        assert_eq!(percent_sold(0, 0), Decimal::ZERO);
        assert_eq!(percent_sold(10, 0), Decimal::ZERO);
    }

    #[test]
    fn pagination_clamps_inputs() {
        let params = PaginationParams {
            page: Some(0),
            limit: Some(5000),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 0);

        let defaults = PaginationParams::default();
        assert_eq!(defaults.page(), 1);
        assert_eq!(defaults.limit(), 20);
    }

    #[test]
    fn pagination_info_counts_pages() {
        let info = PaginationInfo::new(1, 20, 41);
        assert_eq!(info.total_pages, 3);
    }
}
