//! Overview DTOs
//!
//! The overview is a 12-entry array, index 0 for January. Each entry maps
//! every category code to the month's sum for that category.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_finance::{Category, MonthTotals, YearlyOverview};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct OverviewQuery {
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct MonthOverviewResponse {
    #[serde(rename = "ESSEN", with = "rust_decimal::serde::float")]
    pub food: Decimal,
    #[serde(rename = "FREIZEIT", with = "rust_decimal::serde::float")]
    pub leisure: Decimal,
    #[serde(rename = "GESUNDHEIT", with = "rust_decimal::serde::float")]
    pub health: Decimal,
    #[serde(rename = "KLEIDUNG", with = "rust_decimal::serde::float")]
    pub clothing: Decimal,
    #[serde(rename = "TRANSPORT", with = "rust_decimal::serde::float")]
    pub transport: Decimal,
    #[serde(rename = "WOHNEN", with = "rust_decimal::serde::float")]
    pub housing: Decimal,
    #[serde(rename = "SONSTIGES", with = "rust_decimal::serde::float")]
    pub other: Decimal,
}

impl From<&MonthTotals> for MonthOverviewResponse {
    fn from(totals: &MonthTotals) -> Self {
        Self {
            food: totals.get(Category::Food),
            leisure: totals.get(Category::Leisure),
            health: totals.get(Category::Health),
            clothing: totals.get(Category::Clothing),
            transport: totals.get(Category::Transport),
            housing: totals.get(Category::Housing),
            other: totals.get(Category::Other),
        }
    }
}

pub fn overview_response(overview: &YearlyOverview) -> Vec<MonthOverviewResponse> {
    overview.months().iter().map(MonthOverviewResponse::from).collect()
}
