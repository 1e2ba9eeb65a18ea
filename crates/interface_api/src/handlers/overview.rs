//! Yearly overview handler

use axum::{extract::State, Extension, Json};

use core_kernel::UserId;

use crate::dto::overview::{overview_response, MonthOverviewResponse, OverviewQuery};
use crate::error::ApiError;
use crate::extractors::ValidQuery;
use crate::AppState;

pub async fn get_overview(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    ValidQuery(query): ValidQuery<OverviewQuery>,
) -> Result<Json<Vec<MonthOverviewResponse>>, ApiError> {
    let overview = state.service.yearly_overview(&user, query.year).await?;
    Ok(Json(overview_response(&overview)))
}
