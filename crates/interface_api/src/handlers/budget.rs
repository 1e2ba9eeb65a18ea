//! Budget handlers

use axum::{extract::State, Extension, Json};

use core_kernel::UserId;

use crate::dto::budget::{BudgetResponse, UpdateBudgetRequest};
use crate::dto::SuccessResponse;
use crate::error::ApiError;
use crate::extractors::ValidJson;
use crate::AppState;

/// Returns the budget, creating the default on first access
pub async fn get_budget(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
) -> Result<Json<BudgetResponse>, ApiError> {
    let budget = state.service.get_budget(&user).await?;
    Ok(Json(budget.into()))
}

pub async fn update_budget(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    ValidJson(request): ValidJson<UpdateBudgetRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.service.update_budget(&user, request.budget).await?;
    Ok(Json(SuccessResponse::ok()))
}
