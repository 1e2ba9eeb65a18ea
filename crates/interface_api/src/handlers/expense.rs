//! Expense handlers

use axum::{extract::State, Extension, Json};

use core_kernel::UserId;

use crate::dto::expense::*;
use crate::dto::SuccessResponse;
use crate::error::ApiError;
use crate::extractors::{ExpenseIdPath, ValidJson, ValidQuery};
use crate::AppState;

/// Records a new expense
pub async fn create_expense(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    ValidJson(request): ValidJson<CreateExpenseRequest>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let expense = state.service.create_expense(&user, request.into()).await?;
    Ok(Json(expense.into()))
}

/// Lists one month of expenses
pub async fn list_expenses(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    ValidQuery(query): ValidQuery<ListExpensesQuery>,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let expenses = state.service.list_expenses(&user, query.into()).await?;
    Ok(Json(expenses.into_iter().map(ExpenseResponse::from).collect()))
}

pub async fn update_expense(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    ExpenseIdPath(id): ExpenseIdPath,
    ValidJson(request): ValidJson<UpdateExpenseRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.service.update_expense(&user, id, request.into()).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    ExpenseIdPath(id): ExpenseIdPath,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.service.delete_expense(&user, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
