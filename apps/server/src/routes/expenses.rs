//! # Expense Routes
//!
//! CRUD over logged expenses plus the expense statistics (totals, calendar
//! month-over-month change, top category).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use salespro_core::stats::{expense_stats, ExpenseStats};
use salespro_core::validation::{validate_category, validate_expense_amount};
use salespro_core::{Expense, ExpensePatch, NewExpense};

use crate::error::ApiError;
use crate::routes::ListResponse;
use crate::state::AppState;

/// GET /api/expenses
pub async fn list(State(state): State<AppState>) -> Json<ListResponse<Expense>> {
    Json(ListResponse::from_result(state.db.expenses().list().await))
}

/// GET /api/expenses/stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<ExpenseStats>, ApiError> {
    let expenses = state.db.expenses().list().await?;
    Ok(Json(expense_stats(&expenses, Utc::now())))
}

/// POST /api/expenses
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewExpense>,
) -> Result<Json<Expense>, ApiError> {
    validate_category(&new.category)?;
    validate_expense_amount(new.amount_cents)?;

    let expense = state.db.expenses().insert(new).await?;
    Ok(Json(expense))
}

/// PATCH /api/expenses/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ExpensePatch>,
) -> Result<Json<Expense>, ApiError> {
    if let Some(category) = &patch.category {
        validate_category(category)?;
    }
    if let Some(amount) = patch.amount_cents {
        validate_expense_amount(amount)?;
    }

    let expense = state.db.expenses().update(&id, patch).await?;
    Ok(Json(expense))
}

/// DELETE /api/expenses/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.db.expenses().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
