use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;

use super::MessageResponse;
use crate::error::{ApiError, Result};
use crate::models::{CreateCustomerRequest, Customer, UpdateCustomerRequest};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CustomerListResponse {
    pub success: bool,
    pub customers: Vec<Customer>,
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub customer: Customer,
}

/// GET /api/customers
pub async fn list_customers(State(state): State<AppState>) -> Result<Json<CustomerListResponse>> {
    let customers = sqlx::query_as::<_, Customer>(
        "SELECT id, name, email, phone, address, created_at FROM customers ORDER BY id",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(CustomerListResponse {
        success: true,
        customers,
    }))
}

/// GET /api/customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerResponse>> {
    let customer = fetch_customer(&state.db, id).await?;

    Ok(Json(CustomerResponse {
        success: true,
        message: None,
        customer,
    }))
}

/// POST /api/customers
pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>)> {
    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::validation("name is required"))?;

    let id = sqlx::query(
        "INSERT INTO customers (name, email, phone, address, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&name)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(&payload.address)
    .bind(Utc::now())
    .execute(&state.db)
    .await?
    .last_insert_rowid();

    let customer = fetch_customer(&state.db, id).await?;

    Ok((
        StatusCode::CREATED,
        Json(CustomerResponse {
            success: true,
            message: Some("Customer added successfully".to_string()),
            customer,
        }),
    ))
}

/// PUT /api/customers/{id} - partial update
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>> {
    let current = fetch_customer(&state.db, id).await?;

    let name = payload.name.unwrap_or(current.name);
    if name.trim().is_empty() {
        return Err(ApiError::validation("name must not be empty"));
    }
    let email = payload.email.unwrap_or(current.email);
    let phone = payload.phone.unwrap_or(current.phone);
    let address = payload.address.unwrap_or(current.address);

    sqlx::query("UPDATE customers SET name = ?, email = ?, phone = ?, address = ? WHERE id = ?")
        .bind(&name)
        .bind(&email)
        .bind(&phone)
        .bind(&address)
        .bind(id)
        .execute(&state.db)
        .await?;

    let customer = fetch_customer(&state.db, id).await?;

    Ok(Json(CustomerResponse {
        success: true,
        message: Some("Customer updated successfully".to_string()),
        customer,
    }))
}

/// DELETE /api/customers/{id}
///
/// Restricted: a customer that still owns orders cannot be deleted.
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    let mut tx = state.db.begin().await?;

    let owned_orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE customer_id = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
    if owned_orders > 0 {
        return Err(ApiError::Conflict(
            "Customer has existing orders".to_string(),
        ));
    }

    let result = sqlx::query("DELETE FROM customers WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Customer"));
    }

    tx.commit().await?;

    Ok(Json(MessageResponse::new("Customer deleted successfully")))
}

async fn fetch_customer(db: &SqlitePool, id: i64) -> Result<Customer> {
    sqlx::query_as::<_, Customer>(
        "SELECT id, name, email, phone, address, created_at FROM customers WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| ApiError::not_found("Customer"))
}
