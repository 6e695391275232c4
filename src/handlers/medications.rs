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
use crate::models::{CreateMedicationRequest, Medication, UpdateMedicationRequest};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MedicationListResponse {
    pub success: bool,
    pub medications: Vec<Medication>,
}

#[derive(Debug, Serialize)]
pub struct MedicationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub medication: Medication,
}

/// GET /api/medications
pub async fn list_medications(
    State(state): State<AppState>,
) -> Result<Json<MedicationListResponse>> {
    let medications = sqlx::query_as::<_, Medication>(
        "SELECT id, name, description, dosage, stock, price, created_at
         FROM medications ORDER BY id",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(MedicationListResponse {
        success: true,
        medications,
    }))
}

/// GET /api/medications/{id}
pub async fn get_medication(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MedicationResponse>> {
    let medication = fetch_medication(&state.db, id).await?;

    Ok(Json(MedicationResponse {
        success: true,
        message: None,
        medication,
    }))
}

/// POST /api/medications
pub async fn create_medication(
    State(state): State<AppState>,
    Json(payload): Json<CreateMedicationRequest>,
) -> Result<(StatusCode, Json<MedicationResponse>)> {
    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::validation("name is required"))?;
    let price = payload
        .price
        .ok_or_else(|| ApiError::validation("price is required"))?;
    if price < 0.0 {
        return Err(ApiError::validation("price must be non-negative"));
    }
    let stock = payload.stock.unwrap_or(0);
    if stock < 0 {
        return Err(ApiError::validation("stock must be non-negative"));
    }

    let id = sqlx::query(
        "INSERT INTO medications (name, description, dosage, stock, price, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&name)
    .bind(&payload.description)
    .bind(&payload.dosage)
    .bind(stock)
    .bind(price)
    .bind(Utc::now())
    .execute(&state.db)
    .await?
    .last_insert_rowid();

    let medication = fetch_medication(&state.db, id).await?;

    Ok((
        StatusCode::CREATED,
        Json(MedicationResponse {
            success: true,
            message: Some("Medication added successfully".to_string()),
            medication,
        }),
    ))
}

/// PUT /api/medications/{id} - partial update
pub async fn update_medication(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateMedicationRequest>,
) -> Result<Json<MedicationResponse>> {
    let current = fetch_medication(&state.db, id).await?;

    let name = payload.name.unwrap_or(current.name);
    if name.trim().is_empty() {
        return Err(ApiError::validation("name must not be empty"));
    }
    let description = payload.description.unwrap_or(current.description);
    let dosage = payload.dosage.unwrap_or(current.dosage);
    let stock = payload.stock.unwrap_or(current.stock);
    if stock < 0 {
        return Err(ApiError::validation("stock must be non-negative"));
    }
    let price = payload.price.unwrap_or(current.price);
    if price < 0.0 {
        return Err(ApiError::validation("price must be non-negative"));
    }

    sqlx::query(
        "UPDATE medications SET name = ?, description = ?, dosage = ?, stock = ?, price = ?
         WHERE id = ?",
    )
    .bind(&name)
    .bind(&description)
    .bind(&dosage)
    .bind(stock)
    .bind(price)
    .bind(id)
    .execute(&state.db)
    .await?;

    let medication = fetch_medication(&state.db, id).await?;

    Ok(Json(MedicationResponse {
        success: true,
        message: Some("Medication updated successfully".to_string()),
        medication,
    }))
}

/// DELETE /api/medications/{id}
///
/// Rejected while order items still reference the medication; deleting it
/// would orphan order history.
pub async fn delete_medication(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    let mut tx = state.db.begin().await?;

    let referenced: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE medication_id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
    if referenced > 0 {
        return Err(ApiError::Conflict(
            "Medication is referenced by existing orders".to_string(),
        ));
    }

    let result = sqlx::query("DELETE FROM medications WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Medication"));
    }

    tx.commit().await?;

    Ok(Json(MessageResponse::new("Medication deleted successfully")))
}

async fn fetch_medication(db: &SqlitePool, id: i64) -> Result<Medication> {
    sqlx::query_as::<_, Medication>(
        "SELECT id, name, description, dosage, stock, price, created_at
         FROM medications WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| ApiError::not_found("Medication"))
}
