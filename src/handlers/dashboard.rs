use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::Result;
use crate::services::DashboardStats;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub stats: DashboardStats,
}

/// GET /api/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>> {
    let stats = state.dashboard_service.stats().await?;

    Ok(Json(DashboardResponse {
        success: true,
        stats,
    }))
}
