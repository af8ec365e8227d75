use crate::api::{ApiError, AppState};
use crate::models::{PointsResponse, ProcessResponse, Receipt};
use crate::service::calculate_points;
use axum::{
    body::Bytes,
    extract::{Json, Path, State},
};

/// 提交小票, 计算并保存积分 (POST /receipts/process)
pub async fn process_receipt(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProcessResponse>, ApiError> {
    let receipt = Receipt::from_body(&body).map_err(|e| {
        tracing::warn!("Rejecting receipt: {}", e);
        ApiError::InvalidJson(e)
    })?;

    let points = calculate_points(&receipt);
    let id = state.store.put(points);
    tracing::info!("Receipt {} from {:?} scored {} points", id, receipt.retailer, points);

    Ok(Json(ProcessResponse { id }))
}

/// 按ID查询积分 (GET /receipts/{id}/points)
pub async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, ApiError> {
    match state.store.get(&id) {
        Some(points) => Ok(Json(PointsResponse { points })),
        None => {
            tracing::debug!("Receipt {} not found", id);
            Err(ApiError::ReceiptNotFound)
        }
    }
}
