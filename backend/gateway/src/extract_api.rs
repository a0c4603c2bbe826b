//! Bill extraction endpoint (`/extract-bill-data`).

use axum::{Json, extract::State};
use billscan_core::{BillRequest, FinalResponse};

use crate::server::GatewayState;

/// Handler for `POST /extract-bill-data`.
///
/// Always answers 200; success or failure is reported by `is_success`.
pub async fn extract_bill(
    State(state): State<GatewayState>,
    Json(request): Json<BillRequest>,
) -> Json<FinalResponse> {
    Json(state.extractor.extract(&request.document).await)
}
