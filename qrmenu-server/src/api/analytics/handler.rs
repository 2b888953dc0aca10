//! Analytics API Handlers

use axum::extract::State;
use shared::error::ApiResponse;

use crate::api::ApiQuery;
use crate::auth::CurrentUser;
use crate::error::ServiceResult;
use crate::services::analytics::{self, DailyReport, ReportQuery};
use crate::state::AppState;
use crate::util::now_millis;

/// GET /api/admin/analytics/daily?date=&restaurant_id=&branch_id=
pub async fn daily_report(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(query): ApiQuery<ReportQuery>,
) -> ServiceResult<ApiResponse<DailyReport>> {
    let report = analytics::daily_report(&state.pool, &user, &query, now_millis()).await?;
    Ok(ApiResponse::success(report))
}
