//! Test statistics endpoint.

use actix_web::http::header::{self, CacheControl, CacheDirective};
use actix_web::{HttpResponse, get, web};

use crate::error::AppResult;
use crate::models::{StatisticsQuery, StatisticsResponse};
use crate::services::{StatisticsService, TimeWindow};

/// Get test statistics.
///
/// Retrieve pass/fail statistics per test and workspace, optionally limited to
/// runs overlapping `[startDate, endDate]` (Unix timestamps in seconds).
#[utoipa::path(
    get,
    path = "/test-statistics",
    tag = "NeoLoad Test Statistics",
    params(StatisticsQuery),
    responses(
        (status = 200, description = "Statistics per workspace", body = StatisticsResponse),
        (status = 400, description = "Malformed query parameters"),
        (status = 500, description = "NeoLoad API unreachable or token rejected", body = crate::error::ErrorResponse)
    )
)]
#[get("/test-statistics")]
pub async fn get_test_statistics(
    service: web::Data<StatisticsService>,
    query: web::Query<StatisticsQuery>,
) -> AppResult<HttpResponse> {
    let window = TimeWindow::new(query.start_date, query.end_date);
    let response: StatisticsResponse = service.collect(window).await?;

    let body = serde_json::to_string_pretty(&response)?;

    Ok(HttpResponse::Ok()
        .insert_header(CacheControl(vec![CacheDirective::NoCache]))
        .insert_header((header::CONTENT_TYPE, "application/json; charset=UTF-8"))
        .body(body))
}

/// Configure statistics routes.
pub fn configure_statistics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_test_statistics);
}
