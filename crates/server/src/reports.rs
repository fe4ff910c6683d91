//! Sales report API endpoints (admin only)

use api_types::report::{
    DailyItemReport, DailySales, ItemSales, SalesSummary, ThirtyDayReport,
};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{ServerError, receipts::to_view, server::ServerState};

fn day_view(day: engine::DailySales) -> DailySales {
    DailySales {
        date: day.date,
        total_cents: day.total.cents(),
        receipt_count: day.receipt_count,
    }
}

/// Dashboard summary: today / yesterday / week / month windows.
pub async fn summary(State(state): State<ServerState>) -> Result<Json<SalesSummary>, ServerError> {
    let summary = state.engine.sales_summary().await?;
    Ok(Json(SalesSummary {
        today_cents: summary.today.cents(),
        yesterday_cents: summary.yesterday.cents(),
        week_to_date_cents: summary.week_to_date.cents(),
        month_to_date_cents: summary.month_to_date.cents(),
        total_receipts: summary.total_receipts,
        last_seven_days: summary.last_seven_days.into_iter().map(day_view).collect(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Per-day totals over an inclusive date range. `start` and `end` must be
/// given together; without them the trailing 30 days are reported.
pub async fn daily_sales(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<DailySales>>, ServerError> {
    let (start, end) = match (query.start, query.end) {
        (Some(start), Some(end)) => (start, end),
        (None, None) => {
            let today = engine::clock::today();
            (today - chrono::Days::new(29), today)
        }
        _ => {
            return Err(ServerError::Generic(
                "start and end must be provided together".to_string(),
            ));
        }
    };

    let days = state.engine.aggregate_sales(start, end).await?;
    Ok(Json(days.into_iter().map(day_view).collect()))
}

/// Trailing 30-day report with the per-day average and best day.
pub async fn thirty_day(
    State(state): State<ServerState>,
) -> Result<Json<ThirtyDayReport>, ServerError> {
    let report = state.engine.thirty_day_report().await?;
    Ok(Json(ThirtyDayReport {
        start_date: report.start_date,
        end_date: report.end_date,
        days: report.days.into_iter().map(day_view).collect(),
        total_cents: report.total.cents(),
        average_per_day_cents: report.average_per_day.cents(),
        total_receipts: report.total_receipts,
        best_day: report.best_day.map(day_view),
    }))
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: Option<NaiveDate>,
}

/// Item-level breakdown of one day (defaults to today).
pub async fn daily_items(
    State(state): State<ServerState>,
    Query(query): Query<DayQuery>,
) -> Result<Json<DailyItemReport>, ServerError> {
    let report = state.engine.daily_item_report(query.date).await?;
    Ok(Json(DailyItemReport {
        date: report.date,
        items: report
            .items
            .into_iter()
            .map(|item| ItemSales {
                description: item.description,
                quantity: item.quantity,
                unit_price_cents: item.unit_price.cents(),
                total_cents: item.total.cents(),
            })
            .collect(),
        receipts: report.receipts.into_iter().map(to_view).collect(),
        total_sales_cents: report.total_sales.cents(),
        receipt_count: report.receipt_count,
    }))
}
