//! Read-side sales aggregation.
//!
//! All aggregation buckets receipts by the business-timezone calendar date
//! of their stored creation instant, folding fetched rows in Rust.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use sea_orm::{PaginatorTrait, QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, MoneyCents, Receipt, ReceiptItem, ResultEngine, clock, receipt_items, receipts,
};

use super::Engine;

/// Sales of one calendar day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailySales {
    pub date: NaiveDate,
    pub total: MoneyCents,
    pub receipt_count: u64,
}

/// Dashboard summary: fixed windows ending today.
#[derive(Clone, Debug)]
pub struct SalesSummary {
    pub today: MoneyCents,
    pub yesterday: MoneyCents,
    pub week_to_date: MoneyCents,
    pub month_to_date: MoneyCents,
    pub total_receipts: u64,
    pub last_seven_days: Vec<DailySales>,
}

/// Trailing 30-day report with average and best day.
#[derive(Clone, Debug)]
pub struct ThirtyDayReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<DailySales>,
    pub total: MoneyCents,
    pub average_per_day: MoneyCents,
    pub total_receipts: u64,
    pub best_day: Option<DailySales>,
}

/// Aggregated sales of one item description on one day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemSales {
    pub description: String,
    pub quantity: i64,
    pub unit_price: MoneyCents,
    pub total: MoneyCents,
}

/// Item-level breakdown of one day, plus the day's receipts.
#[derive(Clone, Debug)]
pub struct DailyItemReport {
    pub date: NaiveDate,
    pub items: Vec<ItemSales>,
    pub receipts: Vec<Receipt>,
    pub total_sales: MoneyCents,
    pub receipt_count: u64,
}

impl Engine {
    /// Per-day totals and receipt counts over an inclusive calendar range.
    ///
    /// Days without sales appear with a zero total so callers can render
    /// contiguous charts.
    pub async fn aggregate_sales(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> ResultEngine<Vec<DailySales>> {
        if start_date > end_date {
            return Err(EngineError::Validation(
                "start date is after end date".to_string(),
            ));
        }

        let (window_start, _) = clock::day_bounds_utc(start_date);
        let (_, window_end) = clock::day_bounds_utc(end_date);
        let models = receipts::Entity::find()
            .filter(receipts::Column::CreatedAt.gte(window_start))
            .filter(receipts::Column::CreatedAt.lt(window_end))
            .all(&self.database)
            .await?;

        let mut buckets: BTreeMap<NaiveDate, (i64, u64)> = BTreeMap::new();
        for model in models {
            let day = clock::local_date(model.created_at);
            let bucket = buckets.entry(day).or_default();
            bucket.0 += model.total_amount_cents;
            bucket.1 += 1;
        }

        let mut days = Vec::new();
        let mut current = start_date;
        while current <= end_date {
            let (total_cents, receipt_count) = buckets.get(&current).copied().unwrap_or((0, 0));
            days.push(DailySales {
                date: current,
                total: MoneyCents::new(total_cents),
                receipt_count,
            });
            current = current + Days::new(1);
        }
        Ok(days)
    }

    /// Dashboard summary: today, yesterday, week-to-date (Monday start),
    /// month-to-date, overall receipt count, and the last seven days.
    pub async fn sales_summary(&self) -> ResultEngine<SalesSummary> {
        let today = clock::today();
        let yesterday = today - Days::new(1);
        let week_start = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
        let month_start = today.with_day(1).unwrap_or(today);

        // One fetch covers every window: month start is the earliest bound
        // except when the trailing week crosses a month boundary.
        let fetch_start = week_start.min(month_start).min(today - Days::new(6));
        let days = self.aggregate_sales(fetch_start, today).await?;

        let sum_from = |from: NaiveDate| {
            days.iter()
                .filter(|d| d.date >= from)
                .fold(MoneyCents::ZERO, |acc, d| acc + d.total)
        };
        let day_total = |date: NaiveDate| {
            days.iter()
                .find(|d| d.date == date)
                .map_or(MoneyCents::ZERO, |d| d.total)
        };

        let total_receipts = receipts::Entity::find().count(&self.database).await?;

        Ok(SalesSummary {
            today: day_total(today),
            yesterday: day_total(yesterday),
            week_to_date: sum_from(week_start),
            month_to_date: sum_from(month_start),
            total_receipts,
            last_seven_days: days
                .iter()
                .filter(|d| d.date >= today - Days::new(6))
                .cloned()
                .collect(),
        })
    }

    /// Trailing 30-day report (today inclusive) with the per-day average and
    /// the best-selling day.
    pub async fn thirty_day_report(&self) -> ResultEngine<ThirtyDayReport> {
        let end_date = clock::today();
        let start_date = end_date - Days::new(29);
        let days = self.aggregate_sales(start_date, end_date).await?;

        let total = days
            .iter()
            .fold(MoneyCents::ZERO, |acc, day| acc + day.total);
        let total_receipts = days.iter().map(|day| day.receipt_count).sum();
        let average_per_day = MoneyCents::new(total.cents() / days.len() as i64);
        let best_day = days
            .iter()
            .filter(|day| day.receipt_count > 0)
            .max_by_key(|day| day.total)
            .cloned();

        Ok(ThirtyDayReport {
            start_date,
            end_date,
            days,
            total,
            average_per_day,
            total_receipts,
            best_day,
        })
    }

    /// Item-level breakdown of one day (defaults to today): line items
    /// grouped by description, quantity and subtotal summed, sorted by
    /// quantity descending. Unit price is the first one seen for the
    /// description.
    pub async fn daily_item_report(
        &self,
        date: Option<NaiveDate>,
    ) -> ResultEngine<DailyItemReport> {
        let date = date.unwrap_or_else(clock::today);
        let (window_start, window_end) = clock::day_bounds_utc(date);

        let rows = receipts::Entity::find()
            .filter(receipts::Column::CreatedAt.gte(window_start))
            .filter(receipts::Column::CreatedAt.lt(window_end))
            .find_with_related(receipt_items::Entity)
            .order_by_desc(receipts::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let mut total_sales = MoneyCents::ZERO;
        let mut grouped: Vec<ItemSales> = Vec::new();
        let mut day_receipts = Vec::new();

        for (model, item_models) in rows {
            total_sales += MoneyCents::new(model.total_amount_cents);
            let mut receipt = Receipt::try_from(model)?;
            receipt.items = item_models
                .into_iter()
                .map(ReceiptItem::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;

            for item in &receipt.items {
                match grouped
                    .iter_mut()
                    .find(|entry| entry.description == item.description)
                {
                    Some(entry) => {
                        entry.quantity += item.quantity;
                        entry.total += item.subtotal;
                    }
                    None => grouped.push(ItemSales {
                        description: item.description.clone(),
                        quantity: item.quantity,
                        unit_price: item.price,
                        total: item.subtotal,
                    }),
                }
            }
            day_receipts.push(receipt);
        }

        grouped.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        let receipt_count = day_receipts.len() as u64;

        Ok(DailyItemReport {
            date,
            items: grouped,
            receipts: day_receipts,
            total_sales,
            receipt_count,
        })
    }
}
