//! Wire types shared between the Resibo server and its clients.
//!
//! Monetary fields are integer cents (`*_cents`); dates are ISO `YYYY-MM-DD`
//! strings in the business timezone.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod receipt {
    use super::*;

    /// One line-item row of the receipt form. All fields are raw strings;
    /// the engine does the parsing.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct ItemNew {
        pub description: String,
        #[serde(default)]
        pub custom_description: String,
        pub quantity: String,
        pub price: String,
    }

    /// Receipt creation request, mirroring the receipt form.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct ReceiptNew {
        pub business_name: String,
        #[serde(default)]
        pub business_email: String,
        pub contact_number: String,
        pub location: String,
        pub attendant: String,
        #[serde(default)]
        pub customer_name: String,
        #[serde(default)]
        pub customer_address: String,
        #[serde(default)]
        pub money_received: String,
        #[serde(default)]
        pub items: Vec<ItemNew>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ItemView {
        pub description: String,
        pub quantity: i64,
        pub price_cents: i64,
        pub subtotal_cents: i64,
    }

    /// A stored receipt, with display date/time pre-formatted in the
    /// business timezone.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ReceiptView {
        pub id: Uuid,
        pub receipt_number: String,
        pub date: String,
        pub time: String,
        pub business_name: String,
        pub business_email: Option<String>,
        pub contact_number: String,
        pub location: String,
        pub attendant: String,
        pub customer_name: Option<String>,
        pub customer_address: Option<String>,
        pub items: Vec<ItemView>,
        pub total_amount_cents: i64,
        pub money_received_cents: i64,
        pub change_amount_cents: i64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ReceiptListResponse {
        pub receipts: Vec<ReceiptView>,
    }
}

pub mod business {
    use super::*;

    /// Profile upsert request.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct BusinessUpdate {
        pub name: String,
        #[serde(default)]
        pub email: String,
        pub contact_number: String,
        pub location: String,
        pub attendant: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BusinessView {
        pub name: String,
        pub email: Option<String>,
        pub contact_number: String,
        pub location: String,
        pub attendant: String,
    }
}

pub mod report {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct DailySales {
        pub date: NaiveDate,
        pub total_cents: i64,
        pub receipt_count: u64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct SalesSummary {
        pub today_cents: i64,
        pub yesterday_cents: i64,
        pub week_to_date_cents: i64,
        pub month_to_date_cents: i64,
        pub total_receipts: u64,
        pub last_seven_days: Vec<DailySales>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ThirtyDayReport {
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub days: Vec<DailySales>,
        pub total_cents: i64,
        pub average_per_day_cents: i64,
        pub total_receipts: u64,
        pub best_day: Option<DailySales>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ItemSales {
        pub description: String,
        pub quantity: i64,
        pub unit_price_cents: i64,
        pub total_cents: i64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct DailyItemReport {
        pub date: NaiveDate,
        pub items: Vec<ItemSales>,
        pub receipts: Vec<super::receipt::ReceiptView>,
        pub total_sales_cents: i64,
        pub receipt_count: u64,
    }
}

pub mod admin {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Login {
        pub username: String,
        pub password: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct SessionToken {
        pub token: String,
    }
}
