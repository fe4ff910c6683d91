//! Receipt engine: domain model and database operations for Resibo.
//!
//! The engine is the only crate that touches the database. It exposes the
//! receipt workflow (create/list/lookup/delete), the singleton business
//! profile, read-side sales aggregation, the export rows, and the admin
//! credential/session store.

pub use business::BusinessProfile;
pub use clock::BUSINESS_TZ;
pub use error::EngineError;
pub use money::MoneyCents;
pub use ops::{
    BusinessInput, DailyItemReport, DailySales, Engine, EngineBuilder, ExportRow, ItemInput,
    ItemSales, ReceiptInput, SalesSummary, ThirtyDayReport,
};
pub use receipt_items::ReceiptItem;
pub use receipts::Receipt;

mod admins;
mod business;
pub mod clock;
mod error;
mod money;
mod ops;
mod receipt_items;
mod receipts;
mod sessions;

type ResultEngine<T> = Result<T, EngineError>;
