//! Receipt API endpoints

use api_types::receipt::{ItemView, ReceiptListResponse, ReceiptNew, ReceiptView};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{ServerError, server::ServerState};

pub(crate) fn to_view(receipt: engine::Receipt) -> ReceiptView {
    ReceiptView {
        id: receipt.id,
        receipt_number: receipt.receipt_number.clone(),
        date: receipt.display_date(),
        time: receipt.display_time(),
        business_name: receipt.business_name.clone(),
        business_email: receipt.business_email.clone(),
        contact_number: receipt.contact_number.clone(),
        location: receipt.location.clone(),
        attendant: receipt.attendant.clone(),
        customer_name: receipt.customer_name.clone(),
        customer_address: receipt.customer_address.clone(),
        items: receipt
            .items
            .iter()
            .map(|item| ItemView {
                description: item.description.clone(),
                quantity: item.quantity,
                price_cents: item.price.cents(),
                subtotal_cents: item.subtotal.cents(),
            })
            .collect(),
        total_amount_cents: receipt.total_amount.cents(),
        money_received_cents: receipt.money_received.cents(),
        change_amount_cents: receipt.change_amount.cents(),
    }
}

fn to_input(payload: ReceiptNew) -> engine::ReceiptInput {
    engine::ReceiptInput {
        business_name: payload.business_name,
        business_email: payload.business_email,
        contact_number: payload.contact_number,
        location: payload.location,
        attendant: payload.attendant,
        customer_name: payload.customer_name,
        customer_address: payload.customer_address,
        money_received: payload.money_received,
        items: payload
            .items
            .into_iter()
            .map(|item| engine::ItemInput {
                description: item.description,
                custom_description: item.custom_description,
                quantity: item.quantity,
                price: item.price,
            })
            .collect(),
    }
}

/// Handle receipt creation from the receipt form.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReceiptNew>,
) -> Result<(StatusCode, Json<ReceiptView>), ServerError> {
    let receipt = state.engine.create_receipt(to_input(payload)).await?;
    Ok((StatusCode::CREATED, Json(to_view(receipt))))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// List receipts newest first, optionally restricted to a date range.
/// `start` and `end` must be given together.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ReceiptListResponse>, ServerError> {
    let range = match (query.start, query.end) {
        (Some(start), Some(end)) => Some((start, end)),
        (None, None) => None,
        _ => {
            return Err(ServerError::Generic(
                "start and end must be provided together".to_string(),
            ));
        }
    };

    let receipts = state.engine.list_receipts(range).await?;
    Ok(Json(ReceiptListResponse {
        receipts: receipts.into_iter().map(to_view).collect(),
    }))
}

/// Fetch one receipt by its receipt number.
pub async fn get(
    State(state): State<ServerState>,
    Path(number): Path<String>,
) -> Result<Json<ReceiptView>, ServerError> {
    let receipt = state.engine.receipt_by_number(&number).await?;
    Ok(Json(to_view(receipt)))
}

/// Delete a receipt and its items.
pub async fn delete(
    State(state): State<ServerState>,
    Path(number): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_receipt(&number).await?;
    Ok(StatusCode::NO_CONTENT)
}
