use std::collections::BTreeMap;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::money::round2;
use crate::domain::order::{Discount, LineItemRequest, Order, PricedLineItem, QuoteCreated};
use crate::errors::AppError;
use crate::AppService;

const ITEMS_REQUIRED: &str = "Payload is invalid. 'items' array is required and must not be empty.";
const ITEM_INVALID: &str = "Payload is invalid. Each item must have a valid 'productId' and a 'quantity' greater than 0.";
const QUOTE_ID_REQUIRED: &str = "Payload is invalid. A 'quoteId' string is required.";

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Fields are taken as raw JSON and checked during validation, so a wrongly
/// typed value gets the same message as a missing one.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPayload {
    #[serde(default)]
    #[schema(value_type = String)]
    pub product_id: Option<Value>,
    #[serde(default)]
    #[schema(value_type = u32, minimum = 1)]
    pub quantity: Option<Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ItemsRequest {
    #[serde(default)]
    #[schema(value_type = Vec<LineItemPayload>)]
    pub items: Option<Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeOrderRequest {
    /// Any JSON value; non-strings are rejected during validation.
    #[serde(default)]
    #[schema(value_type = String)]
    pub quote_id: Option<Value>,
}

/// Monetary values are decimal strings with two places, e.g. "119.80".
#[derive(Debug, Serialize, ToSchema)]
pub struct DiscountResponse {
    pub code: String,
    pub name: String,
    pub basis: String,
    pub amount: String,
    #[schema(value_type = Object)]
    pub metadata: BTreeMap<String, Value>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    pub product_id: String,
    pub unit_price: String,
    pub quantity: u32,
    pub subtotal: String,
    pub item_discounts: Vec<DiscountResponse>,
    pub total: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub currency: String,
    pub items: Vec<LineItemResponse>,
    pub discounts: Vec<DiscountResponse>,
    pub total: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub quote_id: Uuid,
    pub order: OrderResponse,
}

fn money(value: &BigDecimal) -> String {
    round2(value).to_string()
}

impl From<Discount> for DiscountResponse {
    fn from(d: Discount) -> Self {
        Self {
            code: d.code.as_str().to_string(),
            name: d.name,
            basis: money(&d.basis),
            amount: money(&d.amount),
            metadata: d.metadata,
        }
    }
}

impl From<PricedLineItem> for LineItemResponse {
    fn from(item: PricedLineItem) -> Self {
        Self {
            unit_price: money(&item.unit_price),
            subtotal: money(&item.subtotal),
            total: money(&item.total),
            product_id: item.product_id,
            quantity: item.quantity,
            item_discounts: item.item_discounts.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            total: money(&order.total),
            currency: order.currency,
            items: order.items.into_iter().map(Into::into).collect(),
            discounts: order.discounts.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<QuoteCreated> for QuoteResponse {
    fn from(created: QuoteCreated) -> Self {
        Self {
            quote_id: created.quote_id,
            order: created.order.into(),
        }
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

/// JSON extractor settings: malformed bodies are validation failures (422),
/// not actix's default 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Unprocessable(format!("Payload is invalid. {}", err)).into()
    })
}

fn invalid(message: &str) -> DomainError {
    DomainError::InvalidInput(message.to_string())
}

fn validate_items(body: ItemsRequest) -> Result<Vec<LineItemRequest>, DomainError> {
    let items = match body.items {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(invalid(ITEMS_REQUIRED)),
    };

    items
        .into_iter()
        .map(|raw| {
            let item: LineItemPayload =
                serde_json::from_value(raw).map_err(|_| invalid(ITEM_INVALID))?;
            let product_id = match item.product_id {
                Some(Value::String(id)) if !id.is_empty() => id,
                _ => return Err(invalid(ITEM_INVALID)),
            };
            let quantity = item
                .quantity
                .as_ref()
                .and_then(Value::as_u64)
                .filter(|q| *q > 0)
                .and_then(|q| u32::try_from(q).ok())
                .ok_or_else(|| invalid(ITEM_INVALID))?;
            Ok(LineItemRequest::new(product_id, quantity))
        })
        .collect()
}

fn validate_quote_id(body: FinalizeOrderRequest) -> Result<String, DomainError> {
    match body.quote_id {
        Some(Value::String(id)) if !id.is_empty() => Ok(id),
        _ => Err(invalid(QUOTE_ID_REQUIRED)),
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /v1/orders/calculate
///
/// Prices the cart and returns the order with every applied discount,
/// without storing anything.
#[utoipa::path(
    post,
    path = "/v1/orders/calculate",
    request_body = ItemsRequest,
    responses(
        (status = 200, description = "Order priced", body = OrderResponse),
        (status = 404, description = "Product not found"),
        (status = 422, description = "Invalid payload"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn calculate_order(
    service: web::Data<AppService>,
    body: web::Json<ItemsRequest>,
) -> Result<HttpResponse, AppError> {
    let items = validate_items(body.into_inner())?;
    let order = service.calculate_order(&items)?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// POST /v1/orders/quote
///
/// Prices the cart and locks the result in as a quote. The returned
/// `quoteId` can be finalized until the quote expires.
#[utoipa::path(
    post,
    path = "/v1/orders/quote",
    request_body = ItemsRequest,
    responses(
        (status = 201, description = "Quote created", body = QuoteResponse),
        (status = 404, description = "Product not found"),
        (status = 422, description = "Invalid payload"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_quote(
    service: web::Data<AppService>,
    body: web::Json<ItemsRequest>,
) -> Result<HttpResponse, AppError> {
    let items = validate_items(body.into_inner())?;
    let created = service.create_quote(&items)?;
    Ok(HttpResponse::Created().json(QuoteResponse::from(created)))
}

/// POST /v1/orders
///
/// Finalizes an order from a live quote. The order is returned exactly as it
/// was quoted; nothing is re-priced.
#[utoipa::path(
    post,
    path = "/v1/orders",
    request_body = FinalizeOrderRequest,
    responses(
        (status = 200, description = "Order finalized", body = OrderResponse),
        (status = 422, description = "Invalid payload, or invalid or expired quote"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn finalize_order(
    service: web::Data<AppService>,
    body: web::Json<FinalizeOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let quote_id = validate_quote_id(body.into_inner())?;
    let order = service.finalize_order(&quote_id)?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
