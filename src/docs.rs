use utoipa::OpenApi;

use crate::handlers::orders;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order Pricing API",
        description = "Prices carts with volume, category and cart-value discounts and issues short-lived quotes."
    ),
    paths(orders::calculate_order, orders::create_quote, orders::finalize_order),
    components(schemas(
        orders::ItemsRequest,
        orders::LineItemPayload,
        orders::FinalizeOrderRequest,
        orders::OrderResponse,
        orders::LineItemResponse,
        orders::DiscountResponse,
        orders::QuoteResponse,
    )),
    tags((name = "orders", description = "Order pricing and quotes"))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_order_route() {
        let doc = ApiDoc::openapi();
        for path in ["/v1/orders", "/v1/orders/quote", "/v1/orders/calculate"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
