use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use crate::domain::discount::DiscountEngine;
use crate::domain::errors::DomainError;
use crate::domain::money::round2;
use crate::domain::order::{
    LineItemRequest, Order, PricedLineItem, Quote, QuoteCreated, ResolvedLineItem,
};
use crate::domain::ports::{Clock, ProductCatalog, QuoteRepository};

/// How long a quote stays redeemable unless configured otherwise.
pub const DEFAULT_QUOTE_TTL_MINUTES: i64 = 30;

pub struct OrderService<C, Q> {
    catalog: C,
    quotes: Q,
    engine: DiscountEngine,
    clock: Arc<dyn Clock>,
    quote_ttl: Duration,
}

impl<C: ProductCatalog, Q: QuoteRepository> OrderService<C, Q> {
    pub fn new(catalog: C, quotes: Q, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            quotes,
            engine: DiscountEngine::new(),
            clock,
            quote_ttl: Duration::minutes(DEFAULT_QUOTE_TTL_MINUTES),
        }
    }

    pub fn with_quote_ttl(mut self, ttl: Duration) -> Self {
        self.quote_ttl = ttl;
        self
    }

    /// Price `items` against the catalog. Every product must exist.
    pub fn calculate_order(&self, items: &[LineItemRequest]) -> Result<Order, DomainError> {
        let resolved = self.resolve(items)?;
        Ok(self.engine.calculate_discounts(resolved))
    }

    /// Price `items` and store the result as a quote redeemable until the TTL
    /// runs out.
    pub fn create_quote(&self, items: &[LineItemRequest]) -> Result<QuoteCreated, DomainError> {
        let order = self.calculate_order(items)?;
        let expiration = self
            .clock
            .now()
            .checked_add_signed(self.quote_ttl)
            .ok_or_else(|| {
                DomainError::Internal(format!(
                    "quote TTL of {} minutes overflows the clock",
                    self.quote_ttl.num_minutes()
                ))
            })?;
        let quote = Quote {
            id: Uuid::new_v4(),
            order: order.clone(),
            expiration,
        };
        let quote_id = quote.id;

        self.quotes.save(quote)?;
        log::info!(
            "Created quote {} (total {} {}, expires {})",
            quote_id,
            order.total,
            order.currency,
            expiration.to_rfc3339()
        );

        Ok(QuoteCreated { quote_id, order })
    }

    /// Return the order locked in by a live quote, exactly as it was priced.
    pub fn finalize_order(&self, quote_id: &str) -> Result<Order, DomainError> {
        let invalid = || DomainError::InvalidQuote(quote_id.to_string());

        let id = Uuid::parse_str(quote_id).map_err(|_| invalid())?;
        match self.quotes.find_by_id(id)? {
            Some(quote) => {
                log::info!("Finalized order from quote {}", id);
                Ok(quote.order)
            }
            None => {
                log::warn!("Quote {} is unknown or expired", quote_id);
                Err(invalid())
            }
        }
    }

    fn resolve(&self, items: &[LineItemRequest]) -> Result<Vec<ResolvedLineItem>, DomainError> {
        items
            .iter()
            .map(|request| {
                let product = self.catalog.find_by_id(&request.product_id).ok_or_else(|| {
                    log::warn!("Unknown product {}", request.product_id);
                    DomainError::ProductNotFound(request.product_id.clone())
                })?;
                Ok(ResolvedLineItem {
                    item: PricedLineItem::new(
                        product.id,
                        round2(&product.unit_price),
                        request.quantity,
                    ),
                    category: product.category,
                })
            })
            .collect()
    }
}
