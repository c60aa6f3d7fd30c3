use std::collections::BTreeMap;
use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemRequest {
    pub product_id: String,
    pub quantity: u32,
}

impl LineItemRequest {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Product category as far as discount rules care.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Accessories,
    Other(String),
}

impl Category {
    pub const ACCESSORIES: &'static str = "acessorios";

    pub fn parse(label: &str) -> Self {
        if label == Self::ACCESSORIES {
            Category::Accessories
        } else {
            Category::Other(label.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Accessories => Self::ACCESSORIES,
            Category::Other(label) => label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub unit_price: BigDecimal,
    pub category: Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountCode {
    CategoryAccessories5Pct,
    QuantityTier10Pct,
    QuantityTier15Pct,
    QuantityTier20Pct,
    CartValueFixed50,
    CartValueFixed150,
}

impl DiscountCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountCode::CategoryAccessories5Pct => "CAT_ACC_5PCT",
            DiscountCode::QuantityTier10Pct => "QTY_TIER_10PCT",
            DiscountCode::QuantityTier15Pct => "QTY_TIER_15PCT",
            DiscountCode::QuantityTier20Pct => "QTY_TIER_20PCT",
            DiscountCode::CartValueFixed50 => "CART_VALUE_FIXED_50",
            DiscountCode::CartValueFixed150 => "CART_VALUE_FIXED_150",
        }
    }
}

impl fmt::Display for DiscountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single applied discount. `basis` is the amount the rule was evaluated
/// against; `amount` is what was subtracted.
#[derive(Debug, Clone, PartialEq)]
pub struct Discount {
    pub code: DiscountCode,
    pub name: String,
    pub basis: BigDecimal,
    pub amount: BigDecimal,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricedLineItem {
    pub product_id: String,
    pub unit_price: BigDecimal,
    pub quantity: u32,
    pub subtotal: BigDecimal,
    pub item_discounts: Vec<Discount>,
    pub total: BigDecimal,
}

impl PricedLineItem {
    /// An unpriced shell; subtotal, discounts and total are filled in by the
    /// discount engine.
    pub fn new(product_id: impl Into<String>, unit_price: BigDecimal, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            unit_price,
            quantity,
            subtotal: BigDecimal::from(0),
            item_discounts: Vec::new(),
            total: BigDecimal::from(0),
        }
    }
}

/// A line item whose product has already been looked up.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLineItem {
    pub item: PricedLineItem,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub currency: String,
    pub items: Vec<PricedLineItem>,
    pub discounts: Vec<Discount>,
    pub total: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub id: Uuid,
    pub order: Order,
    pub expiration: DateTime<Utc>,
}

impl Quote {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration <= now
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteCreated {
    pub quote_id: Uuid,
    pub order: Order,
}
