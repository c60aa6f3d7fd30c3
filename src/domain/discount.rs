//! Discount pipeline.
//!
//! Rules run in a fixed order against an evolving total:
//!
//! 1. per-item subtotals
//! 2. accessories category discount, per item, gated on cart-wide accessory units
//! 3. cart total from the item totals
//! 4. volume tier on the running total, then the cart-value discount keyed on
//!    the original (pre-discount) subtotal
//!
//! Every amount is rounded to two places after each step. Rate discounts
//! round the binary floating-point product (see [`apply_rate`]).

use std::collections::BTreeMap;

use bigdecimal::{BigDecimal, Zero};
use serde_json::json;

use super::money::{apply_rate, from_cents, round2, CURRENCY};
use super::order::{Category, Discount, DiscountCode, Order, PricedLineItem, ResolvedLineItem};
use super::ports::ProductCatalog;

/// Accessory units must exceed this for the category discount to apply.
pub const ACCESSORIES_UNIT_THRESHOLD: u64 = 5;
const ACCESSORIES_RATE_PCT: i64 = 5;

struct VolumeTier {
    min_units: u64,
    rate_pct: i64,
    code: DiscountCode,
    label: &'static str,
}

// Highest tier first; the first match wins.
static VOLUME_TIERS: [VolumeTier; 3] = [
    VolumeTier {
        min_units: 50,
        rate_pct: 20,
        code: DiscountCode::QuantityTier20Pct,
        label: ">=50",
    },
    VolumeTier {
        min_units: 20,
        rate_pct: 15,
        code: DiscountCode::QuantityTier15Pct,
        label: ">=20",
    },
    VolumeTier {
        min_units: 10,
        rate_pct: 10,
        code: DiscountCode::QuantityTier10Pct,
        label: ">=10",
    },
];

struct CartValueTier {
    threshold: i64,
    amount_cents: i64,
    code: DiscountCode,
}

static CART_VALUE_TIERS: [CartValueTier; 2] = [
    CartValueTier {
        threshold: 2000,
        amount_cents: 15000,
        code: DiscountCode::CartValueFixed150,
    },
    CartValueTier {
        threshold: 1000,
        amount_cents: 5000,
        code: DiscountCode::CartValueFixed50,
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountEngine;

impl DiscountEngine {
    pub fn new() -> Self {
        Self
    }

    /// Price already-resolved line items and apply every discount rule.
    pub fn calculate_discounts(&self, mut items: Vec<ResolvedLineItem>) -> Order {
        let mut total_items: u64 = 0;
        let mut subtotal_original = BigDecimal::zero();
        let mut accessories_units: u64 = 0;

        for resolved in items.iter_mut() {
            let item = &mut resolved.item;
            item.subtotal = round2(&(&item.unit_price * BigDecimal::from(item.quantity)));
            item.total = item.subtotal.clone();
            item.item_discounts = Vec::new();

            subtotal_original = round2(&(&subtotal_original + &item.subtotal));
            total_items += u64::from(item.quantity);
            if resolved.category == Category::Accessories {
                accessories_units += u64::from(item.quantity);
            }
        }

        if accessories_units > ACCESSORIES_UNIT_THRESHOLD {
            for resolved in items
                .iter_mut()
                .filter(|r| r.category == Category::Accessories)
            {
                let item = &mut resolved.item;
                let discount = category_discount(&item.subtotal);
                log::debug!(
                    "{} applied to {}: -{}",
                    discount.code,
                    item.product_id,
                    discount.amount
                );
                item.total = round2(&(&item.total - &discount.amount));
                item.item_discounts.push(discount);
            }
        }

        let mut total = items.iter().fold(BigDecimal::zero(), |acc, r| {
            round2(&(acc + &r.item.total))
        });

        let mut discounts = Vec::new();

        if let Some(discount) = volume_discount(total_items, &total) {
            total = round2(&(&total - &discount.amount));
            discounts.push(discount);
        }

        if let Some(discount) = cart_value_discount(&subtotal_original) {
            total = round2(&(&total - &discount.amount));
            discounts.push(discount);
        }

        for discount in &discounts {
            log::debug!("{} applied to cart: -{}", discount.code, discount.amount);
        }

        Order {
            currency: CURRENCY.to_string(),
            items: items.into_iter().map(|r| r.item).collect(),
            discounts,
            total,
        }
    }

    /// Lenient variant: look up each item's category in `catalog` and skip
    /// items whose product is unknown. Skipped items contribute nothing and
    /// do not appear in the order.
    pub fn calculate_with_catalog<C>(&self, items: Vec<PricedLineItem>, catalog: &C) -> Order
    where
        C: ProductCatalog + ?Sized,
    {
        let resolved = items
            .into_iter()
            .filter_map(|item| match catalog.find_by_id(&item.product_id) {
                Some(product) => Some(ResolvedLineItem {
                    item,
                    category: product.category,
                }),
                None => {
                    log::debug!("skipping unknown product {}", item.product_id);
                    None
                }
            })
            .collect();
        self.calculate_discounts(resolved)
    }
}

fn category_discount(subtotal: &BigDecimal) -> Discount {
    let amount = apply_rate(subtotal, ACCESSORIES_RATE_PCT);
    let mut metadata = BTreeMap::new();
    metadata.insert("category".to_string(), json!(Category::ACCESSORIES));
    metadata.insert("threshold".to_string(), json!(ACCESSORIES_UNIT_THRESHOLD));
    Discount {
        code: DiscountCode::CategoryAccessories5Pct,
        name: "Categoria acessórios 5%".to_string(),
        basis: subtotal.clone(),
        amount,
        metadata,
    }
}

fn volume_discount(total_items: u64, current_total: &BigDecimal) -> Option<Discount> {
    let tier = VOLUME_TIERS.iter().find(|t| total_items >= t.min_units)?;
    let amount = apply_rate(current_total, tier.rate_pct);
    let mut metadata = BTreeMap::new();
    metadata.insert("totalItems".to_string(), json!(total_items));
    metadata.insert("tier".to_string(), json!(tier.label));
    Some(Discount {
        code: tier.code,
        name: format!("Desconto por volume {}%", tier.rate_pct),
        basis: current_total.clone(),
        amount,
        metadata,
    })
}

fn cart_value_discount(subtotal_original: &BigDecimal) -> Option<Discount> {
    let tier = CART_VALUE_TIERS
        .iter()
        .find(|t| *subtotal_original >= BigDecimal::from(t.threshold))?;
    let mut metadata = BTreeMap::new();
    metadata.insert("threshold".to_string(), json!(tier.threshold));
    Some(Discount {
        code: tier.code,
        name: "Desconto por valor do carrinho".to_string(),
        basis: subtotal_original.clone(),
        amount: from_cents(tier.amount_cents),
        metadata,
    })
}
