use std::collections::HashMap;

use crate::domain::money::from_cents;
use crate::domain::order::{Category, Product};
use crate::domain::ports::ProductCatalog;

/// Read-only catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductCatalog {
    products: HashMap<String, Product>,
}

impl InMemoryProductCatalog {
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    /// The catalog the service ships with.
    pub fn seeded() -> Self {
        let product = |id: &str, name: &str, cents: i64, category: &str| Product {
            id: id.to_string(),
            name: name.to_string(),
            unit_price: from_cents(cents),
            category: Category::parse(category),
        };

        Self::new([
            product("sku-001", "Product A", 7990, "electronics"),
            product("sku-002", "Product B", 3990, Category::ACCESSORIES),
            product("sku-003", "Product C", 1990, "books"),
            product("sku-004", "Product D", 150000, "electronics"),
            product("sku-005", "Product E", 500, Category::ACCESSORIES),
        ])
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for InMemoryProductCatalog {
    fn find_by_id(&self, id: &str) -> Option<Product> {
        self.products.get(id).cloned()
    }
}
