use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::order::{Product, Quote};

pub trait ProductCatalog: Send + Sync + 'static {
    fn find_by_id(&self, id: &str) -> Option<Product>;
}

/// Time-bounded quote storage. Expired quotes are never returned and are
/// evicted when read.
pub trait QuoteRepository: Send + Sync + 'static {
    fn save(&self, quote: Quote) -> Result<(), DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Quote>, DomainError>;
    /// Drop every quote expired at `now`, returning how many were removed.
    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}
