use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::Quote;
use crate::domain::ports::{Clock, QuoteRepository};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl<T> From<PoisonError<T>> for DomainError {
    fn from(e: PoisonError<T>) -> Self {
        DomainError::Internal(format!("quote store lock poisoned: {}", e))
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

/// Process-wide quote cache. Expiry is lazy: an expired quote is deleted the
/// first time it is read, or by an explicit `purge_expired`.
#[derive(Clone)]
pub struct InMemoryQuoteRepository {
    quotes: Arc<RwLock<HashMap<Uuid, Quote>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryQuoteRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            quotes: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Number of stored quotes, expired or not.
    pub fn len(&self) -> Result<usize, DomainError> {
        Ok(self.quotes.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len()? == 0)
    }

    pub fn contains(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.quotes.read()?.contains_key(&id))
    }
}

impl QuoteRepository for InMemoryQuoteRepository {
    fn save(&self, quote: Quote) -> Result<(), DomainError> {
        self.quotes.write()?.insert(quote.id, quote);
        Ok(())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Quote>, DomainError> {
        let now = self.clock.now();

        {
            let quotes = self.quotes.read()?;
            match quotes.get(&id) {
                None => return Ok(None),
                Some(quote) if !quote.is_expired_at(now) => return Ok(Some(quote.clone())),
                Some(_) => {}
            }
        }

        // Re-check under the write lock; a concurrent save may have replaced it.
        let mut quotes = self.quotes.write()?;
        match quotes.get(&id) {
            Some(quote) if quote.is_expired_at(now) => {
                quotes.remove(&id);
                log::debug!("evicted expired quote {}", id);
                Ok(None)
            }
            Some(quote) => Ok(Some(quote.clone())),
            None => Ok(None),
        }
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut quotes = self.quotes.write()?;
        let before = quotes.len();
        quotes.retain(|_, quote| !quote.is_expired_at(now));
        Ok(before - quotes.len())
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use chrono::Duration;

    use super::*;
    use crate::domain::order::Order;
    use crate::infrastructure::clock::ManualClock;

    fn setup() -> (ManualClock, InMemoryQuoteRepository) {
        let clock = ManualClock::default();
        let repo = InMemoryQuoteRepository::new(Arc::new(clock.clone()));
        (clock, repo)
    }

    fn make_quote(expiration: DateTime<Utc>) -> Quote {
        Quote {
            id: Uuid::new_v4(),
            order: Order {
                currency: "BRL".to_string(),
                items: vec![],
                discounts: vec![],
                total: BigDecimal::from(0),
            },
            expiration,
        }
    }

    #[test]
    fn save_and_find_valid_quote() {
        let (clock, repo) = setup();
        let quote = make_quote(clock.now() + Duration::minutes(30));

        repo.save(quote.clone()).expect("save failed");

        let found = repo
            .find_by_id(quote.id)
            .expect("find failed")
            .expect("quote should exist");
        assert_eq!(found, quote);
    }

    #[test]
    fn find_by_id_returns_none_for_unknown_id() {
        let (_clock, repo) = setup();

        let result = repo.find_by_id(Uuid::new_v4()).expect("find should not error");

        assert!(result.is_none());
    }

    #[test]
    fn expired_quote_is_deleted_on_read() {
        let (clock, repo) = setup();
        let quote = make_quote(clock.now() + Duration::minutes(30));
        repo.save(quote.clone()).expect("save failed");

        assert!(repo.find_by_id(quote.id).expect("find failed").is_some());

        clock.advance(Duration::minutes(31));

        assert!(repo.find_by_id(quote.id).expect("find failed").is_none());
        assert!(!repo.contains(quote.id).expect("contains failed"));
    }

    #[test]
    fn quote_expiring_exactly_now_is_not_returned() {
        let (clock, repo) = setup();
        let quote = make_quote(clock.now());
        repo.save(quote.clone()).expect("save failed");

        assert!(repo.find_by_id(quote.id).expect("find failed").is_none());
        assert!(repo.is_empty().expect("is_empty failed"));
    }

    #[test]
    fn expired_quote_stays_until_read() {
        let (clock, repo) = setup();
        let quote = make_quote(clock.now() + Duration::minutes(1));
        repo.save(quote.clone()).expect("save failed");

        clock.advance(Duration::minutes(5));

        assert!(repo.contains(quote.id).expect("contains failed"));
    }

    #[test]
    fn save_overwrites_existing_quote() {
        let (clock, repo) = setup();
        let mut quote = make_quote(clock.now() + Duration::minutes(30));
        repo.save(quote.clone()).expect("save failed");

        quote.order.total = BigDecimal::from(42);
        repo.save(quote.clone()).expect("save failed");

        let found = repo
            .find_by_id(quote.id)
            .expect("find failed")
            .expect("quote should exist");
        assert_eq!(found.order.total, BigDecimal::from(42));
        assert_eq!(repo.len().expect("len failed"), 1);
    }

    #[test]
    fn purge_expired_removes_only_expired_quotes() {
        let (clock, repo) = setup();
        let short = make_quote(clock.now() + Duration::minutes(1));
        let long = make_quote(clock.now() + Duration::minutes(30));
        repo.save(short.clone()).expect("save failed");
        repo.save(long.clone()).expect("save failed");

        clock.advance(Duration::minutes(2));
        let removed = repo.purge_expired(clock.now()).expect("purge failed");

        assert_eq!(removed, 1);
        assert!(!repo.contains(short.id).expect("contains failed"));
        assert!(repo.contains(long.id).expect("contains failed"));
    }
}
