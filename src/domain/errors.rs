use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Product with ID {0} not found.")]
    ProductNotFound(String),
    #[error("Invalid or expired quote with ID {0}. Please generate a new quote.")]
    InvalidQuote(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_not_found_carries_the_id() {
        let err = DomainError::ProductNotFound("sku-999".to_string());
        assert_eq!(err.to_string(), "Product with ID sku-999 not found.");
    }

    #[test]
    fn invalid_quote_message_mentions_expiry() {
        let err = DomainError::InvalidQuote("abc".to_string());
        assert!(err.to_string().contains("Invalid or expired quote"));
        assert!(err.to_string().contains("abc"));
    }
}
