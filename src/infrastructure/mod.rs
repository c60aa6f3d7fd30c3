pub mod clock;
pub mod product_catalog;
pub mod quote_repo;
pub mod quote_sweeper;
