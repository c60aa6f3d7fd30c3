pub mod discount;
pub mod errors;
pub mod money;
pub mod order;
pub mod ports;
