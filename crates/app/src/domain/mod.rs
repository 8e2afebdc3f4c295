//! Product Catalog Domain Concerns

pub mod health;
pub mod products;
