//! Route handlers grouped by resource.

pub mod carts;
pub mod categories;
pub mod orders;
pub mod payments;
pub mod products;
pub mod tokens;
pub mod users;
