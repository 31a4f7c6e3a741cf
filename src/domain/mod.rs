//! Domain values shared by the client layers.

pub mod customer;
pub mod page;
pub mod types;
