//! Patient record persistence and the operations built on it.

pub mod patients;
pub mod store;
