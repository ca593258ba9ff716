//! Model implementations.

pub mod mnl;
