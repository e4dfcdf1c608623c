//! Customers domain layer: entities and wallet rules

pub mod entities;
