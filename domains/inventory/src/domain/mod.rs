//! Inventory domain layer: entities and stock rules

pub mod entities;
