//! HTTP handlers for the inventory domain

pub mod inventory;
