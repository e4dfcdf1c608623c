//! HTTP handlers for the customers domain

pub mod customers;
pub mod wallet;
