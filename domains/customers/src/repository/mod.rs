//! Repository implementations for the customers domain

pub mod customers;

pub use customers::CustomerRepository;
