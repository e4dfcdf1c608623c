//! Repository implementations for the reviews domain

pub mod reviews;

pub use reviews::ReviewRepository;
