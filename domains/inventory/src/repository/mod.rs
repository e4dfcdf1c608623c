//! Repository implementations for the inventory domain

pub mod inventory;

pub use inventory::InventoryRepository;
