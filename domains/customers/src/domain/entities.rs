//! Domain entities for the customers domain

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Wallet rule violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Not enough money in wallet")]
    InsufficientFunds { wallet: Decimal },

    #[error("Wallet balance cannot be negative")]
    NegativeBalance,
}

/// Customer entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub wallet: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(name: String, email: String, wallet: Decimal) -> Result<Self, WalletError> {
        ensure_non_negative(wallet)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            email,
            wallet,
            created_at: Utc::now(),
        })
    }

    /// Overwrite the balance directly, as an administrative edit
    pub fn set_wallet(&mut self, wallet: Decimal) -> Result<(), WalletError> {
        ensure_non_negative(wallet)?;
        self.wallet = wallet;
        Ok(())
    }

    /// Balance after taking `amount` out of the wallet
    pub fn deduct(&self, amount: Decimal) -> Result<Decimal, WalletError> {
        ensure_positive(amount)?;

        if self.wallet < amount {
            return Err(WalletError::InsufficientFunds {
                wallet: self.wallet,
            });
        }

        Ok(self.wallet - amount)
    }

    /// Balance after adding `amount` to the wallet
    pub fn credit(&self, amount: Decimal) -> Result<Decimal, WalletError> {
        ensure_positive(amount)?;
        Ok(self.wallet + amount)
    }
}

fn ensure_non_negative(wallet: Decimal) -> Result<(), WalletError> {
    if wallet < Decimal::ZERO {
        return Err(WalletError::NegativeBalance);
    }
    Ok(())
}

fn ensure_positive(amount: Decimal) -> Result<(), WalletError> {
    if amount <= Decimal::ZERO {
        return Err(WalletError::NonPositiveAmount);
    }
    Ok(())
}
