//! Target addresses the search compares derived addresses against.
//!
//! The registry is administrative state: the search only reads it. It always starts with at least
//! one target (see [`TargetRegistry::with_defaults`]).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::constants::{
    DEFAULT_TARGET_ADDRESS, DEFAULT_TARGET_LABEL, TARGET_ADDRESS_MAX_LEN, TARGET_ADDRESS_MIN_LEN,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error(
        "invalid target address '{address}': length must be between {min} and {max} characters"
    )]
    InvalidAddress {
        address: String,
        min: usize,
        max: usize,
    },

    #[error("target address already registered: {address}")]
    Duplicate { address: String },

    #[error("target not found: {id}")]
    NotFound { id: Uuid },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAddress {
    pub id: Uuid,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub added_at: DateTime<Utc>,
}

/// Checks the structural constraints on a target address.
pub fn validate_address(address: &str) -> Result<(), TargetError> {
    let len = address.chars().count();
    if !(TARGET_ADDRESS_MIN_LEN..=TARGET_ADDRESS_MAX_LEN).contains(&len)
        || address.chars().any(char::is_whitespace)
    {
        return Err(TargetError::InvalidAddress {
            address: address.to_string(),
            min: TARGET_ADDRESS_MIN_LEN,
            max: TARGET_ADDRESS_MAX_LEN,
        });
    }
    Ok(())
}

/// Ordered set of target addresses (unique by address).
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: RwLock<Vec<TargetAddress>>,
}

impl TargetRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in default target.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        // The built-in default satisfies `validate_address`.
        let _ = registry.add(DEFAULT_TARGET_ADDRESS, Some(DEFAULT_TARGET_LABEL.to_string()));
        registry
    }

    /// Creates a registry from configured addresses, falling back to the default when empty.
    pub fn from_addresses<I, S>(addresses: I) -> Result<Self, TargetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let registry = Self::new();
        for address in addresses {
            match registry.add(address.as_ref(), None) {
                Ok(_) | Err(TargetError::Duplicate { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        if registry.is_empty() {
            return Ok(Self::with_defaults());
        }
        Ok(registry)
    }

    /// Registers a new target.
    pub fn add(&self, address: &str, label: Option<String>) -> Result<TargetAddress, TargetError> {
        let address = address.trim();
        validate_address(address)?;

        let mut targets = self.targets.write();
        if targets.iter().any(|t| t.address == address) {
            return Err(TargetError::Duplicate {
                address: address.to_string(),
            });
        }

        let target = TargetAddress {
            id: Uuid::new_v4(),
            address: address.to_string(),
            label: label.filter(|l| !l.trim().is_empty()),
            added_at: Utc::now(),
        };
        targets.push(target.clone());
        Ok(target)
    }

    /// Removes a target by id.
    pub fn remove(&self, id: Uuid) -> Result<TargetAddress, TargetError> {
        let mut targets = self.targets.write();
        let pos = targets
            .iter()
            .position(|t| t.id == id)
            .ok_or(TargetError::NotFound { id })?;
        Ok(targets.remove(pos))
    }

    /// Snapshot of all targets in registration order.
    pub fn list(&self) -> Vec<TargetAddress> {
        self.targets.read().clone()
    }

    /// Returns the target equal to `address`, if any.
    pub fn find_match(&self, address: &str) -> Option<TargetAddress> {
        self.targets
            .read()
            .iter()
            .find(|t| t.address == address)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.targets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.read().is_empty()
    }
}

/// Shared handle to a [`TargetRegistry`].
pub type TargetRegistryHandle = Arc<TargetRegistry>;
