//! Ordered anchor currencies for triangular and base conversion.

use std::str::FromStr;
use std::sync::Arc;

use currencies::{CurrencyCode, DEFAULT_ANCHORS};

use crate::error::DomainError;

/// Immutable, ordered list of intermediate currencies.
///
/// Order is significant: when several anchors could resolve a pair, the one
/// listed first wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorCurrencies(Arc<[CurrencyCode]>);

impl AnchorCurrencies {
    /// Creates an anchor list, rejecting duplicates.
    pub fn new(anchors: Vec<CurrencyCode>) -> Result<Self, DomainError> {
        for (i, anchor) in anchors.iter().enumerate() {
            if anchors[..i].contains(anchor) {
                return Err(DomainError::DuplicateAnchor(*anchor));
            }
        }
        Ok(Self(anchors.into()))
    }

    pub fn iter(&self) -> impl Iterator<Item = CurrencyCode> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[CurrencyCode] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for AnchorCurrencies {
    fn default() -> Self {
        Self(DEFAULT_ANCHORS.into())
    }
}

/// Parses a comma-separated list such as `"USD,EUR,GBP"`.
impl FromStr for AnchorCurrencies {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let anchors = s
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(|code| {
                code.parse::<CurrencyCode>()
                    .map_err(|e| DomainError::InvalidAnchor(e.0))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(anchors)
    }
}

impl std::fmt::Display for AnchorCurrencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let codes: Vec<&str> = self.0.iter().map(|c| c.code()).collect();
        f.write_str(&codes.join(","))
    }
}
