//! User and item profile types.

use serde::{Deserialize, Serialize};

/// Read access to a profile vector, shared by users and items so latent
/// factor derivation can treat both the same way.
pub trait Profile {
    /// Number of factor positions.
    fn num_factors(&self) -> usize;

    /// Value at factor position `factor` as a real number.
    fn factor_value(&self, factor: usize) -> f64;
}

/// Per-user factor affinities.
///
/// Raw values come straight from the group's normal propensities; after
/// population-wide normalization every value lies in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// One affinity per factor.
    pub compatibilities: Vec<f64>,
    /// Index of the propensity group the user was drawn from.
    pub group: usize,
}

impl Profile for UserProfile {
    fn num_factors(&self) -> usize {
        self.compatibilities.len()
    }

    fn factor_value(&self, factor: usize) -> f64 {
        self.compatibilities[factor]
    }
}

/// Per-item factor membership flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemProfile {
    /// `true` when the item belongs to the factor's category.
    pub memberships: Vec<bool>,
}

impl ItemProfile {
    /// Whether the item belongs to factor `factor`.
    #[must_use]
    pub fn has(&self, factor: usize) -> bool {
        self.memberships.get(factor).copied().unwrap_or(false)
    }

    /// Membership flags as `0`/`1`, the on-disk representation.
    pub fn as_bits(&self) -> impl Iterator<Item = u8> + '_ {
        self.memberships.iter().map(|&m| u8::from(m))
    }
}

impl Profile for ItemProfile {
    fn num_factors(&self) -> usize {
        self.memberships.len()
    }

    fn factor_value(&self, factor: usize) -> f64 {
        if self.memberships[factor] {
            1.0
        } else {
            0.0
        }
    }
}
