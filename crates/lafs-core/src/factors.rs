//! Latent factor derivation.
//!
//! Users and items follow the same rule. Agent positions are drawn around the
//! profile's own value, every other position around zero, all with
//! `std_dev_factors` spread. Dot products of the resulting vectors therefore
//! reward alignment on agent factors and are noise elsewhere.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::params::ParameterSet;
use crate::profile::Profile;

/// Dense latent factor matrix, one row per user or item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatentFactors {
    rows: Vec<Vec<f64>>,
}

impl LatentFactors {
    /// Wraps precomputed rows.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Latent vector of entity `id`.
    #[must_use]
    pub fn row(&self, id: usize) -> &[f64] {
        &self.rows[id]
    }

    /// All rows in id order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Maps profiles to latent vectors.
pub struct LatentFactorGenerator<'a> {
    params: &'a ParameterSet,
}

impl<'a> LatentFactorGenerator<'a> {
    /// Creates a generator borrowing the run parameters; they are validated
    /// on every `generate` call.
    #[must_use]
    pub fn new(params: &'a ParameterSet) -> Self {
        Self { params }
    }

    /// Derives one latent vector per profile, in input order.
    pub fn generate<P, R>(&self, profiles: &[P], rng: &mut R) -> Result<LatentFactors>
    where
        P: Profile,
        R: Rng + ?Sized,
    {
        self.params.validate()?;
        let spread = self.params.std_dev_factors;
        let noise = Normal::new(0.0, spread)?;

        let mut rows = Vec::with_capacity(profiles.len());
        for profile in profiles {
            let mut row = Vec::with_capacity(profile.num_factors());
            for factor in 0..profile.num_factors() {
                let value = if self.params.is_agent(factor) {
                    Normal::new(profile.factor_value(factor), spread)?.sample(rng)
                } else {
                    noise.sample(rng)
                };
                row.push(value);
            }
            rows.push(row);
        }

        info!(rows = rows.len(), "Generated latent factors");
        Ok(LatentFactors { rows })
    }
}

/// Dot product of two equal-length vectors.
#[must_use]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
