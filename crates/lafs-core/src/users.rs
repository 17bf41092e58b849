//! User profile generation.
//!
//! Users are drawn group by group from per-factor normal propensities, then
//! every factor column is min-max normalized across the whole population so
//! affinities from different groups are comparable.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::params::ParameterSet;
use crate::profile::UserProfile;

/// Draws and normalizes the user population of a run.
pub struct UserProfileGenerator<'a> {
    params: &'a ParameterSet,
}

impl<'a> UserProfileGenerator<'a> {
    /// Creates a generator borrowing the run parameters; they are validated
    /// on every `generate` call.
    #[must_use]
    pub fn new(params: &'a ParameterSet) -> Self {
        Self { params }
    }

    /// Generates normalized profiles for every user, in user id order.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<UserProfile>> {
        let mut users = self.generate_raw(rng)?;
        let degenerate = normalize_columns(&mut users);
        if !degenerate.is_empty() {
            debug!(columns = ?degenerate, "zero-range user factor columns normalized to 0");
        }
        info!(users = users.len(), "Generated user profiles");
        Ok(users)
    }

    /// Generates raw, unnormalized profiles.
    ///
    /// Groups are emitted in configuration order, users within a group in
    /// generation order; that order defines user ids.
    pub fn generate_raw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<UserProfile>> {
        let params = self.params;
        params.validate()?;
        match &params.user_feature_propensities {
            None => debug!("no user propensities configured, using (0.0, 1.0) for every group"),
            Some(groups) => {
                let defaulted = params.defaulted_groups();
                if defaulted > 0 {
                    warn!(
                        groups = defaulted,
                        "user groups without propensities use the default (0.0, 1.0)"
                    );
                }
                let surplus = groups
                    .len()
                    .saturating_sub(params.num_users_per_propensity.len());
                if surplus > 0 {
                    warn!(groups = surplus, "surplus user propensity groups ignored");
                }
            }
        }

        let mut users = Vec::with_capacity(params.num_users());
        for (group, &group_size) in params.num_users_per_propensity.iter().enumerate() {
            let distributions = params
                .user_propensities(group)
                .iter()
                .map(|p| Normal::new(p.mean, p.std_dev))
                .collect::<std::result::Result<Vec<_>, _>>()?;

            for _ in 0..group_size {
                let compatibilities = distributions
                    .iter()
                    .map(|d| d.sample(&mut *rng))
                    .collect();
                users.push(UserProfile {
                    compatibilities,
                    group,
                });
            }
        }
        Ok(users)
    }
}

/// Min-max normalizes each factor column in place across all users.
///
/// A column whose values are all equal has no range; every user gets `0.0`
/// there. Returns the indices of such columns.
pub fn normalize_columns(users: &mut [UserProfile]) -> Vec<usize> {
    let num_factors = users.first().map_or(0, |u| u.compatibilities.len());
    let mut degenerate = Vec::new();

    for factor in 0..num_factors {
        let (min, max) = users.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), u| {
            let v = u.compatibilities[factor];
            (lo.min(v), hi.max(v))
        });
        let range = max - min;

        if range > 0.0 {
            for user in users.iter_mut() {
                let v = &mut user.compatibilities[factor];
                *v = (*v - min) / range;
            }
        } else {
            for user in users.iter_mut() {
                user.compatibilities[factor] = 0.0;
            }
            degenerate.push(factor);
        }
    }

    degenerate
}
