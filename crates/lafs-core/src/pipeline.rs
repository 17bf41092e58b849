//! End-to-end generation pipeline.
//!
//! Stages run strictly in order (users, items, latent factors, ratings) and
//! share one random source that is advanced sequentially. Seeding that source
//! makes a run reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::factors::{LatentFactorGenerator, LatentFactors};
use crate::items::ItemProfileGenerator;
use crate::params::ParameterSet;
use crate::profile::{ItemProfile, Profile, UserProfile};
use crate::ratings::{RatingEngine, Ratings};
use crate::users::UserProfileGenerator;

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    /// Normalized user profiles, indexed by user id.
    pub user_profiles: Vec<UserProfile>,
    /// Binary item profiles, indexed by item id.
    pub item_profiles: Vec<ItemProfile>,
    /// Latent vector per user.
    pub user_factors: LatentFactors,
    /// Latent vector per item.
    pub item_factors: LatentFactors,
    /// Delivered recommendation lists.
    pub ratings: Ratings,
}

/// Entity counts of a [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    /// Number of users.
    pub users: usize,
    /// Number of items.
    pub items: usize,
    /// Factor vector length.
    pub factors: usize,
    /// Total delivered ratings.
    pub ratings: usize,
}

impl Dataset {
    /// Counts the generated entities.
    #[must_use]
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            users: self.user_profiles.len(),
            items: self.item_profiles.len(),
            factors: self
                .item_profiles
                .first()
                .map_or(0, |item| item.memberships.len()),
            ratings: self.ratings.len(),
        }
    }
}

/// Runs the generation stages against an owned random source.
pub struct DataGenerator<R = StdRng> {
    rng: R,
}

impl DataGenerator<StdRng> {
    /// Deterministic generator seeded with `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Seeded when `seed` is given, entropy-seeded otherwise.
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }
}

impl<R: Rng> DataGenerator<R> {
    /// Uses a caller-provided random source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Gives the random source back.
    pub fn into_rng(self) -> R {
        self.rng
    }

    /// Validates `params` and runs every stage.
    pub fn generate(&mut self, params: &ParameterSet) -> Result<Dataset> {
        params.validate()?;
        info!(
            users = params.num_users(),
            items = params.num_items,
            factors = params.num_factors,
            agents = params.num_agents,
            "Starting generation"
        );

        let user_profiles = self.generate_user_profiles(params)?;
        let item_profiles = self.generate_item_profiles(params)?;
        let user_factors = self.generate_latent_factors(params, &user_profiles)?;
        let item_factors = self.generate_latent_factors(params, &item_profiles)?;
        let ratings =
            self.generate_ratings(params, &item_profiles, &user_factors, &item_factors)?;

        Ok(Dataset {
            user_profiles,
            item_profiles,
            user_factors,
            item_factors,
            ratings,
        })
    }

    /// Runs the user stage alone.
    pub fn generate_user_profiles(&mut self, params: &ParameterSet) -> Result<Vec<UserProfile>> {
        UserProfileGenerator::new(params).generate(&mut self.rng)
    }

    /// Runs the item stage alone.
    pub fn generate_item_profiles(&mut self, params: &ParameterSet) -> Result<Vec<ItemProfile>> {
        ItemProfileGenerator::new(params).generate(&mut self.rng)
    }

    /// Derives latent vectors for user or item profiles.
    pub fn generate_latent_factors<P: Profile>(
        &mut self,
        params: &ParameterSet,
        profiles: &[P],
    ) -> Result<LatentFactors> {
        LatentFactorGenerator::new(params).generate(profiles, &mut self.rng)
    }

    /// Runs the rating stage over previously generated items and factors.
    ///
    /// Calling the four stage methods in pipeline order on a fresh generator
    /// reproduces [`DataGenerator::generate`] for the same seed.
    pub fn generate_ratings(
        &mut self,
        params: &ParameterSet,
        items: &[ItemProfile],
        user_factors: &LatentFactors,
        item_factors: &LatentFactors,
    ) -> Result<Ratings> {
        RatingEngine::new(params, items, user_factors, item_factors).generate(&mut self.rng)
    }
}
