//! Candidate scoring, ranking and truncation.
//!
//! For every user a candidate pool is sampled without replacement, each
//! candidate is scored as `dot(user, item) - discount`, and the pool is
//! ranked by descending score and cut to the delivered list length.
//!
//! The discount of a candidate is the mean of one draw per active agent
//! factor of the item, using that agent's discount distribution. Items with
//! no active agent factor are not discounted.

use rand::seq::index;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::factors::{dot, LatentFactors};
use crate::params::ParameterSet;
use crate::profile::ItemProfile;

/// One delivered recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Recipient user id.
    pub user_id: usize,
    /// Recommended item id.
    pub item_id: usize,
    /// Discounted score.
    pub score: f64,
}

/// Delivered lists of every user, in user id order and rank order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    lists: Vec<Vec<Rating>>,
}

impl Ratings {
    /// Wraps per-user lists that are already ranked.
    #[must_use]
    pub fn from_lists(lists: Vec<Vec<Rating>>) -> Self {
        Self { lists }
    }

    /// Ranked list of user `user_id`, empty for unknown users.
    #[must_use]
    pub fn for_user(&self, user_id: usize) -> &[Rating] {
        self.lists.get(user_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Per-user lists.
    #[must_use]
    pub fn lists(&self) -> &[Vec<Rating>] {
        &self.lists
    }

    /// All ratings, user by user, in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &Rating> {
        self.lists.iter().flatten()
    }

    /// Total number of ratings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    /// Returns true if no user has any rating.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }

    /// Number of users with a list.
    #[must_use]
    pub fn num_users(&self) -> usize {
        self.lists.len()
    }
}

/// Produces the ranked, truncated recommendation lists.
pub struct RatingEngine<'a> {
    params: &'a ParameterSet,
    items: &'a [ItemProfile],
    user_factors: &'a LatentFactors,
    item_factors: &'a LatentFactors,
}

impl<'a> RatingEngine<'a> {
    /// Creates an engine over generated items and latent factors.
    #[must_use]
    pub fn new(
        params: &'a ParameterSet,
        items: &'a [ItemProfile],
        user_factors: &'a LatentFactors,
        item_factors: &'a LatentFactors,
    ) -> Self {
        Self {
            params,
            items,
            user_factors,
            item_factors,
        }
    }

    /// Scores, ranks and truncates a candidate pool for every user.
    ///
    /// Fails with [`Error::InvalidParameter`] when the parameters are invalid
    /// or the item slices do not hold exactly `num_items` entries.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Ratings> {
        self.params.validate()?;
        let num_items = self.params.num_items;
        if self.items.len() != num_items {
            return Err(Error::invalid(
                "items",
                format!("{} item profiles for num_items ({num_items})", self.items.len()),
            ));
        }
        if self.item_factors.len() != num_items {
            return Err(Error::invalid(
                "item_factors",
                format!(
                    "{} item latent rows for num_items ({num_items})",
                    self.item_factors.len()
                ),
            ));
        }

        let discounts = self
            .params
            .agent_discount
            .iter()
            .map(|d| Normal::new(d.mean, d.std_dev))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut lists = Vec::with_capacity(self.user_factors.len());
        let mut discounted = 0_usize;
        for user_id in 0..self.user_factors.len() {
            let (list, user_discounted) = self.rank_user(user_id, &discounts, rng);
            discounted += user_discounted;
            lists.push(list);
        }

        let ratings = Ratings { lists };
        debug!(discounted, "candidates with agent discount");
        info!(
            users = ratings.num_users(),
            ratings = ratings.len(),
            "Generated ratings"
        );
        Ok(ratings)
    }

    fn rank_user<R: Rng + ?Sized>(
        &self,
        user_id: usize,
        discounts: &[Normal<f64>],
        rng: &mut R,
    ) -> (Vec<Rating>, usize) {
        let user_factor = self.user_factors.row(user_id);
        let pool = index::sample(rng, self.params.num_items, self.params.initial_list_size);

        let mut discounted = 0;
        let mut scored = Vec::with_capacity(pool.len());
        for item_id in pool.iter() {
            let score = dot(user_factor, self.item_factors.row(item_id));
            let discount = match self.draw_discount(&self.items[item_id], discounts, rng) {
                Some(d) => {
                    discounted += 1;
                    d
                }
                None => 0.0,
            };
            scored.push(Rating {
                user_id,
                item_id,
                score: score - discount,
            });
        }

        // Stable: equal scores keep pool order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(self.params.recommendation_size);
        (scored, discounted)
    }

    /// Mean of one draw per active agent factor, `None` when the item has no
    /// active agent factor or no discounts are configured.
    fn draw_discount<R: Rng + ?Sized>(
        &self,
        item: &ItemProfile,
        discounts: &[Normal<f64>],
        rng: &mut R,
    ) -> Option<f64> {
        let mut total = 0.0;
        let mut count = 0_u32;
        for (factor, distribution) in discounts.iter().enumerate() {
            if item.has(factor) {
                total += distribution.sample(rng);
                count += 1;
            }
        }
        (count > 0).then(|| total / f64::from(count))
    }
}
