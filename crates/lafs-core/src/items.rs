//! Item profile generation.

use rand::distributions::Bernoulli;
use rand::Rng;
use rand_distr::Distribution;
use tracing::info;

use crate::error::Result;
use crate::params::{ParameterSet, DEPENDENT_ITEM_PROPENSITY};
use crate::profile::ItemProfile;

/// Draws binary factor memberships for every item.
pub struct ItemProfileGenerator<'a> {
    params: &'a ParameterSet,
}

impl<'a> ItemProfileGenerator<'a> {
    /// Creates a generator borrowing the run parameters; they are validated
    /// on every `generate` call.
    #[must_use]
    pub fn new(params: &'a ParameterSet) -> Self {
        Self { params }
    }

    /// Generates profiles for items `0..num_items`.
    ///
    /// Factors are drawn in index order per item: with `items_dependency`
    /// on, factor 1 uses [`DEPENDENT_ITEM_PROPENSITY`] whenever factor 0 came
    /// out set.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<ItemProfile>> {
        let params = self.params;
        params.validate()?;
        let configured = (0..params.num_factors)
            .map(|f| Bernoulli::new(params.item_propensity(f)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let dependent = Bernoulli::new(DEPENDENT_ITEM_PROPENSITY)?;

        let mut items = Vec::with_capacity(params.num_items);
        for _ in 0..params.num_items {
            let mut memberships = Vec::with_capacity(params.num_factors);
            for (factor, distribution) in configured.iter().enumerate() {
                let distribution = if params.items_dependency && factor == 1 && memberships[0] {
                    &dependent
                } else {
                    distribution
                };
                memberships.push(distribution.sample(rng));
            }
            items.push(ItemProfile { memberships });
        }

        info!(
            items = items.len(),
            dependency = params.items_dependency,
            "Generated item profiles"
        );
        Ok(items)
    }
}
