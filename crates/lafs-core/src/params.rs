//! Generation parameters and their validation.
//!
//! A [`ParameterSet`] fully describes one simulation run: population sizes,
//! factor layout, the propensity distributions users and items are drawn
//! from, and the agent discount rules applied while scoring. It is plain data;
//! nothing in it changes once generation starts.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Inclusion probability used for every item factor when none is configured.
pub const DEFAULT_ITEM_PROPENSITY: f64 = 0.5;

/// Distribution used for every user factor of a group without propensities.
pub const DEFAULT_USER_PROPENSITY: NormalParams = NormalParams {
    mean: 0.0,
    std_dev: 1.0,
};

/// Inclusion probability of item factor 1 when factor 0 is set and
/// `items_dependency` is enabled.
pub const DEPENDENT_ITEM_PROPENSITY: f64 = 0.9;

/// Mean and standard deviation of a normal distribution.
///
/// Used for user propensities and agent discounts. Deserializes from either a
/// `[mean, std_dev]` pair or a `{ mean, std_dev }` table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "NormalParamsRepr")]
pub struct NormalParams {
    /// Location of the distribution.
    pub mean: f64,
    /// Spread of the distribution. Must be finite and non-negative.
    pub std_dev: f64,
}

impl NormalParams {
    /// Creates a new parameter pair.
    #[must_use]
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    fn validate(&self, field: &str) -> Result<()> {
        if !self.mean.is_finite() {
            return Err(Error::invalid(field, format!("mean {} is not finite", self.mean)));
        }
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(Error::invalid(
                field,
                format!("std_dev {} must be finite and >= 0", self.std_dev),
            ));
        }
        Ok(())
    }
}

impl From<(f64, f64)> for NormalParams {
    fn from((mean, std_dev): (f64, f64)) -> Self {
        Self { mean, std_dev }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NormalParamsRepr {
    Pair(f64, f64),
    Named { mean: f64, std_dev: f64 },
}

impl From<NormalParamsRepr> for NormalParams {
    fn from(repr: NormalParamsRepr) -> Self {
        match repr {
            NormalParamsRepr::Pair(mean, std_dev) | NormalParamsRepr::Named { mean, std_dev } => {
                Self { mean, std_dev }
            }
        }
    }
}

fn default_std_dev_factors() -> f64 {
    1.0
}

/// Parameters of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Number of items in the catalogue.
    pub num_items: usize,
    /// Length of every profile and latent vector.
    pub num_factors: usize,
    /// Per-factor inclusion probability for items. Defaults to
    /// [`DEFAULT_ITEM_PROPENSITY`] for every factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_feature_propensities: Option<Vec<f64>>,
    /// Spread of every latent factor draw.
    #[serde(default = "default_std_dev_factors")]
    pub std_dev_factors: f64,
    /// The first `num_agents` factor positions are agent (protected) factors.
    #[serde(default)]
    pub num_agents: usize,
    /// One discount distribution per agent factor, or empty for no discount.
    #[serde(default)]
    pub agent_discount: Vec<NormalParams>,
    /// Makes item factor 1 likelier when item factor 0 is set.
    #[serde(default)]
    pub items_dependency: bool,
    /// Size of each user propensity group, in user id order.
    pub num_users_per_propensity: Vec<usize>,
    /// Per-group, per-factor user propensities. Groups without an entry fall
    /// back to [`DEFAULT_USER_PROPENSITY`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_feature_propensities: Option<Vec<Vec<NormalParams>>>,
    /// Candidate pool size per user.
    pub initial_list_size: usize,
    /// Delivered list length per user.
    pub recommendation_size: usize,
}

impl ParameterSet {
    /// Creates a parameter set with one default user group and no agents.
    ///
    /// Candidate pool and list sizes both start at `num_items`; adjust them
    /// with the `with_*` builders.
    #[must_use]
    pub fn new(num_items: usize, num_factors: usize, num_users: usize) -> Self {
        Self {
            num_items,
            num_factors,
            item_feature_propensities: None,
            std_dev_factors: default_std_dev_factors(),
            num_agents: 0,
            agent_discount: Vec::new(),
            items_dependency: false,
            num_users_per_propensity: vec![num_users],
            user_feature_propensities: None,
            initial_list_size: num_items,
            recommendation_size: num_items,
        }
    }

    /// Sets the agent factor count and their discounts.
    #[must_use]
    pub fn with_agents(mut self, num_agents: usize, agent_discount: Vec<NormalParams>) -> Self {
        self.num_agents = num_agents;
        self.agent_discount = agent_discount;
        self
    }

    /// Sets candidate pool and delivered list sizes.
    #[must_use]
    pub fn with_list_sizes(mut self, initial_list_size: usize, recommendation_size: usize) -> Self {
        self.initial_list_size = initial_list_size;
        self.recommendation_size = recommendation_size;
        self
    }

    /// Sets per-factor item inclusion probabilities.
    #[must_use]
    pub fn with_item_propensities(mut self, propensities: Vec<f64>) -> Self {
        self.item_feature_propensities = Some(propensities);
        self
    }

    /// Sets user groups and their propensities.
    #[must_use]
    pub fn with_user_groups(
        mut self,
        sizes: Vec<usize>,
        propensities: Option<Vec<Vec<NormalParams>>>,
    ) -> Self {
        self.num_users_per_propensity = sizes;
        self.user_feature_propensities = propensities;
        self
    }

    /// Enables or disables the factor 0 → factor 1 item dependency.
    #[must_use]
    pub fn with_items_dependency(mut self, enabled: bool) -> Self {
        self.items_dependency = enabled;
        self
    }

    /// Sets the latent factor spread.
    #[must_use]
    pub fn with_std_dev_factors(mut self, std_dev: f64) -> Self {
        self.std_dev_factors = std_dev;
        self
    }

    /// Total number of users across all propensity groups.
    #[must_use]
    pub fn num_users(&self) -> usize {
        self.num_users_per_propensity.iter().sum()
    }

    /// Number of ratings delivered per user.
    #[must_use]
    pub fn kept_list_len(&self) -> usize {
        self.recommendation_size.min(self.initial_list_size)
    }

    /// Whether factor position `factor` is an agent factor.
    #[must_use]
    pub fn is_agent(&self, factor: usize) -> bool {
        factor < self.num_agents
    }

    /// Configured inclusion probability of item factor `factor`.
    #[must_use]
    pub fn item_propensity(&self, factor: usize) -> f64 {
        self.item_feature_propensities
            .as_ref()
            .and_then(|p| p.get(factor).copied())
            .unwrap_or(DEFAULT_ITEM_PROPENSITY)
    }

    /// Propensities of user group `group`, or the default vector when the
    /// group has none configured.
    #[must_use]
    pub fn user_propensities(&self, group: usize) -> Cow<'_, [NormalParams]> {
        match self
            .user_feature_propensities
            .as_ref()
            .and_then(|groups| groups.get(group))
        {
            Some(props) => Cow::Borrowed(props.as_slice()),
            None => Cow::Owned(vec![DEFAULT_USER_PROPENSITY; self.num_factors]),
        }
    }

    /// Number of configured groups that fall back to default propensities.
    #[must_use]
    pub fn defaulted_groups(&self) -> usize {
        let configured = self.user_feature_propensities.as_ref().map_or(0, Vec::len);
        self.num_users_per_propensity
            .len()
            .saturating_sub(configured)
    }

    /// Checks every constraint a run depends on.
    ///
    /// Fails with [`Error::InvalidParameter`] naming the first offending
    /// field. Fewer propensity groups than user groups is not an error: the
    /// remaining groups use [`DEFAULT_USER_PROPENSITY`].
    pub fn validate(&self) -> Result<()> {
        if self.num_items == 0 {
            return Err(Error::invalid("num_items", "must be positive"));
        }
        if self.num_factors == 0 {
            return Err(Error::invalid("num_factors", "must be positive"));
        }
        if self.num_agents > self.num_factors {
            return Err(Error::invalid(
                "num_agents",
                format!(
                    "{} exceeds num_factors ({})",
                    self.num_agents, self.num_factors
                ),
            ));
        }
        if !self.std_dev_factors.is_finite() || self.std_dev_factors < 0.0 {
            return Err(Error::invalid(
                "std_dev_factors",
                format!("{} must be finite and >= 0", self.std_dev_factors),
            ));
        }

        if let Some(props) = &self.item_feature_propensities {
            if props.len() != self.num_factors {
                return Err(Error::invalid(
                    "item_feature_propensities",
                    format!(
                        "has {} entries, expected num_factors ({})",
                        props.len(),
                        self.num_factors
                    ),
                ));
            }
            for (i, &p) in props.iter().enumerate() {
                if !(0.0..=1.0).contains(&p) {
                    return Err(Error::invalid(
                        format!("item_feature_propensities[{i}]"),
                        format!("probability {p} outside [0, 1]"),
                    ));
                }
            }
        }

        if !self.agent_discount.is_empty() && self.agent_discount.len() != self.num_agents {
            return Err(Error::invalid(
                "agent_discount",
                format!(
                    "has {} entries, expected none or num_agents ({})",
                    self.agent_discount.len(),
                    self.num_agents
                ),
            ));
        }
        for (i, discount) in self.agent_discount.iter().enumerate() {
            discount.validate(&format!("agent_discount[{i}]"))?;
        }

        if let Some(groups) = &self.user_feature_propensities {
            for (g, props) in groups.iter().enumerate() {
                if props.len() != self.num_factors {
                    return Err(Error::invalid(
                        format!("user_feature_propensities[{g}]"),
                        format!(
                            "has {} entries, expected num_factors ({})",
                            props.len(),
                            self.num_factors
                        ),
                    ));
                }
                for (f, p) in props.iter().enumerate() {
                    p.validate(&format!("user_feature_propensities[{g}][{f}]"))?;
                }
            }
        }

        if self.initial_list_size == 0 {
            return Err(Error::invalid("initial_list_size", "must be positive"));
        }
        if self.initial_list_size > self.num_items {
            return Err(Error::invalid(
                "initial_list_size",
                format!(
                    "candidate pool of {} exceeds num_items ({})",
                    self.initial_list_size, self.num_items
                ),
            ));
        }
        if self.recommendation_size == 0 {
            return Err(Error::invalid("recommendation_size", "must be positive"));
        }

        Ok(())
    }
}
