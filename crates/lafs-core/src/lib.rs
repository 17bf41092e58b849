//! # LAFS Core
//!
//! Latent factor simulation of recommender-system output.
//!
//! Given statistical descriptions of user and item populations, LAFS draws
//! user affinity profiles and binary item category memberships, derives
//! latent factor vectors from them, and produces a ranked top-K
//! recommendation list per user. Items that belong to protected "agent"
//! categories can have their scores discounted, giving fairness-aware
//! rerankers a ground truth whose propensities and discounts are fully known.
//!
//! ## Quick Start
//!
//! ```rust
//! use lafs_core::{DataGenerator, NormalParams, ParameterSet};
//!
//! let params = ParameterSet::new(100, 4, 20)
//!     .with_agents(2, vec![NormalParams::new(0.5, 0.1), NormalParams::new(0.0, 0.0)])
//!     .with_list_sizes(30, 10);
//!
//! let dataset = DataGenerator::from_seed(42).generate(&params)?;
//! assert_eq!(dataset.ratings.for_user(0).len(), 10);
//! # Ok::<(), lafs_core::Error>(())
//! ```

#![warn(missing_docs)]
#![cfg_attr(
    test,
    allow(
        clippy::float_cmp,
        clippy::cast_precision_loss,
        clippy::uninlined_format_args
    )
)]

pub mod config;
pub mod error;
pub mod factors;
#[cfg(test)]
mod factors_tests;
pub mod items;
pub mod output;
#[cfg(test)]
mod output_tests;
pub mod params;
pub mod pipeline;
pub mod profile;
pub mod ratings;
pub mod users;

pub use config::{GeneratorConfig, LoggingConfig, OutputConfig};
pub use error::{Error, Result};
pub use factors::{LatentFactorGenerator, LatentFactors};
pub use items::ItemProfileGenerator;
pub use output::DatasetWriter;
pub use params::{NormalParams, ParameterSet};
pub use pipeline::{DataGenerator, Dataset, DatasetSummary};
pub use profile::{ItemProfile, Profile, UserProfile};
pub use ratings::{Rating, RatingEngine, Ratings};
pub use users::UserProfileGenerator;
