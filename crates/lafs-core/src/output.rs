//! CSV serialization of a generated [`Dataset`].

use std::fs;
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};
use tracing::info;

use crate::config::OutputConfig;
use crate::error::Result;
use crate::factors::LatentFactors;
use crate::pipeline::Dataset;
use crate::profile::{ItemProfile, UserProfile};
use crate::ratings::Ratings;

/// Normalized user profiles, one row per (user, factor).
pub const COMPATIBILITIES_FILE: &str = "compatibilities_users_factors.csv";
/// Item profiles, one row per (item, factor), no header.
pub const ITEMS_FACTORS_FILE: &str = "items_factors.csv";
/// Dense user latent matrix, no header.
pub const USER_LATENT_FILE: &str = "user_latent_factors.csv";
/// Dense item latent matrix, no header.
pub const ITEM_LATENT_FILE: &str = "item_latent_factors.csv";
/// Delivered ratings in per-user rank order.
pub const RATINGS_FILE: &str = "ratings.csv";

/// Writes dataset files into one directory.
pub struct DatasetWriter {
    config: OutputConfig,
}

impl DatasetWriter {
    /// Creates a writer for `config`.
    #[must_use]
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Writer with every file enabled into `dir`.
    #[must_use]
    pub fn to_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(OutputConfig {
            dir: dir.into(),
            ..OutputConfig::default()
        })
    }

    /// Writes the enabled files and returns their paths in writing order.
    pub fn write(&self, dataset: &Dataset) -> Result<Vec<PathBuf>> {
        let dir = &self.config.dir;
        fs::create_dir_all(dir)?;
        let mut written = Vec::new();

        if self.config.write_profiles {
            written.push(write_compatibilities(
                &dir.join(COMPATIBILITIES_FILE),
                &dataset.user_profiles,
            )?);
            written.push(write_item_factors(
                &dir.join(ITEMS_FACTORS_FILE),
                &dataset.item_profiles,
            )?);
        }
        if self.config.write_latent_factors {
            written.push(write_matrix(&dir.join(USER_LATENT_FILE), &dataset.user_factors)?);
            written.push(write_matrix(&dir.join(ITEM_LATENT_FILE), &dataset.item_factors)?);
        }
        written.push(write_ratings(&dir.join(RATINGS_FILE), &dataset.ratings)?);

        info!(files = written.len(), dir = %dir.display(), "Wrote dataset");
        Ok(written)
    }
}

fn headerless(path: &Path) -> Result<Writer<fs::File>> {
    Ok(WriterBuilder::new().has_headers(false).from_path(path)?)
}

/// Writes `user_id,agent_id,compatibility` rows covering every factor.
pub fn write_compatibilities(path: &Path, users: &[UserProfile]) -> Result<PathBuf> {
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(["user_id", "agent_id", "compatibility"])?;
    for (user_id, user) in users.iter().enumerate() {
        for (agent_id, compatibility) in user.compatibilities.iter().enumerate() {
            wtr.serialize((user_id, agent_id, compatibility))?;
        }
    }
    wtr.flush()?;
    Ok(path.to_path_buf())
}

/// Writes `item_id,factor_id,value` rows without a header.
pub fn write_item_factors(path: &Path, items: &[ItemProfile]) -> Result<PathBuf> {
    let mut wtr = headerless(path)?;
    for (item_id, item) in items.iter().enumerate() {
        for (factor_id, value) in item.as_bits().enumerate() {
            wtr.serialize((item_id, factor_id, value))?;
        }
    }
    wtr.flush()?;
    Ok(path.to_path_buf())
}

/// Writes a latent matrix, one comma-separated row per entity.
pub fn write_matrix(path: &Path, factors: &LatentFactors) -> Result<PathBuf> {
    let mut wtr = headerless(path)?;
    for row in factors.rows() {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(path.to_path_buf())
}

/// Writes `user_id,item_id,score` rows in per-user rank order.
pub fn write_ratings(path: &Path, ratings: &Ratings) -> Result<PathBuf> {
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(["user_id", "item_id", "score"])?;
    for rating in ratings.iter() {
        wtr.serialize((rating.user_id, rating.item_id, rating.score))?;
    }
    wtr.flush()?;
    Ok(path.to_path_buf())
}
