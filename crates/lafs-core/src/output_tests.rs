//! Tests for CSV dataset output.

use std::fs;

use tempfile::TempDir;

use crate::config::OutputConfig;
use crate::factors::LatentFactors;
use crate::output::{
    DatasetWriter, COMPATIBILITIES_FILE, ITEMS_FACTORS_FILE, ITEM_LATENT_FILE, RATINGS_FILE,
    USER_LATENT_FILE,
};
use crate::pipeline::Dataset;
use crate::profile::{ItemProfile, UserProfile};
use crate::ratings::{Rating, Ratings};

fn tiny_dataset() -> Dataset {
    let ratings = Ratings::from_lists(vec![vec![
        Rating {
            user_id: 0,
            item_id: 1,
            score: 0.75,
        },
        Rating {
            user_id: 0,
            item_id: 0,
            score: -0.5,
        },
    ]]);

    Dataset {
        user_profiles: vec![UserProfile {
            compatibilities: vec![0.0, 1.0],
            group: 0,
        }],
        item_profiles: vec![
            ItemProfile {
                memberships: vec![true, false],
            },
            ItemProfile {
                memberships: vec![false, true],
            },
        ],
        user_factors: LatentFactors::from_rows(vec![vec![0.5, -1.0]]),
        item_factors: LatentFactors::from_rows(vec![vec![1.0, 0.0], vec![0.25, 2.0]]),
        ratings,
    }
}

#[test]
fn test_writes_all_files() {
    let dir = TempDir::new().expect("temp dir");
    let written = DatasetWriter::to_dir(dir.path())
        .write(&tiny_dataset())
        .expect("write succeeds");
    assert_eq!(written.len(), 5);

    let read = |name: &str| fs::read_to_string(dir.path().join(name)).expect("file exists");

    assert_eq!(
        read(COMPATIBILITIES_FILE),
        "user_id,agent_id,compatibility\n0,0,0.0\n0,1,1.0\n"
    );
    assert_eq!(read(ITEMS_FACTORS_FILE), "0,0,1\n0,1,0\n1,0,0\n1,1,1\n");
    assert_eq!(read(USER_LATENT_FILE), "0.5,-1.0\n");
    assert_eq!(read(ITEM_LATENT_FILE), "1.0,0.0\n0.25,2.0\n");
    assert_eq!(
        read(RATINGS_FILE),
        "user_id,item_id,score\n0,1,0.75\n0,0,-0.5\n"
    );
}

#[test]
fn test_optional_files_skipped() {
    let dir = TempDir::new().expect("temp dir");
    let config = OutputConfig {
        dir: dir.path().join("nested"),
        write_profiles: false,
        write_latent_factors: false,
    };
    let written = DatasetWriter::new(config)
        .write(&tiny_dataset())
        .expect("write succeeds");

    assert_eq!(written, vec![dir.path().join("nested").join(RATINGS_FILE)]);
    assert!(!dir.path().join("nested").join(USER_LATENT_FILE).exists());
}

#[test]
fn test_ratings_round_trip_through_csv_reader() {
    let dir = TempDir::new().expect("temp dir");
    DatasetWriter::to_dir(dir.path())
        .write(&tiny_dataset())
        .expect("write succeeds");

    let mut rdr = csv::Reader::from_path(dir.path().join(RATINGS_FILE)).expect("readable");
    let rows: Vec<(usize, usize, f64)> = rdr
        .deserialize()
        .collect::<Result<_, _>>()
        .expect("well-formed rows");
    let expected: Vec<(usize, usize, f64)> = tiny_dataset()
        .ratings
        .iter()
        .map(|&Rating { user_id, item_id, score }| (user_id, item_id, score))
        .collect();
    assert_eq!(rows, expected);
}
