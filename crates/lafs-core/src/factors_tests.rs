//! Tests for latent factor derivation.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::factors::{dot, LatentFactorGenerator, LatentFactors};
use crate::params::ParameterSet;
use crate::profile::{ItemProfile, UserProfile};

#[test]
fn test_zero_spread_copies_agent_values_and_zeroes_the_rest() {
    let params = ParameterSet::new(10, 3, 1)
        .with_agents(2, Vec::new())
        .with_std_dev_factors(0.0);
    let users = vec![UserProfile {
        compatibilities: vec![0.25, 0.75, 0.5],
        group: 0,
    }];
    let mut rng = StdRng::seed_from_u64(4);
    let factors = LatentFactorGenerator::new(&params)
        .generate(&users, &mut rng)
        .expect("generation succeeds");

    assert_eq!(factors.row(0), &[0.25, 0.75, 0.0]);
}

#[test]
fn test_item_agent_factors_centered_on_membership() {
    let params = ParameterSet::new(10, 2, 1)
        .with_agents(1, Vec::new())
        .with_std_dev_factors(0.0);
    let items = vec![
        ItemProfile {
            memberships: vec![true, true],
        },
        ItemProfile {
            memberships: vec![false, true],
        },
    ];
    let mut rng = StdRng::seed_from_u64(4);
    let factors = LatentFactorGenerator::new(&params)
        .generate(&items, &mut rng)
        .expect("generation succeeds");

    assert_eq!(factors.len(), 2);
    assert_eq!(factors.row(0), &[1.0, 0.0]);
    assert_eq!(factors.row(1), &[0.0, 0.0]);
}

#[test]
fn test_non_agent_noise_has_configured_spread() {
    let params = ParameterSet::new(10, 1, 1).with_std_dev_factors(2.0);
    let users: Vec<UserProfile> = (0..20_000)
        .map(|_| UserProfile {
            compatibilities: vec![1.0],
            group: 0,
        })
        .collect();
    let mut rng = StdRng::seed_from_u64(21);
    let factors = LatentFactorGenerator::new(&params)
        .generate(&users, &mut rng)
        .expect("generation succeeds");

    let values: Vec<f64> = factors.rows().iter().map(|r| r[0]).collect();
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();

    assert!(mean.abs() < 0.1, "mean {}", mean);
    assert!((std - 2.0).abs() < 0.1, "std {}", std);
}

#[test]
fn test_empty_profiles() {
    let params = ParameterSet::new(10, 2, 0);
    let mut rng = StdRng::seed_from_u64(0);
    let factors = LatentFactorGenerator::new(&params)
        .generate::<UserProfile, _>(&[], &mut rng)
        .expect("generation succeeds");
    assert!(factors.is_empty());
}

#[test]
fn test_dot() {
    assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, -5.0, 6.0]), 12.0);
    assert_eq!(dot(&[], &[]), 0.0);
    let m = LatentFactors::from_rows(vec![vec![1.0, 2.0]]);
    assert_eq!(dot(m.row(0), m.row(0)), 5.0);
}
