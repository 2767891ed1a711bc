//! Unit tests for cs-dist.

use std::collections::BTreeMap;

use cs_core::SimRng;

use crate::{DistError, Distribution, DurationKey, DurationSampler, DurationSpec, Moments};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn beta(min: f64, max: f64, mean: f64, variance: f64) -> Distribution {
    Distribution::compile("test", &DurationSpec::moments(min, max, mean, variance))
        .expect("valid moments")
}

fn full_specs() -> BTreeMap<String, DurationSpec> {
    DurationKey::ALL
        .into_iter()
        .filter(|k| k.is_required())
        .map(|k| (k.name().to_owned(), DurationSpec::moments(2.0, 10.0, 5.0, 3.0)))
        .collect()
}

// ── Beta fit ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod beta_fit {
    use super::*;

    #[test]
    fn samples_stay_in_bounds_across_grid() {
        let mut rng = SimRng::new(11);
        let (min, max) = (10.0, 60.0);
        for &mean in &[11.0, 20.0, 35.0, 50.0, 59.0] {
            let max_var = (mean - min) * (max - mean);
            for &frac in &[0.01, 0.1, 0.5, 0.9] {
                let dist = beta(min, max, mean, max_var * frac);
                for _ in 0..10_000 {
                    let x = dist.sample(&mut rng);
                    assert!((min..=max).contains(&x), "mean {mean} frac {frac}: {x}");
                }
            }
        }
    }

    #[test]
    fn sample_mean_tracks_requested_mean() {
        let mut rng = SimRng::new(3);
        let dist = beta(10.0, 60.0, 25.0, 30.0);
        let n = 20_000;
        let avg: f64 = (0..n).map(|_| dist.sample(&mut rng)).sum::<f64>() / n as f64;
        assert!((avg - 25.0).abs() < 0.5, "got {avg}");
    }

    #[test]
    fn variance_too_large_is_degenerate() {
        // (mean-min)(max-mean) = 3 * 5 = 15 is the ceiling.
        let err = Distribution::compile("checkin", &DurationSpec::moments(2.0, 10.0, 5.0, 16.0))
            .unwrap_err();
        assert!(matches!(err, DistError::Degenerate { ref name, .. } if name == "checkin"));
    }

    #[test]
    fn mean_outside_bounds_is_degenerate() {
        for mean in [2.0, 10.0, 0.5, 12.0] {
            let r = Distribution::compile("x", &DurationSpec::moments(2.0, 10.0, mean, 1.0));
            assert!(matches!(r, Err(DistError::Degenerate { .. })), "mean {mean}");
        }
    }

    #[test]
    fn nan_mean_is_rejected() {
        let r = Distribution::compile("x", &DurationSpec::moments(2.0, 10.0, f64::NAN, 1.0));
        assert!(r.is_err());
    }

    #[test]
    fn zero_variance_collapses_to_fixed() {
        let dist = beta(5.0, 5.0, 5.0, 0.0);
        assert!(matches!(dist, Distribution::Fixed(v) if v == 5.0));
        let dist = beta(0.0, 10.0, 4.0, 0.0);
        assert!(matches!(dist, Distribution::Fixed(v) if v == 4.0));
    }

    #[test]
    fn inverted_bounds_rejected() {
        let r = Distribution::compile("x", &DurationSpec::moments(10.0, 2.0, 5.0, 1.0));
        assert!(matches!(r, Err(DistError::InvalidBounds { .. })));
    }
}

// ── Other forms ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod other_forms {
    use super::*;
    use crate::TypedSpec;

    #[test]
    fn poisson_respects_offset() {
        let mut rng = SimRng::new(5);
        let dist = Distribution::compile("p", &DurationSpec::poisson(15.0, 10.0)).unwrap();
        for _ in 0..1_000 {
            assert!(dist.sample(&mut rng) >= 15.0);
        }
    }

    #[test]
    fn poisson_needs_positive_lambda() {
        let r = Distribution::compile("p", &DurationSpec::poisson(0.0, 0.0));
        assert!(matches!(r, Err(DistError::InvalidParameter { .. })));
    }

    #[test]
    fn exponential_clamped() {
        let mut rng = SimRng::new(8);
        let spec = DurationSpec::Typed(TypedSpec::Exponential { min: 2.0, max: 8.0, mean: 6.0 });
        let dist = Distribution::compile("e", &spec).unwrap();
        for _ in 0..10_000 {
            let x = dist.sample(&mut rng);
            assert!((2.0..=8.0).contains(&x), "{x}");
        }
    }

    #[test]
    fn uniform_in_bounds_and_point_collapses() {
        let mut rng = SimRng::new(9);
        let spec = DurationSpec::Typed(TypedSpec::Uniform { min: 1.0, max: 3.0 });
        let dist = Distribution::compile("u", &spec).unwrap();
        assert!((0..1_000).all(|_| (1.0..=3.0).contains(&dist.sample(&mut rng))));

        let spec = DurationSpec::Typed(TypedSpec::Uniform { min: 4.0, max: 4.0 });
        assert!(matches!(Distribution::compile("u", &spec), Ok(Distribution::Fixed(v)) if v == 4.0));
    }

    #[test]
    fn negative_fixed_rejected() {
        assert!(Distribution::compile("f", &DurationSpec::fixed(-1.0)).is_err());
    }
}

// ── Serde forms ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod serde_forms {
    use super::*;
    use crate::TypedSpec;

    #[test]
    fn untyped_object_is_moments() {
        let spec: DurationSpec =
            serde_json::from_str(r#"{"min": 2, "max": 10, "mean": 5, "variance": 3}"#).unwrap();
        assert_eq!(spec, DurationSpec::Moments(Moments { min: 2.0, max: 10.0, mean: 5.0, variance: 3.0 }));
    }

    #[test]
    fn pois_and_beta_tags_are_moments() {
        for tag in ["pois", "beta"] {
            let json = format!(r#"{{"type": "{tag}", "min": 2, "max": 10, "mean": 5, "variance": 3}}"#);
            let spec: DurationSpec = serde_json::from_str(&json).unwrap();
            assert!(matches!(spec, DurationSpec::Typed(TypedSpec::Beta(_))), "{tag}");
        }
    }

    #[test]
    fn legacy_poisson_form() {
        let spec: DurationSpec =
            serde_json::from_str(r#"{"type": "poisson", "offset": 2, "lambda": 4}"#).unwrap();
        assert_eq!(spec, DurationSpec::poisson(2.0, 4.0));
    }
}

// ── DurationSampler ───────────────────────────────────────────────────────────

#[cfg(test)]
mod sampler {
    use super::*;

    #[test]
    fn missing_required_name_is_error() {
        let mut specs = full_specs();
        specs.remove("checkout");
        let err = DurationSampler::from_specs(&specs).unwrap_err();
        assert_eq!(err, DistError::MissingDistribution("checkout".into()));
    }

    #[test]
    fn huddle_defaults_to_zero() {
        let sampler = DurationSampler::from_specs(&full_specs()).unwrap();
        let mut rng = SimRng::new(0);
        assert_eq!(sampler.sample(DurationKey::Huddle, &mut rng), 0.0);
    }

    #[test]
    fn degenerate_spec_rejected_at_setup() {
        let mut specs = full_specs();
        specs.insert("team_round".into(), DurationSpec::moments(10.0, 60.0, 25.0, 10_000.0));
        assert!(matches!(
            DurationSampler::from_specs(&specs),
            Err(DistError::Degenerate { .. })
        ));
    }

    #[test]
    fn invalid_unknown_name_still_rejected() {
        let mut specs = full_specs();
        specs.insert("lunch".into(), DurationSpec::moments(10.0, 2.0, 5.0, 1.0));
        assert!(DurationSampler::from_specs(&specs).is_err());
    }

    #[test]
    fn constant_with_override() {
        let sampler = DurationSampler::constant(5.0)
            .with(DurationKey::Huddle, Distribution::Fixed(0.0));
        let mut rng = SimRng::new(0);
        assert_eq!(sampler.sample(DurationKey::Checkin, &mut rng), 5.0);
        assert_eq!(sampler.sample(DurationKey::Huddle, &mut rng), 0.0);
    }

    #[test]
    fn names_round_trip() {
        for key in DurationKey::ALL {
            assert_eq!(DurationKey::from_name(key.name()), Some(key));
        }
        assert_eq!(DurationKey::from_name("nope"), None);
    }
}

// ── Property tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn valid_moments_sample_within_bounds(
            min in 0.0f64..50.0,
            width in 0.5f64..100.0,
            mean_frac in 0.05f64..0.95,
            var_frac in 0.01f64..0.9,
            seed in any::<u64>(),
        ) {
            let max = min + width;
            let mean = min + width * mean_frac;
            let variance = (mean - min) * (max - mean) * var_frac;
            let dist = beta(min, max, mean, variance);
            let mut rng = SimRng::new(seed);
            for _ in 0..200 {
                let x = dist.sample(&mut rng);
                prop_assert!(x.is_finite());
                prop_assert!(x >= min && x <= max, "{} not in [{}, {}]", x, min, max);
            }
        }

        #[test]
        fn oversized_variance_never_yields_a_sampler(
            min in 0.0f64..50.0,
            width in 0.5f64..100.0,
            mean_frac in 0.05f64..0.95,
            excess in 1.01f64..10.0,
        ) {
            let max = min + width;
            let mean = min + width * mean_frac;
            let variance = (mean - min) * (max - mean) * excess;
            let r = Distribution::compile("p", &DurationSpec::moments(min, max, mean, variance));
            prop_assert!(r.is_err());
        }
    }
}
