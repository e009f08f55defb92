use distui::density;
use distui::registry::{self, default_spec, get_spec, lookup, WEIBULL_X_EPSILON};
use distui::{DistributionId, GadgetError, Parameterization};

#[test]
fn test_ten_distributions_in_ui_order() {
    let ids = registry::list_distributions();
    assert_eq!(ids.len(), 10);
    assert_eq!(ids[0], DistributionId::Beta);
    assert_eq!(ids[7], DistributionId::Normal);
    assert_eq!(ids[9], DistributionId::Weibull);
}

#[test]
fn test_every_default_density_is_defined_over_default_range() {
    for &id in registry::list_distributions() {
        let spec = get_spec(id, Parameterization::Classic).unwrap();
        assert!(!spec.parameters().is_empty(), "{} has no parameters", id);

        let raw = spec.default_values();
        let (x_min, x_max) = spec.default_x_range();
        assert!(x_min < x_max);
        let n = spec.sample_count();
        assert!(n == 201 || n == 401, "{} samples {}", id, n);

        let mut finite = 0;
        for i in 0..n {
            let x = x_min + (x_max - x_min) * i as f64 / (n - 1) as f64;
            let y = registry::density(id, Parameterization::Classic, x, &raw).unwrap();
            assert!(!y.is_nan(), "{} is NaN at x={}", id, x);
            assert!(y >= 0.0, "{} is negative at x={}", id, x);
            if y.is_finite() {
                finite += 1;
            }
        }
        assert!(finite > n / 2, "{} is mostly non-finite", id);
    }
}

#[test]
fn test_only_beta_and_gamma_offer_intuitive() {
    for &id in registry::list_distributions() {
        let intuitive = get_spec(id, Parameterization::Intuitive);
        match id {
            DistributionId::Beta | DistributionId::Gamma => {
                let spec = intuitive.unwrap();
                assert!(spec.supports_parameterization_choice());
            }
            _ => {
                assert_eq!(
                    intuitive,
                    Err(GadgetError::UnknownParameterization("Intuitive".to_string()))
                );
                assert!(!default_spec(id).supports_parameterization_choice());
            }
        }
    }
}

#[test]
fn test_lookup_by_name() {
    let spec = lookup("student-t", "classic").unwrap();
    assert_eq!(spec.id(), DistributionId::StudentT);
    assert!(matches!(
        lookup("poisson", "classic"),
        Err(GadgetError::UnknownDistribution(_))
    ));
    assert!(matches!(
        lookup("normal", "intuitive"),
        Err(GadgetError::UnknownParameterization(_))
    ));
}

#[test]
fn test_limit_support_flags() {
    let beta = default_spec(DistributionId::Beta);
    assert!(!beta.supports_custom_x_limits());
    assert!(!beta.supports_custom_y_limit());

    for id in [DistributionId::StudentT, DistributionId::Weibull] {
        let spec = default_spec(id);
        assert!(spec.supports_custom_x_limits());
        assert!(spec.supports_custom_y_limit());
        assert!(spec.default_y_range().is_some());
    }

    let normal = default_spec(DistributionId::Normal);
    assert!(normal.supports_custom_x_limits());
    assert!(!normal.supports_custom_y_limit());
    assert_eq!(default_spec(DistributionId::Weibull).default_x_range().0, WEIBULL_X_EPSILON);
}

#[test]
fn test_beta_intuitive_output_mapping() {
    let spec = get_spec(DistributionId::Beta, Parameterization::Intuitive).unwrap();
    let map = spec.output_mapping(&[0.25, 8.0]);
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["shape1", "shape2"]);
    assert!((map.get("shape1").unwrap() - 2.0).abs() < 1e-12);
    assert!((map.get("shape2").unwrap() - 6.0).abs() < 1e-12);
}

#[test]
fn test_gamma_intuitive_matches_classic_curve() {
    let classic = get_spec(DistributionId::Gamma, Parameterization::Classic).unwrap();
    let intuitive = get_spec(DistributionId::Gamma, Parameterization::Intuitive).unwrap();
    let rate = 4.0;
    let mapped = intuitive.output_mapping(&[2.5, rate]);
    assert_eq!(mapped.get("scale"), Some(0.25));
    for i in 1..50 {
        let x = i as f64 * 0.2;
        let a = classic.density(x, &[2.5, 0.25]);
        let b = intuitive.density(x, &[2.5, rate]);
        assert!((a - b).abs() < 1e-12, "x={}: {} vs {}", x, a, b);
    }
}

#[test]
fn test_weibull_exponent_one_is_standard_weibull() {
    let (scale, shape) = (1.7, 2.3);
    for i in 1..100 {
        let x = i as f64 * 0.05;
        let z = x / scale;
        let standard = (shape / scale) * z.powf(shape - 1.0) * (-z.powf(shape)).exp();
        let exp = density::exp_weibull(x, &[scale, shape, 1.0]);
        assert!(
            (standard - exp).abs() < 1e-10 * standard.max(1.0),
            "x={}: {} vs {}",
            x,
            standard,
            exp
        );
    }
}

#[test]
fn test_titles() {
    let beta = default_spec(DistributionId::Beta);
    assert_eq!(beta.title(&[1.5, 1.5]), "x ~ Beta(1.50,1.50)");
    let weibull = default_spec(DistributionId::Weibull);
    assert_eq!(weibull.title(&[1.0, 2.0, 1.0]), "x ~ ExpWeibull(1.00,2.00,1.00)");
}

#[test]
fn test_density_rejects_wrong_arity() {
    assert_eq!(
        registry::density(DistributionId::Normal, Parameterization::Classic, 0.0, &[0.0]),
        Err(GadgetError::IncompleteSelection("sd".to_string()))
    );
    assert_eq!(
        registry::density(DistributionId::Normal, Parameterization::Classic, 0.0, &[]),
        Err(GadgetError::IncompleteSelection("mean".to_string()))
    );
    let err = registry::density(
        DistributionId::Normal,
        Parameterization::Classic,
        0.0,
        &[0.0, 1.0, 2.0],
    )
    .unwrap_err();
    assert_eq!(
        err,
        GadgetError::TooManyValues {
            distribution: DistributionId::Normal,
            expected: 2,
            got: 3,
        }
    );
    assert_eq!(err.to_string(), "Normal takes 2 parameters, got 3");
}
