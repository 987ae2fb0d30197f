use rand::{rngs::StdRng, SeedableRng};

use softmax_linear::gradcheck::max_rel_error;
use softmax_linear::math::{gaussian, random_labels};
use softmax_linear::{
    eval_numerical_gradient, grad_check_sparse, run_sanity_check, Error, LinearSoftmax, SanityConfig,
    SoftmaxStrategy,
};

#[test]
fn analytic_gradient_matches_finite_differences() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut w = gaussian(5, 4, 0.5, &mut rng);
    let x = gaussian(8, 5, 1.0, &mut rng);
    let y = random_labels(8, 4, &mut rng);
    let reg = 0.1;

    for strategy in [SoftmaxStrategy::Naive, SoftmaxStrategy::Vectorized] {
        let analytic = strategy.evaluate(w.view(), x.view(), &y, reg).unwrap().grad;
        let numerical = eval_numerical_gradient(
            |v| strategy.evaluate(v, x.view(), &y, reg).unwrap().loss,
            &mut w,
            1e-5,
        );
        let err = max_rel_error(analytic.view(), numerical.view());
        assert!(err < 1e-5, "{strategy}: max relative error {err:e}");
    }
}

#[test]
fn sparse_check_on_classifier_loss() {
    let mut rng = StdRng::seed_from_u64(77);
    let clf = LinearSoftmax::new(30, 5, 1e-2, &mut rng);
    let x = gaussian(40, 30, 1.0, &mut rng);
    let y = random_labels(40, 5, &mut rng);

    let analytic = clf.loss(x.view(), &y, 0.05).unwrap().grad;
    let mut w = clf.weights.clone();
    let samples = grad_check_sparse(
        |v| SoftmaxStrategy::Vectorized.evaluate(v, x.view(), &y, 0.05).unwrap().loss,
        &mut w,
        analytic.view(),
        12,
        1e-5,
        &mut rng,
    );

    assert_eq!(samples.len(), 12);
    assert_eq!(w, clf.weights);
    for s in &samples {
        assert!(s.rel_error < 1e-5, "{s:?}");
    }
}

#[test]
fn sanity_check_on_small_batch_passes() {
    for check_with in [SoftmaxStrategy::Naive, SoftmaxStrategy::Vectorized] {
        let config = SanityConfig {
            num_train: 60,
            num_features: 25,
            num_classes: 5,
            weight_scale: 1e-3,
            reg: 0.1,
            num_checks: 8,
            check_with,
            seed: Some(3),
            ..SanityConfig::default()
        };
        let report = run_sanity_check(&config).unwrap();

        assert_eq!(report.grad_check.len(), 8);
        assert!(report.loss_difference <= 1e-7 * report.naive_loss.max(1.0));
        assert!(report.gradient_difference <= 1e-7);
        // Tiny weights: every class is about equally likely.
        assert!((report.naive_loss - report.expected_initial_loss).abs() < 0.05);
        assert!((report.expected_initial_loss - 5.0f64.ln()).abs() < 1e-15);
        assert!(report.passed(config.tolerance), "{report:?}");
    }
}

#[test]
fn seeded_sanity_runs_are_reproducible() {
    let config = SanityConfig {
        num_train: 10,
        num_features: 6,
        num_classes: 3,
        num_checks: 4,
        seed: Some(99),
        ..SanityConfig::default()
    };
    let a = run_sanity_check(&config).unwrap();
    let b = run_sanity_check(&config).unwrap();
    assert_eq!(a.naive_loss, b.naive_loss);
    assert_eq!(a.vectorized_loss, b.vectorized_loss);
    let checked = |r: &softmax_linear::SanityReport| {
        r.grad_check.iter().map(|s| (s.row, s.col)).collect::<Vec<_>>()
    };
    assert_eq!(checked(&a), checked(&b));
}

#[test]
fn invalid_config_is_rejected_before_running() {
    let config = SanityConfig {
        num_features: 0,
        ..SanityConfig::default()
    };
    assert!(matches!(run_sanity_check(&config), Err(Error::InvalidConfig(_))));
}
