use approx::assert_abs_diff_eq;
use linfilt::kernel::KernelLifecycle;
use linfilt::linalg::CompanionRootSolver;
use linfilt::polynomial::Polynomial;
use linfilt::signal::filter::{
    decompose, BackFilter, DecomposeError, DecomposerConfig, RationalBackFilter,
    SymmetricDecomposer, SymmetricFilter,
};
use linfilt::signal::spectral::SymmetricFrequencyResponse;
use linfilt::signal::traits::{FrequencyResponse, SymmetricFilterDecompose};

fn assert_weights_eq(actual: &BackFilter, expected: &BackFilter, eps: f64) {
    assert_eq!(actual.degree(), expected.degree(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.weights().iter().zip(expected.weights()) {
        assert_abs_diff_eq!(*a, *e, epsilon = eps);
    }
}

fn minimum_phase_filters() -> Vec<BackFilter> {
    let ar = BackFilter::from_coefficients(&[1.0, -0.5]);
    let ma = BackFilter::from_coefficients(&[1.0, 0.4]);
    let pair = BackFilter::from_coefficients(&[1.0, -0.6, 0.25]);
    vec![
        ar.clone(),
        ar.times(&ma),
        BackFilter::from_coefficients(&[1.0, -0.5, 0.2]),
        ar.times(&ma).times(&pair),
    ]
}

#[test]
fn round_trip_recovers_the_causal_factor() {
    let decomposer: SymmetricDecomposer = SymmetricDecomposer::default();
    for f in minimum_phase_filters() {
        let sf = SymmetricFilter::from_filter(&f);
        let fact = decomposer.decompose(&sf).expect("factorizable");
        assert_weights_eq(fact.bfilter(), &f, 1e-8);
        assert_abs_diff_eq!(fact.factor(), 1.0, epsilon = 1e-8);
    }
}

#[test]
fn round_trip_recovers_the_injected_variance() {
    let f = BackFilter::from_coefficients(&[1.0, -0.5, 0.2]);
    let sf = SymmetricFilter::from_filter(&f).scale(3.5);
    let (bf, factor) = decompose(&sf).unwrap().into_parts();
    assert_weights_eq(&bf, &f, 1e-8);
    assert_abs_diff_eq!(factor, 3.5, epsilon = 1e-8);
}

#[test]
fn factorization_reproduces_the_frequency_response() {
    let sf = SymmetricFilter::new(vec![2.0, -0.7, 0.25, 0.05]).unwrap();
    let fact = decompose(&sf).unwrap();
    assert_eq!(fact.bfilter().weight(0), 1.0);
    for i in 0..32 {
        let w = core::f64::consts::PI * i as f64 / 31.0;
        let g = fact.bfilter().frequency_response(w) * fact.ffilter().frequency_response(w);
        assert_abs_diff_eq!(fact.factor() * g.re, sf.frequency_response(w).re, epsilon = 1e-8);
        assert_abs_diff_eq!(g.im, 0.0, epsilon = 1e-10);
    }
}

#[test]
fn non_positive_lag_zero_weight_always_fails() {
    for weights in [vec![0.0, 0.5], vec![-1.0], vec![-0.2, 0.1, 0.3]] {
        let sf = SymmetricFilter::new(weights).unwrap();
        assert!(matches!(
            decompose(&sf),
            Err(DecomposeError::NonPositiveVariance { .. })
        ));
    }
}

#[test]
fn seasonal_difference_is_extracted_as_unit_root_factor() {
    let mut d12 = vec![0.0; 13];
    d12[0] = 1.0;
    d12[12] = -1.0;
    let d12 = BackFilter::from_coefficients(&d12);
    let sf = SymmetricFilter::from_filter(&d12);
    assert_eq!(sf.weight(0), 2.0);
    assert_eq!(sf.weight(12), -1.0);

    let fact = decompose(&sf).unwrap();
    assert_weights_eq(fact.bfilter(), &d12, 1e-12);
    assert_abs_diff_eq!(fact.factor(), 1.0, epsilon = 1e-12);
}

#[test]
fn seasonal_difference_combines_with_stationary_part() {
    let mut d12 = vec![0.0; 13];
    d12[0] = 1.0;
    d12[12] = -1.0;
    let d12 = BackFilter::from_coefficients(&d12);
    let f = d12.times(&BackFilter::from_coefficients(&[1.0, -0.5]));
    let fact = decompose(&SymmetricFilter::from_filter(&f).scale(0.5)).unwrap();
    assert_weights_eq(fact.bfilter(), &f, 1e-8);
    assert_abs_diff_eq!(fact.factor(), 0.5, epsilon = 1e-8);
}

#[test]
fn unit_roots_beyond_the_period_go_through_root_pairing() {
    // 1 - B^4 with a period of 2: only the roots at +1 and -1 are stripped
    let d4 = BackFilter::from_coefficients(&[1.0, 0.0, 0.0, 0.0, -1.0]);
    let sf = SymmetricFilter::from_filter(&d4);
    let decomposer: SymmetricDecomposer =
        SymmetricDecomposer::try_new(DecomposerConfig::default().with_period(2)).unwrap();
    let fact = decomposer.decompose(&sf).unwrap();
    assert_weights_eq(fact.bfilter(), &d4, 1e-6);
    assert_abs_diff_eq!(fact.factor(), 1.0, epsilon = 1e-6);
}

#[test]
fn real_double_root_is_reflected_to_a_conjugate_pair() {
    // 1 - 0.6 B + B^2 has its roots on the unit circle at cos(w) = 0.3, so the
    // response polynomial is 4 (x - 0.3)^2
    let f = BackFilter::from_coefficients(&[1.0, -0.6, 1.0]);
    let sf = SymmetricFilter::from_filter(&f);
    let response = SymmetricFrequencyResponse::new(&sf);
    assert_abs_diff_eq!(response.polynomial().get(2), 4.0, epsilon = 1e-12);
    assert_abs_diff_eq!(response.evaluate(0.3f64.acos()), 0.0, epsilon = 1e-12);

    let fact = decompose(&sf).expect("double root must pair");
    assert_weights_eq(fact.bfilter(), &f, 1e-6);
    assert_abs_diff_eq!(fact.factor(), 1.0, epsilon = 1e-6);
}

#[test]
fn unpairable_real_roots_fail() {
    // (x - 0.3)(x - 0.8): the response is negative between the two roots
    let p = Polynomial::from_slice(&[0.24, -1.1, 1.0]);
    let sf = SymmetricFrequencyResponse::from_polynomial(p)
        .to_symmetric_filter()
        .unwrap();
    assert_abs_diff_eq!(sf.weight(0), 0.74, epsilon = 1e-15);
    assert!(matches!(
        decompose(&sf),
        Err(DecomposeError::UnpairedRealRoot { .. })
    ));

    let loose: SymmetricDecomposer =
        SymmetricDecomposer::try_new(DecomposerConfig::default().with_real_root_tolerance(0.6))
            .unwrap();
    assert!(loose.decompose(&sf).is_ok());
}

#[test]
fn decomposer_works_through_the_trait_object() {
    let tight = DecomposerConfig::default().with_precision(1e-6);
    let decomposers: Vec<Box<dyn SymmetricFilterDecompose>> = vec![
        Box::new(SymmetricDecomposer::<CompanionRootSolver>::default()),
        Box::new(SymmetricDecomposer::<CompanionRootSolver>::try_new(tight).unwrap()),
    ];
    let f = BackFilter::from_coefficients(&[1.0, 0.7]);
    let sf = SymmetricFilter::from_filter(&f);
    for d in &decomposers {
        assert_weights_eq(d.decompose(&sf).unwrap().bfilter(), &f, 1e-10);
    }
}

#[test]
fn decomposer_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SymmetricDecomposer>();

    let decomposer: SymmetricDecomposer = SymmetricDecomposer::default();
    std::thread::scope(|s| {
        for phi in [0.1, 0.4, -0.6] {
            let decomposer = &decomposer;
            s.spawn(move || {
                let f = BackFilter::from_coefficients(&[1.0, phi]);
                let fact = decomposer.decompose(&SymmetricFilter::from_filter(&f)).unwrap();
                assert_abs_diff_eq!(fact.bfilter().weight(1), phi, epsilon = 1e-10);
            });
        }
    });
}

#[test]
fn rational_product_cancels_shared_factor() {
    let f1 = RationalBackFilter::from_filters(
        &BackFilter::from_coefficients(&[1.0, -0.5]),
        &BackFilter::from_coefficients(&[1.0, -0.8]),
    )
    .unwrap();
    let f2 = RationalBackFilter::from_filters(
        &BackFilter::from_coefficients(&[1.0, -0.8]),
        &BackFilter::from_coefficients(&[1.0, 0.3]),
    )
    .unwrap();
    let product = f1.times(&f2);
    let naive = f1.denominator().degree() + f2.denominator().degree();
    assert!(product.denominator().degree() < naive);
    assert_eq!(product.numerator().degree(), 1);

    let n = 24;
    let (a, b) = (f1.weights(n), f2.weights(n));
    let expected: Vec<f64> = (0..n)
        .map(|k| (0..=k).map(|i| a[i] * b[k - i]).sum())
        .collect();
    for (h, e) in product.weights(n).iter().zip(&expected) {
        assert_abs_diff_eq!(*h, *e, epsilon = 1e-10);
    }
}

#[cfg(feature = "serde")]
#[test]
fn config_round_trips_through_json() {
    let config = DecomposerConfig::default().with_period(4).with_precision(1e-6);
    let json = serde_json::to_string(&config).unwrap();
    let back: DecomposerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
