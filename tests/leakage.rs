use duct_leakage_calculator::leakage::{
    classify, evaluate, LeakageClass, LeakageError, LeakageInput,
};

fn sample_input() -> LeakageInput {
    LeakageInput {
        length_m: 3.0,
        width_m: 2.0,
        height_m: 2.5,
        underpressure_leak_l_s: 10.0,
        overpressure_leak_l_s: 5.0,
    }
}

#[test]
fn envelope_area_matches_hand_calculation() {
    // 2*(2+2.5)*3 + 2*(2*2.5) = 27 + 10 = 37 m²
    let area = sample_input().envelope_area_m2();
    assert!((area - 37.0).abs() < 1e-9, "area={area}");
}

#[test]
fn envelope_area_increases_in_each_dimension() {
    let base = sample_input();
    let area = base.envelope_area_m2();
    for grow in [
        LeakageInput {
            length_m: base.length_m + 0.5,
            ..base.clone()
        },
        LeakageInput {
            width_m: base.width_m + 0.5,
            ..base.clone()
        },
        LeakageInput {
            height_m: base.height_m + 0.5,
            ..base.clone()
        },
    ] {
        assert!(grow.envelope_area_m2() > area, "grown={:?}", grow);
    }
}

#[test]
fn sample_section_classifies_l2_under_and_l1_over() {
    let res = evaluate(&sample_input()).expect("leakage evaluation");
    assert!((res.envelope_area_m2 - 37.0).abs() < 1e-9);

    let expected_under = [5.55, 16.28, 48.84];
    let expected_over = [8.14, 23.31, 70.3];
    for (got, want) in res
        .underpressure_thresholds_l_s
        .iter()
        .zip(expected_under.iter())
    {
        assert!((got - want).abs() < 1e-9, "under got={got} want={want}");
    }
    for (got, want) in res
        .overpressure_thresholds_l_s
        .iter()
        .zip(expected_over.iter())
    {
        assert!((got - want).abs() < 1e-9, "over got={got} want={want}");
    }

    assert_eq!(res.underpressure_class, LeakageClass::L2);
    assert_eq!(res.overpressure_class, LeakageClass::L1);
}

#[test]
fn thresholds_are_strictly_increasing_for_positive_area() {
    let res = evaluate(&sample_input()).expect("leakage evaluation");
    let t = res.underpressure_thresholds_l_s;
    assert!(t[0] < t[1] && t[1] < t[2]);
    let t = res.overpressure_thresholds_l_s;
    assert!(t[0] < t[1] && t[1] < t[2]);
}

#[test]
fn classification_is_monotonic_in_measured_value() {
    let thresholds = [5.55, 16.28, 48.84];
    let mut previous = LeakageClass::L1;
    for measured in [0.0, 2.0, 5.55, 6.0, 16.28, 20.0, 48.84, 100.0] {
        let class = classify(measured, thresholds);
        assert!(class >= previous, "measured={measured}");
        previous = class;
    }
}

#[test]
fn boundary_values_classify_to_the_tighter_class() {
    let res = evaluate(&sample_input()).expect("leakage evaluation");
    let under = res.underpressure_thresholds_l_s;
    assert_eq!(classify(under[0], under), LeakageClass::L1);
    assert_eq!(classify(under[1], under), LeakageClass::L2);
    assert_eq!(classify(under[2], under), LeakageClass::L3);
}

#[test]
fn from_entries_accepts_surrounding_whitespace() {
    let input = LeakageInput::from_entries(" 3 ", "2", "2.5", " 10.0", "5 ")
        .expect("entries parse");
    assert_eq!(input, sample_input());
}

#[test]
fn non_numeric_entry_is_rejected_with_field_name() {
    let err = LeakageInput::from_entries("3", "abc", "2.5", "10", "5")
        .expect_err("width must be rejected");
    match err {
        LeakageError::InvalidNumber(field) => assert_eq!(field, "Width"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_entry_is_rejected() {
    assert!(LeakageInput::from_entries("3", "2", "", "10", "5").is_err());
}

#[test]
fn non_positive_dimensions_are_rejected() {
    for bad in [0.0, -1.0] {
        let input = LeakageInput {
            width_m: bad,
            ..sample_input()
        };
        match evaluate(&input) {
            Err(LeakageError::InvalidInput(_)) => {}
            other => panic!("expected invalid input, got {other:?}"),
        }
    }
}

#[test]
fn non_finite_measured_leak_is_rejected() {
    let input = LeakageInput {
        underpressure_leak_l_s: f64::NAN,
        ..sample_input()
    };
    assert!(evaluate(&input).is_err());
}
