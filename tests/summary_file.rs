use std::fs;

use duct_leakage_calculator::leakage::{evaluate, LeakageInput};
use duct_leakage_calculator::report;

#[test]
fn summary_file_contains_inputs_and_report_in_order() {
    let input = LeakageInput {
        length_m: 3.0,
        width_m: 2.0,
        height_m: 2.5,
        underpressure_leak_l_s: 10.0,
        overpressure_leak_l_s: 5.0,
    };
    let leakage_report = evaluate(&input).expect("leakage evaluation");
    let report_text = report::render(&leakage_report);

    let path = std::env::temp_dir().join(format!("leakage_summary_{}.txt", std::process::id()));
    report::write_summary(&path, "Kitchen exhaust", &input, &report_text)
        .expect("summary write");
    let written = fs::read_to_string(&path).expect("summary read");
    let _ = fs::remove_file(&path);

    assert!(written.starts_with("=== Leakage Calculator Results ===\n"));

    // 섹션과 입력 항목이 명세된 순서로 들어가야 한다.
    let expected_in_order = [
        "=== Leakage Calculator Results ===",
        "Measured Section: Kitchen exhaust",
        "=== Input Values ===",
        "Length [m]: 3",
        "Width [m]: 2",
        "Height [m]: 2.5",
        "Underpressure Leak [l/s]: 10",
        "Overpressure Leak [l/s]: 5",
        "=== Calculation Results ===",
    ];
    let mut cursor = 0;
    for needle in expected_in_order {
        let found = written[cursor..]
            .find(needle)
            .unwrap_or_else(|| panic!("missing `{needle}` after byte {cursor}"));
        cursor += found + needle.len();
    }

    // 리포트 텍스트는 그대로 들어간다.
    assert!(written.contains(&report_text));
}

#[test]
fn rendered_report_lists_thresholds_and_classes() {
    let input = LeakageInput {
        length_m: 3.0,
        width_m: 2.0,
        height_m: 2.5,
        underpressure_leak_l_s: 10.0,
        overpressure_leak_l_s: 5.0,
    };
    let leakage_report = evaluate(&input).expect("leakage evaluation");
    let text = report::render(&leakage_report);

    assert!(text.contains("--- Underpressure Leakage Rate ---"));
    assert!(text.contains("Class L1: 5.55 l/s"));
    assert!(text.contains("Class L2: 16.28 l/s"));
    assert!(text.contains("Class L3: 48.84 l/s"));
    assert!(text.contains("--- Overpressure Leakage Rate ---"));
    assert!(text.contains("Class L1: 8.14 l/s"));
    assert!(text.contains("Class L2: 23.31 l/s"));
    assert!(text.contains("Class L3: 70.30 l/s"));
    assert!(text.contains("--- Classification Based on Measured Values ---"));
    assert!(text.contains("Measured Underpressure Leak: 10.00 l/s → Class L2"));
    assert!(text.contains("Measured Overpressure Leak: 5.00 l/s → Class L1"));
}

#[test]
fn write_summary_to_unwritable_path_reports_io_error() {
    let input = LeakageInput {
        length_m: 1.0,
        width_m: 1.0,
        height_m: 1.0,
        underpressure_leak_l_s: 0.0,
        overpressure_leak_l_s: 0.0,
    };
    let missing_dir = std::env::temp_dir()
        .join(format!("leakage_missing_{}", std::process::id()))
        .join("out.txt");
    let err = report::write_summary(&missing_dir, "t", &input, "text")
        .expect_err("write into missing directory must fail");
    assert!(err.to_string().contains("파일 입출력 오류"));
}
