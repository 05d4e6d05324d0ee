use std::fs;
use std::path::Path;

use crate::leakage::{LeakageInput, LeakageReport, PressureSide};

/// 결과 저장 시 발생 가능한 오류.
#[derive(Debug)]
pub enum ReportError {
    /// 파일 입출력 오류
    Io(std::io::Error),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<std::io::Error> for ReportError {
    fn from(value: std::io::Error) -> Self {
        ReportError::Io(value)
    }
}

/// 평가 리포트를 화면/파일 공용 텍스트로 렌더링한다.
/// 저장 파일에 그대로 들어가는 텍스트이므로 UI 언어와 무관하게 고정 서식을 쓴다.
pub fn render(report: &LeakageReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    for side in [PressureSide::Underpressure, PressureSide::Overpressure] {
        let thresholds = match side {
            PressureSide::Underpressure => report.underpressure_thresholds_l_s,
            PressureSide::Overpressure => report.overpressure_thresholds_l_s,
        };
        lines.push(format!("--- {} Leakage Rate ---", side.label()));
        for (i, leakage_l_s) in thresholds.iter().enumerate() {
            lines.push(format!("Class L{}: {leakage_l_s:.2} l/s", i + 1));
        }
    }

    lines.push(String::new());
    lines.push("--- Classification Based on Measured Values ---".to_string());
    lines.push(format!(
        "Measured Underpressure Leak: {:.2} l/s → Class {}",
        report.measured_underpressure_l_s, report.underpressure_class
    ));
    lines.push(format!(
        "Measured Overpressure Leak: {:.2} l/s → Class {}",
        report.measured_overpressure_l_s, report.overpressure_class
    ));

    lines.join("\n")
}

/// 한 구간의 입력값과 마지막 계산 결과를 사람이 읽는 텍스트 파일로 저장한다.
pub fn write_summary(
    path: &Path,
    section_title: &str,
    input: &LeakageInput,
    report_text: &str,
) -> Result<(), ReportError> {
    let mut out = String::new();
    out.push_str("=== Leakage Calculator Results ===\n\n");
    out.push_str(&format!("Measured Section: {section_title}\n\n"));
    out.push_str("=== Input Values ===\n");
    out.push_str(&format!("Length [m]: {}\n", input.length_m));
    out.push_str(&format!("Width [m]: {}\n", input.width_m));
    out.push_str(&format!("Height [m]: {}\n", input.height_m));
    out.push_str(&format!(
        "Underpressure Leak [l/s]: {}\n",
        input.underpressure_leak_l_s
    ));
    out.push_str(&format!(
        "Overpressure Leak [l/s]: {}\n",
        input.overpressure_leak_l_s
    ));
    out.push_str("\n=== Calculation Results ===\n");
    out.push_str(report_text);
    out.push('\n');

    fs::write(path, out)?;
    Ok(())
}
