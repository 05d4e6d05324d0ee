/// 누기 평가 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum LeakageError {
    /// 입력 문자열이 숫자로 해석되지 않는 경우 (필드명 포함)
    InvalidNumber(&'static str),
    /// 숫자는 맞지만 계산에 쓸 수 없는 값인 경우
    InvalidInput(&'static str),
}

impl std::fmt::Display for LeakageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeakageError::InvalidNumber(field) => write!(f, "숫자 입력 오류: {field}"),
            LeakageError::InvalidInput(msg) => write!(f, "입력 오류: {msg}"),
        }
    }
}

impl std::error::Error for LeakageError {}

/// 부압 시험 조건의 등급별 허용 누기율 [l/(s·m²)], L1→L3 순.
pub const UNDERPRESSURE_RATES: [f64; 3] = [0.15, 0.44, 1.32];
/// 정압 시험 조건의 등급별 허용 누기율 [l/(s·m²)], L1→L3 순.
pub const OVERPRESSURE_RATES: [f64; 3] = [0.22, 0.63, 1.9];

/// 시험 압력 방향. 방향마다 별도의 허용 누기율 표를 사용한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureSide {
    Underpressure,
    Overpressure,
}

impl PressureSide {
    /// 해당 방향의 등급별 허용 누기율 표를 반환한다.
    pub fn rates(&self) -> [f64; 3] {
        match self {
            PressureSide::Underpressure => UNDERPRESSURE_RATES,
            PressureSide::Overpressure => OVERPRESSURE_RATES,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PressureSide::Underpressure => "Underpressure",
            PressureSide::Overpressure => "Overpressure",
        }
    }
}

/// 기밀 등급. L1이 가장 엄격하다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LeakageClass {
    L1,
    L2,
    L3,
}

impl LeakageClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeakageClass::L1 => "L1",
            LeakageClass::L2 => "L2",
            LeakageClass::L3 => "L3",
        }
    }
}

impl std::fmt::Display for LeakageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 덕트 구간 측정 입력값.
#[derive(Debug, Clone, PartialEq)]
pub struct LeakageInput {
    /// 구간 길이 [m]
    pub length_m: f64,
    /// 단면 폭 [m]
    pub width_m: f64,
    /// 단면 높이 [m]
    pub height_m: f64,
    /// 부압 측정 누기량 [l/s]
    pub underpressure_leak_l_s: f64,
    /// 정압 측정 누기량 [l/s]
    pub overpressure_leak_l_s: f64,
}

/// 누기 평가 결과. 재계산 시 새로 만들어 이전 값을 대체한다.
#[derive(Debug, Clone)]
pub struct LeakageReport {
    /// 덕트 외피 면적 [m²]
    pub envelope_area_m2: f64,
    /// 부압 등급별 허용 누기량 [l/s], L1→L3 순
    pub underpressure_thresholds_l_s: [f64; 3],
    /// 정압 등급별 허용 누기량 [l/s], L1→L3 순
    pub overpressure_thresholds_l_s: [f64; 3],
    /// 부압 측정값 [l/s]
    pub measured_underpressure_l_s: f64,
    /// 정압 측정값 [l/s]
    pub measured_overpressure_l_s: f64,
    pub underpressure_class: LeakageClass,
    pub overpressure_class: LeakageClass,
}

impl LeakageInput {
    /// 다섯 개 입력 문자열을 파싱한다. 앞뒤 공백은 허용하며,
    /// 숫자가 아니거나 유한하지 않은 항목이 하나라도 있으면 실패한다.
    pub fn from_entries(
        length: &str,
        width: &str,
        height: &str,
        underpressure_leak: &str,
        overpressure_leak: &str,
    ) -> Result<Self, LeakageError> {
        Ok(Self {
            length_m: parse_entry(length, "Length")?,
            width_m: parse_entry(width, "Width")?,
            height_m: parse_entry(height, "Height")?,
            underpressure_leak_l_s: parse_entry(underpressure_leak, "Underpressure Leak")?,
            overpressure_leak_l_s: parse_entry(overpressure_leak, "Overpressure Leak")?,
        })
    }

    /// 덕트 외피 면적 [m²]: 네 둘레면과 양 끝 단면의 합.
    pub fn envelope_area_m2(&self) -> f64 {
        2.0 * (self.width_m + self.height_m) * self.length_m + 2.0 * (self.width_m * self.height_m)
    }
}

fn parse_entry(raw: &str, field: &'static str) -> Result<f64, LeakageError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LeakageError::InvalidNumber(field)),
    }
}

/// 측정값을 등급별 허용량과 비교해 기밀 등급을 결정한다.
/// 경계값은 더 엄격한 쪽 등급으로 분류한다.
pub fn classify(measured_l_s: f64, thresholds_l_s: [f64; 3]) -> LeakageClass {
    if measured_l_s <= thresholds_l_s[0] {
        LeakageClass::L1
    } else if measured_l_s <= thresholds_l_s[1] {
        LeakageClass::L2
    } else {
        LeakageClass::L3
    }
}

/// 입력을 검증하고 등급 리포트를 계산한다.
/// 면적이 양수이면 임계값 세 개는 순증가하므로 분류는 항상 유일하게 정해진다.
pub fn evaluate(input: &LeakageInput) -> Result<LeakageReport, LeakageError> {
    if !(input.length_m.is_finite() && input.width_m.is_finite() && input.height_m.is_finite()) {
        return Err(LeakageError::InvalidInput("치수는 유한한 값이어야 합니다."));
    }
    if input.length_m <= 0.0 || input.width_m <= 0.0 || input.height_m <= 0.0 {
        return Err(LeakageError::InvalidInput(
            "길이, 폭, 높이는 0보다 커야 합니다.",
        ));
    }
    if !(input.underpressure_leak_l_s.is_finite() && input.overpressure_leak_l_s.is_finite()) {
        return Err(LeakageError::InvalidInput(
            "측정 누기량은 유한한 값이어야 합니다.",
        ));
    }

    let area = input.envelope_area_m2();
    let underpressure_thresholds = PressureSide::Underpressure.rates().map(|rate| area * rate);
    let overpressure_thresholds = PressureSide::Overpressure.rates().map(|rate| area * rate);

    Ok(LeakageReport {
        envelope_area_m2: area,
        underpressure_thresholds_l_s: underpressure_thresholds,
        overpressure_thresholds_l_s: overpressure_thresholds,
        measured_underpressure_l_s: input.underpressure_leak_l_s,
        measured_overpressure_l_s: input.overpressure_leak_l_s,
        underpressure_class: classify(input.underpressure_leak_l_s, underpressure_thresholds),
        overpressure_class: classify(input.overpressure_leak_l_s, overpressure_thresholds),
    })
}
