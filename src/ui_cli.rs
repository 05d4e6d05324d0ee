use std::io::{self, Write};
use std::path::Path;

use crate::app::AppError;
use crate::config::Config;
use crate::i18n::{self, Translator};
use crate::leakage::{self, LeakageInput};
use crate::report;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    EvaluateSection,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(i18n::keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(i18n::keys::MAIN_MENU_EVALUATE));
    println!("{}", tr.t(i18n::keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(i18n::keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(i18n::keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::EvaluateSection),
            "2" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(i18n::keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 구간 누기 평가 메뉴를 처리한다. 값 다섯 개를 입력받아 리포트를 출력하고,
/// 경로를 입력하면 요약 파일로 저장한다.
pub fn handle_evaluate(tr: &Translator, _cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(i18n::keys::EVALUATE_HEADING));
    let title = read_line(tr.t(i18n::keys::PROMPT_SECTION_TITLE))?;

    let input = LeakageInput {
        length_m: read_f64(tr, tr.t(i18n::keys::PROMPT_LENGTH))?,
        width_m: read_f64(tr, tr.t(i18n::keys::PROMPT_WIDTH))?,
        height_m: read_f64(tr, tr.t(i18n::keys::PROMPT_HEIGHT))?,
        underpressure_leak_l_s: read_f64(tr, tr.t(i18n::keys::PROMPT_UNDERPRESSURE_LEAK))?,
        overpressure_leak_l_s: read_f64(tr, tr.t(i18n::keys::PROMPT_OVERPRESSURE_LEAK))?,
    };

    let leakage_report = match leakage::evaluate(&input) {
        Ok(r) => r,
        Err(e) => {
            // 결과 대신 고정 오류 문구만 보여주고 메뉴로 복귀한다.
            println!("{}", tr.t(i18n::keys::ERROR_INVALID_INPUT));
            eprintln!("{}: {e}", tr.t(i18n::keys::ERROR_PREFIX));
            return Ok(());
        }
    };
    let report_text = report::render(&leakage_report);
    println!("{}", tr.t(i18n::keys::RESULT_HEADING));
    println!("{report_text}");

    let path = read_line(tr.t(i18n::keys::PROMPT_SAVE_PATH))?;
    let path = path.trim();
    if !path.is_empty() {
        match report::write_summary(Path::new(path), title.trim(), &input, &report_text) {
            Ok(()) => println!("{}", tr.t(i18n::keys::SAVE_DONE)),
            // 저장 실패는 진단 채널로만 알린다.
            Err(e) => eprintln!("{}: {e}", tr.t(i18n::keys::ERROR_PREFIX)),
        }
    }
    Ok(())
}

/// 설정 메뉴를 처리한다. 현재는 언어 선택만 제공한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(i18n::keys::SETTINGS_HEADING));
    println!(
        "{} {}",
        tr.t(i18n::keys::SETTINGS_CURRENT_LANGUAGE),
        cfg.language
    );
    println!("{}", tr.t(i18n::keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(i18n::keys::SETTINGS_PROMPT_CHANGE))?;
    let lang = match sel.trim() {
        "" => return Ok(()),
        "1" => "auto",
        "2" => "en-us",
        "3" => "ko-kr",
        _ => {
            println!("{}", tr.t(i18n::keys::SETTINGS_INVALID));
            return Ok(());
        }
    };
    cfg.language = lang.to_string();
    println!("{} {}", tr.t(i18n::keys::SETTINGS_SAVED), cfg.language);
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

/// 유한한 실수가 들어올 때까지 다시 묻는다.
fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let line = read_line(prompt)?;
        match line.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => println!("{}", tr.t(i18n::keys::ERROR_INVALID_NUMBER)),
        }
    }
}
