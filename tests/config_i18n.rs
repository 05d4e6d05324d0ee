use duct_leakage_calculator::config::Config;
use duct_leakage_calculator::i18n::{self, keys, Translator};

#[test]
fn config_round_trips_through_toml() {
    let cfg = Config {
        language: "ko-kr".to_string(),
        language_pack_dir: Some("locales".to_string()),
        window_alpha: 0.7,
    };
    let serialized = toml::to_string_pretty(&cfg).expect("config serialize");
    let back: Config = toml::from_str(&serialized).expect("config parse");
    assert_eq!(back.language, "ko-kr");
    assert_eq!(back.language_pack_dir.as_deref(), Some("locales"));
    assert!((back.window_alpha - 0.7).abs() < 1e-6);
}

#[test]
fn config_without_pack_dir_round_trips() {
    let serialized = toml::to_string_pretty(&Config::default()).expect("config serialize");
    let back: Config = toml::from_str(&serialized).expect("config parse");
    assert_eq!(back.language, "auto");
    assert!(back.language_pack_dir.is_none());
}

#[test]
fn cli_flag_wins_over_config_language() {
    assert_eq!(i18n::resolve_language("ko-kr", Some("en-us")), "ko-kr");
}

#[test]
fn config_language_wins_when_flag_is_auto() {
    assert_eq!(i18n::resolve_language("auto", Some("en-us")), "en-us");
}

#[test]
fn language_codes_are_normalized() {
    assert_eq!(i18n::resolve_language("KO-KR", None), "ko-kr");
    assert_eq!(i18n::resolve_language("en_GB", Some("en-us")), "en-us");
}

#[test]
fn built_in_packs_parse_and_carry_gui_strings() {
    let en = Translator::new_with_pack("en-us", None);
    assert_eq!(
        en.lookup("gui.nav.app_title").as_deref(),
        Some("Leakage Calculator")
    );
    let ko = Translator::new_with_pack("ko-kr", None);
    assert!(ko.lookup("gui.eval.invalid_input").is_some());
}

#[test]
fn translator_falls_back_to_english_strings() {
    let tr = Translator::new("en");
    assert_eq!(tr.t(keys::ERROR_INVALID_NUMBER), "Please enter a number.");
    let ko = Translator::new("ko");
    assert_eq!(ko.t(keys::ERROR_INVALID_NUMBER), "숫자를 입력하세요.");
}
