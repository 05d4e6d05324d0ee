#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use duct_leakage_calculator::{config, i18n, report, workspace::Workspace};
use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default().with_transparent(true);
    if let Some(icon) = icon_data {
        viewport = viewport.with_icon(icon);
    }
    let cfg = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        let resolved = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
        app_cfg.language = resolved;
    }
    eframe::run_native(
        "Leakage Calculator",
        cfg,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                eprintln!("Font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글 UI를 표시하기 위해 시스템 폰트를 우선 적용한다.
/// 1) assets/fonts/ 아래 프로젝트 폰트
/// 2) Windows 시스템 폰트(맑은 고딕/굴림/바탕 등)
/// 3) 모두 실패 시 Err를 반환해 사용자 지정 폰트 로드를 유도한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let asset_path = Path::new("assets/fonts/malgun.ttf");
    if asset_path.exists() {
        let bytes = fs::read(asset_path).map_err(|e| format!("Failed to read font file: {e}"))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        return Ok(());
    }

    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        let candidates = [
            "malgun.ttf",
            "malgunsl.ttf",
            "malgunbd.ttf",
            "gulim.ttc",
            "batang.ttc",
        ];
        for cand in candidates {
            let p = fonts.join(cand);
            if p.exists() {
                let bytes = fs::read(&p)
                    .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
                apply_font_bytes(ctx, bytes, "korean_font");
                return Ok(());
            }
        }
    }

    Err("Korean-capable font not found. Please set a user font (.ttf/.ttc) in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ThemeChoice {
    System,
    Light,
    Dark,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    lang_pack_dir_input: String,
    lang_save_status: Option<String>,
    // 측정 구간 탭
    workspace: Workspace,
    active_tab: usize,
    save_status: Option<String>,
    // 설정
    window_alpha: f32,
    apply_initial_view_size: bool,
    ui_scale: f32,
    always_on_top: bool,
    show_settings_modal: bool,
    show_help_modal: bool,
    theme: ThemeChoice,
    custom_font_path: String,
    font_load_error: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        eprintln!("GUI language resolved: {lang_code}");
        let lang_input = config.language.clone();
        let lang_pack_dir_input = config.language_pack_dir.clone().unwrap_or_default();
        Self {
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            config,
            tr,
            lang_input,
            lang_pack_dir_input,
            lang_save_status: None,
            workspace: Workspace::new(),
            active_tab: 0,
            save_status: None,
            apply_initial_view_size: true,
            ui_scale: 1.0,
            always_on_top: false,
            show_settings_modal: false,
            show_help_modal: false,
            theme: ThemeChoice::System,
            custom_font_path: String::new(),
            font_load_error: None,
        }
    }

    /// 탭 목록 + 맨 뒤의 "+" 추가 버튼. 탭 제목은 제목 입력란을 따라간다.
    fn ui_tab_strip(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.horizontal_wrapped(|ui| {
            let mut clicked_tab = None;
            for (idx, tab) in self.workspace.tabs.iter().enumerate() {
                let selected = idx == self.active_tab;
                let button = egui::Button::new(tab.display_title()).fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                });
                if ui
                    .add(button)
                    .on_hover_text(txt("gui.tab.switch_tip", "Switch section"))
                    .clicked()
                {
                    clicked_tab = Some(idx);
                }
            }
            if let Some(idx) = clicked_tab {
                self.active_tab = idx;
            }
            if ui
                .button("+")
                .on_hover_text(txt("gui.tab.add_tip", "Add a new measured section"))
                .clicked()
            {
                self.active_tab = self.workspace.add_section();
            }
        });
    }

    /// 활성 구간 탭의 입력 카드와 결과 영역.
    fn ui_section(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        self.active_tab = self.active_tab.min(self.workspace.tabs.len() - 1);
        // Some(new) 이면 프레임 종료 후 save_status를 교체한다.
        let mut new_save_status: Option<Option<String>> = None;
        {
            let tab = &mut self.workspace.tabs[self.active_tab];
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    label_with_tip(
                        ui,
                        &txt("gui.section.title_label", "Measured Section:"),
                        &txt(
                            "gui.section.title_tip",
                            "Freeform title; the tab is renamed as you type",
                        ),
                    );
                    ui.add(egui::TextEdit::singleline(&mut tab.title_entry).desired_width(220.0));
                });
                ui.add_space(6.0);
                egui::Grid::new("section_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        let rows: [(&str, &str, &mut String); 5] = [
                            ("gui.section.length", "Length [m]:", &mut tab.length_entry),
                            ("gui.section.width", "Width [m]:", &mut tab.width_entry),
                            ("gui.section.height", "Height [m]:", &mut tab.height_entry),
                            (
                                "gui.section.underpressure",
                                "Underpressure Leak [l/s]:",
                                &mut tab.underpressure_entry,
                            ),
                            (
                                "gui.section.overpressure",
                                "Overpressure Leak [l/s]:",
                                &mut tab.overpressure_entry,
                            ),
                        ];
                        for (key, default, entry) in rows {
                            ui.label(txt(key, default));
                            ui.add(egui::TextEdit::singleline(entry).desired_width(120.0));
                            ui.end_row();
                        }
                    });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui
                        .button(txt("gui.eval.run", "Calculate"))
                        .on_hover_text(txt(
                            "gui.eval.run_tip",
                            "Compute envelope area, class thresholds and classification",
                        ))
                        .clicked()
                    {
                        match tab.evaluate() {
                            Ok((input, leakage_report)) => {
                                tab.result = Some(report::render(&leakage_report));
                                tab.input = Some(input);
                                tab.report = Some(leakage_report);
                            }
                            Err(_) => {
                                tab.result = Some(txt(
                                    "gui.eval.invalid_input",
                                    "❌ Please enter valid numeric values!",
                                ));
                                tab.input = None;
                                tab.report = None;
                            }
                        }
                        new_save_status = Some(None);
                    }
                    let save_button = egui::Button::new(txt("gui.save.button", "Save results"));
                    if ui
                        .add_enabled(tab.input.is_some() && tab.result.is_some(), save_button)
                        .on_hover_text(txt(
                            "gui.save.button_tip",
                            "Write this section's inputs and results to a text file",
                        ))
                        .clicked()
                    {
                        if let (Some(input), Some(result_text)) = (&tab.input, &tab.result) {
                            let picked = FileDialog::new()
                                .set_title(&txt("gui.save.dialog_title", "Save calculation results"))
                                .set_file_name(&format!("{}.txt", tab.display_title()))
                                .add_filter("Text file", &["txt"])
                                .save_file();
                            if let Some(path) = picked {
                                match report::write_summary(
                                    &path,
                                    &tab.display_title(),
                                    input,
                                    result_text,
                                ) {
                                    Ok(()) => {
                                        new_save_status =
                                            Some(Some(txt("gui.save.saved", "Results saved.")));
                                    }
                                    Err(e) => {
                                        // 저장 실패는 진단 채널로만 알린다.
                                        eprintln!("summary write failed: {e}");
                                        new_save_status = Some(None);
                                    }
                                }
                            }
                        }
                    }
                });
                if let Some(res) = &tab.result {
                    ui.add_space(8.0);
                    egui::ScrollArea::vertical()
                        .max_height(280.0)
                        .auto_shrink([false, true])
                        .show(ui, |ui| {
                            let mut text: &str = res.as_str();
                            ui.add(
                                egui::TextEdit::multiline(&mut text)
                                    .desired_width(f32::INFINITY)
                                    .desired_rows(12),
                            );
                        });
                }
            });
        }
        if let Some(status) = new_save_status {
            self.save_status = status;
        }
        if let Some(msg) = &self.save_status {
            ui.label(msg);
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 최초 1회 화면 크기 조정
        if self.apply_initial_view_size {
            if let Some(screen) = ctx.input(|i| {
                let r = i.screen_rect();
                if r.is_positive() {
                    Some(r.size())
                } else {
                    None
                }
            }) {
                let target = egui::vec2((screen.x * 0.45).max(800.0), (screen.y * 0.55).max(600.0));
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(target));
                self.apply_initial_view_size = false;
            }
        }

        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(if self.always_on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        }));

        // 투명도 적용 + 라벨 복사 방지 스타일
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();
        let txt =
            move |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "Leakage Calculator"));
                ui.label(" | Desktop GUI");
                ui.separator();
                if ui.button(txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(txt("gui.about.title", "Help / About")).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        // 구간 탭 목록
        egui::TopBottomPanel::top("tab_strip").show(ctx, |ui| {
            self.ui_tab_strip(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.ui_section(ui);
                });
        });

        // 설정 모달
        if self.show_settings_modal {
            egui::Window::new(txt("gui.settings.title", "Settings"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_settings_modal)
                .show(ctx, |ui| {
                    ui.heading(txt("gui.settings.general", "General"));
                    ui.separator();
                    ui.label(txt("gui.settings.ui_scale", "UI scale"));
                    let scale_slider = egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x");
                    if ui.add(scale_slider).changed() {
                        ctx.set_pixels_per_point(self.ui_scale);
                    }
                    ui.separator();
                    ui.checkbox(
                        &mut self.always_on_top,
                        txt("gui.settings.always_on_top", "Always on top"),
                    );
                    ui.separator();
                    ui.label(txt("gui.settings.alpha", "Window transparency"));
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                    ui.separator();
                    ui.label(txt("gui.settings.theme", "Theme"));
                    ui.horizontal(|ui| {
                        for (label, choice) in [
                            ("System", ThemeChoice::System),
                            ("Light", ThemeChoice::Light),
                            ("Dark", ThemeChoice::Dark),
                        ] {
                            if ui.selectable_value(&mut self.theme, choice, label).clicked() {
                                match choice {
                                    ThemeChoice::Light => ctx.set_visuals(egui::Visuals::light()),
                                    ThemeChoice::Dark => ctx.set_visuals(egui::Visuals::dark()),
                                    ThemeChoice::System => {}
                                }
                            }
                        }
                    });

                    ui.separator();
                    ui.label(txt("gui.settings.lang", "Language"));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(&self.lang_input)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(
                                &mut self.lang_input,
                                "auto".into(),
                                txt("gui.settings.lang_auto", "System"),
                            );
                            ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                            ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                        });
                    ui.label(txt("gui.settings.pack_dir", "Language pack directory"));
                    ui.add(
                        egui::TextEdit::singleline(&mut self.lang_pack_dir_input)
                            .desired_width(260.0),
                    );

                    ui.separator();
                    ui.label(txt("gui.settings.font", "Custom font (.ttf/.ttc)"));
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut self.custom_font_path)
                                .desired_width(260.0),
                        );
                        if ui.button(txt("gui.settings.font_browse", "Browse")).clicked() {
                            if let Some(path) = FileDialog::new()
                                .add_filter("Font", &["ttf", "ttc"])
                                .pick_file()
                            {
                                self.custom_font_path = path.display().to_string();
                            }
                        }
                        if ui.button(txt("gui.settings.font_load", "Load font")).clicked() {
                            self.font_load_error =
                                load_custom_font(ctx, &self.custom_font_path).err();
                        }
                    });
                    if let Some(err) = &self.font_load_error {
                        ui.label(err);
                    }

                    ui.separator();
                    if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
                        self.config.language = self.lang_input.clone();
                        self.config.language_pack_dir = {
                            let dir = self.lang_pack_dir_input.trim();
                            if dir.is_empty() {
                                None
                            } else {
                                Some(dir.to_string())
                            }
                        };
                        self.config.window_alpha = self.window_alpha;
                        // 즉시 번역기 반영
                        let resolved = i18n::resolve_language(&self.config.language, None);
                        self.tr = i18n::Translator::new_with_pack(
                            &resolved,
                            self.config.language_pack_dir.as_deref(),
                        );
                        if let Err(e) = self.config.save() {
                            self.lang_save_status = Some(format!("Save error: {e}"));
                        } else {
                            self.lang_save_status = Some(txt("gui.settings.saved", "Saved."));
                        }
                    }
                    if let Some(msg) = &self.lang_save_status {
                        ui.label(msg);
                    }
                });
        }

        // 도움말 모달
        if self.show_help_modal {
            egui::Window::new(txt("gui.about.title", "Help / About"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.heading(txt(
                        "gui.about.app",
                        "Offline duct air-tightness classifier (classes L1-L3)",
                    ));
                    ui.label(txt("gui.about.version", "Version: 0.1.0"));
                    ui.separator();
                    ui.label(txt(
                        "gui.about.formula_area",
                        "Envelope area: A = 2*(W+H)*L + 2*(W*H)",
                    ));
                    ui.label(txt(
                        "gui.about.formula_thresholds",
                        "Class threshold: A x rate, per test condition (underpressure / overpressure)",
                    ));
                    ui.label(txt(
                        "gui.about.formula_classify",
                        "Classification: measured <= threshold; ties go to the tighter class",
                    ));
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_starts_with_one_section_tab() {
        let app = GuiApp::new(config::Config::default());
        assert_eq!(app.workspace.tabs.len(), 1);
        assert_eq!(app.active_tab, 0);
        assert_eq!(app.workspace.tabs[0].display_title(), "Tab 1");
    }

    #[test]
    fn added_tabs_get_fresh_default_titles() {
        let mut app = GuiApp::new(config::Config::default());
        let second = app.workspace.add_section();
        let third = app.workspace.add_section();
        assert_eq!(app.workspace.tabs[second].display_title(), "Tab 2");
        assert_eq!(app.workspace.tabs[third].display_title(), "Tab 3");
    }

    #[test]
    fn lang_input_mirrors_config() {
        let cfg = config::Config {
            language: "ko-kr".to_string(),
            ..config::Config::default()
        };
        let app = GuiApp::new(cfg);
        assert_eq!(app.lang_input, "ko-kr");
    }

    #[test]
    fn window_alpha_is_clamped_into_range() {
        let cfg = config::Config {
            window_alpha: 0.05,
            ..config::Config::default()
        };
        let app = GuiApp::new(cfg);
        assert!(app.window_alpha >= 0.3);
    }
}
