use duct_leakage_calculator::leakage::LeakageClass;
use duct_leakage_calculator::workspace::Workspace;

#[test]
fn new_workspace_has_a_first_tab_ready() {
    let workspace = Workspace::new();
    assert_eq!(workspace.tabs.len(), 1);
    assert_eq!(workspace.tabs[0].display_title(), "Tab 1");
    assert!(workspace.tabs[0].result.is_none());
}

#[test]
fn tab_ids_stay_injective_across_adds() {
    let mut workspace = Workspace::new();
    for _ in 0..10 {
        workspace.add_section();
    }
    let mut ids: Vec<u32> = workspace.tabs.iter().map(|t| t.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), workspace.tabs.len());
}

#[test]
fn custom_title_wins_and_blank_falls_back() {
    let mut workspace = Workspace::new();
    let idx = workspace.add_section();
    workspace.tabs[idx].title_entry = "  Supply duct A  ".to_string();
    assert_eq!(workspace.tabs[idx].display_title(), "Supply duct A");
    workspace.tabs[idx].title_entry = "   ".to_string();
    assert_eq!(workspace.tabs[idx].display_title(), "Tab 2");
}

#[test]
fn tab_evaluate_runs_parse_and_classification() {
    let mut workspace = Workspace::new();
    let tab = &mut workspace.tabs[0];
    tab.length_entry = "3".to_string();
    tab.width_entry = "2".to_string();
    tab.height_entry = "2.5".to_string();
    tab.underpressure_entry = "10".to_string();
    tab.overpressure_entry = "5".to_string();

    let (input, leakage_report) = tab.evaluate().expect("tab evaluation");
    assert!((input.envelope_area_m2() - 37.0).abs() < 1e-9);
    assert_eq!(leakage_report.underpressure_class, LeakageClass::L2);
    assert_eq!(leakage_report.overpressure_class, LeakageClass::L1);
}

#[test]
fn tab_evaluate_rejects_non_numeric_entry() {
    let mut workspace = Workspace::new();
    let tab = &mut workspace.tabs[0];
    tab.length_entry = "3".to_string();
    tab.width_entry = "abc".to_string();
    tab.height_entry = "2.5".to_string();
    tab.underpressure_entry = "10".to_string();
    tab.overpressure_entry = "5".to_string();
    assert!(tab.evaluate().is_err());
}
