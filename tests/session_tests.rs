//! Table session lifecycle: mount, late configuration, selection, export.


use std::sync::Arc;

use equiptab_core::config::{DisplaySettings, ProjectionConfig};
use equiptab_exec::{config_channel, AppContext, ExecError, Selection, TableSession};
use serde_json::json;
use test_data_gen::{equipment_allow_list, equipment_page, records_from_json, strings};

fn new_session() -> TableSession {
    TableSession::new(ProjectionConfig::default(), Arc::new(AppContext::new()))
}

#[test]
fn test_configuration_arriving_after_mount() {
    let mut session = new_session();
    let (tx, mut rx) = config_channel();

    session.mount(equipment_page()).expect("mount");
    assert!(!session.poll_config(&mut rx).expect("poll"));
    assert!(session.table().is_empty());

    tx.send(equipment_allow_list()).expect("send");
    assert!(session.poll_config(&mut rx).expect("poll"));
    assert_eq!(session.table().num_columns(), 5);

    // Delivered once; later polls are quiet
    assert!(!session.poll_config(&mut rx).expect("poll"));
}

#[test]
fn test_settings_document_drives_columns() {
    let settings = DisplaySettings::from_json_str(
        r#"{"properties":{"DisplayProperties":[
            {"PropertyName":"Weight","DisplayStatus":"Show"},
            {"PropertyName":"Service","DisplayStatus":"Hide"},
            {"PropertyName":"Tag No"}
        ]}}"#,
    )
    .expect("settings");

    let mut session = new_session();
    let (tx, mut rx) = config_channel();
    tx.send_settings(&settings).expect("send");
    session.mount(equipment_page()).expect("mount");
    session.poll_config(&mut rx).expect("poll");

    assert_eq!(session.table().labels(), vec!["Weight", "Tag No"]);
}

#[test]
fn test_dropped_sender_reports_channel_error() {
    let mut session = new_session();
    let (tx, mut rx) = config_channel();
    drop(tx);
    session.mount(equipment_page()).expect("mount");
    assert!(matches!(
        session.poll_config(&mut rx),
        Err(ExecError::ConfigChannel(_))
    ));
}

#[test]
fn test_hide_and_show_selected_columns() {
    let mut session = new_session();
    session.mount(equipment_page()).expect("mount");
    session
        .set_display_columns(equipment_allow_list())
        .expect("columns");

    session.select_columns(["SERVICE", "WEIGHT"]);
    assert_eq!(session.selected_columns(), &strings(&["SERVICE", "WEIGHT"])[..]);
    session.hide_selected().expect("hide");
    assert_eq!(
        session.table().labels(),
        vec!["Tag No", "Manufacturer Address", "B Box High"]
    );

    session.select_columns(["WEIGHT"]);
    session.show_selected().expect("show");
    let table = session.table();
    assert_eq!(
        table.labels(),
        vec!["Weight", "Tag No", "Manufacturer Address", "B Box High"]
    );
    assert_eq!(table.column_values("WEIGHT").expect("weight"), vec!["1250.45", "-3.14", "88"]);

    // A fresh allow-list throws the hide/show results away
    session
        .set_display_columns(equipment_allow_list())
        .expect("columns");
    assert_eq!(session.table().num_columns(), 5);
}

#[test]
fn test_selectable_columns_and_catalog() {
    let mut session = new_session();
    session.mount(equipment_page()).expect("mount");

    assert_eq!(
        session.selectable_columns(),
        strings(&[
            "TAG_NO",
            "SERVICE",
            "MANUFACTURER_ADDRESS",
            "WEIGHT",
            "geometry",
            "bBoxHigh",
            "bBoxLow",
            "geometryStream",
            "DESIGN_PRESSURE"
        ])
    );
    assert_eq!(session.catalog().len(), 9);
    assert!(session.catalog().contains("DESIGN_PRESSURE"));
}

#[test]
fn test_show_field_missing_from_first_record() {
    let mut session = new_session();
    session
        .mount(records_from_json(json!([{"id": 1}, {"id": 2, "weight": 5}])))
        .expect("mount");
    session.set_display_columns(strings(&["id"])).expect("columns");
    assert_eq!(session.selectable_columns(), strings(&["id", "weight"]));

    session.show(&strings(&["weight"])).expect("show");
    let table = session.table();
    assert_eq!(table.labels(), vec!["Weight", "Id"]);
    assert_eq!(table.rows, vec![vec!["", "1"], vec!["5", "2"]]);
}

#[test]
fn test_title_reflects_app_context() {
    let ctx = Arc::new(AppContext::new());
    let cfg = ProjectionConfig {
        title: "Pumps".into(),
        ..ProjectionConfig::default()
    };
    let session = TableSession::new(cfg, Arc::clone(&ctx));
    assert_eq!(session.title(), "Pumps");

    ctx.select_project(Selection::new("Refinery", "prj-1"));
    ctx.select_model(Selection::new("Area 3", "mdl-9"));
    assert_eq!(session.title(), "Pumps - Project: Refinery (Area 3)");
}

#[test]
fn test_csv_export_keeps_hidden_columns_by_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = new_session();
    session.mount(equipment_page()).expect("mount");
    session
        .set_display_columns(strings(&["tagno", "bboxlow"]))
        .expect("columns");

    let all = dir.path().join(&session.config().export_filename);
    session
        .write_csv(&all, session.export_options())
        .expect("csv");
    assert_eq!(
        std::fs::read_to_string(&all).expect("read"),
        "Tag No,B Box Low\nP-101A,0 0 0\nP-101B,\nE-201,\n"
    );

    let visible = dir.path().join("visible.csv");
    session
        .write_csv(&visible, session.export_options().visible_only())
        .expect("csv");
    assert_eq!(
        std::fs::read_to_string(&visible).expect("read"),
        "Tag No\nP-101A\nP-101B\nE-201\n"
    );
}

#[test]
fn test_jsonl_export() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = new_session();
    session.mount(equipment_page()).expect("mount");
    session
        .set_display_columns(strings(&["tagno", "weight"]))
        .expect("columns");

    let path = dir.path().join("table.jsonl");
    session
        .write_jsonl(&path, session.export_options())
        .expect("jsonl");
    let text = std::fs::read_to_string(&path).expect("read");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], r#"{"TAG_NO":"P-101A","WEIGHT":"1250.45"}"#);
}

#[tokio::test]
async fn test_async_configuration_delivery() {
    let (tx, rx) = config_channel();
    let loader = tokio::spawn(async move {
        tx.send(equipment_allow_list()).expect("send");
    });

    let allow_list = rx.recv().await.expect("recv");
    loader.await.expect("loader");

    let mut session = new_session();
    session.mount(equipment_page()).expect("mount");
    session.set_display_columns(allow_list).expect("columns");
    assert_eq!(session.table().num_rows(), 3);
}
