use content::{CatalogSource, ContentError, JsonFileCatalog, default_catalog, to_json_pretty};
use quiz_core::model::StepKind;

#[tokio::test]
async fn exported_builtin_catalog_loads_back_from_disk() {
    let catalog = default_catalog().unwrap();
    let json = to_json_pretty(&catalog).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("funnel.json");
    std::fs::write(&path, json).unwrap();

    let loaded = JsonFileCatalog::new(&path).load_catalog().await.unwrap();
    assert_eq!(loaded, catalog);
    assert_eq!(loaded.step_at(9).unwrap().kind(), StepKind::DateInput);
}

#[tokio::test]
async fn missing_file_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let err = JsonFileCatalog::new(&path).load_catalog().await.unwrap_err();
    assert!(matches!(err, ContentError::NotFound(p) if p == path));
}

#[tokio::test]
async fn question_without_options_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(
        &path,
        r#"[{ "id": 1, "type": "QUESTION", "question": "Sem opções?" }]"#,
    )
    .unwrap();

    let err = JsonFileCatalog::new(&path).load_catalog().await.unwrap_err();
    assert!(matches!(err, ContentError::Catalog(_)));
}
