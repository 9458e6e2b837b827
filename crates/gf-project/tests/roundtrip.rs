use gf_project::*;

fn temp_path(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("gf_project_roundtrip");
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn roundtrip_yaml_reference_case() {
    let case = reference_case();
    validate_case(&case).unwrap();

    let path = temp_path("reference.yaml");
    save_yaml(&path, &case).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(case, loaded);
}

#[test]
fn roundtrip_json_reference_case() {
    let case = reference_case();

    let path = temp_path("reference.json");
    save_case(&path, &case).unwrap();
    let loaded = load_case(&path).unwrap();

    assert_eq!(case, loaded);
}

#[test]
fn minimal_yaml_uses_defaults() {
    let yaml = r#"
name: minimal
reservoir:
  depth: 2500
  pressure: 4500000
  temperature: 523.15
"#;
    let case: Case = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(case.version, 0);
    assert_eq!(case.grid, GridDef::Count { nodes: 100 });
    assert_eq!(case.oracle, OracleDef::CoolProp);
    assert!(case.plant.power.is_none());

    let case = migrate_to_latest(case).unwrap();
    let compiled = compile_case(&case).unwrap();
    assert_eq!(compiled.grid.len(), 100);
    assert_eq!(compiled.march.reservoir.pressure.value, 4.5e6);
    assert!(compiled.power.is_none());
}

#[test]
fn invalid_case_is_not_saved() {
    let mut case = reference_case();
    case.plant.separator.points = 1;

    let path = temp_path("invalid.yaml");
    let _ = std::fs::remove_file(&path);
    assert!(matches!(
        save_yaml(&path, &case),
        Err(ProjectError::Validation(_))
    ));
    assert!(!path.exists());
}

#[test]
fn invalid_case_is_not_loaded() {
    let path = temp_path("bad_units.yaml");
    std::fs::write(
        &path,
        r#"
version: 1
name: bad
reservoir:
  depth: 2500 m
  pressure: 45 psi
  temperature: 250 C
"#,
    )
    .unwrap();

    match load_case(&path) {
        Err(ProjectError::Validation(ValidationError::Unit { field, source })) => {
            assert_eq!(field, "reservoir.pressure");
            assert!(matches!(source, UnitError::AmbiguousUnit { .. }));
        }
        other => panic!("expected unit validation error, got {other:?}"),
    }
}

#[test]
fn unversioned_file_loads_as_latest() {
    let body = r#"name: unversioned
reservoir:
  depth: 2500 m
  pressure: 45 bar
  temperature: 250 C
"#;
    let bare = temp_path("unversioned.yaml");
    std::fs::write(&bare, body).unwrap();
    let stamped = temp_path("versioned.yaml");
    std::fs::write(&stamped, format!("version: {LATEST_VERSION}\n{body}")).unwrap();

    let loaded = load_yaml(&bare).unwrap();
    assert_eq!(loaded.version, LATEST_VERSION);
    assert_eq!(loaded, load_yaml(&stamped).unwrap());

    let resaved = temp_path("unversioned_resaved.yaml");
    save_yaml(&resaved, &loaded).unwrap();
    let text = std::fs::read_to_string(&resaved).unwrap();
    assert!(text.contains(&format!("version: {LATEST_VERSION}")));
}
