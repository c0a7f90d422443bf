use std::fs;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tmng_core::store::CORRUPT_SUFFIX;
use tmng_core::{Category, NewTool, Registry, RegistrySource, RegistryStore, ToolRecord};
use tmng_test_utils::TestProject;

fn tool(alias: &str, group: Option<&str>, enabled: bool) -> ToolRecord {
    ToolRecord {
        name: alias.to_string(),
        alias: alias.to_string(),
        category: Category::Tool,
        group: group.map(str::to_string),
        path: format!("/nonexistent/{alias}"),
        description: format!("{alias} helper"),
        enabled,
    }
}

#[test]
fn test_load_missing_file_creates_default() {
    let project = TestProject::new();
    let store = RegistryStore::new(project.paths());

    let loaded = store.load().unwrap();

    assert_eq!(loaded.source, RegistrySource::Created);
    assert!(loaded.registry.is_empty());
    assert!(loaded.save.is_some());

    let value: serde_yaml::Value = serde_yaml::from_str(&project.read("tools.yaml")).unwrap();
    assert_eq!(value["version"].as_str(), Some("1.0"));
    assert_eq!(value["tools"].as_sequence().map(|s| s.len()), Some(0));

    // Creating the file runs the full save pipeline
    assert!(project.root().join("tool").is_dir());
    assert!(project.root().join("shell.conf").is_file());
}

#[test]
fn test_round_trip_preserves_records() {
    let project = TestProject::new();
    let store = RegistryStore::new(project.paths());
    let registry = Registry {
        version: "1.0".into(),
        tools: vec![
            tool("zeta", Some("db"), true),
            tool("alpha", None, false),
            tool("mid", Some(""), true),
        ],
    };

    store.save(&registry).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded.source, RegistrySource::File);
    assert_eq!(loaded.registry, registry);
}

#[test]
fn test_saved_file_keeps_field_order() {
    let project = TestProject::new();
    let store = RegistryStore::new(project.paths());
    let registry = Registry {
        version: "1.0".into(),
        tools: vec![tool("build", None, true)],
    };

    store.save(&registry).unwrap();

    let content = project.read("tools.yaml");
    let keys: Vec<usize> = ["name:", "alias:", "category:", "group:", "path:", "description:", "enabled:"]
        .iter()
        .map(|k| content.find(k).unwrap_or_else(|| panic!("missing {k} in {content}")))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert!(content.find("version:").unwrap() < content.find("tools:").unwrap());
}

#[test]
fn test_load_applies_field_defaults() {
    let project = TestProject::new();
    fs::write(
        project.root().join("tools.yaml"),
        "version: '1.0'\ntools:\n- name: build\n  alias: build\n  category: tool\n",
    )
    .unwrap();

    let loaded = RegistryStore::new(project.paths()).load().unwrap();

    let record = &loaded.registry.tools[0];
    assert_eq!(record.group, None);
    assert_eq!(record.path, "");
    assert_eq!(record.description, "");
    assert!(record.enabled);
    assert!(loaded.save.is_none());
}

#[test]
fn test_load_malformed_file_recovers_empty() {
    let project = TestProject::new();
    let garbage = "tools: [this is: not {valid yaml\n";
    fs::write(project.root().join("tools.yaml"), garbage).unwrap();

    let loaded = RegistryStore::new(project.paths()).load().unwrap();

    assert!(loaded.registry.is_empty());
    match loaded.source {
        RegistrySource::Recovered { backup, .. } => {
            let backup = backup.expect("backup should be kept");
            assert_eq!(fs::read_to_string(backup).unwrap(), garbage);
        }
        other => panic!("Expected Recovered, got {other:?}"),
    }
    let reparsed: Registry = serde_yaml::from_str(&project.read("tools.yaml")).unwrap();
    assert!(reparsed.tools.is_empty());
    assert!(
        project
            .root()
            .join(format!("tools.yaml.{CORRUPT_SUFFIX}"))
            .exists()
    );
}

#[test]
fn test_load_non_utf8_file_recovers_empty() {
    let project = TestProject::new();
    let bytes = b"tools: [\xff\xfe]\n";
    fs::write(project.root().join("tools.yaml"), bytes).unwrap();

    let loaded = RegistryStore::new(project.paths()).load().unwrap();

    assert!(loaded.registry.is_empty());
    assert!(loaded.save.is_some());
    match loaded.source {
        RegistrySource::Recovered { backup, .. } => {
            let backup = backup.expect("backup should be kept");
            assert_eq!(fs::read(backup).unwrap(), bytes.to_vec());
        }
        other => panic!("Expected Recovered, got {other:?}"),
    }
    let reparsed: Registry = serde_yaml::from_str(&project.read("tools.yaml")).unwrap();
    assert!(reparsed.tools.is_empty());
}

#[cfg(unix)]
#[test]
fn test_hand_edited_path_aliases_never_escape_managed_dirs() {
    let project = TestProject::new();
    let script = project.write_script("x.sh", "#!/bin/sh\n");
    let victim = project.write_home_file("important.txt", "keep me\n");
    fs::write(
        project.root().join("tools.yaml"),
        format!(
            "tools:\n\
             - name: abs\n  alias: {victim}\n  category: tool\n  path: {script}\n\
             - name: up\n  alias: ../tools.yaml\n  category: startup\n  path: {script}\n\
             - name: ok\n  alias: ok\n  category: tool\n  path: {script}\n",
            victim = victim.display(),
            script = script.display(),
        ),
    )
    .unwrap();
    let store = RegistryStore::new(project.paths());

    let loaded = store.load().unwrap();
    assert_eq!(loaded.source, RegistrySource::File);
    assert_eq!(loaded.registry.len(), 3);

    let report = store.refresh(&loaded.registry).unwrap();

    assert_eq!(project.read_home_file("important.txt"), "keep me\n");
    assert!(!fs::symlink_metadata(&victim).unwrap().file_type().is_symlink());
    assert!(project.read("tools.yaml").contains("../tools.yaml"));
    assert_eq!(report.rebuild.warnings_for(&victim.display().to_string()).count(), 1);
    assert_eq!(report.rebuild.warnings_for("../tools.yaml").count(), 1);
    assert_eq!(report.rebuild.links_created(), 1);
    project.assert_symlink_to("tool/ok", &script);
}

#[test]
fn test_load_invalid_category_recovers_empty() {
    let project = TestProject::new();
    fs::write(
        project.root().join("tools.yaml"),
        "tools:\n- name: a\n  alias: a\n  category: daemon\n",
    )
    .unwrap();

    let loaded = RegistryStore::new(project.paths()).load().unwrap();

    assert!(matches!(loaded.source, RegistrySource::Recovered { .. }));
}

#[test]
fn test_load_empty_file_is_empty_registry() {
    let project = TestProject::new();
    fs::write(project.root().join("tools.yaml"), "").unwrap();

    let loaded = RegistryStore::new(project.paths()).load().unwrap();

    assert_eq!(loaded.source, RegistrySource::File);
    assert!(loaded.registry.is_empty());
}

#[test]
fn test_toml_registry_file() {
    let project = TestProject::new();
    let paths = project.paths().with_config_file(project.root().join("tools.toml"));
    let store = RegistryStore::new(paths);
    let registry = Registry {
        version: "1.0".into(),
        tools: vec![tool("build", None, true), tool("pg", Some("db"), false)],
    };

    store.save(&registry).unwrap();

    assert_eq!(store.load().unwrap().registry, registry);
}

#[test]
fn test_failed_write_skips_reconcile() {
    let project = TestProject::new();
    let blocker = project.write_script("blocker", "not a directory");
    let paths = project.paths().with_config_file(blocker.join("tools.yaml"));

    let result = RegistryStore::new(paths).save(&Registry::default());

    assert!(result.is_err());
    assert!(!project.root().join("tool").exists());
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
}

#[test]
fn test_unsupported_extension_is_an_error() {
    let project = TestProject::new();
    let paths = project.paths().with_config_file(project.root().join("tools.ini"));

    assert!(RegistryStore::new(paths).load().is_err());
}

#[cfg(unix)]
#[test]
fn test_save_reconciles_added_tool() {
    let project = TestProject::new();
    let script = project.write_script("build.sh", "#!/bin/sh\n");
    let store = RegistryStore::new(project.paths());
    let mut registry = store.load().unwrap().registry;

    registry
        .add(NewTool {
            alias: "build".into(),
            category: Category::Tool,
            group: None,
            path: script.to_string_lossy().into_owned(),
            description: "Build the project".into(),
        })
        .unwrap();
    let report = store.save(&registry).unwrap();

    assert_eq!(report.rebuild.links_created(), 1);
    project.assert_symlink_to("tool/build", &script);
}

fn arb_record() -> impl Strategy<Value = ToolRecord> {
    (
        "[a-z][a-z0-9_]{0,10}",
        "[a-z][a-z0-9.-]{0,10}",
        prop_oneof![Just(Category::Startup), Just(Category::Tool)],
        prop::option::of("[a-z]{1,8}"),
        "[a-zA-Z0-9_./~-]{0,20}",
        "[ -~]{0,24}",
        any::<bool>(),
    )
        .prop_map(|(name, alias, category, group, path, description, enabled)| ToolRecord {
            name,
            alias,
            category,
            group,
            path,
            description,
            enabled,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_save_then_load_round_trips(tools in prop::collection::vec(arb_record(), 0..6)) {
        let project = TestProject::new();
        let store = RegistryStore::new(project.paths());
        let registry = Registry { version: "1.0".into(), tools };

        store.save(&registry).unwrap();
        let loaded = store.load().unwrap();

        prop_assert_eq!(loaded.registry, registry);
    }
}
