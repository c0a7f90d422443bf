//! Mission-based integration tests
//!
//! Each test drives the store the way the CLI does (mutate, save, reload)
//! and checks the resulting filesystem: registry file, managed links,
//! shell fragment and init files.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::{PermissionsExt, symlink};

use pretty_assertions::assert_eq;
use tmng_core::{Category, NewTool, Registry, RegistrySource, RegistryStore};
use tmng_fs::ProjectPaths;
use tmng_test_utils::TestProject;

fn tool(alias: &str, category: Category, group: Option<&str>, path: &str) -> NewTool {
    NewTool {
        alias: alias.to_string(),
        category,
        group: group.map(str::to_string),
        path: path.to_string(),
        description: format!("{alias} helper"),
    }
}

fn open(project: &TestProject) -> (RegistryStore, Registry) {
    let store = RegistryStore::new(project.paths());
    let loaded = store.load().unwrap();
    (store, loaded.registry)
}

#[test]
fn mission_full_lifecycle() {
    let project = TestProject::new().with_init_files(&[".bashrc"]);
    let up = project.write_script("db-up.sh", "#!/bin/sh\necho up\n");
    let down = project.write_script("db-down.py", "print('down')\n");
    let motd = project.write_script("motd.sh", "#!/bin/sh\necho hello\n");

    let (store, mut registry) = open(&project);
    registry
        .add(tool("db-up", Category::Tool, Some("db"), &up.display().to_string()))
        .unwrap();
    registry
        .add(tool("db.down", Category::Tool, Some("db"), &down.display().to_string()))
        .unwrap();
    registry
        .add(tool("motd", Category::Startup, None, &motd.display().to_string()))
        .unwrap();
    let report = store.save(&registry).unwrap();

    assert!(report.rebuild.is_clean());
    assert_eq!(report.rebuild.links_created(), 3);
    assert_eq!(project.symlinks_in("tool"), vec!["db-up", "db.down"]);
    assert_eq!(project.symlinks_in("startup"), vec!["motd"]);
    project.assert_symlink_to("startup/motd", &motd);
    let mode = fs::metadata(&down).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);

    let fragment = project.read("shell.conf");
    assert!(fragment.contains(&project.root().join("tool").display().to_string()));
    let bashrc = project.read_home_file(".bashrc");
    assert!(bashrc.starts_with("# existing shell setup\n"));
    assert_eq!(bashrc.matches("source \"").count(), 1);

    // Disable one tool, then drop the whole group
    assert!(!registry.toggle("motd").unwrap());
    store.save(&registry).unwrap();
    assert!(project.symlinks_in("startup").is_empty());

    assert_eq!(registry.remove_group("db").unwrap(), 2);
    store.save(&registry).unwrap();
    assert!(project.symlinks_in("tool").is_empty());

    let (_, reloaded) = open(&project);
    assert_eq!(reloaded, registry);
    assert_eq!(reloaded.len(), 1);
    assert!(!reloaded.tools[0].enabled);
    assert_eq!(project.read_home_file(".bashrc"), bashrc);
}

#[test]
fn mission_names_stay_unique() {
    let project = TestProject::new();
    let script = project.write_script("x.sh", "#!/bin/sh\n");
    let path = script.display().to_string();
    let (store, mut registry) = open(&project);

    registry.add(tool("git-sync", Category::Tool, None, &path)).unwrap();
    registry.add(tool("git.sync", Category::Tool, None, &path)).unwrap();
    registry.add(tool("git_sync", Category::Tool, None, &path)).unwrap();
    store.save(&registry).unwrap();

    let names: Vec<_> = registry.tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["git_sync", "git_sync_1", "git_sync_2"]);
    assert_eq!(project.symlinks_in("tool").len(), 3);
}

#[test]
fn mission_hand_edited_registry_with_home_paths() {
    let project = TestProject::new();
    let target = project.write_home_file("bin-tool", "#!/bin/sh\n");
    fs::write(
        project.root().join("tools.yaml"),
        "version: '1.0'\ntools:\n\
         - name: mine\n  alias: mine\n  category: tool\n  group: None\n  path: ~/bin-tool\n\
         - name: ghost\n  alias: ghost\n  category: tool\n  path: ~/missing\n",
    )
    .unwrap();

    let (store, registry) = open(&project);
    assert_eq!(registry.tools[0].group, None);

    let report = store.refresh(&registry).unwrap();

    project.assert_symlink_to("tool/mine", &target);
    project.assert_no_entry("tool/ghost");
    assert_eq!(report.rebuild.warnings_for("ghost").count(), 1);
    // refresh never rewrites the registry file
    assert!(project.read("tools.yaml").contains("~/bin-tool"));
}

#[test]
fn mission_foreign_links_are_swept() {
    let project = TestProject::new();
    let (store, registry) = open(&project);
    let outside = project.write_script("outside.sh", "#!/bin/sh\n");
    symlink(&outside, project.root().join("tool/stray")).unwrap();
    fs::write(project.root().join("tool/notes.txt"), "keep me").unwrap();

    let report = store.save(&registry).unwrap();

    assert_eq!(report.rebuild.removed, 1);
    project.assert_no_entry("tool/stray");
    assert_eq!(project.read("tool/notes.txt"), "keep me");
}

#[test]
fn mission_json_registry() {
    let project = TestProject::new();
    let config = project.root().join("tools.json");
    let paths = ProjectPaths::new(project.root())
        .with_config_file(&config)
        .with_home(project.home());
    let store = RegistryStore::new(paths);
    let script = project.write_script("fmt.sh", "#!/bin/sh\n");

    let loaded = store.load().unwrap();
    assert_eq!(loaded.source, RegistrySource::Created);

    let mut registry = loaded.registry;
    registry
        .add(tool("fmt", Category::Tool, None, &script.display().to_string()))
        .unwrap();
    store.save(&registry).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(value["tools"][0]["alias"], "fmt");
    assert_eq!(value["tools"][0]["group"], "None");
    project.assert_symlink_to("tool/fmt", &script);
}
