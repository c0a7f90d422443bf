#![cfg(unix)]

use std::fs;
use std::os::unix::fs::{PermissionsExt, symlink};

use assert_fs::prelude::*;
use predicates::prelude::*;
use tmng_fs::link;

#[test]
fn test_clear_symlinks_keeps_regular_files() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.child("script.sh");
    target.write_str("#!/bin/sh\n").unwrap();
    let dir = temp.child("tool");
    dir.create_dir_all().unwrap();
    symlink(target.path(), dir.child("one").path()).unwrap();
    symlink(temp.child("gone").path(), dir.child("dangling").path()).unwrap();
    dir.child("notes.txt").write_str("keep me").unwrap();

    let outcome = link::clear_symlinks(dir.path()).unwrap();

    assert_eq!(outcome.removed, 2);
    assert!(outcome.failures.is_empty());
    dir.child("notes.txt").assert("keep me");
    dir.child("one").assert(predicate::path::missing());
    assert!(!link::slot_occupied(dir.child("dangling").path()));
}

#[test]
fn test_clear_symlinks_missing_dir_is_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    assert!(link::clear_symlinks(temp.child("absent").path()).is_err());
}

#[test]
fn test_replace_symlink_over_regular_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.child("real");
    target.write_str("payload").unwrap();
    let slot = temp.child("build");
    slot.write_str("squatter").unwrap();

    link::replace_symlink(target.path(), slot.path()).unwrap();

    assert_eq!(fs::read_link(slot.path()).unwrap(), target.path());
    slot.assert("payload");
}

#[test]
fn test_replace_symlink_over_dangling_link() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.child("real");
    target.touch().unwrap();
    let slot = temp.child("build");
    symlink(temp.child("old").path(), slot.path()).unwrap();

    link::replace_symlink(target.path(), slot.path()).unwrap();

    assert_eq!(fs::read_link(slot.path()).unwrap(), target.path());
}

#[test]
fn test_replace_symlink_refuses_directory() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.child("real");
    target.touch().unwrap();
    let slot = temp.child("build");
    slot.create_dir_all().unwrap();

    assert!(link::replace_symlink(target.path(), slot.path()).is_err());
    slot.assert(predicate::path::is_dir());
}

#[test]
fn test_set_executable() {
    let temp = assert_fs::TempDir::new().unwrap();
    let script = temp.child("run.sh");
    script.write_str("#!/bin/sh\n").unwrap();
    fs::set_permissions(script.path(), fs::Permissions::from_mode(0o644)).unwrap();

    link::set_executable(script.path()).unwrap();

    let mode = fs::metadata(script.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}
