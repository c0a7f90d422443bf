//! Shell integration: the generated fragment and the init-file patcher

pub mod fragment;
mod init;

pub use init::{INIT_FILE_NAMES, PatchFailure, PatchReport, ShellInitPatcher, source_line};
