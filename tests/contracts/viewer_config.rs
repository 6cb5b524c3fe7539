//! Viewer configuration format contract.

use std::fs;

use downline::config::load_with_warnings;
use downline::{load_or_default, SideFilter, ViewerConfig};

fn write_config(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("downline.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn contract_minimal_config_fills_defaults() {
    let (_dir, path) = write_config("side = \"right\"\n");
    let (config, warnings) = load_with_warnings(&path).unwrap();

    assert_eq!(config.side, SideFilter::Right);
    assert_eq!(config.page_size, ViewerConfig::default().page_size);
    assert_eq!(config.min_depth, None);
    assert!(warnings.is_empty());
}

#[test]
fn contract_unknown_keys_warn_but_load() {
    let (_dir, path) = write_config(
        r#"
page_size = 20
theme = "dark"
"#,
    );
    let (config, warnings) = load_with_warnings(&path).unwrap();

    assert_eq!(config.page_size, 20);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "theme");
}

#[test]
fn contract_depth_bounds_are_optional_and_independent() {
    let (_dir, path) = write_config("min_depth = 2\n");
    let (config, _) = load_with_warnings(&path).unwrap();

    assert_eq!(config.min_depth, Some(2));
    assert_eq!(config.max_depth, None);
}

#[test]
fn contract_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_or_default(Some(&dir.path().join("absent.toml")));
    assert_eq!(config.page_size, ViewerConfig::default().page_size);
}
