// tests/config_test.rs
use headerpack::config::{load_config, Config};
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.source, "code/library.h");
    assert_eq!(config.workdir, "deploy");
    assert_eq!(config.sentinel, None);
    assert_eq!(config.markers.major, "VERSION_MAJOR");
    assert_eq!(config.markers.minor, "VERSION_MINOR");
    assert_eq!(config.markers.patch, "VERSION_PATCH");
    assert_eq!(config.markers.pre, "VERSION_PRE");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
source = "code/mylib.h"
workdir = "misc/deploy"
sentinel = "mylib_compat.h"

[markers]
major = "MYLIB_VERSION_MAJOR"
minor = "MYLIB_VERSION_MINOR"
patch = "MYLIB_VERSION_PATCH"
pre = "MYLIB_VERSION_PRE"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.source, "code/mylib.h");
    assert_eq!(config.workdir, "misc/deploy");
    assert_eq!(config.sentinel, Some("mylib_compat.h".to_string()));
    assert_eq!(config.markers.major, "MYLIB_VERSION_MAJOR");
    // unspecified fields keep their defaults
    assert_eq!(config.output, None);
    assert_eq!(config.resource_dir, None);
}

#[test]
fn test_partial_file_uses_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"source = \"include/lib.h\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.source, "include/lib.h");
    assert_eq!(config.workdir, "deploy");
    assert_eq!(config.markers.major, "VERSION_MAJOR");
}

#[test]
fn test_load_missing_custom_path_is_error() {
    assert!(load_config(Some("/nonexistent/headerpack.toml")).is_err());
}

#[test]
fn test_load_invalid_toml_is_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"source = [not toml").unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path().to_str().unwrap())).is_err());
}

#[test]
#[serial]
fn test_load_from_current_directory() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("headerpack.toml"),
        "source = \"code/local.h\"\n",
    )
    .unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();

    let config = load_config(None).unwrap();

    std::env::set_current_dir(original_dir).unwrap();

    assert_eq!(config.source, "code/local.h");
}
