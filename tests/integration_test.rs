// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::Command;

use headerpack::amalgamate::Amalgamator;
use headerpack::config::Config;
use headerpack::markers::MarkerStore;
use headerpack::version::Version;
use tempfile::TempDir;

#[test]
fn test_headerpack_help() {
    let output = Command::new("cargo")
        .args(&["run", "--bin", "headerpack", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("headerpack"));
    assert!(stdout.contains("assemble"));
}

const SOURCE_HEADER: &str = "\
#ifndef LIB_H
#define LIB_H

#define LIB_VERSION_MAJOR 1
#define LIB_VERSION_MINOR 4
#define LIB_VERSION_PATCH 0
#define LIB_VERSION_PRE \"\"

#include \"compat.h\"

#define LIB_VERSION LIB_VERSION_ENCODE(LIB_VERSION_MAJOR, LIB_VERSION_MINOR, LIB_VERSION_PATCH)

#include <stdint.h>

#include \"header/types.h\"
    #include \"source/impl.c\"

#endif
";

// Helper function to set up a source tree with a header and its includes
fn setup_tree() -> (TempDir, Config) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let code = temp_dir.path().join("code");

    fs::create_dir_all(code.join("header")).unwrap();
    fs::create_dir_all(code.join("source")).unwrap();

    fs::write(code.join("lib.h"), SOURCE_HEADER).unwrap();
    fs::write(code.join("compat.h"), "/* compat layer */\n").unwrap();
    fs::write(code.join("header/types.h"), "typedef int lib_id;\n").unwrap();
    fs::write(code.join("source/impl.c"), "int lib_noop(void) {\n\n    return 0;\n}\n").unwrap();

    let config = Config {
        source: code.join("lib.h").to_string_lossy().into_owned(),
        workdir: temp_dir
            .path()
            .join("deploy")
            .to_string_lossy()
            .into_owned(),
        sentinel: Some("compat.h".to_string()),
        markers: headerpack::config::MarkersConfig {
            major: "LIB_VERSION_MAJOR".to_string(),
            minor: "LIB_VERSION_MINOR".to_string(),
            patch: "LIB_VERSION_PATCH".to_string(),
            pre: "LIB_VERSION_PRE".to_string(),
        },
        ..Config::default()
    };
    (temp_dir, config)
}

#[test]
fn test_version_get_set_round_trip() {
    let (_tree, config) = setup_tree();
    let store = MarkerStore::new(&config);

    assert_eq!(store.get().unwrap().to_string(), "1.4.0");

    store.set(&Version::parse("1.5.0-beta.2").unwrap()).unwrap();
    assert_eq!(store.get().unwrap().to_string(), "1.5.0-beta.2");

    let content = fs::read_to_string(Path::new(&config.source)).unwrap();
    assert!(content.contains("#define LIB_VERSION_MAJOR 1\n"));
    assert!(content.contains("#define LIB_VERSION_MINOR 5\n"));
    assert!(content.contains("#define LIB_VERSION_PATCH 0\n"));
    assert!(content.contains("#define LIB_VERSION_PRE \"beta.2\"\n"));
}

#[test]
fn test_set_then_get_is_idempotent_on_disk() {
    let (_tree, config) = setup_tree();
    let store = MarkerStore::new(&config);

    store.set(&Version::parse("2.0.1-rc.1").unwrap()).unwrap();
    let before = fs::read_to_string(Path::new(&config.source)).unwrap();
    store.set(&store.get().unwrap()).unwrap();
    let after = fs::read_to_string(Path::new(&config.source)).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_assemble_end_to_end() {
    let (_tree, config) = setup_tree();
    let artifact = Amalgamator::new(&config).assemble().unwrap();
    let output = fs::read_to_string(&artifact).unwrap();

    // markers and non-include lines pass through
    assert!(output.contains("#define LIB_VERSION_MAJOR 1\n"));
    assert!(output.contains("#define LIB_VERSION LIB_VERSION_ENCODE"));

    // the sentinel include and everything after it are inlined
    assert!(output.contains("/* compat layer */"));
    assert!(output.contains("typedef int lib_id;"));
    assert!(!output.contains("#include \"header/types.h\""));

    // system include stays verbatim
    assert!(output.contains("#include <stdint.h>\n"));

    // indented implementation include keeps its indentation, with blank
    // lines collapsed to truly empty ones
    assert!(output.contains("    int lib_noop(void) {\n\n        return 0;\n    }\n"));
}

#[test]
fn test_assemble_after_bump_carries_new_markers() {
    let (_tree, config) = setup_tree();
    MarkerStore::new(&config)
        .set(&Version::parse("1.5.0-beta.2").unwrap())
        .unwrap();

    let artifact = Amalgamator::new(&config).assemble().unwrap();
    let output = fs::read_to_string(&artifact).unwrap();
    assert!(output.contains("#define LIB_VERSION_MINOR 5\n"));
    assert!(output.contains("#define LIB_VERSION_PRE \"beta.2\"\n"));
}

#[test]
fn test_release_cycle_cleanup() {
    let (_tree, config) = setup_tree();
    let amalgamator = Amalgamator::new(&config);

    let artifact = amalgamator.assemble().unwrap();
    assert!(artifact.exists());

    // after the release step consumed the artifact it gets deleted;
    // a second cleanup finds nothing and is still fine
    amalgamator.cleanup().unwrap();
    assert!(!artifact.exists());
    amalgamator.cleanup().unwrap();
}

#[test]
fn test_assemble_does_not_touch_source() {
    let (_tree, config) = setup_tree();
    let before = fs::read_to_string(Path::new(&config.source)).unwrap();
    Amalgamator::new(&config).assemble().unwrap();
    let after = fs::read_to_string(Path::new(&config.source)).unwrap();
    assert_eq!(before, after);
}
