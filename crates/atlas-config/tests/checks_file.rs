//! Checks-config file loading against real files on disk.

use std::io::Write;

use atlas_config::{ChecksConfig, ConfigError};
use pretty_assertions::assert_eq;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write");
    file
}

#[test]
fn loads_checks_config_file() {
    let file = write_temp(
        r#"{
            "EdgeCrossingEdgeCheck": {
                "challenge": {
                    "description": "Edges crossing without a node",
                    "difficulty": "NORMAL",
                    "defaultPriority": "MEDIUM",
                    "highPriorityRule": {"condition": "OR", "rules": ["highway=motorway"]}
                }
            },
            "SinkIslandCheck": {"tiny.island.size": 25}
        }"#,
    );

    let config = ChecksConfig::from_path(file.path()).expect("parses");
    assert_eq!(config.len(), 2);
    let challenge = config.challenge("EdgeCrossingEdgeCheck").expect("challenge");
    assert_eq!(challenge["difficulty"], "NORMAL");
    assert!(config.challenge("SinkIslandCheck").is_none());

    let mut names: Vec<&str> = config.check_names().collect();
    names.sort_unstable();
    assert_eq!(names, vec!["EdgeCrossingEdgeCheck", "SinkIslandCheck"]);
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = ChecksConfig::from_path(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::ChecksRead { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn malformed_json_is_parse_error() {
    let file = write_temp("{\"SinkIslandCheck\": ");
    let err = ChecksConfig::from_path(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ChecksParse { .. }));
}

#[test]
fn top_level_array_is_shape_error() {
    let file = write_temp("[]");
    let err = ChecksConfig::from_path(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ChecksShape { .. }));
}
