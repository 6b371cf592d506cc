//! Loading `ResizeConfig` from disk.

use std::io::Write;

use springsize_core::{ConfigError, Direction, ResizeConfig, SpringPreset};

const TOML: &str = r#"
initial_width = 480
initial_height = 270
preset = "snappy"

[spring]
friction = 34

[constraints]
aspect_ratio = 2.0
min = { width = 160 }

[snap]
increment = 8
"#;

#[test]
fn toml_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TOML.as_bytes()).unwrap();

    let cfg = ResizeConfig::from_toml_file(file.path()).unwrap();
    assert_eq!(cfg.initial_width, 480.0);
    assert_eq!(cfg.initial_height, 270.0);
    assert_eq!(cfg.preset, SpringPreset::Snappy);
    let spring = cfg.resolved_spring();
    assert_eq!(spring.tension, 460.0);
    assert_eq!(spring.friction, 34.0);
    assert_eq!(cfg.constraints.min_width(), Some(160.0));
    assert_eq!(cfg.constraints.aspect_ratio, Some(2.0));
    assert_eq!(cfg.snap.increment, Some(8.0));
    assert_eq!(cfg.snap.threshold, 5.0);

    let serialized = cfg.to_toml_string().unwrap();
    let reparsed = ResizeConfig::from_toml_str(&serialized).unwrap();
    assert_eq!(reparsed, cfg);
}

#[test]
fn json_file_loads() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"initial_width": 100, "preset": "gentle"}"#)
        .unwrap();
    let cfg = ResizeConfig::from_json_file(file.path()).unwrap();
    assert_eq!(cfg.initial_width, 100.0);
    assert_eq!(cfg.initial_height, 200.0);
    assert_eq!(cfg.preset, SpringPreset::Gentle);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ResizeConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn unknown_preset_is_parse_error() {
    let err = ResizeConfig::from_toml_str("preset = \"bouncy\"").unwrap_err();
    assert!(
        matches!(err, ConfigError::Parse { format: "TOML", .. }),
        "{err}"
    );
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn broken_json_names_its_format() {
    let err = ResizeConfig::from_json_str("{ not json").unwrap_err();
    assert!(
        matches!(err, ConfigError::Parse { format: "JSON", .. }),
        "{err}"
    );
    assert!(err.to_string().starts_with("malformed JSON resize config"));
}

#[test]
fn invalid_values_are_validation_error() {
    let err = ResizeConfig::from_json_str(r#"{"constraints": {"aspect_ratio": -1}}"#).unwrap_err();
    match err {
        ConfigError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].contains("aspect_ratio"));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn direction_names_in_documents() {
    let dirs: Vec<Direction> = serde_json::from_str(r#"["n","se","w"]"#).unwrap();
    assert_eq!(dirs, vec![Direction::N, Direction::Se, Direction::W]);
}
