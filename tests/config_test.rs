//! Config loading integration tests
//!
//! Writes household configs to temp files in each supported format and
//! loads them through `Config::load`.

use std::io::Write;

use chore_distributor::{Config, ConfigError};
use tempfile::{Builder, NamedTempFile};

fn write_config(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .prefix("chores_config_")
        .suffix(suffix)
        .tempfile()
        .expect("create temp config");
    file.write_all(content.as_bytes()).expect("write temp config");
    file
}

#[test]
fn test_load_json_file() {
    let file = write_config(
        ".json",
        r#"{
  "chores": [
    {"Name": "Kitchen", "Difficulty": 6, "Earned": 5},
    {"Name": "Bathroom", "Difficulty": 5, "Earned": 4}
  ],
  "people": [
    {"Name": "Alice", "EffortCapacity": 0},
    {"Name": "Bob", "EffortCapacity": 15}
  ]
}"#,
    );

    let config = Config::load(file.path()).expect("valid config");

    assert_eq!(config.chores.len(), 2);
    assert_eq!(config.chores[0].name, "Kitchen");
    assert_eq!(config.people.len(), 2);
    assert_eq!(config.people[0].name, "Alice");
    assert_eq!(config.people[1].capacity, 15);
    for person in &config.people {
        assert!(person.chores.is_empty());
    }
}

#[test]
fn test_load_toml_file() {
    let file = write_config(
        ".toml",
        r#"
[[chores]]
name = "Vacuum"
difficulty = 4
earned = 3
description = "Upstairs and stairs"

[[people]]
name = "Alice"
contact = "alice@example.com"
"#,
    );

    let config = Config::load(file.path()).expect("valid config");

    assert_eq!(config.chores[0].description.as_deref(), Some("Upstairs and stairs"));
    assert_eq!(config.people[0].contact.as_deref(), Some("alice@example.com"));
}

#[test]
fn test_load_yaml_file() {
    let file = write_config(
        ".yml",
        r#"
chores:
  - name: Trash
    effort: 1
    reward: 1
people:
  - name: Bob
    capacity: 3
    pre_assigned:
      - name: Dishes
        effort: 2
        reward: 2
"#,
    );

    let config = Config::load(file.path()).expect("valid config");

    let bob = &config.people[0];
    assert_eq!(bob.capacity, 3);
    assert_eq!(bob.total_effort, 2);
    assert_eq!(bob.total_reward, 2);
}

#[test]
fn test_load_missing_file() {
    let err = Config::load("nonexistent_file.json").unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_load_invalid_json() {
    let file = write_config(".json", r#"{"chores": [invalid json}"#);

    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_load_negative_reward() {
    let file = write_config(
        ".json",
        r#"{"chores": [{"Name": "Kitchen", "Difficulty": 6, "Earned": -5}], "people": [{"Name": "Alice"}]}"#,
    );

    assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse(_))));
}

#[test]
fn test_load_pre_assigned_totals_past_u32() {
    let file = write_config(
        ".json",
        r#"{
  "chores": [{"Name": "Trash", "Difficulty": 1, "Earned": 1}],
  "people": [
    {"Name": "Alice", "EffortCapacity": 0, "PreAssignedChores": [
      {"Name": "Garage", "Difficulty": 4294967295, "Earned": 4294967295},
      {"Name": "Feed cat", "Difficulty": 1, "Earned": 1}
    ]}
  ]
}"#,
    );

    let config = Config::load(file.path()).expect("valid config");

    let alice = &config.people[0];
    assert_eq!(alice.total_effort, 4_294_967_296);
    assert_eq!(alice.total_reward, 4_294_967_296);
}
