//! Tests for configuration loading and collaborator assembly.

mod support;

use std::io::Write;
use std::str::FromStr;

use admin_groups::db::repo_config::CONFIG_PATH_ENV;
use admin_groups::db::{RepositoryConfig, RepositoryFactory, RepositoryType};
use admin_groups::db::repository::RepositoryError;
use support::with_scoped_env;

const SEEDED_CONFIG: &str = r#"
[organization]
id = "mh_default_org"
name = "Media Hub"

[security]
username = "curator"

[groups]
max_name_length = 16

[[seed.users]]
username = "alice"
name = "Alice Liddell"

[[seed.groups]]
name = "Editors"
description = "Edit media"
roles = ["ROLE_EDITOR"]
members = ["alice"]
"#;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_repository_type_from_str() {
    assert_eq!(RepositoryType::from_str("local").unwrap(), RepositoryType::Local);
    assert_eq!(RepositoryType::from_str("MEMORY").unwrap(), RepositoryType::Local);

    let err = RepositoryType::from_str("solr").unwrap_err();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
}

#[test]
fn test_config_rejects_unknown_repository_type() {
    let err = RepositoryConfig::from_str("[repository]\ntype = \"solr\"\n").unwrap_err();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
}

#[test]
fn test_config_rejects_zero_name_length() {
    let err = RepositoryConfig::from_str("[groups]\nmax_name_length = 0\n").unwrap_err();
    assert!(err.message().contains("max_name_length"));
}

#[test]
fn test_missing_config_file_is_configuration_error() {
    let err = RepositoryConfig::from_file("/nonexistent/repository.toml").unwrap_err();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
}

#[tokio::test]
async fn test_from_config_file_seeds_collaborators() {
    let file = write_config(SEEDED_CONFIG);
    let collaborators = RepositoryFactory::from_config_file(file.path()).unwrap();

    assert_eq!(collaborators.security.organization().id, "mh_default_org");
    assert_eq!(collaborators.security.user().username, "curator");

    let group = collaborators
        .index_service
        .get_group("editors", collaborators.search_index.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(group.role, "ROLE_GROUP_EDITORS");
    assert!(group.members.contains("alice"));

    let name = collaborators
        .user_directory
        .resolve_display_name("alice")
        .await
        .unwrap();
    assert_eq!(name.as_deref(), Some("Alice Liddell"));
}

#[tokio::test]
async fn test_configured_name_length_is_enforced() {
    let file = write_config(SEEDED_CONFIG);
    let collaborators = RepositoryFactory::from_config_file(file.path()).unwrap();

    let changes = admin_groups::services::GroupChanges::named("A name over sixteen characters");
    let err = collaborators.index_service.create_group(&changes).await.unwrap_err();
    assert_eq!(err.context().details.as_deref(), Some("max_length=16"));
}

#[test]
fn test_from_env_reads_config_path() {
    let file = write_config(SEEDED_CONFIG);
    let path = file.path().to_string_lossy().to_string();

    let collaborators = with_scoped_env(
        &[(CONFIG_PATH_ENV, Some(path.as_str())), ("REPOSITORY_TYPE", None)],
        RepositoryFactory::from_env,
    )
    .unwrap();
    assert_eq!(collaborators.security.organization().name, "Media Hub");
}

#[test]
fn test_from_env_repository_type_override() {
    let file = write_config(SEEDED_CONFIG);
    let path = file.path().to_string_lossy().to_string();

    let result = with_scoped_env(
        &[(CONFIG_PATH_ENV, Some(path.as_str())), ("REPOSITORY_TYPE", Some("solr"))],
        RepositoryFactory::from_env,
    );
    assert!(matches!(result, Err(RepositoryError::ConfigurationError { .. })));

    let result = with_scoped_env(
        &[(CONFIG_PATH_ENV, Some(path.as_str())), ("REPOSITORY_TYPE", Some("memory"))],
        RepositoryFactory::from_env,
    );
    assert!(result.is_ok());
}

#[test]
fn test_from_env_with_bad_config_path_fails() {
    let result = with_scoped_env(
        &[(CONFIG_PATH_ENV, Some("/nonexistent/groups.toml"))],
        RepositoryFactory::from_env,
    );
    assert!(result.is_err());
}

#[test]
fn test_colliding_seed_groups_fail_to_load() {
    let file = write_config(
        r#"
[[seed.groups]]
name = "Editors"

[[seed.groups]]
name = "EDITORS"
"#,
    );
    let result = RepositoryFactory::from_config_file(file.path());
    assert!(matches!(result, Err(RepositoryError::ConfigurationError { .. })));
}
