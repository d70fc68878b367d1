//! Tests for db::repository::error module.

use admin_groups::db::repository::{ErrorContext, RepositoryError};

#[test]
fn test_error_context_new() {
    let ctx = ErrorContext::new("create_group");
    assert_eq!(ctx.operation, Some("create_group".to_string()));
    assert!(ctx.entity.is_none());
    assert!(ctx.entity_id.is_none());
    assert!(ctx.details.is_none());
}

#[test]
fn test_error_context_chaining() {
    let ctx = ErrorContext::new("update_group")
        .with_entity("group")
        .with_entity_id("editors")
        .with_details("max_length=128");

    assert_eq!(ctx.operation, Some("update_group".to_string()));
    assert_eq!(ctx.entity, Some("group".to_string()));
    assert_eq!(ctx.entity_id, Some("editors".to_string()));
    assert_eq!(ctx.details, Some("max_length=128".to_string()));
}

#[test]
fn test_error_context_display() {
    let ctx = ErrorContext::new("remove_group")
        .with_entity("group")
        .with_entity_id("editors");
    assert_eq!(
        ctx.to_string(),
        "[operation=remove_group, entity=group, id=editors]"
    );
}

#[test]
fn test_empty_context_display() {
    assert_eq!(ErrorContext::default().to_string(), "[]");
}

#[test]
fn test_error_display_includes_context() {
    let err = RepositoryError::not_found_with_context(
        "Group editors does not exist.",
        ErrorContext::new("get_group").with_entity_id("editors"),
    );
    let display = err.to_string();
    assert!(display.starts_with("Not found: Group editors does not exist."));
    assert!(display.contains("operation=get_group"));
}

#[test]
fn test_message_excludes_context() {
    let err = RepositoryError::conflict_with_context(
        "A group with the name 'Editors' already exists",
        ErrorContext::new("create_group").with_entity_id("editors"),
    );
    assert_eq!(err.message(), "A group with the name 'Editors' already exists");
    assert_eq!(err.context().entity_id.as_deref(), Some("editors"));
}

#[test]
fn test_with_operation_overrides_context() {
    let err = RepositoryError::index_with_context(
        "Search index unavailable",
        ErrorContext::new("search_groups").with_entity("group"),
    )
    .with_operation("list_groups");

    assert_eq!(err.context().operation.as_deref(), Some("list_groups"));
    assert_eq!(err.context().entity.as_deref(), Some("group"));
    assert!(matches!(err, RepositoryError::IndexError { .. }));
}

#[test]
fn test_constructors_pick_variants() {
    assert!(matches!(
        RepositoryError::validation("x"),
        RepositoryError::ValidationError { .. }
    ));
    assert!(matches!(
        RepositoryError::configuration("x"),
        RepositoryError::ConfigurationError { .. }
    ));
    assert!(matches!(
        RepositoryError::internal("x"),
        RepositoryError::InternalError { .. }
    ));
}

#[test]
fn test_toml_errors_become_configuration_errors() {
    let toml_err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
    let err = RepositoryError::from(toml_err);
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    assert!(err.message().starts_with("Failed to parse config file"));
}
