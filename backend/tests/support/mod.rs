#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use admin_groups::db::{
    LocalGroupIndex, LocalUserDirectory, RepositoryFactory, StaticSecurityService,
};
use admin_groups::http::{create_router, AppState};
use admin_groups::models::{split_list, Group, Organization, User};
use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

pub const ORG: &str = "mh_default_org";
pub const BASE: &str = "/admin-ng/groups";

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Variables are restored on unwind and access is serialized, since tests in
/// one binary share the process environment.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// A router over in-memory collaborators, with handles to seed or break them.
pub struct TestApp {
    pub router: Router,
    pub index: LocalGroupIndex,
    pub directory: LocalUserDirectory,
}

pub fn test_app() -> TestApp {
    test_app_with_max_name_length(128)
}

pub fn test_app_with_max_name_length(max_name_length: usize) -> TestApp {
    let index = LocalGroupIndex::new();
    let directory = LocalUserDirectory::new();
    directory.add_user(User::new("alice").with_name("Alice Liddell"));
    directory.add_user(User::new("bob").with_name("  "));

    let security = StaticSecurityService::new(
        Organization::new(ORG, "Media Hub"),
        User::new("admin"),
    );
    let collaborators = RepositoryFactory::assemble(
        Arc::new(index.clone()),
        Arc::new(security),
        Arc::new(directory.clone()),
        max_name_length,
    );

    TestApp {
        router: create_router(AppState::new(collaborators)),
        index,
        directory,
    }
}

impl TestApp {
    /// Put a group straight into the index.
    pub fn seed_group(&self, name: &str, description: Option<&str>, roles: &str, members: &str) -> Group {
        let group = Group::from_name(
            ORG,
            name,
            description.map(str::to_string),
            split_list(Some(roles)),
            split_list(Some(members)),
        );
        self.index.insert(group.clone());
        group
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.send(Method::POST, uri, Some(form_body(fields))).await
    }

    pub async fn put_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.send(Method::PUT, uri, Some(form_body(fields))).await
    }

    async fn send(&self, method: Method, uri: &str, form: Option<String>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match form {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: bytes.to_vec(),
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Encode fields as `application/x-www-form-urlencoded`.
pub fn form_body(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).unwrap()
}
