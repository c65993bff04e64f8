//! Authentication and authorization
//!
//! Identity comes from an injected `AuthProvider`, never from ambient
//! state: handlers receive the resolved `CurrentUser` and ask the provider
//! whether that user's role covers the operation. This crate ships a
//! static token-table provider; a real deployment can swap in JWT or an
//! identity service behind the same trait.

use axum::http::{header, HeaderMap};
use std::collections::HashMap;

use crate::config::Settings;

/// Role assigned to an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Manager,
    Clerk,
    Viewer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Clerk => "clerk",
            Role::Viewer => "viewer",
        };
        write!(f, "{}", name)
    }
}

/// Protected resource classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Vehicles,
    Invoices,
    Customers,
}

/// Operations on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

/// The authenticated caller attached to a request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// Identity and permission source for the HTTP layer.
pub trait AuthProvider: Send + Sync {
    /// Resolve the caller from request headers; None means unauthenticated.
    fn current_user(&self, headers: &HeaderMap) -> Option<CurrentUser>;

    /// Whether `role` may perform `action` on `resource`.
    fn has_permission(&self, role: Role, resource: Resource, action: Action) -> bool;
}

/// Role permission matrix shared by providers.
///
/// Admin: everything. Manager: everything except delete. Clerk: read
/// everything, create/update vehicles and customers but not invoices.
/// Viewer: read only.
pub fn role_allows(role: Role, resource: Resource, action: Action) -> bool {
    match role {
        Role::Admin => true,
        Role::Manager => action != Action::Delete,
        Role::Clerk => match action {
            Action::Read => true,
            Action::Create | Action::Update => resource != Resource::Invoices,
            Action::Delete => false,
        },
        Role::Viewer => action == Action::Read,
    }
}

/// Static bearer-token provider backed by a token -> user table.
#[derive(Default)]
pub struct TokenTableAuth {
    tokens: HashMap<String, CurrentUser>,
}

impl TokenTableAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token for a user. Later registrations of the same token win.
    pub fn register(&mut self, token: impl Into<String>, user: CurrentUser) {
        self.tokens.insert(token.into(), user);
    }

    /// Build the table from configured per-role tokens.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut auth = Self::new();

        let roles = [
            (&settings.auth.admin_token, Role::Admin),
            (&settings.auth.manager_token, Role::Manager),
            (&settings.auth.clerk_token, Role::Clerk),
            (&settings.auth.viewer_token, Role::Viewer),
        ];

        for (token, role) in roles {
            if let Some(token) = token {
                auth.register(
                    token.clone(),
                    CurrentUser {
                        id: format!("{}-user", role),
                        name: role.to_string(),
                        role,
                    },
                );
            }
        }

        auth
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl AuthProvider for TokenTableAuth {
    fn current_user(&self, headers: &HeaderMap) -> Option<CurrentUser> {
        let token = bearer_token(headers)?;
        self.tokens.get(token).cloned()
    }

    fn has_permission(&self, role: Role, resource: Resource, action: Action) -> bool {
        role_allows(role, resource, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_token(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_admin_can_do_everything() {
        for resource in [Resource::Vehicles, Resource::Invoices, Resource::Customers] {
            for action in [Action::Read, Action::Create, Action::Update, Action::Delete] {
                assert!(role_allows(Role::Admin, resource, action));
            }
        }
    }

    #[test]
    fn test_manager_cannot_delete() {
        assert!(role_allows(Role::Manager, Resource::Vehicles, Action::Create));
        assert!(role_allows(Role::Manager, Resource::Invoices, Action::Update));
        assert!(!role_allows(Role::Manager, Resource::Vehicles, Action::Delete));
        assert!(!role_allows(Role::Manager, Resource::Customers, Action::Delete));
    }

    #[test]
    fn test_clerk_cannot_touch_invoices() {
        assert!(role_allows(Role::Clerk, Resource::Invoices, Action::Read));
        assert!(!role_allows(Role::Clerk, Resource::Invoices, Action::Create));
        assert!(!role_allows(Role::Clerk, Resource::Invoices, Action::Update));
        assert!(role_allows(Role::Clerk, Resource::Vehicles, Action::Create));
        assert!(role_allows(Role::Clerk, Resource::Customers, Action::Update));
        assert!(!role_allows(Role::Clerk, Resource::Vehicles, Action::Delete));
    }

    #[test]
    fn test_viewer_is_read_only() {
        for resource in [Resource::Vehicles, Resource::Invoices, Resource::Customers] {
            assert!(role_allows(Role::Viewer, resource, Action::Read));
            assert!(!role_allows(Role::Viewer, resource, Action::Create));
            assert!(!role_allows(Role::Viewer, resource, Action::Update));
            assert!(!role_allows(Role::Viewer, resource, Action::Delete));
        }
    }

    #[test]
    fn test_token_table_resolves_bearer_tokens() {
        let settings = crate::config::Settings::load_for_testing();
        let auth = TokenTableAuth::from_settings(&settings);

        let user = auth
            .current_user(&headers_with_token("admin-token"))
            .unwrap();
        assert_eq!(user.role, Role::Admin);

        let user = auth
            .current_user(&headers_with_token("viewer-token"))
            .unwrap();
        assert_eq!(user.role, Role::Viewer);

        assert!(auth
            .current_user(&headers_with_token("unknown-token"))
            .is_none());
    }

    #[test]
    fn test_missing_or_malformed_header_is_unauthenticated() {
        let auth = TokenTableAuth::from_settings(&crate::config::Settings::load_for_testing());

        assert!(auth.current_user(&HeaderMap::new()).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic YWRtaW46cGFzcw=="),
        );
        assert!(auth.current_user(&headers).is_none());
    }
}
