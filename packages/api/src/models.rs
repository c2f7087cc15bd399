//! # Wire models for the auth API
//!
//! | Type | Direction | Used by |
//! |------|-----------|---------|
//! | [`SignupRequest`] | request | `POST /signup` |
//! | [`LoginRequest`] | request | `POST /token` (password grant with a chosen role) |
//! | [`PendingUser`] | response | `GET /users?status=pending` |
//! | [`AuditLog`] | response | `GET /audit-logs` |
//! | [`Group`] | response | `GET /groups` |
//!
//! List envelopes (`{"users": [...]}` and friends) tolerate a missing or
//! `null` list and read it as empty.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Role offered at login when the API cannot say which roles an email holds.
pub const DEFAULT_LOGIN_ROLE: &str = "Read-Only";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginRequest {
    pub grant_type: &'static str,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl LoginRequest {
    pub fn password(email: impl Into<String>, password: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            grant_type: "password",
            email: email.into(),
            password: password.into(),
            role: role.into(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct EmailRequest<'a> {
    pub email: &'a str,
}

#[derive(Serialize)]
pub(crate) struct NewPasswordRequest<'a> {
    pub new_password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct AssignRoleRequest<'a> {
    pub role: &'a str,
}

#[derive(Serialize)]
pub(crate) struct AssignGroupRequest {
    pub group_id: i64,
}

#[derive(Deserialize)]
pub(crate) struct MessageResponse {
    pub message: String,
}

#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Deserialize)]
pub(crate) struct RolesResponse {
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub(crate) struct UsersResponse {
    #[serde(default)]
    pub users: Option<Vec<PendingUser>>,
}

#[derive(Deserialize)]
pub(crate) struct LogsResponse {
    #[serde(default)]
    pub logs: Option<Vec<AuditLog>>,
}

#[derive(Deserialize)]
pub(crate) struct GroupsResponse {
    #[serde(default)]
    pub groups: Option<Vec<Group>>,
}

/// An account waiting for admin approval.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingUser {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub is_active: bool,
}

/// One audit trail entry, rendered as received.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: i64,
    pub user_id: Option<i64>,
    pub action: String,
    #[serde(default)]
    pub details: serde_json::Value,
    /// As sent by the API. Never rejected; see [`AuditLog::timestamp_utc`].
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl AuditLog {
    /// `details` as compact JSON (`null` when the entry has none).
    pub fn details_text(&self) -> String {
        self.details.to_string()
    }

    /// The timestamp as a UTC instant, when it parses as RFC 3339 or as an
    /// offset-less date-time separated by `T` or a space.
    pub fn timestamp_utc(&self) -> Option<NaiveDateTime> {
        parse_utc(self.timestamp.as_deref()?)
    }

    /// Human date-time, or the raw text when it does not parse.
    pub fn timestamp_text(&self) -> String {
        match self.timestamp_utc() {
            Some(instant) => instant.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => self.timestamp.clone().unwrap_or_default(),
        }
    }

    pub fn user_id_text(&self) -> String {
        self.user_id.map(|id| id.to_string()).unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn parse_utc(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_utc());
    }
    [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ]
        .into_iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_request_shape() {
        let body = serde_json::to_value(LoginRequest::password("a@lab.org", "pw", "Admin")).unwrap();
        assert_eq!(
            body,
            json!({ "grant_type": "password", "email": "a@lab.org", "password": "pw", "role": "Admin" })
        );
    }

    #[test]
    fn test_audit_log_naive_timestamp() {
        let log: AuditLog = serde_json::from_value(json!({
            "id": 1,
            "user_id": null,
            "action": "login_failed",
            "details": { "email": "x@lab.org", "attempts": 3 },
            "timestamp": "2025-04-17T09:30:05.123456",
        }))
        .unwrap();

        assert_eq!(log.user_id_text(), "");
        assert_eq!(log.timestamp_text(), "2025-04-17 09:30:05 UTC");
        assert_eq!(log.details_text(), r#"{"attempts":3,"email":"x@lab.org"}"#);
    }

    #[test]
    fn test_audit_log_offset_timestamp_is_normalised() {
        let log: AuditLog = serde_json::from_value(json!({
            "id": 2,
            "user_id": 8,
            "action": "approve_user",
            "timestamp": "2025-04-17T11:30:05+02:00",
        }))
        .unwrap();

        assert_eq!(log.user_id_text(), "8");
        assert_eq!(log.timestamp_text(), "2025-04-17 09:30:05 UTC");
        assert_eq!(log.details_text(), "null");
    }

    #[test]
    fn test_audit_log_unparsed_timestamp_shown_raw() {
        let log: AuditLog = serde_json::from_value(json!({
            "id": 3,
            "user_id": null,
            "action": "x",
            "timestamp": "yesterday",
        }))
        .unwrap();
        assert_eq!(log.timestamp_utc(), None);
        assert_eq!(log.timestamp_text(), "yesterday");

        let log: AuditLog =
            serde_json::from_value(json!({ "id": 4, "user_id": 1, "action": "x", "timestamp": null })).unwrap();
        assert_eq!(log.timestamp_text(), "");
    }

    #[test]
    fn test_mixed_timestamps_keep_whole_log_list() {
        let body: LogsResponse = serde_json::from_value(json!({ "logs": [
            { "id": 1, "user_id": 2, "action": "login", "timestamp": "2025-04-17T09:30:05" },
            { "id": 2, "user_id": 2, "action": "logout", "timestamp": "2025-04-17 10:00:00" },
            { "id": 3, "user_id": null, "action": "purge", "timestamp": null },
            { "id": 4, "user_id": null, "action": "import" },
        ] }))
        .unwrap();

        let logs = body.logs.unwrap();
        let shown: Vec<String> = logs.iter().map(AuditLog::timestamp_text).collect();
        assert_eq!(
            shown,
            ["2025-04-17 09:30:05 UTC", "2025-04-17 10:00:00 UTC", "", ""]
        );
    }

    #[test]
    fn test_list_envelopes_tolerate_null() {
        let users: UsersResponse = serde_json::from_value(json!({ "users": null })).unwrap();
        assert!(users.users.is_none());
        let groups: GroupsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(groups.groups.is_none());
        let roles: RolesResponse = serde_json::from_value(json!({ "roles": [] })).unwrap();
        assert_eq!(roles.roles, Some(vec![]));
    }
}
