//! # HTTP client for the auth API
//!
//! [`ApiClient`] issues every request the console makes against one base URL
//! (`http://localhost:8000/api/auth` by default). Public operations (signup,
//! login, password reset, email verification) live on [`ApiClient`]; the
//! admin operations need a bearer token and live on [`AdminClient`], obtained
//! with [`ApiClient::admin`].
//!
//! Each method returns the payload the page needs or an [`ApiError`]. Failures
//! are logged here with the operation name; pages only turn them into a
//! notice.
//!
//! There are no retries, timeouts or token refreshes. A 401 is reported like
//! any other failure.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use store::TokenPair;

use crate::admin::AdminApi;
use crate::error::ApiError;
use crate::models::*;

/// Client for the unauthenticated endpoints and factory for [`AdminClient`].
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.endpoint(path))
    }

    /// Bind the stored access token for admin calls. With no token the
    /// requests go out unauthenticated and the API rejects them.
    pub fn admin(&self, access_token: Option<String>) -> AdminClient {
        AdminClient {
            client: self.clone(),
            access_token,
        }
    }

    /// `POST /signup`: returns the server's confirmation message.
    pub async fn signup(&self, request: &SignupRequest) -> Result<String, ApiError> {
        let req = self.request(Method::POST, "/signup").json(request);
        let body: MessageResponse = send_json("signup", req).await?;
        Ok(body.message)
    }

    /// `GET /roles?email=`: roles the account may log in with.
    ///
    /// Never fails: any error, or a response without a role list, yields
    /// `["Read-Only"]`.
    pub async fn roles_for_email(&self, email: &str) -> Vec<String> {
        let req = self.request(Method::GET, "/roles").query(&[("email", email)]);
        match send_json::<RolesResponse>("roles for email", req).await {
            Ok(RolesResponse { roles: Some(roles) }) => roles,
            Ok(RolesResponse { roles: None }) | Err(_) => vec![DEFAULT_LOGIN_ROLE.to_string()],
        }
    }

    /// `POST /token`: password grant for the chosen role.
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenPair, ApiError> {
        let req = self.request(Method::POST, "/token").json(request);
        let body: TokenResponse = send_json("login", req).await?;
        Ok(TokenPair::new(body.access_token, body.refresh_token))
    }

    /// `POST /forgot-password`: asks the API to mail a reset link.
    pub async fn forgot_password(&self, email: &str) -> Result<String, ApiError> {
        let req = self
            .request(Method::POST, "/forgot-password")
            .json(&EmailRequest { email });
        let body: MessageResponse = send_json("forgot password", req).await?;
        Ok(body.message)
    }

    /// `POST /reset-password?token=`: sets a new password using the emailed token.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<String, ApiError> {
        let req = self
            .request(Method::POST, "/reset-password")
            .query(&[("token", token)])
            .json(&NewPasswordRequest { new_password });
        let body: MessageResponse = send_json("reset password", req).await?;
        Ok(body.message)
    }

    /// `GET /verify?token=`: confirms an email address.
    pub async fn verify_email(&self, token: &str) -> Result<String, ApiError> {
        let req = self.request(Method::GET, "/verify").query(&[("token", token)]);
        let body: MessageResponse = send_json("verify email", req).await?;
        Ok(body.message)
    }
}

/// Bearer-authenticated client for the admin endpoints.
#[derive(Clone, Debug)]
pub struct AdminClient {
    client: ApiClient,
    access_token: Option<String>,
}

impl AdminClient {
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.client.request(method, path);
        match &self.access_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

impl AdminApi for AdminClient {
    async fn pending_users(&self) -> Result<Vec<PendingUser>, ApiError> {
        let req = self
            .request(Method::GET, "/users")
            .query(&[("status", "pending")]);
        let body: UsersResponse = send_json("list pending users", req).await?;
        Ok(body.users.unwrap_or_default())
    }

    async fn audit_logs(&self) -> Result<Vec<AuditLog>, ApiError> {
        let req = self.request(Method::GET, "/audit-logs");
        let body: LogsResponse = send_json("list audit logs", req).await?;
        Ok(body.logs.unwrap_or_default())
    }

    async fn roles(&self) -> Result<Vec<String>, ApiError> {
        let req = self.request(Method::GET, "/roles");
        let body: RolesResponse = send_json("list roles", req).await?;
        Ok(body.roles.unwrap_or_default())
    }

    async fn groups(&self) -> Result<Vec<Group>, ApiError> {
        let req = self.request(Method::GET, "/groups");
        let body: GroupsResponse = send_json("list groups", req).await?;
        Ok(body.groups.unwrap_or_default())
    }

    async fn approve_user(&self, user_id: i64) -> Result<(), ApiError> {
        let req = self
            .request(Method::PATCH, &format!("/users/{user_id}/approve"))
            .json(&serde_json::json!({}));
        send_empty("approve user", req).await
    }

    async fn assign_role(&self, user_id: i64, role: &str) -> Result<(), ApiError> {
        let req = self
            .request(Method::PATCH, &format!("/users/{user_id}/roles"))
            .json(&AssignRoleRequest { role });
        send_empty("assign role", req).await
    }

    async fn assign_group(&self, user_id: i64, group_id: i64) -> Result<(), ApiError> {
        let req = self
            .request(Method::PATCH, &format!("/users/{user_id}/groups"))
            .json(&AssignGroupRequest { group_id });
        send_empty("assign group", req).await
    }

    async fn revoke_sessions(&self, user_id: i64) -> Result<(), ApiError> {
        let req = self.request(Method::DELETE, &format!("/sessions/{user_id}"));
        send_empty("revoke sessions", req).await
    }
}

/// Send `req` and decode a JSON success body.
async fn send_json<T: DeserializeOwned>(operation: &str, req: RequestBuilder) -> Result<T, ApiError> {
    let response = checked(operation, req).await?;
    response.json::<T>().await.map_err(|e| {
        tracing::warn!("{operation}: unexpected response body: {e}");
        ApiError::Decode(e.to_string())
    })
}

/// Send `req` and ignore the success body.
async fn send_empty(operation: &str, req: RequestBuilder) -> Result<(), ApiError> {
    checked(operation, req).await.map(drop)
}

async fn checked(operation: &str, req: RequestBuilder) -> Result<Response, ApiError> {
    let response = req.send().await.map_err(|e| {
        tracing::warn!("{operation}: request failed: {e}");
        ApiError::from(e)
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = ApiError::from_status(status.as_u16(), &body);
    tracing::warn!("{operation}: server responded {status}");
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = ApiClient::new("http://localhost:8000/api/auth/");
        assert_eq!(client.base_url(), "http://localhost:8000/api/auth");
        assert_eq!(client.endpoint("/token"), "http://localhost:8000/api/auth/token");
    }

    #[test]
    fn test_clients_compare_by_base_url() {
        assert_eq!(ApiClient::new("http://a/api"), ApiClient::new("http://a/api/"));
        assert_ne!(ApiClient::new("http://a/api"), ApiClient::new("http://b/api"));
    }
}
