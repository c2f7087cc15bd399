//! # Admin dashboard working set
//!
//! The dashboard holds four lists fetched from the API: pending users, audit
//! logs, role names and groups. [`WorkingSet`] keeps them as [`Cached`] lists
//! that can be marked stale, and [`Snapshot`] is one round of fetches.
//!
//! ## Loading
//!
//! [`Snapshot::fetch`] issues the requested reads concurrently and waits for
//! all of them. [`WorkingSet::apply`] stores every list that arrived and
//! returns the first failure (in the order users, logs, roles, groups), so a
//! failed audit-log read still leaves the other three lists populated. A list
//! whose read failed is marked stale and retried on the next reconciliation.
//!
//! ## Mutations
//!
//! An [`AdminAction`] is performed against the API first. Only after the
//! server confirms it does [`WorkingSet::record`] touch local state: approval
//! drops the user from the pending list, and every action marks the audit log
//! stale because the server has appended to it. The caller then reconciles by
//! fetching [`WorkingSet::stale`] lists. Role and group assignment never change
//! the pending list.

use std::future::Future;

use crate::error::{fallback, ApiError};
use crate::models::{AuditLog, Group, PendingUser};

/// The bearer-authenticated operations the dashboard depends on.
pub trait AdminApi {
    fn pending_users(&self) -> impl Future<Output = Result<Vec<PendingUser>, ApiError>>;
    fn audit_logs(&self) -> impl Future<Output = Result<Vec<AuditLog>, ApiError>>;
    fn roles(&self) -> impl Future<Output = Result<Vec<String>, ApiError>>;
    fn groups(&self) -> impl Future<Output = Result<Vec<Group>, ApiError>>;
    fn approve_user(&self, user_id: i64) -> impl Future<Output = Result<(), ApiError>>;
    fn assign_role(&self, user_id: i64, role: &str) -> impl Future<Output = Result<(), ApiError>>;
    fn assign_group(
        &self,
        user_id: i64,
        group_id: i64,
    ) -> impl Future<Output = Result<(), ApiError>>;
    fn revoke_sessions(&self, user_id: i64) -> impl Future<Output = Result<(), ApiError>>;
}

/// A list plus a flag saying the server may have moved on since it was fetched.
#[derive(Clone, Debug, PartialEq)]
pub struct Cached<T> {
    items: Vec<T>,
    stale: bool,
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            stale: false,
        }
    }
}

impl<T> Cached<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    /// Replace the contents with a fresh server copy.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.stale = false;
    }

    fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }
}

/// Which lists a fetch should cover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lists {
    pub pending_users: bool,
    pub audit_logs: bool,
    pub roles: bool,
    pub groups: bool,
}

impl Lists {
    pub const ALL: Self = Self {
        pending_users: true,
        audit_logs: true,
        roles: true,
        groups: true,
    };

    pub fn is_empty(&self) -> bool {
        !(self.pending_users || self.audit_logs || self.roles || self.groups)
    }
}

/// The outcome of one round of concurrent reads. `None` means "not requested".
#[derive(Debug, Default)]
pub struct Snapshot {
    pub pending_users: Option<Result<Vec<PendingUser>, ApiError>>,
    pub audit_logs: Option<Result<Vec<AuditLog>, ApiError>>,
    pub roles: Option<Result<Vec<String>, ApiError>>,
    pub groups: Option<Result<Vec<Group>, ApiError>>,
}

impl Snapshot {
    /// Fetch the requested lists concurrently. Every request runs to
    /// completion; a failure does not cancel its siblings.
    pub async fn fetch(api: &impl AdminApi, lists: Lists) -> Self {
        let (pending_users, audit_logs, roles, groups) = futures::join!(
            async {
                if lists.pending_users {
                    Some(api.pending_users().await)
                } else {
                    None
                }
            },
            async {
                if lists.audit_logs {
                    Some(api.audit_logs().await)
                } else {
                    None
                }
            },
            async {
                if lists.roles {
                    Some(api.roles().await)
                } else {
                    None
                }
            },
            async {
                if lists.groups {
                    Some(api.groups().await)
                } else {
                    None
                }
            },
        );
        Self {
            pending_users,
            audit_logs,
            roles,
            groups,
        }
    }
}

/// The dashboard's in-memory copy of server state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkingSet {
    pub pending_users: Cached<PendingUser>,
    pub audit_logs: Cached<AuditLog>,
    pub roles: Cached<String>,
    pub groups: Cached<Group>,
}

impl WorkingSet {
    /// Store whatever arrived and return the first failure, if any.
    pub fn apply(&mut self, snapshot: Snapshot) -> Option<ApiError> {
        let mut first_error = None;
        store_list(&mut self.pending_users, snapshot.pending_users, &mut first_error);
        store_list(&mut self.audit_logs, snapshot.audit_logs, &mut first_error);
        store_list(&mut self.roles, snapshot.roles, &mut first_error);
        store_list(&mut self.groups, snapshot.groups, &mut first_error);
        first_error
    }

    /// Reflect a server-confirmed action in local state.
    pub fn record(&mut self, action: &AdminAction) {
        if let AdminAction::Approve { user_id } = action {
            self.pending_users.retain(|u| u.id != *user_id);
        }
        self.audit_logs.mark_stale();
    }

    /// Lists that need re-fetching.
    pub fn stale(&self) -> Lists {
        Lists {
            pending_users: self.pending_users.is_stale(),
            audit_logs: self.audit_logs.is_stale(),
            roles: self.roles.is_stale(),
            groups: self.groups.is_stale(),
        }
    }

}

fn store_list<T>(
    list: &mut Cached<T>,
    result: Option<Result<Vec<T>, ApiError>>,
    first_error: &mut Option<ApiError>,
) {
    match result {
        Some(Ok(items)) => list.replace(items),
        Some(Err(e)) => {
            list.mark_stale();
            first_error.get_or_insert(e);
        }
        None => {}
    }
}

/// A mutating dashboard action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminAction {
    Approve { user_id: i64 },
    AssignRole { user_id: i64, role: String },
    AssignGroup { user_id: i64, group_id: i64 },
    RevokeSessions { user_id: i64 },
}

impl AdminAction {
    /// Send the action to the API.
    pub async fn perform(&self, api: &impl AdminApi) -> Result<(), ApiError> {
        match self {
            Self::Approve { user_id } => api.approve_user(*user_id).await,
            Self::AssignRole { user_id, role } => api.assign_role(*user_id, role).await,
            Self::AssignGroup { user_id, group_id } => api.assign_group(*user_id, *group_id).await,
            Self::RevokeSessions { user_id } => api.revoke_sessions(*user_id).await,
        }
    }

    /// Notice text once the server has confirmed the action.
    pub fn success_message(&self) -> String {
        match self {
            Self::Approve { user_id } => format!("User {user_id} approved"),
            Self::AssignRole { user_id, role } => format!("Role {role} assigned to user {user_id}"),
            Self::AssignGroup { user_id, group_id } => {
                format!("Group {group_id} assigned to user {user_id}")
            }
            Self::RevokeSessions { user_id } => format!("Sessions revoked for user {user_id}"),
        }
    }

    pub fn fallback(&self) -> &'static str {
        match self {
            Self::Approve { .. } => fallback::APPROVE,
            Self::AssignRole { .. } => fallback::ASSIGN_ROLE,
            Self::AssignGroup { .. } => fallback::ASSIGN_GROUP,
            Self::RevokeSessions { .. } => fallback::REVOKE_SESSIONS,
        }
    }
}

/// Parse the dashboard's user-id field. Only positive integers select a user.
pub fn parse_user_id(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Scripted AdminApi that records the calls it receives.
    #[derive(Default)]
    struct FakeApi {
        pending: Vec<PendingUser>,
        logs: Vec<AuditLog>,
        fail_logs: bool,
        fail_roles: bool,
        fail_mutations: bool,
        calls: RefCell<Vec<String>>,
    }

    impl FakeApi {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn mutation(&self, call: String) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(call);
            if self.fail_mutations {
                Err(ApiError::Server {
                    status: 403,
                    detail: Some("Not enough permissions".into()),
                })
            } else {
                Ok(())
            }
        }
    }

    impl AdminApi for FakeApi {
        async fn pending_users(&self) -> Result<Vec<PendingUser>, ApiError> {
            self.calls.borrow_mut().push("pending_users".into());
            Ok(self.pending.clone())
        }

        async fn audit_logs(&self) -> Result<Vec<AuditLog>, ApiError> {
            self.calls.borrow_mut().push("audit_logs".into());
            if self.fail_logs {
                return Err(ApiError::Server {
                    status: 500,
                    detail: Some("audit store unavailable".into()),
                });
            }
            Ok(self.logs.clone())
        }

        async fn roles(&self) -> Result<Vec<String>, ApiError> {
            self.calls.borrow_mut().push("roles".into());
            if self.fail_roles {
                return Err(ApiError::Transport("connection reset".into()));
            }
            Ok(vec!["Admin".into(), "Read-Only".into()])
        }

        async fn groups(&self) -> Result<Vec<Group>, ApiError> {
            self.calls.borrow_mut().push("groups".into());
            Ok(vec![Group {
                id: 3,
                name: "Chemistry".into(),
                description: None,
            }])
        }

        async fn approve_user(&self, user_id: i64) -> Result<(), ApiError> {
            self.mutation(format!("approve {user_id}"))
        }

        async fn assign_role(&self, user_id: i64, role: &str) -> Result<(), ApiError> {
            self.mutation(format!("assign_role {user_id} {role}"))
        }

        async fn assign_group(&self, user_id: i64, group_id: i64) -> Result<(), ApiError> {
            self.mutation(format!("assign_group {user_id} {group_id}"))
        }

        async fn revoke_sessions(&self, user_id: i64) -> Result<(), ApiError> {
            self.mutation(format!("revoke {user_id}"))
        }
    }

    fn pending(id: i64) -> PendingUser {
        PendingUser {
            id,
            email: format!("user{id}@lab.org"),
            is_active: false,
        }
    }

    fn log(id: i64) -> AuditLog {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "user_id": 1,
            "action": "approve_user",
            "details": {},
            "timestamp": "2025-04-17T09:30:05",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_populates_all_lists() {
        let api = FakeApi {
            pending: vec![pending(1), pending(2)],
            logs: vec![log(10)],
            ..Default::default()
        };
        let mut ws = WorkingSet::default();

        let error = ws.apply(Snapshot::fetch(&api, Lists::ALL).await);
        assert!(error.is_none());
        assert_eq!(ws.pending_users.items().len(), 2);
        assert_eq!(ws.audit_logs.items().len(), 1);
        assert_eq!(ws.roles.items(), ["Admin", "Read-Only"]);
        assert_eq!(ws.groups.items()[0].name, "Chemistry");
        assert!(ws.stale().is_empty());
    }

    #[tokio::test]
    async fn test_failed_audit_fetch_keeps_other_lists() {
        let api = FakeApi {
            pending: vec![pending(1)],
            fail_logs: true,
            ..Default::default()
        };
        let mut ws = WorkingSet::default();

        let error = ws.apply(Snapshot::fetch(&api, Lists::ALL).await);
        assert_eq!(
            error.map(|e| e.user_message(fallback::FETCH_DASHBOARD)),
            Some("audit store unavailable".to_string())
        );
        assert_eq!(ws.pending_users.items(), [pending(1)]);
        assert_eq!(ws.roles.items().len(), 2);
        assert_eq!(ws.groups.items().len(), 1);
        assert!(ws.audit_logs.items().is_empty());
        assert_eq!(
            ws.stale(),
            Lists {
                audit_logs: true,
                ..Lists::default()
            }
        );

        // All four requests were issued despite the failure.
        assert_eq!(api.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_first_failure_wins() {
        let api = FakeApi {
            fail_logs: true,
            fail_roles: true,
            ..Default::default()
        };
        let mut ws = WorkingSet::default();

        let error = ws.apply(Snapshot::fetch(&api, Lists::ALL).await).unwrap();
        assert_eq!(error.status(), Some(500));
        assert!(ws.stale().audit_logs && ws.stale().roles);
    }

    #[tokio::test]
    async fn test_fetch_only_requested_lists() {
        let api = FakeApi::default();
        let lists = Lists {
            audit_logs: true,
            ..Lists::default()
        };
        let snapshot = Snapshot::fetch(&api, lists).await;
        assert!(snapshot.pending_users.is_none());
        assert!(snapshot.audit_logs.is_some());
        assert_eq!(api.calls(), ["audit_logs"]);
    }

    #[tokio::test]
    async fn test_approve_removes_user_and_reconciles_audit_log() {
        let mut api = FakeApi {
            pending: vec![pending(1), pending(2)],
            logs: vec![log(10)],
            ..Default::default()
        };
        let mut ws = WorkingSet::default();
        ws.apply(Snapshot::fetch(&api, Lists::ALL).await);

        let action = AdminAction::Approve { user_id: 1 };
        action.perform(&api).await.unwrap();
        ws.record(&action);

        assert_eq!(ws.pending_users.items(), [pending(2)]);
        assert!(ws.audit_logs.is_stale());
        assert_eq!(action.success_message(), "User 1 approved");

        // The server appended an audit entry; reconciliation picks it up.
        api.logs.push(log(11));
        let stale = ws.stale();
        assert_eq!(ws.apply(Snapshot::fetch(&api, stale).await), None);
        assert_eq!(ws.audit_logs.items().len(), 2);
        assert!(ws.stale().is_empty());
        assert_eq!(ws.pending_users.items(), [pending(2)]);
    }

    #[tokio::test]
    async fn test_failed_approve_leaves_working_set() {
        let api = FakeApi {
            pending: vec![pending(1), pending(2)],
            fail_mutations: true,
            ..Default::default()
        };
        let mut ws = WorkingSet::default();
        ws.apply(Snapshot::fetch(&api, Lists::ALL).await);

        let action = AdminAction::Approve { user_id: 1 };
        let err = action.perform(&api).await.unwrap_err();
        assert_eq!(err.user_message(action.fallback()), "Not enough permissions");
        assert_eq!(ws.pending_users.items().len(), 2);
        assert!(ws.stale().is_empty());
    }

    #[tokio::test]
    async fn test_assignments_do_not_touch_pending_list() {
        let api = FakeApi {
            pending: vec![pending(4)],
            ..Default::default()
        };
        let mut ws = WorkingSet::default();
        ws.apply(Snapshot::fetch(&api, Lists::ALL).await);

        let actions = [
            AdminAction::AssignRole {
                user_id: 4,
                role: "Admin".into(),
            },
            AdminAction::AssignGroup {
                user_id: 4,
                group_id: 3,
            },
            AdminAction::RevokeSessions { user_id: 4 },
        ];
        for action in &actions {
            action.perform(&api).await.unwrap();
            ws.record(action);
            assert_eq!(ws.pending_users.items(), [pending(4)]);
            assert_eq!(
                ws.stale(),
                Lists {
                    audit_logs: true,
                    ..Lists::default()
                }
            );
        }

        let calls = api.calls();
        assert!(calls.contains(&"assign_role 4 Admin".to_string()));
        assert!(calls.contains(&"assign_group 4 3".to_string()));
        assert!(calls.contains(&"revoke 4".to_string()));
    }

    #[test]
    fn test_action_messages() {
        let role = AdminAction::AssignRole {
            user_id: 7,
            role: "Lab-Tech".into(),
        };
        assert_eq!(role.success_message(), "Role Lab-Tech assigned to user 7");
        assert_eq!(role.fallback(), "Role assignment failed");

        let group = AdminAction::AssignGroup {
            user_id: 7,
            group_id: 3,
        };
        assert_eq!(group.success_message(), "Group 3 assigned to user 7");
        assert_eq!(group.fallback(), "Group assignment failed");

        let revoke = AdminAction::RevokeSessions { user_id: 7 };
        assert_eq!(revoke.success_message(), "Sessions revoked for user 7");
        assert_eq!(revoke.fallback(), "Session revocation failed");
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("12"), Some(12));
        assert_eq!(parse_user_id(" 5 "), Some(5));
        assert_eq!(parse_user_id(""), None);
        assert_eq!(parse_user_id("0"), None);
        assert_eq!(parse_user_id("-3"), None);
        assert_eq!(parse_user_id("abc"), None);
    }
}
