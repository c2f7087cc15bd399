//! # Admin dashboard
//!
//! Pending approvals, role and group assignment, session revocation and the
//! audit log. The lists live in an [`api::WorkingSet`]; every confirmed action
//! is recorded there and followed by a re-fetch of whatever it marked stale,
//! which in practice is the audit log.

use api::{parse_user_id, AdminAction, AdminClient, ApiClient, Lists, Snapshot, WorkingSet};
use dioxus::prelude::*;
use store::TokenStore;

use crate::notice::{use_notice, Notice};

fn role_action(user_input: &str, role: &str) -> Option<AdminAction> {
    let user_id = parse_user_id(user_input)?;
    (!role.is_empty()).then(|| AdminAction::AssignRole {
        user_id,
        role: role.to_string(),
    })
}

fn group_action(user_input: &str, group: &str) -> Option<AdminAction> {
    let user_id = parse_user_id(user_input)?;
    let group_id = group.parse().ok()?;
    Some(AdminAction::AssignGroup { user_id, group_id })
}

fn revoke_action(user_input: &str) -> Option<AdminAction> {
    parse_user_id(user_input).map(|user_id| AdminAction::RevokeSessions { user_id })
}

/// Bind whatever access token is stored right now.
fn admin_client(client: &ApiClient, tokens: &TokenStore) -> AdminClient {
    client.admin(tokens.access())
}

/// Re-fetch stale lists. The action's own notice stays; a failure here is only
/// logged and the list stays stale for the next round.
async fn reconcile(admin: &AdminClient, mut working: Signal<WorkingSet>) {
    let stale = working.peek().stale();
    if stale.is_empty() {
        return;
    }
    let snapshot = Snapshot::fetch(admin, stale).await;
    if let Some(e) = working.write().apply(snapshot) {
        tracing::warn!("Dashboard reconciliation failed: {e}");
    }
}

#[component]
pub fn AdminDashboardView() -> Element {
    let client = use_context::<ApiClient>();
    let tokens = use_context::<TokenStore>();
    let mut notice = use_notice();

    let mut working = use_signal(WorkingSet::default);
    let mut user_input = use_signal(String::new);
    let mut selected_role = use_signal(String::new);
    let mut selected_group = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let loader_client = client.clone();
    let loader_tokens = tokens.clone();
    let _loader = use_resource(move || {
        let admin = admin_client(&loader_client, &loader_tokens);
        async move {
            let snapshot = Snapshot::fetch(&admin, Lists::ALL).await;
            let error = working.write().apply(snapshot);
            if let Some(e) = error {
                notice.set(Notice::from_api_error(&e, api::fallback::FETCH_DASHBOARD));
            }
        }
    });

    let dispatch = use_callback(move |action: AdminAction| {
        let admin = admin_client(&client, &tokens);
        spawn(async move {
            notice.set(Notice::None);
            busy.set(true);
            match action.perform(&admin).await {
                Ok(()) => {
                    working.write().record(&action);
                    notice.set(Notice::message(action.success_message()));
                    if matches!(
                        action,
                        AdminAction::AssignRole { .. } | AdminAction::AssignGroup { .. }
                    ) {
                        selected_role.set(String::new());
                        selected_group.set(String::new());
                        user_input.set(String::new());
                    }
                    reconcile(&admin, working).await;
                }
                Err(e) => notice.set(Notice::from_api_error(&e, action.fallback())),
            }
            busy.set(false);
        });
    });

    let ws = working();
    let pending = ws.pending_users.items().to_vec();
    let logs = ws.audit_logs.items().to_vec();
    let roles = ws.roles.items().to_vec();
    let groups = ws.groups.items().to_vec();

    let assign_role = role_action(&user_input(), &selected_role());
    let assign_group = group_action(&user_input(), &selected_group());
    let revoke = revoke_action(&user_input());

    rsx! {
        div {
            class: "card",
            h2 { "Admin Dashboard" }

            h3 { "Pending User Approvals" }
            if pending.is_empty() {
                p { "No pending approvals" }
            } else {
                ul {
                    class: "pending-list",
                    for user in pending {
                        li {
                            key: "{user.id}",
                            span { "{user.email} (ID: {user.id})" }
                            button {
                                class: "btn btn-success",
                                disabled: busy(),
                                onclick: move |_| dispatch.call(AdminAction::Approve { user_id: user.id }),
                                "Approve"
                            }
                        }
                    }
                }
            }

            h3 { "Assign Roles/Groups" }
            div {
                class: "field",
                label { "User ID" }
                input {
                    r#type: "number",
                    min: "1",
                    value: user_input(),
                    oninput: move |evt: FormEvent| user_input.set(evt.value()),
                }
            }
            div {
                class: "field",
                label { "Assign Role" }
                select {
                    value: selected_role(),
                    onchange: move |evt: FormEvent| selected_role.set(evt.value()),
                    option { value: "", "Select a role" }
                    for role in roles {
                        option { key: "{role}", value: "{role}", "{role}" }
                    }
                }
                button {
                    class: "btn",
                    disabled: busy() || assign_role.is_none(),
                    onclick: move |_| {
                        if let Some(action) = assign_role.clone() {
                            dispatch.call(action);
                        }
                    },
                    "Assign Role"
                }
            }
            div {
                class: "field",
                label { "Assign Group" }
                select {
                    value: selected_group(),
                    onchange: move |evt: FormEvent| selected_group.set(evt.value()),
                    option { value: "", "Select a group" }
                    for group in groups {
                        option { key: "{group.id}", value: "{group.id}", "{group.name}" }
                    }
                }
                button {
                    class: "btn",
                    disabled: busy() || assign_group.is_none(),
                    onclick: move |_| {
                        if let Some(action) = assign_group.clone() {
                            dispatch.call(action);
                        }
                    },
                    "Assign Group"
                }
            }

            h3 { "Revoke User Sessions" }
            div {
                class: "field",
                label { "User ID" }
                input {
                    r#type: "number",
                    min: "1",
                    value: user_input(),
                    oninput: move |evt: FormEvent| user_input.set(evt.value()),
                }
                button {
                    class: "btn btn-danger",
                    disabled: busy() || revoke.is_none(),
                    onclick: move |_| {
                        if let Some(action) = revoke.clone() {
                            dispatch.call(action);
                        }
                    },
                    "Revoke Sessions"
                }
            }

            h3 { "Audit Logs" }
            if logs.is_empty() {
                p { "No audit logs available" }
            } else {
                table {
                    class: "audit-table",
                    thead {
                        tr {
                            th { "ID" }
                            th { "User ID" }
                            th { "Action" }
                            th { "Details" }
                            th { "Timestamp" }
                        }
                    }
                    tbody {
                        for log in logs {
                            tr {
                                key: "{log.id}",
                                td { "{log.id}" }
                                td { {log.user_id_text()} }
                                td { "{log.action}" }
                                td { {log.details_text()} }
                                td { {log.timestamp_text()} }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_action_needs_user_and_role() {
        assert_eq!(
            role_action("4", "Lab-Tech"),
            Some(AdminAction::AssignRole {
                user_id: 4,
                role: "Lab-Tech".into()
            })
        );
        assert_eq!(role_action("4", ""), None);
        assert_eq!(role_action("", "Lab-Tech"), None);
        assert_eq!(role_action("0", "Lab-Tech"), None);
        assert_eq!(role_action("-2", "Lab-Tech"), None);
    }

    #[test]
    fn test_group_action_needs_user_and_group() {
        assert_eq!(
            group_action("4", "3"),
            Some(AdminAction::AssignGroup {
                user_id: 4,
                group_id: 3
            })
        );
        assert_eq!(group_action("4", ""), None);
        assert_eq!(group_action("", "3"), None);
    }

    #[test]
    fn test_revoke_action_needs_user() {
        assert_eq!(
            revoke_action(" 9 "),
            Some(AdminAction::RevokeSessions { user_id: 9 })
        );
        assert_eq!(revoke_action("abc"), None);
        assert_eq!(revoke_action(""), None);
    }
}
