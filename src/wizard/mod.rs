// Navigation orchestrator.
//
// Composes the guards, modal flags and step progress into the decision taken
// on every "Next" press, and drives the terminal-step approval flow. Guards
// protect forward progress only; "Previous" never consults them.

use crate::api::approval::ApprovalApi;
use crate::guards::{GuardStore, Mode};
use crate::models::requests::{ApprovalAction, WorkflowApprovalRequest};
use crate::stepper::StepProgress;
use crate::utils::validation;
use log::{info, warn};

/// Footer/layout context supplied by the hosting screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct FooterContext {
    pub is_view: bool,
    pub read_only: bool,
    pub approval_screen: bool,
    pub hide_send_for_approval: bool,
}

impl FooterContext {
    pub fn mode(&self) -> Mode {
        if self.is_view {
            Mode::View
        } else {
            Mode::Edit
        }
    }
}

/// Contract the orchestrator consumes from the stepper/form host.
pub trait FormHost {
    fn on_next(&mut self);
    fn on_previous(&mut self);
    /// Discard the current step's unsaved edits (invoked when the user
    /// confirms the form-dirty dialog).
    fn reset_form_dirty(&mut self);
    fn can_go_next(&self) -> bool;
    fn can_go_previous(&self) -> bool;
    fn current_step_index(&self) -> usize;
    fn total_steps(&self) -> usize;
}

/// Result of a "Next" press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    /// The host navigated forward.
    Navigated,
    /// Blocked by unsaved edits; the form-dirty modal was opened.
    BlockedDirty,
    /// Blocked by the step guard; the warning modal was opened.
    BlockedWarning,
    /// The host reported `can_go_next == false`; nothing happened.
    Ignored,
}

/// What the footer renders in place of its primary action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterAction {
    Next { enabled: bool },
    SendForApproval { enabled: bool },
    /// Approve / Reject / Send-Back buttons for an approver.
    ApprovalActions,
    /// Terminal step with the approval surface hidden.
    Hidden,
}

/// Approver decision staged behind the confirmation dialog. Both fields are
/// required to open the dialog, so "confirmation visible with no action" is
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingApproval {
    pub action: ApprovalAction,
    pub instance_identity: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// User-visible, transient notification surfaced by the hosting UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// All orchestrated state for one wizard instance.
#[derive(Debug, Default)]
pub struct WizardStore {
    pub guards: GuardStore,
    pub progress: StepProgress,
    pending_approval: Option<PendingApproval>,
    approval_view_open: bool,
}

impl WizardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate a "Next" press in strict precedence order: host refusal,
    /// read-only bypass, form-dirty guard, step guard, navigate.
    pub fn handle_next(&mut self, host: &mut dyn FormHost, ctx: &FooterContext) -> NextOutcome {
        if !host.can_go_next() {
            return NextOutcome::Ignored;
        }

        // Read-only screens have no unsaved-state concept; no guard applies.
        if ctx.read_only {
            self.navigate_forward(host);
            return NextOutcome::Navigated;
        }

        let mode = ctx.mode();
        if self.guards.form_dirty(mode).disable_next {
            self.guards.form_dirty_modal_mut(mode).show();
            return NextOutcome::BlockedDirty;
        }
        if self.guards.step_guard(mode).disable_next {
            self.guards.form_warning_modal_mut(mode).show();
            return NextOutcome::BlockedWarning;
        }

        self.navigate_forward(host);
        NextOutcome::Navigated
    }

    /// Confirm action of the form-dirty dialog: discard the step's edits,
    /// close the dialog, then re-check the step guard before navigating.
    pub fn confirm_form_dirty(
        &mut self,
        host: &mut dyn FormHost,
        ctx: &FooterContext,
    ) -> NextOutcome {
        let mode = ctx.mode();
        host.reset_form_dirty();
        self.guards.reset_form_dirty(mode);
        self.guards.form_dirty_modal_mut(mode).hide();

        if self.guards.step_guard(mode).disable_next {
            self.guards.form_warning_modal_mut(mode).show();
            return NextOutcome::BlockedWarning;
        }

        self.navigate_forward(host);
        NextOutcome::Navigated
    }

    /// Cancel action of the form-dirty dialog: close it and stay put.
    pub fn cancel_form_dirty(&mut self, mode: Mode) {
        self.guards.form_dirty_modal_mut(mode).hide();
    }

    /// The warning modal's only action: acknowledge and close. The blocking
    /// condition must clear through business logic before Next can succeed.
    pub fn acknowledge_warning(&mut self, mode: Mode) {
        self.guards.form_warning_modal_mut(mode).hide();
    }

    /// "Previous" is ungated: no guard checks, ever.
    pub fn handle_previous(&mut self, host: &mut dyn FormHost) -> bool {
        if !host.can_go_previous() {
            return false;
        }
        host.on_previous();
        self.progress.set_current_step(host.current_step_index());
        true
    }

    fn navigate_forward(&mut self, host: &mut dyn FormHost) {
        let leaving = host.current_step_index();
        self.progress.mark_step_completed(leaving);
        host.on_next();
        self.progress.set_current_step(host.current_step_index());
        info!(
            "[FLOW: navigation] [STEP: next] Advanced from step {} to step {}",
            leaving,
            host.current_step_index()
        );
    }

    /// Select the footer's primary action for the current step.
    pub fn footer_action(&self, host: &dyn FormHost, ctx: &FooterContext) -> FooterAction {
        let terminal = host.current_step_index() + 1 >= host.total_steps();
        if !terminal {
            return FooterAction::Next {
                enabled: host.can_go_next(),
            };
        }
        if ctx.approval_screen {
            return FooterAction::ApprovalActions;
        }
        if ctx.hide_send_for_approval {
            return FooterAction::Hidden;
        }
        FooterAction::SendForApproval {
            enabled: host.can_go_next(),
        }
    }

    // =========================
    // Approval confirmation
    // =========================

    pub fn pending_approval(&self) -> Option<&PendingApproval> {
        self.pending_approval.as_ref()
    }

    pub fn is_approval_confirmation_open(&self) -> bool {
        self.pending_approval.is_some()
    }

    pub fn approval_view_open(&self) -> bool {
        self.approval_view_open
    }

    pub fn set_approval_view_open(&mut self, open: bool) {
        self.approval_view_open = open;
    }

    /// Stage an approver decision and open the confirmation dialog. Requires
    /// a usable instance identity; there is no way to open the dialog with
    /// nothing staged.
    pub fn open_approval(
        &mut self,
        action: ApprovalAction,
        instance_identity: &str,
    ) -> anyhow::Result<()> {
        validation::validate_identity(instance_identity)?;
        self.pending_approval = Some(PendingApproval {
            action,
            instance_identity: instance_identity.trim().to_string(),
        });
        Ok(())
    }

    /// Cancel the confirmation dialog, dropping the staged decision.
    pub fn cancel_approval(&mut self) {
        self.pending_approval = None;
    }

    /// Submit the staged decision. On success the staged decision and the
    /// approval view are cleared; on failure everything is left in place so
    /// the user can re-attempt.
    pub async fn confirm_approval(&mut self, api: &dyn ApprovalApi, remarks: &str) -> Notification {
        let Some(pending) = self.pending_approval.clone() else {
            return Notification::error("No approval action selected");
        };
        if let Err(e) = validation::validate_remarks(remarks) {
            return Notification::error(e.to_string());
        }

        let request = WorkflowApprovalRequest {
            instance_identity: pending.instance_identity,
            action: pending.action,
            remarks: remarks.trim().to_string(),
        };

        match api.submit(&request).await {
            Ok(_) => {
                self.pending_approval = None;
                self.approval_view_open = false;
                Notification::success(match request.action {
                    ApprovalAction::Approved => "Record approved successfully",
                    ApprovalAction::Rejected => "Record rejected",
                    ApprovalAction::SendBack => "Record sent back for rework",
                })
            }
            Err(e) => {
                warn!(
                    "[FLOW: approval] [STEP: confirm] Submission failed, leaving state for retry: {}",
                    e
                );
                Notification::error(format!("Approval submission failed: {}", e))
            }
        }
    }

    /// Restore everything to the initial state (wizard exit/cancel).
    pub fn reset(&mut self) {
        self.guards.reset_all();
        self.progress.reset();
        self.pending_approval = None;
        self.approval_view_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guards::GuardState;
    use crate::models::responses::ApprovalResultDto;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct TestHost {
        step: usize,
        total: usize,
        can_next: bool,
        can_prev: bool,
        next_calls: usize,
        prev_calls: usize,
        dirty_resets: usize,
    }

    impl TestHost {
        fn new() -> Self {
            Self {
                step: 0,
                total: 5,
                can_next: true,
                can_prev: true,
                next_calls: 0,
                prev_calls: 0,
                dirty_resets: 0,
            }
        }
    }

    impl FormHost for TestHost {
        fn on_next(&mut self) {
            self.step += 1;
            self.next_calls += 1;
        }
        fn on_previous(&mut self) {
            self.step = self.step.saturating_sub(1);
            self.prev_calls += 1;
        }
        fn reset_form_dirty(&mut self) {
            self.dirty_resets += 1;
        }
        fn can_go_next(&self) -> bool {
            self.can_next
        }
        fn can_go_previous(&self) -> bool {
            self.can_prev
        }
        fn current_step_index(&self) -> usize {
            self.step
        }
        fn total_steps(&self) -> usize {
            self.total
        }
    }

    struct RecordingApi {
        fail: bool,
        calls: Mutex<Vec<WorkflowApprovalRequest>>,
    }

    impl RecordingApi {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ApprovalApi for RecordingApi {
        async fn submit(
            &self,
            request: &WorkflowApprovalRequest,
        ) -> anyhow::Result<ApprovalResultDto> {
            self.calls.lock().unwrap().push(request.clone());
            if self.fail {
                Err(anyhow::anyhow!("workflow service unavailable"))
            } else {
                Ok(ApprovalResultDto::default())
            }
        }
    }

    const EDIT: FooterContext = FooterContext {
        is_view: false,
        read_only: false,
        approval_screen: false,
        hide_send_for_approval: false,
    };

    #[test]
    fn next_navigates_and_updates_progress_when_unblocked() {
        let mut store = WizardStore::new();
        let mut host = TestHost::new();

        assert_eq!(store.handle_next(&mut host, &EDIT), NextOutcome::Navigated);
        assert_eq!(host.next_calls, 1);
        assert!(store.progress.is_step_completed(0));
        assert_eq!(store.progress.current_step(), 1);
        assert!(
            !store.progress.is_current_step_saved(),
            "entering the new step must clear the saved flag"
        );
    }

    #[test]
    fn next_is_ignored_when_host_refuses() {
        let mut store = WizardStore::new();
        let mut host = TestHost::new();
        host.can_next = false;

        assert_eq!(store.handle_next(&mut host, &EDIT), NextOutcome::Ignored);
        assert_eq!(host.next_calls, 0);
    }

    #[test]
    fn dirty_modal_takes_precedence_over_warning_modal() {
        let mut store = WizardStore::new();
        let mut host = TestHost::new();
        store
            .guards
            .set_form_dirty(Mode::Edit, GuardState::blocking("Unsaved changes"));
        store
            .guards
            .set_step_guard(Mode::Edit, GuardState::blocking("Missing PAN"));

        assert_eq!(
            store.handle_next(&mut host, &EDIT),
            NextOutcome::BlockedDirty
        );
        assert!(store.guards.form_dirty_modal(Mode::Edit).is_visible());
        assert!(
            !store.guards.form_warning_modal(Mode::Edit).is_visible(),
            "warning modal must not open while the dirty modal has precedence"
        );
        assert_eq!(host.next_calls, 0);
    }

    #[test]
    fn step_guard_alone_opens_warning_modal() {
        let mut store = WizardStore::new();
        let mut host = TestHost::new();
        store
            .guards
            .set_step_guard(Mode::Edit, GuardState::blocking("Missing PAN"));

        assert_eq!(
            store.handle_next(&mut host, &EDIT),
            NextOutcome::BlockedWarning
        );
        assert!(store.guards.form_warning_modal(Mode::Edit).is_visible());
        assert_eq!(host.next_calls, 0);

        store.acknowledge_warning(Mode::Edit);
        assert!(!store.guards.form_warning_modal(Mode::Edit).is_visible());
        // Acknowledging does not navigate and does not clear the guard.
        assert_eq!(host.next_calls, 0);
        assert!(store.guards.step_guard(Mode::Edit).disable_next);
    }

    #[test]
    fn read_only_bypasses_all_guards() {
        let mut store = WizardStore::new();
        let mut host = TestHost::new();
        store
            .guards
            .set_form_dirty(Mode::Edit, GuardState::blocking("Unsaved changes"));
        store
            .guards
            .set_step_guard(Mode::Edit, GuardState::blocking("Missing PAN"));

        let ctx = FooterContext {
            read_only: true,
            ..EDIT
        };
        assert_eq!(store.handle_next(&mut host, &ctx), NextOutcome::Navigated);
        assert_eq!(host.next_calls, 1);
        assert!(!store.guards.form_dirty_modal(Mode::Edit).is_visible());
        assert!(!store.guards.form_warning_modal(Mode::Edit).is_visible());
    }

    #[test]
    fn view_mode_uses_its_own_guard_slots() {
        let mut store = WizardStore::new();
        let mut host = TestHost::new();
        // An edit-slot block must not affect a view-mode wizard.
        store
            .guards
            .set_form_dirty(Mode::Edit, GuardState::blocking("Unsaved changes"));

        let ctx = FooterContext {
            is_view: true,
            ..EDIT
        };
        assert_eq!(store.handle_next(&mut host, &ctx), NextOutcome::Navigated);

        store
            .guards
            .set_form_dirty(Mode::View, GuardState::blocking("Unsaved changes"));
        assert_eq!(
            store.handle_next(&mut host, &ctx),
            NextOutcome::BlockedDirty
        );
        assert!(store.guards.form_dirty_modal(Mode::View).is_visible());
        assert!(!store.guards.form_dirty_modal(Mode::Edit).is_visible());
    }

    #[test]
    fn confirm_dirty_navigates_when_step_guard_is_clear() {
        let mut store = WizardStore::new();
        let mut host = TestHost::new();
        store
            .guards
            .set_form_dirty(Mode::Edit, GuardState::blocking("Unsaved changes"));
        store.handle_next(&mut host, &EDIT);

        assert_eq!(
            store.confirm_form_dirty(&mut host, &EDIT),
            NextOutcome::Navigated
        );
        assert_eq!(host.dirty_resets, 1, "host discard side effect must run");
        assert!(!store.guards.form_dirty(Mode::Edit).disable_next);
        assert!(!store.guards.form_dirty_modal(Mode::Edit).is_visible());
        assert_eq!(host.next_calls, 1);
    }

    #[test]
    fn confirm_dirty_falls_through_to_warning_when_step_guard_blocks() {
        let mut store = WizardStore::new();
        let mut host = TestHost::new();
        store
            .guards
            .set_form_dirty(Mode::Edit, GuardState::blocking("Unsaved changes"));
        store
            .guards
            .set_step_guard(Mode::Edit, GuardState::blocking("Missing PAN"));
        store.handle_next(&mut host, &EDIT);

        assert_eq!(
            store.confirm_form_dirty(&mut host, &EDIT),
            NextOutcome::BlockedWarning
        );
        assert!(!store.guards.form_dirty_modal(Mode::Edit).is_visible());
        assert!(store.guards.form_warning_modal(Mode::Edit).is_visible());
        assert_eq!(host.next_calls, 0);
    }

    #[test]
    fn cancel_dirty_closes_the_modal_and_keeps_the_guard() {
        let mut store = WizardStore::new();
        let mut host = TestHost::new();
        store
            .guards
            .set_form_dirty(Mode::Edit, GuardState::blocking("Unsaved changes"));
        store.handle_next(&mut host, &EDIT);

        store.cancel_form_dirty(Mode::Edit);
        assert!(!store.guards.form_dirty_modal(Mode::Edit).is_visible());
        assert!(store.guards.form_dirty(Mode::Edit).disable_next);
        assert_eq!(host.next_calls, 0);
    }

    #[test]
    fn previous_is_ungated_by_guards() {
        let mut store = WizardStore::new();
        let mut host = TestHost::new();
        host.step = 2;
        store
            .guards
            .set_form_dirty(Mode::Edit, GuardState::blocking("Unsaved changes"));
        store
            .guards
            .set_step_guard(Mode::Edit, GuardState::blocking("Missing PAN"));

        assert!(store.handle_previous(&mut host));
        assert_eq!(host.prev_calls, 1);
        assert_eq!(store.progress.current_step(), 1);
        assert!(!store.guards.form_dirty_modal(Mode::Edit).is_visible());
        assert!(!store.guards.form_warning_modal(Mode::Edit).is_visible());

        host.can_prev = false;
        assert!(!store.handle_previous(&mut host));
        assert_eq!(host.prev_calls, 1);
    }

    #[test]
    fn footer_action_selection_per_step_and_context() {
        let store = WizardStore::new();
        let mut host = TestHost::new();

        assert_eq!(
            store.footer_action(&host, &EDIT),
            FooterAction::Next { enabled: true }
        );

        host.step = host.total - 1;
        assert_eq!(
            store.footer_action(&host, &EDIT),
            FooterAction::SendForApproval { enabled: true }
        );

        host.can_next = false;
        assert_eq!(
            store.footer_action(&host, &EDIT),
            FooterAction::SendForApproval { enabled: false }
        );

        let approver = FooterContext {
            approval_screen: true,
            ..EDIT
        };
        assert_eq!(
            store.footer_action(&host, &approver),
            FooterAction::ApprovalActions
        );

        let hidden = FooterContext {
            hide_send_for_approval: true,
            ..EDIT
        };
        assert_eq!(store.footer_action(&host, &hidden), FooterAction::Hidden);
    }

    #[test]
    fn approval_dialog_requires_an_instance_identity() {
        let mut store = WizardStore::new();
        assert!(store.open_approval(ApprovalAction::Approved, "  ").is_err());
        assert!(!store.is_approval_confirmation_open());

        store
            .open_approval(ApprovalAction::Approved, "abc-123")
            .unwrap();
        assert!(store.is_approval_confirmation_open());
        assert_eq!(
            store.pending_approval(),
            Some(&PendingApproval {
                action: ApprovalAction::Approved,
                instance_identity: "abc-123".to_string(),
            })
        );

        store.cancel_approval();
        assert!(!store.is_approval_confirmation_open());
    }

    #[tokio::test]
    async fn approval_happy_path_submits_and_clears_state() {
        let mut store = WizardStore::new();
        store.set_approval_view_open(true);
        store
            .open_approval(ApprovalAction::Approved, "abc-123")
            .unwrap();

        let api = RecordingApi::new(false);
        let note = store.confirm_approval(&api, "ok").await;

        assert_eq!(note.severity, Severity::Success);
        let calls = api.calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[WorkflowApprovalRequest {
                instance_identity: "abc-123".to_string(),
                action: ApprovalAction::Approved,
                remarks: "ok".to_string(),
            }]
        );
        assert!(!store.is_approval_confirmation_open());
        assert!(!store.approval_view_open());
    }

    #[tokio::test]
    async fn approval_failure_reports_and_leaves_state_for_retry() {
        let mut store = WizardStore::new();
        store.set_approval_view_open(true);
        store
            .open_approval(ApprovalAction::Rejected, "abc-123")
            .unwrap();

        let api = RecordingApi::new(true);
        let note = store.confirm_approval(&api, "not acceptable").await;

        assert_eq!(note.severity, Severity::Error);
        assert!(
            store.is_approval_confirmation_open(),
            "failed submission must leave the staged decision so the user can retry"
        );
        assert!(store.approval_view_open());
    }

    #[tokio::test]
    async fn approval_confirm_rejects_blank_remarks_without_calling_the_service() {
        let mut store = WizardStore::new();
        store
            .open_approval(ApprovalAction::SendBack, "abc-123")
            .unwrap();

        let api = RecordingApi::new(false);
        let note = store.confirm_approval(&api, "   ").await;

        assert_eq!(note.severity, Severity::Error);
        assert!(api.calls.lock().unwrap().is_empty());
        assert!(store.is_approval_confirmation_open());
    }

    #[tokio::test]
    async fn approval_confirm_without_staged_decision_is_an_error() {
        let mut store = WizardStore::new();
        let api = RecordingApi::new(false);
        let note = store.confirm_approval(&api, "ok").await;

        assert_eq!(note.severity, Severity::Error);
        assert!(api.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn reset_restores_the_whole_store() {
        let mut store = WizardStore::new();
        let mut host = TestHost::new();
        store
            .guards
            .set_step_guard(Mode::Edit, GuardState::blocking("Missing PAN"));
        store.handle_next(&mut host, &EDIT);
        store
            .open_approval(ApprovalAction::Approved, "abc-123")
            .unwrap();
        store.set_approval_view_open(true);

        store.reset();
        assert_eq!(store.guards, GuardStore::new());
        assert_eq!(store.progress, StepProgress::new());
        assert!(!store.is_approval_confirmation_open());
        assert!(!store.approval_view_open());
    }
}
