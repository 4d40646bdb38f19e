// Navigation guards
//
// Two independent guard families gate forward navigation in a wizard:
// - the step guard ("disable next"), raised by step validation / business rules
// - the form-dirty guard, raised when the current step has unsaved edits
//
// Each family keeps one state cell per operating mode (edit vs. view), because
// a user may have an edit wizard and a view wizard open at the same time. The
// guards perform no re-evaluation of their own: whoever raised a block must
// clear it again with `set`.

use serde::{Deserialize, Serialize};

/// Operating context of a wizard instance. Edit and view wizards keep fully
/// independent guard/modal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Edit,
    View,
}

/// A boolean-plus-reason cell that blocks forward navigation until cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardState {
    pub disable_next: bool,
    pub disable_reason: Option<String>,
    pub title: Option<String>,
}

impl GuardState {
    /// A blocking state with a reason and no title override.
    pub fn blocking(reason: impl Into<String>) -> Self {
        Self {
            disable_next: true,
            disable_reason: Some(reason.into()),
            title: None,
        }
    }

    /// A blocking state with a reason and a modal title override.
    pub fn blocking_titled(reason: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            disable_next: true,
            disable_reason: Some(reason.into()),
            title: Some(title.into()),
        }
    }

    /// The non-blocking initial state.
    pub fn clear() -> Self {
        Self::default()
    }
}

/// One value per operating mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSlots<T> {
    edit: T,
    view: T,
}

impl<T> ModeSlots<T> {
    pub fn get(&self, mode: Mode) -> &T {
        match mode {
            Mode::Edit => &self.edit,
            Mode::View => &self.view,
        }
    }

    pub fn get_mut(&mut self, mode: Mode) -> &mut T {
        match mode {
            Mode::Edit => &mut self.edit,
            Mode::View => &mut self.view,
        }
    }
}

/// Pure visibility cell for a confirmation/warning modal. All decision logic
/// lives in the navigation orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalFlag {
    show: bool,
}

impl ModalFlag {
    pub fn show(&mut self) {
        self.show = true;
    }

    pub fn hide(&mut self) {
        self.show = false;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.show = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.show
    }
}

/// All guard and modal-visibility state for one wizard instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardStore {
    step_guard: ModeSlots<GuardState>,
    form_dirty: ModeSlots<GuardState>,
    form_dirty_modal: ModeSlots<ModalFlag>,
    form_warning_modal: ModeSlots<ModalFlag>,
}

impl GuardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step_guard(&self, mode: Mode) -> &GuardState {
        self.step_guard.get(mode)
    }

    /// Full overwrite of the step guard slot. An omitted title in `state`
    /// replaces any previous title; this is not a merge.
    pub fn set_step_guard(&mut self, mode: Mode, state: GuardState) {
        *self.step_guard.get_mut(mode) = state;
    }

    pub fn reset_step_guard(&mut self, mode: Mode) {
        *self.step_guard.get_mut(mode) = GuardState::clear();
    }

    pub fn form_dirty(&self, mode: Mode) -> &GuardState {
        self.form_dirty.get(mode)
    }

    pub fn set_form_dirty(&mut self, mode: Mode, state: GuardState) {
        *self.form_dirty.get_mut(mode) = state;
    }

    pub fn reset_form_dirty(&mut self, mode: Mode) {
        *self.form_dirty.get_mut(mode) = GuardState::clear();
    }

    pub fn form_dirty_modal(&self, mode: Mode) -> ModalFlag {
        *self.form_dirty_modal.get(mode)
    }

    pub fn form_dirty_modal_mut(&mut self, mode: Mode) -> &mut ModalFlag {
        self.form_dirty_modal.get_mut(mode)
    }

    pub fn form_warning_modal(&self, mode: Mode) -> ModalFlag {
        *self.form_warning_modal.get(mode)
    }

    pub fn form_warning_modal_mut(&mut self, mode: Mode) -> &mut ModalFlag {
        self.form_warning_modal.get_mut(mode)
    }

    /// Restore every guard and modal flag to the initial state. Used on
    /// wizard unmount/exit.
    pub fn reset_all(&mut self) {
        *self = Self::default();
    }
}
