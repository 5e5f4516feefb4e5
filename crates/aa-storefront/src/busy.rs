//! Busy-state handling for trigger controls.
//!
//! A control that starts a request is disabled and shows a busy label until
//! the request settles. `BusyGuard` restores it on drop, so every exit path
//! (success, failure, early return) re-enables the control.

pub const ADDING_LABEL: &str = r#"<i class="fas fa-spinner fa-spin"></i> Adding..."#;
pub const GENERATING_LABEL: &str = r#"<i class="fas fa-spinner fa-spin"></i> Generating..."#;

/// A clickable control whose label is markup.
pub trait Control {
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn set_disabled(&self, disabled: bool);
}

pub struct BusyGuard<'a, C: Control + ?Sized> {
    control: &'a C,
    original_label: String,
}

impl<'a, C: Control + ?Sized> BusyGuard<'a, C> {
    pub fn engage(control: &'a C, busy_label: &str) -> Self {
        let original_label = control.label();
        control.set_disabled(true);
        control.set_label(busy_label);
        Self {
            control,
            original_label,
        }
    }
}

impl<C: Control + ?Sized> Drop for BusyGuard<'_, C> {
    fn drop(&mut self) {
        self.control.set_disabled(false);
        self.control.set_label(&self.original_label);
    }
}
