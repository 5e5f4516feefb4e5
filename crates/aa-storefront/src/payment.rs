//! Payment method picker.

pub const SELECTED_CLASS: &str = "selected";
pub const CARD_METHOD: &str = "card";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentSelection {
    method: Option<String>,
}

impl PaymentSelection {
    pub fn select(&mut self, method: &str) {
        self.method = Some(method.to_owned());
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn is_selected(&self, method: &str) -> bool {
        self.method.as_deref() == Some(method)
    }

    /// Card number fields only make sense for card payments.
    pub fn card_fields_visible(&self) -> bool {
        self.is_selected(CARD_METHOD)
    }
}
