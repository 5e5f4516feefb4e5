//! Overlay panels and the login panel's tab state.

use std::collections::BTreeSet;

use aa_api_types::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModalId {
    Login,
    Ai,
    Messaging,
    Payment,
}

impl ModalId {
    pub const ALL: [ModalId; 4] = [Self::Login, Self::Ai, Self::Messaging, Self::Payment];

    pub fn element_id(self) -> &'static str {
        match self {
            Self::Login => "loginModal",
            Self::Ai => "aiModal",
            Self::Messaging => "messagingModal",
            Self::Payment => "paymentModal",
        }
    }

    /// Name used in `data-open-modal` / `data-close-modal` attributes.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "login" => Some(Self::Login),
            "ai" => Some(Self::Ai),
            "messaging" => Some(Self::Messaging),
            "payment" => Some(Self::Payment),
            _ => None,
        }
    }

    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|modal| modal.element_id() == id)
    }
}

/// Visible/hidden flag per panel.
#[derive(Debug, Clone, Default)]
pub struct ModalSet {
    open: BTreeSet<ModalId>,
}

impl ModalSet {
    pub fn open(&mut self, id: ModalId) {
        self.open.insert(id);
    }

    pub fn close(&mut self, id: ModalId) {
        self.open.remove(&id);
    }

    pub fn is_open(&self, id: ModalId) -> bool {
        self.open.contains(&id)
    }

    /// A click whose target is a panel's own backdrop element closes that
    /// panel. Returns the panel that was closed.
    pub fn close_on_backdrop(&mut self, target_id: &str) -> Option<ModalId> {
        let id = ModalId::from_element_id(target_id)?;
        if self.open.remove(&id) { Some(id) } else { None }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthTab {
    #[default]
    Buyer,
    Seller,
}

impl From<UserRole> for AuthTab {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Buyer => Self::Buyer,
            UserRole::Seller => Self::Seller,
        }
    }
}

impl AuthTab {
    pub fn data_tab(self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Seller => "seller",
        }
    }

    pub fn role(self) -> UserRole {
        match self {
            Self::Buyer => UserRole::Buyer,
            Self::Seller => UserRole::Seller,
        }
    }
}

/// Field values read from one login form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFields {
    pub email: String,
    pub password: String,
    pub verification_code: String,
}

/// Tab and error banner of the login panel. Field values live in the forms,
/// which the page resets on every open.
#[derive(Debug, Clone, Default)]
pub struct LoginPanel {
    tab: AuthTab,
    error: Option<String>,
}

impl LoginPanel {
    /// Hide the error banner. The active tab is kept.
    pub fn open(&mut self) {
        self.error = None;
    }

    pub fn switch_tab(&mut self, tab: AuthTab) {
        self.tab = tab;
        self.error = None;
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn tab(&self) -> AuthTab {
        self.tab
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `(buyer_visible, seller_visible)`; exactly one is true.
    pub fn form_visibility(&self) -> (bool, bool) {
        match self.tab {
            AuthTab::Buyer => (true, false),
            AuthTab::Seller => (false, true),
        }
    }
}
