//! Auth Panel
//!
//! Login/signup form state. Switching mode keeps whatever has been typed;
//! submitting hands the request upward and discards the draft. Nothing is
//! validated here, the server decides what a valid credential is.

use std::collections::HashMap;

use crate::api::{LoginRequest, SignupRequest};

/// Which form the panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn label(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Signup => "Signup",
        }
    }
}

/// Input fields of the auth form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthField {
    Name,
    Email,
    Password,
}

impl AuthField {
    pub fn placeholder(&self) -> &'static str {
        match self {
            AuthField::Name => "Name",
            AuthField::Email => "Email",
            AuthField::Password => "Password",
        }
    }

    /// Whether the input should be masked when shown
    pub fn is_secret(&self) -> bool {
        matches!(self, AuthField::Password)
    }
}

/// In-progress input, keyed by field
pub type AuthDraft = HashMap<AuthField, String>;

/// What the panel hands upward on submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    Login(LoginRequest),
    Signup(SignupRequest),
}

/// Auth panel state machine over {Login, Signup}
#[derive(Debug, Clone, Default)]
pub struct AuthPanel {
    mode: AuthMode,
    draft: AuthDraft,
}

impl AuthPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Switch between login and signup. The draft is kept.
    pub fn set_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
    }

    pub fn set_field(&mut self, field: AuthField, value: impl Into<String>) {
        self.draft.insert(field, value.into());
    }

    pub fn field(&self, field: AuthField) -> Option<&str> {
        self.draft.get(&field).map(String::as_str)
    }

    /// Fields shown in the current mode, in display order
    pub fn visible_fields(&self) -> &'static [AuthField] {
        match self.mode {
            AuthMode::Login => &[AuthField::Email, AuthField::Password],
            AuthMode::Signup => &[AuthField::Name, AuthField::Email, AuthField::Password],
        }
    }

    /// Build the request for the current mode and discard the draft
    ///
    /// Fields that were never filled in are sent as empty strings.
    pub fn submit(&mut self) -> AuthRequest {
        let mut draft = std::mem::take(&mut self.draft);
        let mut take = |field: AuthField| draft.remove(&field).unwrap_or_default();

        match self.mode {
            AuthMode::Login => AuthRequest::Login(LoginRequest {
                email: take(AuthField::Email),
                password: take(AuthField::Password),
            }),
            AuthMode::Signup => AuthRequest::Signup(SignupRequest {
                name: take(AuthField::Name),
                email: take(AuthField::Email),
                password: take(AuthField::Password),
            }),
        }
    }
}
