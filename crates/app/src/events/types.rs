//! Event Types

/// Something that happened which other parts of the system react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A new user finished registering.
    UserRegistered { email: String, name: Option<String> },

    /// A user asked for a password reset link.
    PasswordResetRequested { email: String, token_uid: String },
}

impl AppEvent {
    /// Short label for logs and spans.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UserRegistered { .. } => "user_registered",
            Self::PasswordResetRequested { .. } => "password_reset_requested",
        }
    }
}
