//! Verification code email template

use askama::Template;

use crate::domain::auth::users::{Username, VerifyCode};

/// Verification code email template
#[derive(Debug, Template)]
#[template(path = "emails/verification_code.html")]
pub struct VerificationCodeTemplate {
    /// The recipient's username
    pub username: String,

    /// The 6-digit one-time code
    pub code: String,
}

impl VerificationCodeTemplate {
    /// Creates a new `VerificationCodeTemplate`
    pub fn new(username: &Username, code: &VerifyCode) -> Self {
        Self {
            username: username.to_string(),
            code: code.to_string(),
        }
    }

    /// Renders the plain text version of the email
    pub fn render_plain(&self) -> String {
        format!(
            "Hello {username},\n\n\
             Thank you for registering. Please use the following code to verify your email address.\n\n\
             Verification code: {code}\n\n\
             If you did not request this code, please ignore this email.\n",
            username = self.username,
            code = self.code,
        )
    }
}
