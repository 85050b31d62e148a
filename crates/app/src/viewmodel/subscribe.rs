//! Newsletter subscribe form
//!
//! There is no mailing backend; submissions are only logged.

use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct SubscribeForm {
    pub email: String,
}

impl SubscribeForm {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// Log the address and return the confirmation text
    pub fn submit(&self) -> Result<String, String> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err("Please enter a valid email address".to_string());
        }
        info!(%email, "Newsletter subscription");
        Ok(format!("Thanks! {email} will hear about new study spots."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit() {
        assert!(SubscribeForm::new("").submit().is_err());
        assert!(SubscribeForm::new("not-an-email").submit().is_err());
        let msg = SubscribeForm::new(" me@example.com ").submit().unwrap();
        assert!(msg.contains("me@example.com"));
    }
}
