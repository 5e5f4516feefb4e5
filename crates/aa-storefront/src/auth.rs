//! Login submission and user-type detection.

use aa_api_types::{LoginRequest, LoginResponse, UserRole, UserTypeRequest, UserTypeResponse};

use crate::config::StorefrontConfig;
use crate::error::StorefrontError;
use crate::modal::LoginFields;
use crate::transport::Transport;

pub const LOGIN_FAILED: &str = "Login failed";
pub const LOGIN_UNAVAILABLE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub verification_code: Option<String>,
}

impl Credentials {
    /// Build the request body for `role`. Only sellers send a verification code.
    pub fn from_fields(role: UserRole, fields: &LoginFields) -> Self {
        Self {
            email: fields.email.clone(),
            password: fields.password.clone(),
            verification_code: match role {
                UserRole::Seller => Some(fields.verification_code.clone()),
                UserRole::Buyer => None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Redirect(String),
    Rejected(String),
}

fn login_path(config: &StorefrontConfig, role: UserRole) -> &str {
    match role {
        UserRole::Buyer => &config.endpoints.buyer_login,
        UserRole::Seller => &config.endpoints.seller_login,
    }
}

fn default_redirect(config: &StorefrontConfig, role: UserRole) -> &str {
    match role {
        UserRole::Buyer => &config.buyer_redirect,
        UserRole::Seller => &config.seller_redirect,
    }
}

/// One POST, no retry. Any 2xx redirects; everything else is shown inline.
pub async fn submit_login<T: Transport + ?Sized>(
    transport: &T,
    config: &StorefrontConfig,
    role: UserRole,
    credentials: Credentials,
) -> LoginOutcome {
    let request = LoginRequest {
        email: credentials.email,
        password: credentials.password,
        verification_code: credentials.verification_code,
    };
    let body = match serde_json::to_value(&request) {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(%err, "failed to encode login request");
            return LoginOutcome::Rejected(LOGIN_UNAVAILABLE.to_owned());
        }
    };

    let reply = match transport.post_json(login_path(config, role), &body).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(role = role.as_str(), %err, "login request failed");
            return LoginOutcome::Rejected(LOGIN_UNAVAILABLE.to_owned());
        }
    };

    let parsed: Result<LoginResponse, StorefrontError> = reply.json();
    match parsed {
        Ok(result) if reply.is_success() => LoginOutcome::Redirect(
            result
                .redirect
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| default_redirect(config, role).to_owned()),
        ),
        Ok(result) => {
            tracing::debug!(role = role.as_str(), status = reply.status, "login rejected");
            LoginOutcome::Rejected(
                result
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| LOGIN_FAILED.to_owned()),
            )
        }
        Err(err) => {
            tracing::warn!(role = role.as_str(), %err, "unreadable login response");
            LoginOutcome::Rejected(LOGIN_UNAVAILABLE.to_owned())
        }
    }
}

/// Ask which role `email` belongs to. Purely a hint: every failure is
/// logged and reported as `None`.
pub async fn detect_user_type<T: Transport + ?Sized>(
    transport: &T,
    config: &StorefrontConfig,
    email: &str,
) -> Option<UserRole> {
    let email = email.trim();
    if email.is_empty() {
        return None;
    }

    let body = serde_json::to_value(UserTypeRequest {
        email: email.to_owned(),
    })
    .ok()?;

    let reply = match transport.post_json(&config.endpoints.check_user_type, &body).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(%err, "error checking user type");
            return None;
        }
    };
    if !reply.is_success() {
        tracing::debug!(status = reply.status, "user type lookup declined");
        return None;
    }

    match reply.json::<UserTypeResponse>() {
        Ok(result) => result.user_type.as_deref().and_then(UserRole::parse),
        Err(err) => {
            tracing::warn!(%err, "error checking user type");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;

    fn creds(role: UserRole) -> Credentials {
        let fields = LoginFields {
            email: "maker@example.com".to_owned(),
            password: "secret".to_owned(),
            verification_code: "998877".to_owned(),
        };
        Credentials::from_fields(role, &fields)
    }

    #[tokio::test]
    async fn buyer_success_uses_server_redirect() {
        let transport = MockTransport::new().reply(200, r#"{"message":"ok","redirect":"/buyer/dashboard"}"#);
        let config = StorefrontConfig::default();

        let outcome = submit_login(&transport, &config, UserRole::Buyer, creds(UserRole::Buyer)).await;

        assert_eq!(outcome, LoginOutcome::Redirect("/buyer/dashboard".to_owned()));
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/buyer_login");
        let body = requests[0].body.clone().expect("json body");
        assert_eq!(body["email"], "maker@example.com");
        assert!(body.get("verification_code").is_none());
    }

    #[tokio::test]
    async fn seller_success_without_redirect_uses_default() {
        let transport = MockTransport::new().reply(200, r#"{"message":"Login successful"}"#);
        let config = StorefrontConfig::default();

        let outcome = submit_login(&transport, &config, UserRole::Seller, creds(UserRole::Seller)).await;

        assert_eq!(outcome, LoginOutcome::Redirect("/seller_dashboard".to_owned()));
        let body = transport.requests()[0].body.clone().expect("json body");
        assert_eq!(transport.requests()[0].path, "/seller_login");
        assert_eq!(body["verification_code"], "998877");
    }

    #[tokio::test]
    async fn rejection_shows_server_message_or_fallback() {
        let config = StorefrontConfig::default();

        let transport = MockTransport::new().reply(401, r#"{"message":"Invalid email or password"}"#);
        let outcome = submit_login(&transport, &config, UserRole::Buyer, creds(UserRole::Buyer)).await;
        assert_eq!(outcome, LoginOutcome::Rejected("Invalid email or password".to_owned()));

        let transport = MockTransport::new().reply(403, "{}");
        let outcome = submit_login(&transport, &config, UserRole::Buyer, creds(UserRole::Buyer)).await;
        assert_eq!(outcome, LoginOutcome::Rejected(LOGIN_FAILED.to_owned()));
    }

    #[tokio::test]
    async fn transport_and_parse_failures_are_generic() {
        let config = StorefrontConfig::default();

        let transport = MockTransport::new().fail(StorefrontError::Transport("offline".to_owned()));
        let outcome = submit_login(&transport, &config, UserRole::Buyer, creds(UserRole::Buyer)).await;
        assert_eq!(outcome, LoginOutcome::Rejected(LOGIN_UNAVAILABLE.to_owned()));

        let transport = MockTransport::new().reply(500, "<html>oops</html>");
        let outcome = submit_login(&transport, &config, UserRole::Seller, creds(UserRole::Seller)).await;
        assert_eq!(outcome, LoginOutcome::Rejected(LOGIN_UNAVAILABLE.to_owned()));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn detects_known_roles_only() {
        let config = StorefrontConfig::default();

        let transport = MockTransport::new().reply(200, r#"{"user_type":"seller"}"#);
        assert_eq!(
            detect_user_type(&transport, &config, " maker@example.com ").await,
            Some(UserRole::Seller)
        );
        assert_eq!(transport.requests()[0].body.clone().expect("body")["email"], "maker@example.com");

        let transport = MockTransport::new().reply(200, r#"{"user_type":null}"#);
        assert_eq!(detect_user_type(&transport, &config, "new@example.com").await, None);

        let transport = MockTransport::new().reply(200, r#"{"user_type":"admin"}"#);
        assert_eq!(detect_user_type(&transport, &config, "ops@example.com").await, None);
    }

    #[tokio::test]
    async fn detection_failures_are_swallowed() {
        let config = StorefrontConfig::default();

        let transport = MockTransport::new().reply(500, r#"{"error":"Server error"}"#);
        assert_eq!(detect_user_type(&transport, &config, "a@b.c").await, None);

        let transport = MockTransport::new().fail(StorefrontError::Transport("offline".to_owned()));
        assert_eq!(detect_user_type(&transport, &config, "a@b.c").await, None);
    }

    #[tokio::test]
    async fn blank_email_issues_no_request() {
        let transport = MockTransport::new();
        let config = StorefrontConfig::default();
        assert_eq!(detect_user_type(&transport, &config, "   ").await, None);
        assert!(transport.requests().is_empty());
    }
}
