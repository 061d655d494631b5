use serde::{Deserialize, Serialize};

/// Authorization tokens forwarded to the remote store with every request.
///
/// Values are passed through verbatim; they are never parsed or refreshed here.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Value of the `Authorization` header, scheme included
    pub authorization: String,
    /// Value of the `Client-Authorization` header, if the caller has one
    pub client_authorization: Option<String>,
}

impl AuthContext {
    pub fn new(authorization: impl Into<String>) -> Self {
        Self {
            authorization: authorization.into(),
            client_authorization: None,
        }
    }

    pub fn with_client(
        authorization: impl Into<String>,
        client_authorization: impl Into<String>,
    ) -> Self {
        Self {
            authorization: authorization.into(),
            client_authorization: Some(client_authorization.into()),
        }
    }
}

// Tokens stay out of logs.
impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("authorization", &"<redacted>")
            .field(
                "client_authorization",
                &self.client_authorization.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_context_creation() {
        let ctx = AuthContext::with_client("Bearer user-token", "Bearer client-token");
        assert_eq!(ctx.authorization, "Bearer user-token");
        assert_eq!(ctx.client_authorization.as_deref(), Some("Bearer client-token"));

        let ctx = AuthContext::new("Bearer only");
        assert!(ctx.client_authorization.is_none());
    }

    #[test]
    fn test_debug_hides_tokens() {
        let ctx = AuthContext::with_client("Bearer secret", "Bearer other");
        let printed = format!("{:?}", ctx);
        assert!(!printed.contains("secret"));
        assert!(!printed.contains("other"));
    }
}
