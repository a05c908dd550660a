//! Auth user lookup against the Supabase auth endpoint.

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::client::SupabaseClient;
use crate::error::SupabaseResult;

/// Authenticated user as reported by `/auth/v1/user`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl SupabaseClient {
    /// Resolve the user behind an access token.
    ///
    /// Returns `None` for an invalid or expired token; callers treat that
    /// as "not signed in" and redirect to login.
    pub async fn get_user(&self, access_token: &str) -> SupabaseResult<Option<AuthUser>> {
        let url = format!("{}/auth/v1/user", self.config.base_url);

        self.execute_request("get_user", "auth", async {
            let response = self
                .http
                .get(&url)
                .header("apikey", &self.config.api_key)
                .bearer_auth(access_token)
                .send()
                .await
                .map_err(|e| self.wrap_transport(e))?;
            let status = response.status();

            match status {
                StatusCode::OK => {
                    let user: AuthUser = response.json().await?;
                    Ok(Some(user))
                }
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    debug!("Access token rejected by auth endpoint");
                    Ok(None)
                }
                _ => Err(Self::handle_error_response(status, &url, response).await),
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SupabaseConfig;
    use std::time::Duration;
    use wiremock::matchers::{bearer_token, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: String) -> SupabaseClient {
        SupabaseClient::new(SupabaseConfig {
            base_url,
            api_key: "service-key".to_string(),
            timeout: Duration::from_secs(3),
            connect_timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_user_returns_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(header("apikey", "service-key"))
            .and(bearer_token("user-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "user-1",
                "email": "a@example.com"
            })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let user = client.get_user("user-token").await.unwrap();
        assert_eq!(
            user,
            Some(AuthUser {
                id: "user-1".to_string(),
                email: Some("a@example.com".to_string())
            })
        );
    }

    #[tokio::test]
    async fn test_get_user_none_for_rejected_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let user = client.get_user("expired").await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_get_user_propagates_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        assert!(client.get_user("user-token").await.is_err());
    }
}
