//! Authorization code to permanent access token exchange.
//!
//! After the merchant approves the app, Shopify redirects back with a
//! short-lived `code`. [`exchange_authorization_code`] upgrades it by POSTing
//! `client_id`, `client_secret` and `code` to the shop's
//! `/admin/oauth/access_token` endpoint.

use serde::{Deserialize, Serialize};

use crate::auth::oauth::error::OAuthError;
use crate::clients::HttpTransport;
use crate::config::{AccessToken, ApiKey, ApiSecretKey, ShopDomain};

#[derive(Serialize)]
struct AccessTokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

/// Returns `https://{shop}.myshopify.com/admin/oauth/access_token`.
#[must_use]
pub fn access_token_url(shop: &ShopDomain) -> String {
    format!("{}/admin/oauth/access_token", shop.base_url())
}

/// Exchanges an authorization code for a permanent access token.
///
/// Only HTTP 200 counts as success.
///
/// # Errors
///
/// - [`OAuthError::HttpError`] if no response was obtained
/// - [`OAuthError::TokenExchangeFailed`] for any non-200 status, or a 200
///   whose body carries no usable `access_token`
pub async fn exchange_authorization_code(
    transport: &dyn HttpTransport,
    shop: &ShopDomain,
    api_key: &ApiKey,
    secret: &ApiSecretKey,
    code: &str,
) -> Result<AccessToken, OAuthError> {
    let body = AccessTokenRequest {
        client_id: api_key.as_ref(),
        client_secret: secret.as_ref(),
        code,
    };
    let data = serde_json::to_value(&body).map_err(|e| OAuthError::InvalidCallback {
        reason: e.to_string(),
    })?;

    let response = transport.post(&access_token_url(shop), data).await?;

    if response.status != 200 {
        return Err(OAuthError::TokenExchangeFailed {
            status: response.status,
            message: format!(
                "Shopify access_token request failed with status {}",
                response.status
            ),
        });
    }

    let parsed: AccessTokenResponse =
        serde_json::from_value(response.body).map_err(|e| OAuthError::TokenExchangeFailed {
            status: 200,
            message: format!("Failed to parse token response: {e}"),
        })?;

    AccessToken::new(parsed.access_token).map_err(|_| OAuthError::TokenExchangeFailed {
        status: 200,
        message: "Token response carried an empty access_token".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpMethod, RecordingTransport, TransportResponse};
    use serde_json::json;

    fn shop() -> ShopDomain {
        ShopDomain::new("test-shop").unwrap()
    }

    async fn exchange(transport: &RecordingTransport) -> Result<AccessToken, OAuthError> {
        exchange_authorization_code(
            transport,
            &shop(),
            &ApiKey::new("client-id").unwrap(),
            &ApiSecretKey::new("client-secret").unwrap(),
            "auth-code",
        )
        .await
    }

    #[tokio::test]
    async fn test_successful_exchange_posts_credentials_and_returns_token() {
        let transport = RecordingTransport::new(vec![TransportResponse::new(
            200,
            Vec::new(),
            json!({"access_token": "permanent-token", "scope": "read_orders"}),
        )]);

        let token = exchange(&transport).await.unwrap();
        assert_eq!(token.as_ref(), "permanent-token");

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        let (method, url, request) = &calls[0];
        assert_eq!(*method, HttpMethod::Post);
        assert_eq!(url, "https://test-shop.myshopify.com/admin/oauth/access_token");
        assert_eq!(
            request.body().unwrap(),
            &json!({
                "client_id": "client-id",
                "client_secret": "client-secret",
                "code": "auth-code"
            })
        );
    }

    #[tokio::test]
    async fn test_non_200_maps_to_token_exchange_failed() {
        let transport = RecordingTransport::new(vec![TransportResponse::new(
            400,
            Vec::new(),
            json!({"error": "invalid_request"}),
        )]);

        let result = exchange(&transport).await;
        assert!(matches!(
            result,
            Err(OAuthError::TokenExchangeFailed { status: 400, .. })
        ));
    }

    #[tokio::test]
    async fn test_201_is_not_success() {
        let transport = RecordingTransport::new(vec![TransportResponse::new(
            201,
            Vec::new(),
            json!({"access_token": "t"}),
        )]);

        assert!(matches!(
            exchange(&transport).await,
            Err(OAuthError::TokenExchangeFailed { status: 201, .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_access_token_in_body() {
        let transport =
            RecordingTransport::new(vec![TransportResponse::new(200, Vec::new(), json!({}))]);

        assert!(matches!(
            exchange(&transport).await,
            Err(OAuthError::TokenExchangeFailed { status: 200, .. })
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_http_error() {
        let transport = RecordingTransport::new(Vec::new());
        assert!(matches!(
            exchange(&transport).await,
            Err(OAuthError::HttpError(_))
        ));
    }
}
