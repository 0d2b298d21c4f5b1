//! REST client for the storefront backend

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::api::authenticator::{Access, RequestAuthenticator};
use crate::auth::{Credentials, LoginResponse, RegisterRequest};
use crate::error::{Error, Result};
use crate::products::model::UpdateBody;
use crate::products::{Product, ProductDraft, Version};

/// Error body shape the backend uses for failures
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for `/auth/*` and `/products*`. Clones share the connection
/// pool and the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    authenticator: RequestAuthenticator,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, authenticator: RequestAuthenticator) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            authenticator,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn authenticator(&self) -> &RequestAuthenticator {
        &self.authenticator
    }

    /// `POST /auth/login`
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let builder = self.request(Method::POST, "/auth/login").json(credentials);
        let response = self.execute(builder, Access::Public).await?;
        Ok(response.json().await?)
    }

    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let builder = self.request(Method::POST, "/auth/register").json(request);
        self.execute(builder, Access::Public).await?;
        Ok(())
    }

    /// `GET /products`
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        self.fetch(self.request(Method::GET, "/products")).await
    }

    /// `POST /products`
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product> {
        self.fetch(self.request(Method::POST, "/products").json(draft)).await
    }

    /// `PUT /products/:id`, echoing `version` for the server's concurrency check
    pub async fn update_product(
        &self,
        id: &str,
        draft: &ProductDraft,
        version: &Version,
    ) -> Result<Product> {
        let body = UpdateBody { id, draft, version };
        let builder = self.request(Method::PUT, &format!("/products/{}", id)).json(&body);
        self.fetch(builder).await
    }

    /// `DELETE /products/:id`
    pub async fn delete_product(&self, id: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, &format!("/products/{}", id));
        self.execute(builder, Access::Authenticated).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.execute(builder, Access::Authenticated).await?;
        Ok(response.json().await?)
    }

    /// Send through the authenticator and turn non-2xx statuses into errors
    async fn execute(&self, builder: RequestBuilder, access: Access) -> Result<Response> {
        let (builder, sent_token) = self.authenticator.authorize(builder, access);
        let response = builder.send().await?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url().path());

        if status.is_success() {
            return Ok(response);
        }

        self.authenticator.observe(status, sent_token.as_deref());

        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .and_then(|body| body.message)
            .unwrap_or_default();

        Err(status_error(status, message))
    }
}

fn status_error(status: StatusCode, message: String) -> Error {
    match status {
        StatusCode::UNAUTHORIZED => Error::Authentication(message),
        StatusCode::CONFLICT => Error::Conflict(message),
        _ => Error::Server {
            status: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::events::SessionEvents;
    use crate::auth::SessionStore;

    #[test]
    fn test_status_mapping() {
        assert!(status_error(StatusCode::UNAUTHORIZED, String::new()).is_authentication());
        assert!(status_error(StatusCode::CONFLICT, "stale".into()).is_conflict());
        assert!(matches!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR, String::new()),
            Error::Server { status: 500, .. }
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let auth = RequestAuthenticator::new(SessionStore::in_memory(), SessionEvents::new());
        let client = ApiClient::new("http://localhost:3000/api/", auth);
        assert_eq!(client.base_url(), "http://localhost:3000/api");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let auth = RequestAuthenticator::new(SessionStore::in_memory(), SessionEvents::new());
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = ApiClient::new(format!("http://127.0.0.1:{}/api", port), auth);
        let result = client.list_products().await;
        assert!(matches!(result, Err(Error::Network(_))));
    }
}
