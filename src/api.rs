use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::Settings;
use crate::error::ApiError;
use crate::schemas::{
    Audiobook, AudiobookPage, AuthResponse, CategoriesResponse, CategoryAudiobooks, CountResponse,
    Credentials, ErrorBody, FavoriteStatus, MessageResponse, RandomAudiobooks, SearchResults,
    UserEnvelope,
};

/// Typed client for the audiobook catalog API.
///
/// Cheap to clone; clones share the underlying connection pool and cookie
/// store, so a login performed through one clone authenticates them all for
/// the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base, path);
        debug!(%method, %url, "api request");
        self.http.request(method, url)
    }

    /// Decode a response, mapping non-success statuses to [`ApiError::Api`]
    /// with the backend's `{ "error": ... }` message when present.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        Self::decode(response).await
    }

    // Catalog

    pub async fn categories(&self) -> Result<CategoriesResponse, ApiError> {
        self.get_json("/categories", &[]).await
    }

    pub async fn category_audiobooks(
        &self,
        category_id: i32,
        page: u32,
        per_page: u32,
    ) -> Result<CategoryAudiobooks, ApiError> {
        self.get_json(
            &format!("/categories/{category_id}"),
            &paging(page, per_page),
        )
        .await
    }

    pub async fn all_audiobooks(&self, page: u32, per_page: u32) -> Result<AudiobookPage, ApiError> {
        self.get_json("/audiobooks", &paging(page, per_page)).await
    }

    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResults, ApiError> {
        let mut params = paging(page, per_page);
        params.push(("q", query.to_string()));
        self.get_json("/audiobooks/search", &params).await
    }

    pub async fn audiobook(&self, audiobook_id: i32) -> Result<Audiobook, ApiError> {
        self.get_json(&format!("/audiobooks/{audiobook_id}"), &[])
            .await
    }

    pub async fn random_audiobooks(&self, number: u32) -> Result<RandomAudiobooks, ApiError> {
        self.get_json("/audiobooks/random", &[("number", number.to_string())])
            .await
    }

    pub async fn audiobook_count(&self) -> Result<i64, ApiError> {
        let response: CountResponse = self.get_json("/audiobooks/count", &[]).await?;
        Ok(response.count)
    }

    // Auth (session-cookie based; the cookie store carries the session)

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let response = self
            .request(Method::POST, "/auth/login")
            .json(&Credentials {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        Self::decode(response).await
    }

    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let response = self
            .request(Method::POST, "/auth/register")
            .json(&Credentials {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        let response = self.request(Method::POST, "/auth/logout").send().await?;
        Self::decode(response).await
    }

    pub async fn current_user(&self) -> Result<UserEnvelope, ApiError> {
        self.get_json("/auth/me", &[]).await
    }

    // Favorites (require a session)

    pub async fn favorites(&self, page: u32, per_page: u32) -> Result<AudiobookPage, ApiError> {
        // Trailing slash matters: the backend registers the collection route
        // under "/favorites/".
        self.get_json("/favorites/", &paging(page, per_page)).await
    }

    pub async fn add_favorite(&self, audiobook_id: i32) -> Result<MessageResponse, ApiError> {
        let response = self
            .request(Method::POST, &format!("/favorites/{audiobook_id}"))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn remove_favorite(&self, audiobook_id: i32) -> Result<MessageResponse, ApiError> {
        let response = self
            .request(Method::DELETE, &format!("/favorites/{audiobook_id}"))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn check_favorite(&self, audiobook_id: i32) -> Result<FavoriteStatus, ApiError> {
        self.get_json(&format!("/favorites/check/{audiobook_id}"), &[])
            .await
    }
}

fn paging(page: u32, per_page: u32) -> Vec<(&'static str, String)> {
    vec![("page", page.to_string()), ("per_page", per_page.to_string())]
}
