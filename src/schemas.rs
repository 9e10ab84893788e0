use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One audiobook entry, linking a video on the source platform to book metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Audiobook {
    pub id: i32,
    /// Identifier of the backing video on the source platform.
    pub video_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Author name; the backend flattens the relation to a plain string.
    #[serde(default)]
    pub author: Option<String>,
    /// Category names this audiobook belongs to.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Duration in seconds, when the source platform reported one.
    #[serde(default)]
    pub duration: Option<i64>,
    /// When the record was added or last updated server-side.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A browsing category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub sort_order: i32,
}

/// An authenticated user, as returned by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
}

/// Pagination metadata attached to every listing response.
///
/// The loader consumes only `page` and `has_next`; the rest is surfaced to
/// callers that want to show totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
    #[serde(default)]
    pub pages: u32,
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

/// `GET /categories`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
    pub total: usize,
}

/// `GET /categories/{id}`: a category plus one page of its audiobooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAudiobooks {
    pub category: Category,
    pub audiobooks: Vec<Audiobook>,
    pub pagination: Pagination,
}

/// `GET /audiobooks` and `GET /favorites/`: one page of audiobooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudiobookPage {
    pub audiobooks: Vec<Audiobook>,
    pub pagination: Pagination,
}

/// `GET /audiobooks/search`: a page of matches with the query echoed back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub audiobooks: Vec<Audiobook>,
    pub pagination: Pagination,
    pub query: String,
}

/// `GET /audiobooks/random`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomAudiobooks {
    pub audiobooks: Vec<Audiobook>,
    pub total: usize,
}

/// `GET /audiobooks/count`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: i64,
}

/// `POST /auth/login` and `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
}

/// `GET /auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}

/// Plain acknowledgements (`logout`, favorite add/remove).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `GET /favorites/check/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteStatus {
    pub is_favorite: bool,
}

/// Body the backend attaches to non-success statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Credentials payload for login and register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}
