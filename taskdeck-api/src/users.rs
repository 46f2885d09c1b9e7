//! Resource client for the `/api/users` endpoint.

use url::Url;

use crate::error::ApiError;
use crate::http;
use crate::types::User;
use crate::wire::WireUser;

/// Client for the user resource. Users are read-only from the client's
/// perspective.
#[derive(Debug, Clone)]
pub struct UserClient {
    http: reqwest::Client,
    base_url: Url,
}

impl UserClient {
    /// Creates a user client against the given base URL.
    #[must_use]
    pub const fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Fetches all users, computing display names at the wire seam.
    ///
    /// # Errors
    ///
    /// Returns the transport error unmodified on failure.
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let url = format!(
            "{}/api/users",
            self.base_url.as_str().trim_end_matches('/')
        );
        let response = self.http.get(url).send().await?;
        let wire: Vec<WireUser> = http::read_json(response).await?;
        Ok(wire.into_iter().map(User::from).collect())
    }
}
