//! REST client for the Tofula backend.
//!
//! Wraps the `/api/v1` catalog, stories and studio endpoints using
//! [`reqwest`]. Every request carries the session's bearer token when one
//! is present; a 401 ends the session and redirects to the login route.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use tofula_core::filter::StatusFilter;
use tofula_core::library::StoryInstance;
use tofula_core::personalization::{PersonalizationRequest, PersonalizationResult};
use tofula_core::routes::Route;
use tofula_core::studio::{GenerationRequest, STUDIO_PASSWORD_HEADER};
use tofula_core::template::{NewTemplate, StoryTemplate, TemplatePatch};
use validator::Validate;

use crate::config::ClientConfig;
use crate::error::{error_detail, error_message, ApiError, ApiResult};
use crate::navigation::Navigator;
use crate::session::Session;

/// Path prefix shared by every endpoint.
const API_PREFIX: [&str; 2] = ["api", "v1"];

/// HTTP client for the Tofula backend.
pub struct TofulaApi {
    client: reqwest::Client,
    base_url: Url,
    session: Session,
    navigator: Arc<dyn Navigator>,
    studio_password: String,
}

impl TofulaApi {
    /// Create a client from configuration.
    pub fn new(
        config: &ClientConfig,
        session: Session,
        navigator: Arc<dyn Navigator>,
    ) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Self::with_client(client, config, session, navigator)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        config: &ClientConfig,
        session: Session,
        navigator: Arc<dyn Navigator>,
    ) -> ApiResult<Self> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|e| ApiError::Config(format!("invalid API URL '{}': {e}", config.api_url)))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "API URL must be an absolute http(s) URL, got '{}'",
                config.api_url
            )));
        }
        HeaderValue::from_str(&config.studio_password)
            .map_err(|_| ApiError::Config("studio password is not a valid header value".into()))?;

        Ok(Self {
            client,
            base_url,
            session,
            navigator,
            studio_password: config.studio_password.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // ---- catalog ----

    /// `GET /catalog`: approved templates.
    pub async fn list_catalog(&self) -> ApiResult<Vec<StoryTemplate>> {
        self.get(&["catalog"]).await
    }

    /// `GET /catalog/{id}`.
    pub async fn get_catalog_story(&self, story_id: &str) -> ApiResult<StoryTemplate> {
        self.get(&["catalog", story_id]).await
    }

    // ---- stories ----

    /// `POST /stories/personalize`. The request is normalized and validated
    /// before anything is sent.
    pub async fn personalize(
        &self,
        request: PersonalizationRequest,
    ) -> ApiResult<PersonalizationResult> {
        let request = request.normalized()?;
        self.post(&["stories", "personalize"], Some(&request)).await
    }

    /// `GET /stories/library`: the signed-in user's generated stories.
    pub async fn list_library(&self) -> ApiResult<Vec<StoryInstance>> {
        self.get(&["stories", "library"]).await
    }

    /// `GET /stories/library/{id}`.
    pub async fn get_library_story(&self, instance_id: &str) -> ApiResult<StoryInstance> {
        self.get(&["stories", "library", instance_id]).await
    }

    // ---- studio ----

    /// `POST /studio/stories/generate`: run the AI pipeline for a new draft.
    ///
    /// Sends the configured studio password as `X-Studio-Password`.
    pub async fn generate_studio_story(
        &self,
        request: GenerationRequest,
    ) -> ApiResult<StoryTemplate> {
        let request = request.checked()?;
        let url = self.endpoint(&["studio", "stories", "generate"])?;
        let builder = self
            .request(Method::POST, url.clone())
            .header(STUDIO_PASSWORD_HEADER, self.studio_password.as_str())
            .json(&request);
        let response = self.send(builder, &Method::POST, &url).await?;
        Self::decode(&url, response).await
    }

    /// `POST /studio/stories`: create a template directly.
    pub async fn create_studio_story(&self, template: &NewTemplate) -> ApiResult<StoryTemplate> {
        template.validate().map_err(tofula_core::error::CoreError::from)?;
        self.post(&["studio", "stories"], Some(template)).await
    }

    /// `GET /studio/stories[?status_filter=]`. The array is returned as
    /// the backend sent it.
    pub async fn list_studio_stories(&self, filter: StatusFilter) -> ApiResult<Vec<StoryTemplate>> {
        let url = self.endpoint(&["studio", "stories"])?;
        let mut builder = self.request(Method::GET, url.clone());
        if let Some(status) = filter.query_value() {
            builder = builder.query(&[("status_filter", status)]);
        }
        let response = self.send(builder, &Method::GET, &url).await?;
        Self::decode(&url, response).await
    }

    /// `GET /studio/stories/{id}`.
    pub async fn get_studio_story(&self, template_id: &str) -> ApiResult<StoryTemplate> {
        self.get(&["studio", "stories", template_id]).await
    }

    /// `PATCH /studio/stories/{id}`.
    pub async fn update_studio_story(
        &self,
        template_id: &str,
        patch: &TemplatePatch,
    ) -> ApiResult<StoryTemplate> {
        patch.validate().map_err(tofula_core::error::CoreError::from)?;
        let url = self.endpoint(&["studio", "stories", template_id])?;
        let builder = self.request(Method::PATCH, url.clone()).json(patch);
        let response = self.send(builder, &Method::PATCH, &url).await?;
        Self::decode(&url, response).await
    }

    /// `POST /studio/stories/{id}/approve`: publish to the catalog.
    pub async fn approve_studio_story(&self, template_id: &str) -> ApiResult<StoryTemplate> {
        self.post::<(), _>(&["studio", "stories", template_id, "approve"], None)
            .await
    }

    /// `DELETE /studio/stories/{id}`. The backend answers 204.
    pub async fn delete_studio_story(&self, template_id: &str) -> ApiResult<()> {
        let url = self.endpoint(&["studio", "stories", template_id])?;
        let builder = self.request(Method::DELETE, url.clone());
        self.send(builder, &Method::DELETE, &url).await?;
        Ok(())
    }

    // ---- private helpers ----

    /// Build `{base}/api/v1/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Config(format!("'{}' cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    /// Start a request, attaching the bearer token if the session has one.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.endpoint(segments)?;
        let builder = self.request(Method::GET, url.clone());
        let response = self.send(builder, &Method::GET, &url).await?;
        Self::decode(&url, response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: Option<&B>,
    ) -> ApiResult<T> {
        let url = self.endpoint(segments)?;
        let mut builder = self.request(Method::POST, url.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = self.send(builder, &Method::POST, &url).await?;
        Self::decode(&url, response).await
    }

    /// Send a request and apply the uniform response policy: 401 ends the
    /// session and redirects to login, any other non-2xx becomes
    /// [`ApiError::Api`].
    async fn send(&self, builder: RequestBuilder, method: &Method, url: &Url) -> ApiResult<Response> {
        let path = url.path();
        tracing::debug!(%method, path, "API request");

        let response = builder.send().await.map_err(|e| {
            tracing::error!(%method, path, error = %e, "API request failed");
            ApiError::Request(e)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%method, path, "Unauthorized, ending session");
            self.session.expire();
            self.navigator.redirect(&Route::Login);
            return Err(ApiError::Unauthorized);
        }

        Self::ensure_success(method, path, response).await
    }

    /// Return the response unchanged on success, or an [`ApiError::Api`]
    /// carrying the backend's message on failure.
    async fn ensure_success(method: &Method, path: &str, response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let detail = error_detail(&body);
        let message = error_message(
            &body,
            detail.as_deref(),
            status.canonical_reason().unwrap_or("Request failed"),
        );
        tracing::error!(%method, path, status = status.as_u16(), message = %message, "API error response");
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
            detail,
        })
    }

    /// Decode a successful body, reporting schema mismatches as
    /// [`ApiError::Decode`].
    async fn decode<T: DeserializeOwned>(url: &Url, response: Response) -> ApiResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| {
            tracing::error!(path = url.path(), error = %source, "Malformed API response");
            ApiError::Decode {
                path: url.path().to_string(),
                source,
            }
        })
    }
}
