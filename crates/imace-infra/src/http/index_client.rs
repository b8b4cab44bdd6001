//! HTTP adapter for the remote image index.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use imace_core::ports::{ImageIndexPort, IndexError};
use imace_core::{BrowseKey, BrowsePage, ImagePath, ImagePoint, SearchResultItem, StagedFile};

use super::dto::{ImagePointDto, PaginatedImagesDto, SearchHitDto, SearchRequest};

const PAGINATED_IMAGES: &str = "/paginated_images";
const SEARCH: &str = "/search";
const UPLOAD: &str = "/upload";
const DELETE_ALL: &str = "/delete_all";
const ALL_IMAGES: &str = "/all_images";
const IMAGE_POINTS: &str = "/image_points";

/// Multipart field every uploaded file is sent under.
const UPLOAD_FIELD: &str = "images";

/// Stateless reqwest client for the image index. One call, one request.
pub struct HttpImageIndexClient {
    client: Client,
    base_url: Url,
}

impl HttpImageIndexClient {
    /// `timeout` of `None` waits for the server indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, IndexError> {
        let base_url = Url::parse(base_url).map_err(|e| IndexError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(IndexError::InvalidBaseUrl {
                url: base_url.to_string(),
                message: "expected an http(s) url".to_string(),
            });
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| IndexError::InvalidRequest(format!("failed to build http client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Always Ok: `new` rejects cannot-be-a-base urls.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, IndexError> {
        let response = request.send().await.map_err(|e| IndexError::Network {
            endpoint,
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexError::Server {
                endpoint,
                status: status.as_u16(),
            });
        }
        debug!(endpoint, status = status.as_u16(), "index request completed");
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: &'static str,
        response: Response,
    ) -> Result<T, IndexError> {
        response.json::<T>().await.map_err(|e| IndexError::Decode {
            endpoint,
            message: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl ImageIndexPort for HttpImageIndexClient {
    async fn list_page(&self, key: BrowseKey) -> Result<BrowsePage, IndexError> {
        let url = self.endpoint(&["paginated_images"]);
        let request = self.client.get(url).query(&[
            ("page", key.page),
            ("page_size", key.page_size.get()),
        ]);

        let response = self.send(PAGINATED_IMAGES, request).await?;
        let dto: PaginatedImagesDto = Self::decode(PAGINATED_IMAGES, response).await?;

        if dto.page.is_some_and(|page| page != key.page)
            || dto.page_size.is_some_and(|size| size != key.page_size.get())
        {
            warn!(
                requested_page = key.page,
                requested_page_size = key.page_size.get(),
                echoed_page = ?dto.page,
                echoed_page_size = ?dto.page_size,
                "index echoed different browse parameters"
            );
        }
        Ok(BrowsePage::new(key, dto.images, dto.total))
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, IndexError> {
        let request = self
            .client
            .post(self.endpoint(&["search"]))
            .json(&SearchRequest { query });

        let response = self.send(SEARCH, request).await?;
        let hits: Vec<SearchHitDto> = Self::decode(SEARCH, response).await?;
        Ok(hits.into_iter().map(SearchResultItem::from).collect())
    }

    async fn upload(&self, files: &[StagedFile]) -> Result<(), IndexError> {
        let mut form = Form::new();
        for file in files {
            let mut part =
                Part::stream_with_length(Body::from(file.bytes.clone()), file.size() as u64)
                    .file_name(file.file_name.clone());
            if let Some(mime_type) = &file.mime_type {
                part = part.mime_str(mime_type).map_err(|e| {
                    IndexError::InvalidRequest(format!(
                        "invalid mime type `{mime_type}` for {}: {e}",
                        file.file_name
                    ))
                })?;
            }
            form = form.part(UPLOAD_FIELD, part);
        }

        let request = self
            .client
            .post(self.endpoint(&["upload"]))
            .multipart(form);
        self.send(UPLOAD, request).await?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), IndexError> {
        let request = self.client.post(self.endpoint(&["delete_all"]));
        self.send(DELETE_ALL, request).await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ImagePath>, IndexError> {
        let request = self.client.get(self.endpoint(&["all_images"]));
        let response = self.send(ALL_IMAGES, request).await?;
        Self::decode(ALL_IMAGES, response).await
    }

    async fn image_points(&self) -> Result<Vec<ImagePoint>, IndexError> {
        let request = self.client.get(self.endpoint(&["image_points"]));
        let response = self.send(IMAGE_POINTS, request).await?;
        let points: Vec<ImagePointDto> = Self::decode(IMAGE_POINTS, response).await?;
        Ok(points.into_iter().map(ImagePoint::from).collect())
    }

    fn image_url(&self, path: &ImagePath) -> String {
        self.endpoint(&["image", path.as_str()]).into()
    }
}
