use bytes::Bytes;
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, warn};

pub mod config;
pub mod error;
pub mod filter;
pub mod init;
pub mod models;
pub mod pagination;
pub mod params;
pub mod result;
pub mod urls;

pub use config::{ClientConfig, SizeCode};
pub use error::Error;
pub use models::{GalleryItem, License, PhotoInfo, PhotoList, RawPhoto, Tag};
pub use pagination::Pager;
pub use params::RequestParams;
pub use result::Result;
pub use urls::CallbackFormat;

use crate::params;

pub const EXTRAS: &str = "license,owner_name,original_format,o_dims,url_l,url_o,url_z,url_m";

pub const API_KEY_VAR: &str = "FLICKR_API_KEY";

#[derive(Clone)]
pub struct Client {
    http: HttpClient,
    config: ClientConfig,
    pager: Pager,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = HttpClient::builder().build().map_err(|_| Error::Request)?;

        Ok(Self {
            http,
            config,
            pager: Pager::default(),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn build_url(&self, method: &str, params: &RequestParams) -> Result<String> {
        urls::build_url(
            self.config.endpoint(),
            method,
            self.config.api_key(),
            params,
            &CallbackFormat::Plain,
        )
    }

    pub fn build_jsonp_url(&self, method: &str, params: &RequestParams, callback: &str) -> Result<String> {
        urls::build_url(
            self.config.endpoint(),
            method,
            self.config.api_key(),
            params,
            &CallbackFormat::Jsonp(callback.to_owned()),
        )
    }

    pub async fn request(&self, method: &str, params: &RequestParams) -> Result<Value> {
        debug!(method, params = params.len(), "calling Flickr");

        let request = self.http.get(self.build_url(method, params)?);
        let response = Self::send_request(request).await?;
        let body = response.text().await.map_err(|_| Error::InvalidResponse)?;

        let payload = serde_json::from_str(strip_jsonp(&body)).map_err(|_| Error::InvalidResponse)?;

        check_status(method, payload)
    }

    /// The query, with the default `extras` and `per_page` filled in, is the
    /// one [`Client::next_page`] and [`Client::prev_page`] replay.
    pub async fn photos(&mut self, method: &str, mut params: RequestParams) -> Result<Vec<GalleryItem>> {
        params
            .set_default("extras", EXTRAS)
            .set_default("per_page", self.config.per_page());

        self.pager.record(method, &params);

        let payload = self.request(method, &params).await?;
        let list = PhotoList::from_payload(payload)?;
        let gallery = models::gallery::map_photos(list, &self.config);

        debug!(method, items = gallery.len(), "mapped gallery");

        Ok(gallery)
    }

    // http://www.flickr.com/services/api/flickr.photos.search.html
    pub async fn search(&mut self, params: RequestParams) -> Result<Vec<GalleryItem>> {
        self.photos("flickr.photos.search", params).await
    }

    pub async fn tags<T: AsRef<str>>(&mut self, tags: T) -> Result<Vec<GalleryItem>> {
        self.search(params! {
            "tags" => tags.as_ref(),
            "tag_mode" => "all",
        })
        .await
    }

    pub async fn user<T: AsRef<str>>(&mut self, user_id: T) -> Result<Vec<GalleryItem>> {
        self.photos(
            "flickr.people.getPublicPhotos",
            params! { "user_id" => user_id.as_ref() },
        )
        .await
    }

    pub async fn set<T: AsRef<str>>(&mut self, photoset_id: T) -> Result<Vec<GalleryItem>> {
        self.photos(
            "flickr.photosets.getPhotos",
            params! { "photoset_id" => photoset_id.as_ref() },
        )
        .await
    }

    pub async fn gallery<T: AsRef<str>>(&mut self, gallery_id: T) -> Result<Vec<GalleryItem>> {
        self.photos(
            "flickr.galleries.getPhotos",
            params! { "gallery_id" => gallery_id.as_ref() },
        )
        .await
    }

    pub async fn group<T: AsRef<str>>(&mut self, group_id: T) -> Result<Vec<GalleryItem>> {
        self.photos(
            "flickr.groups.pools.getPhotos",
            params! { "group_id" => group_id.as_ref() },
        )
        .await
    }

    /// `None` when there is no previous query or its page is not positive.
    pub async fn next_page(&mut self) -> Result<Option<Vec<GalleryItem>>> {
        match self.pager.next_page() {
            Some((method, params)) => self.photos(&method, params).await.map(Some),
            None => {
                debug!("no page after the last query");
                Ok(None)
            }
        }
    }

    pub async fn prev_page(&mut self) -> Result<Option<Vec<GalleryItem>>> {
        match self.pager.prev_page() {
            Some((method, params)) => self.photos(&method, params).await.map(Some),
            None => {
                debug!("no page before the last query");
                Ok(None)
            }
        }
    }

    // http://www.flickr.com/services/api/flickr.photos.getInfo.html
    pub async fn photo_info<T: AsRef<str>>(&self, photo_id: T) -> Result<PhotoInfo> {
        let payload = self
            .request("flickr.photos.getInfo", &params! { "photo_id" => photo_id.as_ref() })
            .await?;

        PhotoInfo::from_payload(payload)
    }

    pub async fn licenses(&self) -> Result<Vec<License>> {
        let payload = self
            .request("flickr.photos.licenses.getInfo", &RequestParams::new())
            .await?;

        License::list_from_payload(payload)
    }

    pub async fn download<T: AsRef<str>>(&self, url: T) -> Result<Bytes> {
        let response = Self::send_request(self.http.get(url.as_ref())).await?;
        let data = response.bytes().await.map_err(|_| Error::InvalidResponse)?;

        Ok(data)
    }

    async fn send_request(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|err| {
            warn!(error = %err, "request failed");
            Error::Request
        })?;

        if !response.status().is_success() {
            return Err(Error::Status(response.status()));
        }

        Ok(response)
    }
}

/// Passes an `ok` payload through; anything else becomes
/// [`Error::RemoteApi`] and is logged.
pub fn check_status(method: &str, payload: Value) -> Result<Value> {
    if payload.get("stat").and_then(Value::as_str) == Some("ok") {
        return Ok(payload);
    }

    let code = payload.get("code").and_then(Value::as_i64).unwrap_or_default();
    let message = payload
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_owned();

    warn!(method, code, %message, "Flickr returned an error");

    Err(Error::RemoteApi { code, message })
}

pub fn strip_jsonp(body: &str) -> &str {
    let trimmed = body.trim().trim_end_matches(';').trim_end();

    let Some(open) = trimmed.find('(') else {
        return body;
    };

    let name = trimmed[..open].trim();
    let is_callback = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.');

    if is_callback && trimmed.ends_with(')') {
        &trimmed[open + 1..trimmed.len() - 1]
    } else {
        body
    }
}
