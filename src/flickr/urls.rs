use url::Url;

use super::config::SizeCode;
use super::{Error, RequestParams, Result};

macro_rules! static_flickr {
    ($path:expr, $($arg:expr),+) => {
        format!(concat!("http://farm{}.static.flickr.com", $path), $($arg),+)
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackFormat {
    Plain,
    Jsonp(String),
}

/// Keys `build_url` sets itself; caller params may not use them.
pub const RESERVED_KEYS: &[&str] = &["method", "format", "api_key", "nojsoncallback", "jsoncallback"];

/// Builds a REST call URL: method, response format, API key, the extra
/// parameters and finally the callback marker, all form-urlencoded.
pub fn build_url(endpoint: &Url, method: &str, api_key: &str, params: &RequestParams, callback: &CallbackFormat) -> Result<String> {
    if let Some((key, _)) = params.iter().find(|(key, _)| RESERVED_KEYS.contains(key)) {
        return Err(Error::InvalidArgument(format!("{key} is set by the client and cannot be passed as a parameter")));
    }

    let mut url = endpoint.clone();

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("method", method)
            .append_pair("format", "json")
            .append_pair("api_key", api_key);

        for (key, value) in params.iter() {
            query.append_pair(key, value);
        }

        match callback {
            CallbackFormat::Plain => query.append_pair("nojsoncallback", "1"),
            CallbackFormat::Jsonp(name) => query.append_pair("jsoncallback", name),
        };
    }

    Ok(url.into())
}

pub fn sized_image(farm: u32, server: &str, id: &str, secret: &str, size: SizeCode) -> String {
    static_flickr!("/{}/{}_{}{}.jpg", farm, server, id, secret, size.suffix())
}

pub fn original_image(farm: u32, server: &str, id: &str, original_secret: &str, original_format: &str) -> String {
    static_flickr!("/{}/{}_{}_o.{}", farm, server, id, original_secret, original_format)
}

pub fn big_image(farm: u32, server: &str, id: &str, secret: &str) -> String {
    static_flickr!("/{}/{}_{}_b.jpg", farm, server, id, secret)
}

pub fn owner_contact(owner: &str) -> String {
    format!("http://www.flickr.com/messages_write.gne?to={owner}")
}

pub fn permalink(owner: &str, id: &str) -> String {
    format!("http://flickr.com/photos/{owner}/{id}")
}

/// Percent-encodes `text` for embedding in a URL component, leaving the
/// unreserved marks `! * ' ( )` as they are.
pub fn encode_component(text: &str) -> String {
    urlencoding::encode(text)
        .replace("%21", "!")
        .replace("%2A", "*")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
}
