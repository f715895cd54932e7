use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use url::Url;

use super::init::{self, Synonyms};
use super::{Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://api.flickr.com/services/rest/";

pub const DEFAULT_PER_PAGE: u32 = 20;

const SYNONYMS: Synonyms<'static> = &[
    ("apiKey", "api_key"),
    ("thumbnailSize", "thumbnail_size"),
    ("imageSize", "image_size"),
    ("minWidth", "min_width"),
    ("minHeight", "min_height"),
    ("perPage", "per_page"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SizeCode {
    Square,
    Thumbnail,
    Small,
    Medium,
}

impl SizeCode {
    pub fn suffix(self) -> &'static str {
        match self {
            SizeCode::Square => "_s",
            SizeCode::Thumbnail => "_t",
            SizeCode::Small => "_m",
            SizeCode::Medium => "",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            SizeCode::Square => "sq",
            SizeCode::Thumbnail => "t",
            SizeCode::Small => "s",
            SizeCode::Medium => "m",
        }
    }
}

// Unknown codes fall back to the medium size.
impl From<&str> for SizeCode {
    fn from(code: &str) -> Self {
        match code {
            "sq" => SizeCode::Square,
            "t" => SizeCode::Thumbnail,
            "s" => SizeCode::Small,
            _ => SizeCode::Medium,
        }
    }
}

impl From<String> for SizeCode {
    fn from(code: String) -> Self {
        SizeCode::from(code.as_str())
    }
}

impl From<SizeCode> for String {
    fn from(size: SizeCode) -> Self {
        size.code().to_owned()
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_key: String,
    thumbnail_size: SizeCode,
    image_size: SizeCode,
    min_width: Option<u32>,
    min_height: Option<u32>,
    endpoint: Url,
    per_page: u32,
}

impl ClientConfig {
    pub fn new<T: AsRef<str>>(api_key: T) -> Result<Self> {
        Self::from_value(json!({ "api_key": api_key.as_ref() }))
    }

    /// Accepts camel-case synonyms such as `minWidth`. A `min_width` or
    /// `min_height` of `0` disables that filter.
    pub fn from_value(options: Value) -> Result<Self> {
        let options = init::initialize(options, &Self::defaults(), SYNONYMS)?;

        let api_key = string(&options, "api_key")?;
        if api_key.trim().is_empty() {
            return Err(Error::InvalidApiKey);
        }

        let endpoint = string(&options, "endpoint")?;
        let endpoint = Url::parse(&endpoint)
            .map_err(|_| Error::InvalidArgument(format!("endpoint is not a valid URL: {endpoint}")))?;

        let per_page = dimension(&options, "per_page", 1)?.ok_or_else(|| out_of_range("per_page", 1))?;

        Ok(Self {
            api_key,
            thumbnail_size: SizeCode::from(string(&options, "thumbnail_size")?),
            image_size: SizeCode::from(string(&options, "image_size")?),
            min_width: dimension(&options, "min_width", 0)?,
            min_height: dimension(&options, "min_height", 0)?,
            endpoint,
            per_page,
        })
    }

    pub fn defaults() -> Map<String, Value> {
        let defaults = json!({
            "api_key": "",
            "thumbnail_size": "sq",
            "image_size": "m",
            "min_width": 0,
            "min_height": 0,
            "endpoint": DEFAULT_ENDPOINT,
            "per_page": DEFAULT_PER_PAGE,
        });

        match defaults {
            Value::Object(defaults) => defaults,
            _ => Map::new(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn thumbnail_size(&self) -> SizeCode {
        self.thumbnail_size
    }

    pub fn image_size(&self) -> SizeCode {
        self.image_size
    }

    pub fn min_width(&self) -> Option<u32> {
        self.min_width
    }

    pub fn min_height(&self) -> Option<u32> {
        self.min_height
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }
}

fn string(options: &Map<String, Value>, key: &str) -> Result<String> {
    match options.get(key) {
        Some(Value::String(value)) => Ok(value.clone()),
        other => Err(Error::TypeMismatch {
            key: key.to_owned(),
            expected: "string",
            received: other.map(init::type_tag).unwrap_or("undefined"),
        }),
    }
}

// Zero maps to `None`. The JSON type was already checked against the defaults.
fn dimension(options: &Map<String, Value>, key: &str, min: u32) -> Result<Option<u32>> {
    match options.get(key).and_then(Value::as_u64).map(u32::try_from) {
        Some(Ok(0)) => Ok(None),
        Some(Ok(value)) => Ok(Some(value)),
        _ => Err(out_of_range(key, min)),
    }
}

fn out_of_range(key: &str, min: u32) -> Error {
    Error::InvalidArgument(format!("{key} must be a whole number from {min} to {}", u32::MAX))
}
