use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::flickr::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPhoto {
    id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    owner: Option<String>,
    secret: String,
    server: String,
    #[serde(deserialize_with = "lenient::number")]
    farm: u32,
    #[serde(default)]
    title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    license: Option<String>,
    #[serde(default)]
    ownername: Option<String>,
    #[serde(default)]
    originalsecret: Option<String>,
    #[serde(default)]
    originalformat: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    o_width: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    o_height: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    width_o: Option<u32>,
    #[serde(default)]
    url_l: Option<String>,
    #[serde(default)]
    url_o: Option<String>,
    #[serde(default)]
    url_z: Option<String>,
    #[serde(default)]
    url_m: Option<String>,
}

impl RawPhoto {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn farm(&self) -> u32 {
        self.farm
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    pub fn owner_name(&self) -> Option<&str> {
        self.ownername.as_deref()
    }

    pub fn original_secret(&self) -> Option<&str> {
        self.originalsecret.as_deref()
    }

    pub fn original_format(&self) -> Option<&str> {
        self.originalformat.as_deref()
    }

    pub fn original_width(&self) -> Option<u32> {
        self.o_width
    }

    pub fn original_height(&self) -> Option<u32> {
        self.o_height
    }

    /// Width reported next to `url_o`.
    pub fn width_o(&self) -> Option<u32> {
        self.width_o
    }

    pub fn url_l(&self) -> Option<&str> {
        self.url_l.as_deref()
    }

    pub fn url_o(&self) -> Option<&str> {
        self.url_o.as_deref()
    }

    pub fn url_z(&self) -> Option<&str> {
        self.url_z.as_deref()
    }

    pub fn url_m(&self) -> Option<&str> {
        self.url_m.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct PhotoList {
    pub owner: Option<String>,
    pub photos: Vec<RawPhoto>,
}

#[derive(Deserialize)]
struct Container {
    photo: Vec<RawPhoto>,
    #[serde(default, deserialize_with = "lenient::string")]
    owner: Option<String>,
}

#[derive(Deserialize)]
struct Listing {
    photo: Option<Vec<RawPhoto>>,
    photos: Option<Container>,
    photoset: Option<Container>,
}

impl PhotoList {
    /// Picks the photo list out of a listing payload: a top-level `photo`
    /// array, `photos.photo` or `photoset.photo`, in that order.
    pub fn from_payload(payload: Value) -> Result<Self> {
        let listing: Listing = serde_json::from_value(payload).map_err(|_| Error::InvalidResponse)?;

        if let Some(photos) = listing.photo {
            return Ok(Self { owner: None, photos });
        }

        match listing.photos.or(listing.photoset) {
            Some(container) => Ok(Self {
                owner: container.owner,
                photos: container.photo,
            }),
            None => Err(Error::InvalidResponse),
        }
    }
}

// Flickr emits numeric fields sometimes as numbers and sometimes as strings.
mod lenient {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Number(u64),
        Text(String),
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> core::result::Result<u32, D::Error> {
        match Scalar::deserialize(deserializer)? {
            Scalar::Number(value) => u32::try_from(value).map_err(serde::de::Error::custom),
            Scalar::Text(value) => value.trim().parse().map_err(serde::de::Error::custom),
        }
    }

    pub fn opt_number<'de, D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Option<u32>, D::Error> {
        Ok(match Option::<Scalar>::deserialize(deserializer)? {
            Some(Scalar::Number(value)) => u32::try_from(value).ok(),
            Some(Scalar::Text(value)) => value.trim().parse().ok(),
            None => None,
        })
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Option<String>, D::Error> {
        Ok(match Option::<Scalar>::deserialize(deserializer)? {
            Some(Scalar::Number(value)) => Some(value.to_string()),
            Some(Scalar::Text(value)) => Some(value),
            None => None,
        })
    }
}
