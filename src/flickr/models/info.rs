use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::flickr::urls;
use crate::flickr::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    #[serde(default)]
    pub raw: String,
    #[serde(rename = "_content")]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoInfo {
    pub title: String,
    pub description: String,
    pub owner_name: String,
    pub url: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Deserialize, Default)]
struct Content {
    #[serde(default, rename = "_content")]
    content: String,
}

#[derive(Deserialize)]
struct Owner {
    #[serde(default)]
    username: String,
    #[serde(default)]
    realname: String,
}

#[derive(Deserialize, Default)]
struct Urls {
    #[serde(default)]
    url: Vec<Content>,
}

#[derive(Deserialize, Default)]
struct Tags {
    #[serde(default)]
    tag: Vec<Tag>,
}

#[derive(Deserialize)]
struct RawInfo {
    #[serde(default)]
    title: Content,
    #[serde(default)]
    description: Content,
    owner: Owner,
    #[serde(default)]
    urls: Urls,
    #[serde(default)]
    tags: Tags,
}

#[derive(Deserialize)]
struct InfoPayload {
    photo: RawInfo,
}

impl PhotoInfo {
    pub fn from_payload(payload: Value) -> Result<Self> {
        let InfoPayload { photo } = serde_json::from_value(payload).map_err(|_| Error::InvalidResponse)?;

        let owner_name = if photo.owner.realname.is_empty() {
            photo.owner.username
        } else {
            photo.owner.realname
        };

        Ok(Self {
            title: photo.title.content,
            description: urls::encode_component(&photo.description.content),
            owner_name,
            url: photo
                .urls
                .url
                .into_iter()
                .next()
                .map(|url| url.content)
                .unwrap_or_default(),
            tags: photo.tags.tag,
        })
    }
}

#[derive(Deserialize)]
struct RawLicense {
    #[serde(deserialize_with = "license_id")]
    id: String,
    name: String,
    #[serde(default)]
    url: String,
}

#[derive(Deserialize)]
struct LicenseList {
    license: Vec<RawLicense>,
}

#[derive(Deserialize)]
struct LicensePayload {
    licenses: LicenseList,
}

fn license_id<'de, D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!("unexpected license id {other}"))),
    }
}

impl License {
    pub fn list_from_payload(payload: Value) -> Result<Vec<Self>> {
        let LicensePayload { licenses } = serde_json::from_value(payload).map_err(|_| Error::InvalidResponse)?;

        Ok(licenses
            .license
            .into_iter()
            .map(|license| License {
                id: license.id,
                name: license.name,
                url: license.url,
            })
            .collect())
    }
}
