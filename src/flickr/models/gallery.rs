use serde::{Deserialize, Serialize};

use super::photo::{PhotoList, RawPhoto};
use crate::flickr::config::{ClientConfig, SizeCode};
use crate::flickr::filter::filter_by_dimensions;
use crate::flickr::urls;

pub const BIG_WIDTH_THRESHOLD: u32 = 1280;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub thumb_url: String,
    pub image_url: String,
    pub original_url: Option<String>,
    pub large_url: Option<String>,
    pub title: String,
    pub owner_name: String,
    pub owner_contact: String,
    pub photo_id: String,
    pub photo_link: String,
    pub license: Option<String>,
}

impl GalleryItem {
    pub fn from_photo(photo: &RawPhoto, owner: Option<&str>, thumbnail_size: SizeCode, image_size: SizeCode) -> Self {
        let owner = photo.owner().or(owner).unwrap_or_default();

        let original_url = match (photo.original_secret(), photo.original_format()) {
            (Some(secret), Some(format)) => Some(urls::original_image(
                photo.farm(),
                photo.server(),
                photo.id(),
                secret,
                format,
            )),
            _ => None,
        };

        Self {
            thumb_url: sized(photo, thumbnail_size),
            image_url: sized(photo, image_size),
            original_url,
            large_url: large_url(photo),
            title: urls::encode_component(photo.title()),
            owner_name: photo.owner_name().map(urls::encode_component).unwrap_or_default(),
            owner_contact: urls::owner_contact(owner),
            photo_id: photo.id().to_owned(),
            photo_link: urls::permalink(owner, photo.id()),
            license: photo.license().map(str::to_owned),
        }
    }
}

fn sized(photo: &RawPhoto, size: SizeCode) -> String {
    urls::sized_image(photo.farm(), photo.server(), photo.id(), photo.secret(), size)
}

/// Largest usable image: `url_l`, then the `_b` size when the original is
/// wider than [`BIG_WIDTH_THRESHOLD`], then `url_o`, `url_z`, `url_m`.
pub fn large_url(photo: &RawPhoto) -> Option<String> {
    if let Some(url) = photo.url_l() {
        return Some(url.to_owned());
    }

    if photo.width_o().is_some_and(|width| width > BIG_WIDTH_THRESHOLD) {
        return Some(urls::big_image(photo.farm(), photo.server(), photo.id(), photo.secret()));
    }

    photo
        .url_o()
        .or(photo.url_z())
        .or(photo.url_m())
        .map(str::to_owned)
}

pub fn map_photos(list: PhotoList, config: &ClientConfig) -> Vec<GalleryItem> {
    let owner = list.owner;
    let photos = filter_by_dimensions(list.photos, config.min_width(), config.min_height());

    photos
        .iter()
        .map(|photo| GalleryItem::from_photo(photo, owner.as_deref(), config.thumbnail_size(), config.image_size()))
        .collect()
}
