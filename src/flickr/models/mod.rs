pub mod gallery;
pub mod info;
pub mod photo;

pub use gallery::GalleryItem;
pub use info::{License, PhotoInfo, Tag};
pub use photo::{PhotoList, RawPhoto};
