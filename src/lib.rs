//! Flickr photo listings flattened into gallery items.
//!
//! ```no_run
//! use flickr_gallery::{Client, ClientConfig};
//!
//! # async fn run() -> flickr_gallery::Result<()> {
//! let mut client = Client::new(ClientConfig::new("api key")?)?;
//!
//! let first = client.tags("harbour,boats").await?;
//! let second = client.next_page().await?;
//! # Ok(())
//! # }
//! ```

pub mod flickr;

pub use flickr::{
    CallbackFormat, Client, ClientConfig, Error, GalleryItem, License, PhotoInfo, RawPhoto, RequestParams, Result,
    SizeCode, Tag,
};
