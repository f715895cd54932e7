use std::{
    fs, io,
    path::{Path, PathBuf},
};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing_subscriber::EnvFilter;

use flickr_gallery::{flickr, Client, ClientConfig, GalleryItem, RequestParams};

const APP_FOLDER: &str = "FlickrGallery";

#[derive(Debug, Error)]
enum Error {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Env(#[from] dotenvy::Error),

    #[error("{0}")]
    Flickr(#[from] flickr::Error),

    #[error("Could not locate the configuration folder")]
    NoConfigFolder,

    #[error("A default configuration has been created in {0}, please review it before proceeding")]
    RequiresConfigure(PathBuf),
}

type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Query {
    Search { params: RequestParams },
    Tags { tags: String },
    User { user_id: String },
    Set { photoset_id: String },
    Gallery { gallery_id: String },
    Group { group_id: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Config {
    /// Client options, checked against the client defaults.
    client: Value,
    query: Query,
    #[serde(default = "default_pages")]
    pages: u32,
    /// Display images are saved here when set.
    #[serde(default)]
    folder: Option<PathBuf>,
}

fn default_pages() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client: json!({
                "thumbnail_size": "sq",
                "image_size": "m",
                "min_width": 0,
                "min_height": 0,
            }),
            query: Query::Tags {
                tags: "sunset".to_owned(),
            },
            pages: default_pages(),
            folder: dirs::picture_dir().map(|dir| dir.join(APP_FOLDER)),
        }
    }
}

async fn fetch_gallery(client: &mut Client, config: &Config) -> Result<Vec<GalleryItem>> {
    let mut gallery = match &config.query {
        Query::Search { params } => client.search(params.clone()).await?,
        Query::Tags { tags } => client.tags(tags).await?,
        Query::User { user_id } => client.user(user_id).await?,
        Query::Set { photoset_id } => client.set(photoset_id).await?,
        Query::Gallery { gallery_id } => client.gallery(gallery_id).await?,
        Query::Group { group_id } => client.group(group_id).await?,
    };

    for _ in 1..config.pages {
        match client.next_page().await? {
            Some(page) if !page.is_empty() => gallery.extend(page),
            _ => break,
        }
    }

    Ok(gallery)
}

async fn download_images(client: &Client, gallery: &[GalleryItem], folder: &Path) -> Result<()> {
    let mut tasks = JoinSet::<flickr::Result<(String, Bytes)>>::new();
    for item in gallery {
        let client = client.clone();
        let photo_id = item.photo_id.clone();
        let url = item.image_url.clone();

        tasks.spawn(async move {
            let data = client.download(&url).await?;

            Ok((photo_id, data))
        });
    }

    fs::create_dir_all(folder)?;

    let images = tasks.join_all().await;
    for image in images {
        let (photo_id, data) = image?;

        let path = folder.join(format!("{photo_id}.jpg"));
        fs::write(&path, &data)?;

        tracing::debug!(path = %path.display(), "saved image");
    }

    Ok(())
}

fn configure<P: AsRef<Path>>(config_folder: P) -> Result<Config> {
    let config_folder = config_folder.as_ref();

    if !config_folder.exists() {
        fs::create_dir_all(config_folder)?;
    }

    let env_path = config_folder.join(".env");
    let config_path = config_folder.join("config.json");
    let requires_config = !env_path.exists() || !config_path.exists();

    if requires_config {
        if !env_path.exists() {
            fs::write(&env_path, format!("{}=\n", flickr::API_KEY_VAR))?;
        }

        if !config_path.exists() {
            let content = serde_json::to_string_pretty(&Config::default())?;

            fs::write(&config_path, &content)?;
        }

        return Err(Error::RequiresConfigure(config_folder.to_path_buf()));
    }

    dotenvy::from_path(env_path)?;

    let content = fs::read_to_string(&config_path)?;
    let config = serde_json::from_str(&content)?;

    Ok(config)
}

fn client_config(options: &Value) -> Result<ClientConfig> {
    let mut options = options.clone();

    // The key lives in .env, not in config.json.
    if let (Value::Object(options), Ok(api_key)) = (&mut options, std::env::var(flickr::API_KEY_VAR)) {
        options.entry("api_key").or_insert(Value::String(api_key));
    }

    Ok(ClientConfig::from_value(options)?)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    async fn run() -> Result<()> {
        let path = dirs::config_dir().ok_or(Error::NoConfigFolder)?.join(APP_FOLDER);

        let config = configure(&path)?;
        let mut client = Client::new(client_config(&config.client)?)?;

        let gallery = fetch_gallery(&mut client, &config).await?;
        println!("{}", serde_json::to_string_pretty(&gallery)?);

        if let Some(folder) = &config.folder {
            download_images(&client, &gallery, folder).await?;
        }

        Ok(())
    }

    if let Err(e) = run().await {
        eprintln!("{}", e);
    }
}
