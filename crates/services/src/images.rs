use std::collections::{HashMap, VecDeque};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use guess_core::model::ImageRef;
use guess_core::reveal::{BoxSize, MosaicRenderer};
use image::{DynamicImage, ImageFormat};
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::ImageLoadError;

/// Decoded bitmaps kept at most; enough for the current and next round.
pub const IMAGE_CACHE_LIMIT: usize = 4;

#[derive(Default)]
struct ImageCache {
    entries: HashMap<String, Arc<DynamicImage>>,
    order: VecDeque<String>,
}

impl ImageCache {
    fn get(&mut self, key: &str) -> Option<Arc<DynamicImage>> {
        let hit = self.entries.get(key).cloned()?;
        self.touch(key);
        Some(hit)
    }

    fn insert(&mut self, key: String, image: Arc<DynamicImage>) {
        self.entries.insert(key.clone(), image);
        self.touch(&key);
        while self.order.len() > IMAGE_CACHE_LIMIT {
            if let Some(evicted) = self.order.pop_front() {
                self.entries.remove(&evicted);
            }
        }
    }

    fn touch(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.order.push_back(key.to_owned());
    }
}

/// Fetches and decodes item bitmaps, keeping the most recent ones for reuse.
#[derive(Clone, Default)]
pub struct ImageLoader {
    client: Client,
    cache: Arc<Mutex<ImageCache>>,
}

impl ImageLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            cache: Arc::new(Mutex::new(ImageCache::default())),
        }
    }

    /// Load an image from its URL or file path.
    ///
    /// # Errors
    ///
    /// Returns `ImageLoadError` if the request or read fails, the server
    /// answers with a non-success status, or the bytes are not an image.
    pub async fn load(&self, image: &ImageRef) -> Result<Arc<DynamicImage>, ImageLoadError> {
        let key = image.to_string();
        if let Some(hit) = self.cached(&key) {
            return Ok(hit);
        }

        let decoded = match self.fetch(image).await {
            Ok(decoded) => Arc::new(decoded),
            Err(err) => {
                warn!(image = %key, error = %err, "image load failed");
                return Err(err);
            }
        };
        debug!(image = %key, width = decoded.width(), height = decoded.height(), "image decoded");
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, Arc::clone(&decoded));
        }
        Ok(decoded)
    }

    async fn fetch(&self, image: &ImageRef) -> Result<DynamicImage, ImageLoadError> {
        let bytes = match image {
            ImageRef::Url(url) => {
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(ImageLoadError::HttpStatus(status));
                }
                response.bytes().await?.to_vec()
            }
            ImageRef::FilePath(path) => tokio::fs::read(path).await?,
        };
        Ok(image::load_from_memory(&bytes)?)
    }

    fn cached(&self, key: &str) -> Option<Arc<DynamicImage>> {
        self.cache.lock().ok()?.get(key)
    }
}

/// Render the mosaic of `source` at `progress` into `target` and encode it as PNG.
///
/// # Errors
///
/// Returns `ImageLoadError::Decode` if PNG encoding fails.
pub fn mosaic_png(
    source: &DynamicImage,
    progress: f64,
    target: BoxSize,
) -> Result<Vec<u8>, ImageLoadError> {
    let frame = MosaicRenderer::new(target).render(source, progress);
    let mut out = Cursor::new(Vec::new());
    frame.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(6, 3, Rgba([10, 200, 30, 255])))
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("skin-guess-{}-{name}", std::process::id()))
    }

    #[tokio::test]
    async fn loads_and_caches_local_png() {
        let path = temp_path("ok.png");
        sample().save(&path).unwrap();

        let loader = ImageLoader::new();
        let image = ImageRef::FilePath(path.clone());
        let first = loader.load(&image).await.unwrap();
        assert_eq!((first.width(), first.height()), (6, 3));

        std::fs::remove_file(&path).unwrap();
        let second = loader.load(&image).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn reports_missing_and_undecodable_files() {
        let loader = ImageLoader::new();
        let missing = ImageRef::FilePath(temp_path("missing.png"));
        assert!(matches!(loader.load(&missing).await, Err(ImageLoadError::Io(_))));

        let path = temp_path("garbage.png");
        std::fs::write(&path, b"not an image").unwrap();
        let garbage = ImageRef::FilePath(path.clone());
        assert!(matches!(loader.load(&garbage).await, Err(ImageLoadError::Decode(_))));
        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn cache_drops_least_recent_images() {
        let paths: Vec<_> = (0..=IMAGE_CACHE_LIMIT)
            .map(|i| temp_path(&format!("evict-{i}.png")))
            .collect();
        for path in &paths {
            sample().save(path).unwrap();
        }

        let loader = ImageLoader::new();
        let images: Vec<_> = paths.iter().cloned().map(ImageRef::FilePath).collect();
        let first = loader.load(&images[0]).await.unwrap();
        for image in &images[1..IMAGE_CACHE_LIMIT] {
            loader.load(image).await.unwrap();
        }
        // Touching the first image keeps it over the second.
        assert!(Arc::ptr_eq(&first, &loader.load(&images[0]).await.unwrap()));
        loader.load(&images[IMAGE_CACHE_LIMIT]).await.unwrap();

        for path in &paths {
            std::fs::remove_file(path).unwrap();
        }
        assert!(loader.load(&images[0]).await.is_ok());
        assert!(matches!(loader.load(&images[1]).await, Err(ImageLoadError::Io(_))));
    }

    /// Serves a single canned HTTP response on a local port.
    async fn serve_once(response: &'static str) -> reqwest::Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0_u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        reqwest::Url::parse(&format!("http://{addr}/skins/a.png")).unwrap()
    }

    #[tokio::test]
    async fn reports_http_status_and_transport_failures() {
        let loader = ImageLoader::with_client(Client::builder().no_proxy().build().unwrap());
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let err = loader.load(&ImageRef::Url(url)).await.unwrap_err();
        assert!(
            matches!(err, ImageLoadError::HttpStatus(status) if status == reqwest::StatusCode::NOT_FOUND),
            "unexpected {err:?}"
        );

        let closed = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = closed.local_addr().unwrap();
        drop(closed);
        let url = reqwest::Url::parse(&format!("http://{addr}/a.png")).unwrap();
        let err = loader.load(&ImageRef::Url(url)).await.unwrap_err();
        assert!(matches!(err, ImageLoadError::Http(_)), "unexpected {err:?}");
    }

    #[test]
    fn mosaic_png_has_target_size() {
        let png = mosaic_png(&sample(), 0.05, BoxSize::new(40, 30)).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }
}
