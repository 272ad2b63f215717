use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageRefError {
    #[error("image reference cannot be empty")]
    Empty,
    #[error("image reference is not a usable file URL: {0}")]
    InvalidFileUrl(String),
}

/// Where an item's bitmap lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Url(Url),
    FilePath(PathBuf),
}

impl ImageRef {
    /// Builds an image reference from a user-supplied link.
    ///
    /// Google Drive share links are rewritten to the thumbnail endpoint, which
    /// can be embedded directly. `http(s)` URLs stay URLs, `file:` URLs and
    /// anything that does not parse as a URL become file paths.
    ///
    /// # Errors
    ///
    /// Returns `ImageRefError::Empty` for a blank link and
    /// `ImageRefError::InvalidFileUrl` for a `file:` URL with no local path.
    pub fn from_link(link: impl AsRef<str>) -> Result<Self, ImageRefError> {
        let link = link.as_ref().trim();
        if link.is_empty() {
            return Err(ImageRefError::Empty);
        }

        let normalized = drive_thumbnail_url(link).unwrap_or_else(|| link.to_owned());
        match Url::parse(&normalized) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Self::Url(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Self::FilePath)
                .map_err(|()| ImageRefError::InvalidFileUrl(normalized.clone())),
            _ => Ok(Self::FilePath(PathBuf::from(normalized))),
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url.as_str()),
            Self::FilePath(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Extracts the file id from a Google Drive link.
///
/// Recognises `/file/d/<ID>` first, then the first `?id=<ID>` or `&id=<ID>`.
#[must_use]
pub fn drive_file_id(link: &str) -> Option<&str> {
    link.split_once("/file/d/")
        .and_then(|(_, rest)| leading_id(rest))
        .or_else(|| {
            link.match_indices("id=").find_map(|(idx, marker)| {
                let prev = idx.checked_sub(1).map(|p| link.as_bytes()[p])?;
                if prev == b'?' || prev == b'&' {
                    leading_id(&link[idx + marker.len()..])
                } else {
                    None
                }
            })
        })
}

#[must_use]
pub fn drive_thumbnail_url(link: &str) -> Option<String> {
    drive_file_id(link).map(|id| format!("https://drive.google.com/thumbnail?id={id}&sz=w1000"))
}

fn leading_id(s: &str) -> Option<&str> {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(s.len());
    (end > 0).then(|| &s[..end])
}
