/// Local-disk storage for post media
///
/// Uploaded files are written under a configured directory with a
/// `<uuid>_<original-name>` filename, so identical original names never
/// collide, and are exposed at `<public-base-url>/uploads/<filename>`.
use crate::config::UploadConfig;
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// URL path prefix the upload directory is served under
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Content type recorded when a part declares none
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file written to the upload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub filename: String,
    pub url: String,
    pub content_type: String,
}

#[derive(Debug, Clone)]
pub struct MediaStorage {
    dir: PathBuf,
    public_base_url: String,
    max_file_bytes: u64,
}

impl MediaStorage {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            max_file_bytes: config.max_file_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it is missing
    pub async fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir).await
    }

    /// `<uuid>_<name>`, keeping only the final path component of the client's name
    pub fn generate_filename(original: Option<&str>) -> String {
        let prefix = Uuid::new_v4();
        match original.and_then(sanitize_filename) {
            Some(name) => format!("{}_{}", prefix, name),
            None => prefix.to_string(),
        }
    }

    /// The filename is percent-encoded as one path segment, so `#`, `?` and
    /// `%` in client names still resolve to the stored file.
    pub fn public_url(&self, filename: &str) -> String {
        format!(
            "{}{}/{}",
            self.public_base_url,
            UPLOADS_ROUTE,
            urlencoding::encode(filename)
        )
    }

    /// Stream one uploaded file to disk.
    ///
    /// The directory is created on demand. A read error from `chunks`, a write
    /// error, or exceeding the size limit fails the whole file; the partially
    /// written file is left in place.
    pub async fn store<S, E>(
        &self,
        original_name: Option<&str>,
        content_type: Option<&str>,
        mut chunks: S,
    ) -> io::Result<StoredMedia>
    where
        S: Stream<Item = Result<Bytes, E>> + Unpin,
        E: std::fmt::Display,
    {
        self.ensure_dir().await?;

        let filename = Self::generate_filename(original_name);
        let path = self.dir.join(&filename);

        // create_new: a generated name must never replace an existing file
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        let mut written: u64 = 0;
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
            written += chunk.len() as u64;
            if written > self.max_file_bytes {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "file exceeds maximum size of {} bytes",
                        self.max_file_bytes
                    ),
                ));
            }
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        tracing::debug!(%filename, bytes = written, "media file stored");

        Ok(StoredMedia {
            url: self.public_url(&filename),
            content_type: content_type.unwrap_or(DEFAULT_CONTENT_TYPE).to_string(),
            filename,
        })
    }
}

fn sanitize_filename(original: &str) -> Option<String> {
    let name = original
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}
