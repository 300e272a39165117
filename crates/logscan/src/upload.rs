//! Upload relay: pushes log files to a remote endpoint as multipart bodies.
//!
//! Unlike scanning, uploads are all-or-nothing from the caller's point of
//! view: a missing file or a non-success response fails the call. In a batch
//! every upload still runs to completion, and those that succeeded are not
//! rolled back.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use reqwest::multipart::{Form, Part};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::config::UploadConfig;
use crate::error::{Result, ScanError};

/// Sends files to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct UploadRelay {
    client: reqwest::Client,
    field_name: String,
    limit: Arc<Semaphore>,
}

impl UploadRelay {
    /// Creates a relay with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &UploadConfig, max_concurrency: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self::with_client(client, config, max_concurrency))
    }

    /// Creates a relay around an existing HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &UploadConfig, max_concurrency: usize) -> Self {
        Self {
            client,
            field_name: config.field_name.clone(),
            limit: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    /// Uploads one file to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::FileNotFound`] if the file is absent (no request is
    /// made), [`ScanError::RemoteStatus`] on a non-success response, or
    /// [`ScanError::Http`] if the request itself fails.
    pub async fn upload(&self, path: &Path, url: &str) -> Result<()> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ScanError::FileNotFound(path.to_path_buf()));
            }
            Err(err) => return Err(err.into()),
        };
        let size = bytes.len();

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let part = Part::bytes(bytes).file_name(file_name);
        let form = Form::new().part(self.field_name.clone(), part);

        debug!(path = %path.display(), url, size, "uploading file");
        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::RemoteStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        info!(path = %path.display(), url, status = status.as_u16(), "uploaded file");
        Ok(())
    }

    /// Uploads every file in `paths` to `url` concurrently.
    ///
    /// All uploads run to completion before this returns.
    ///
    /// # Errors
    ///
    /// Returns the first failure in `paths` order if any upload failed.
    pub async fn upload_all(&self, paths: &[PathBuf], url: &str) -> Result<()> {
        let uploads = paths.iter().map(|path| async move {
            let Ok(_permit) = self.limit.acquire().await else {
                return Err(ScanError::Task("upload limiter closed".to_string()));
            };
            let result = self.upload(path, url).await;
            if let Err(ref err) = result {
                warn!(path = %path.display(), url, error = %err, "upload failed");
            }
            result
        });

        let results = join_all(uploads).await;
        let failed = results.iter().filter(|r| r.is_err()).count();
        debug!(total = paths.len(), failed, "batch upload complete");
        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::fs;
    use tempfile::TempDir;

    fn relay() -> UploadRelay {
        UploadRelay::new(&UploadConfig::default(), 4).expect("build relay")
    }

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).expect("write file");
        path
    }

    /// Matches a multipart body carrying `content` as file `file_name` under
    /// the form field `field`.
    fn file_part(field: &str, file_name: &str, content: &str) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::Regex(format!(
                r#"name="{}"; filename="{}""#,
                regex::escape(field),
                regex::escape(file_name)
            )),
            Matcher::Regex(regex::escape(content)),
        ])
    }

    #[tokio::test]
    async fn upload_sends_file_field() {
        let dir = TempDir::new().expect("create temp dir");
        let path = write(&dir, "2024.01.01_app.log", "payload-contents");
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/upload")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".to_string()),
            )
            .match_body(file_part("file", "2024.01.01_app.log", "payload-contents"))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        relay()
            .upload(&path, &format!("{}/upload", server.url()))
            .await
            .expect("upload");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn custom_field_name() {
        let dir = TempDir::new().expect("create temp dir");
        let path = write(&dir, "a.log", "x");
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/upload")
            .match_body(file_part("attachment", "a.log", "x"))
            .with_status(201)
            .create_async()
            .await;
        let config = UploadConfig {
            field_name: "attachment".to_string(),
            ..UploadConfig::default()
        };

        UploadRelay::new(&config, 1)
            .expect("build relay")
            .upload(&path, &format!("{}/upload", server.url()))
            .await
            .expect("upload");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_file_fails_before_request() {
        let dir = TempDir::new().expect("create temp dir");
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/upload")
            .expect(0)
            .create_async()
            .await;
        let missing = dir.path().join("gone.log");

        let result = relay()
            .upload(&missing, &format!("{}/upload", server.url()))
            .await;
        assert!(matches!(result, Err(ScanError::FileNotFound(p)) if p == missing));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_surfaced() {
        let dir = TempDir::new().expect("create temp dir");
        let path = write(&dir, "a.log", "x");
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/upload")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let result = relay()
            .upload(&path, &format!("{}/upload", server.url()))
            .await;
        assert!(matches!(result, Err(ScanError::RemoteStatus { status: 500, .. })));
    }

    #[tokio::test]
    async fn upload_all_sends_every_file() {
        let dir = TempDir::new().expect("create temp dir");
        let paths: Vec<PathBuf> = (0..5)
            .map(|i| write(&dir, &format!("f{i}.log"), &format!("body-{i}")))
            .collect();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/upload")
            .with_status(200)
            .expect(5)
            .create_async()
            .await;

        relay()
            .upload_all(&paths, &format!("{}/upload", server.url()))
            .await
            .expect("upload all");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upload_all_fails_on_one_missing_without_rollback() {
        let dir = TempDir::new().expect("create temp dir");
        let paths = vec![
            write(&dir, "a.log", "a"),
            dir.path().join("gone.log"),
            write(&dir, "c.log", "c"),
        ];
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/upload")
            .with_status(200)
            .expect(2)
            .create_async()
            .await;

        let result = relay()
            .upload_all(&paths, &format!("{}/upload", server.url()))
            .await;
        assert!(matches!(result, Err(ScanError::FileNotFound(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upload_all_fails_on_remote_error() {
        let dir = TempDir::new().expect("create temp dir");
        let paths = vec![write(&dir, "a.log", "a"), write(&dir, "b.log", "b")];
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/upload")
            .with_status(404)
            .create_async()
            .await;

        let result = relay()
            .upload_all(&paths, &format!("{}/upload", server.url()))
            .await;
        assert!(matches!(result, Err(ScanError::RemoteStatus { status: 404, .. })));
    }

    #[tokio::test]
    async fn upload_all_of_nothing_succeeds() {
        let result = relay().upload_all(&[], "http://127.0.0.1:9/upload").await;
        assert!(result.is_ok());
    }
}
