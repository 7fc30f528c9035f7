//! Media file downloading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;

use crate::download::retry::RetryPolicy;
use crate::error::{Error, Result};
use crate::feed::types::Post;
use crate::fs::naming::{build_media_filename, file_extension_from_url};
use crate::fs::paths::resolve_target_paths;
use crate::media::descriptor::MediaDescriptor;

/// Outcome of processing one post's descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Number of media files newly written to disk.
    pub new_files: u64,

    /// False only when the descriptor list was empty to begin with. A post
    /// whose files were already on disk reports `new_files == 0` with this
    /// flag still true.
    pub media_found: bool,
}

/// Downloads a post's media descriptors to the download directory.
pub struct DownloadExecutor {
    client: Client,
    download_dir: PathBuf,
    retry: RetryPolicy,
    force: bool,
}

impl DownloadExecutor {
    /// Create an executor writing into `download_dir`.
    ///
    /// The directory must already exist; a missing directory is a
    /// configuration error, never something the downloader creates.
    pub fn new(
        download_dir: &Path,
        timeout: Duration,
        retry: RetryPolicy,
        force: bool,
    ) -> Result<Self> {
        if !download_dir.is_dir() {
            return Err(Error::ConfigValidation {
                field: "files.download_directory".to_string(),
                message: format!("{} is not a valid directory", download_dir.display()),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Download(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            download_dir: download_dir.to_path_buf(),
            retry,
            force,
        })
    }

    /// Build an executor from the application configuration.
    pub fn from_config(config: &crate::config::Config, force: bool) -> Result<Self> {
        let download = &config.download;
        let retry = RetryPolicy::new(
            download.max_attempts,
            Duration::from_secs(download.wait_seconds),
            Duration::from_secs(download.max_elapsed_seconds),
        );

        Self::new(
            &config.files.download_directory,
            Duration::from_secs(download.timeout_seconds),
            retry,
            force,
        )
    }

    /// Download all media of one post, in descriptor order.
    ///
    /// Unless forcing, a non-empty file already present for any descriptor
    /// short-circuits the whole post: the first existing file is taken as
    /// proof the rest were written too. Retry exhaustion propagates to the
    /// caller and aborts the run.
    pub async fn process(
        &self,
        post: &Post,
        descriptors: &[MediaDescriptor],
    ) -> Result<DownloadOutcome> {
        if descriptors.is_empty() {
            return Ok(DownloadOutcome {
                new_files: 0,
                media_found: false,
            });
        }

        let mut new_files = 0u64;
        for (index, descriptor) in descriptors.iter().enumerate() {
            let extension = file_extension_from_url(&descriptor.url)?;
            let filename = build_media_filename(
                &post.author.handle,
                post.created_at.date_naive(),
                &post.id,
                (index + 1) as u32,
                &extension,
            );
            let targets =
                resolve_target_paths(&self.download_dir, &post.author.handle, &filename);

            if self.force {
                tracing::debug!("Will not check disk for existing files");
            } else if targets.already_on_disk() {
                tracing::debug!("Assuming all media in post {} is already on disk", post.id);
                return Ok(DownloadOutcome {
                    new_files: 0,
                    media_found: true,
                });
            }

            // Photos need size information appended to download in high
            // quality.
            let url = if descriptor.requires_size_hint {
                let url = format!("{}?format={}&name=large", descriptor.url, extension);
                tracing::debug!("Adding size info to URL: {}", url);
                url
            } else {
                descriptor.url.clone()
            };

            tracing::info!("Downloading {}", filename);
            let payload = self.retry.run(|| self.fetch_once(&url)).await?;
            tokio::fs::write(&targets.primary, &payload).await?;
            tracing::debug!("Written to disk {}", filename);
            new_files += 1;
        }

        Ok(DownloadOutcome {
            new_files,
            media_found: true,
        })
    }

    /// Make a single GET attempt for a media URL.
    ///
    /// Any transport error or non-2xx status is reported as a transient
    /// download failure, subject to the retry policy.
    async fn fetch_once(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Download(format!("Failed to GET \"{}\": {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Download(format!(
                "Failed to GET \"{}\": HTTP {}",
                url, status
            )));
        }

        let payload = response
            .bytes()
            .await
            .map_err(|e| Error::Download(format!("Failed to read body of \"{}\": {}", url, e)))?;
        Ok(payload.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::types::Author;
    use crate::media::descriptor::MediaKind;
    use chrono::{TimeZone, Utc};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_post() -> Post {
        Post {
            id: "1557022684373983234".to_string(),
            author: Author {
                handle: "koirakoirana".to_string(),
            },
            created_at: Utc.with_ymd_and_hms(2022, 8, 9, 13, 8, 45).unwrap(),
            text: None,
            media: None,
        }
    }

    fn descriptor(url: String, kind: MediaKind) -> MediaDescriptor {
        MediaDescriptor::new(url, kind)
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy::new(5, Duration::ZERO, Duration::from_secs(60))
    }

    fn executor(dir: &Path, force: bool) -> DownloadExecutor {
        DownloadExecutor::new(dir, Duration::from_secs(5), fast_retry(), force).unwrap()
    }

    #[tokio::test]
    async fn test_empty_descriptor_list_reports_no_media() {
        let tmp = tempfile::tempdir().unwrap();
        let outcome = executor(tmp.path(), false)
            .process(&test_post(), &[])
            .await
            .unwrap();

        assert_eq!(
            outcome,
            DownloadOutcome {
                new_files: 0,
                media_found: false
            }
        );
    }

    #[tokio::test]
    async fn test_downloads_all_descriptors_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/one.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"first".to_vec()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/media/two.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"second".to_vec()))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let post = test_post();
        let descriptors = vec![
            descriptor(format!("{}/media/one.jpg", server.uri()), MediaKind::Video),
            descriptor(format!("{}/media/two.mp4", server.uri()), MediaKind::Video),
        ];

        let outcome = executor(tmp.path(), false)
            .process(&post, &descriptors)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            DownloadOutcome {
                new_files: 2,
                media_found: true
            }
        );
        let first = tmp
            .path()
            .join("koirakoirana_2022-08-09_1557022684373983234_1.jpg");
        let second = tmp
            .path()
            .join("koirakoirana_2022-08-09_1557022684373983234_2.mp4");
        assert_eq!(std::fs::read(first).unwrap(), b"first");
        assert_eq!(std::fs::read(second).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_photo_url_gets_size_suffix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/pic.jpg"))
            .and(query_param("format", "jpg"))
            .and(query_param("name", "large"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hi-res".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let descriptors = vec![descriptor(
            format!("{}/media/pic.jpg", server.uri()),
            MediaKind::Photo,
        )];

        let outcome = executor(tmp.path(), false)
            .process(&test_post(), &descriptors)
            .await
            .unwrap();

        assert_eq!(outcome.new_files, 1);
    }

    #[tokio::test]
    async fn test_existing_file_short_circuits_whole_post() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path()
                .join("koirakoirana_2022-08-09_1557022684373983234_1.jpg"),
            b"already here",
        )
        .unwrap();

        let descriptors = vec![
            descriptor(format!("{}/media/one.jpg", server.uri()), MediaKind::Video),
            descriptor(format!("{}/media/two.jpg", server.uri()), MediaKind::Video),
        ];

        let outcome = executor(tmp.path(), false)
            .process(&test_post(), &descriptors)
            .await
            .unwrap();

        // The whole post is treated as already downloaded: no requests at
        // all were issued for either descriptor.
        assert_eq!(
            outcome,
            DownloadOutcome {
                new_files: 0,
                media_found: true
            }
        );
    }

    #[tokio::test]
    async fn test_zero_byte_file_is_downloaded_again() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/one.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"recovered".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let target = tmp
            .path()
            .join("koirakoirana_2022-08-09_1557022684373983234_1.jpg");
        std::fs::write(&target, b"").unwrap();

        let descriptors = vec![descriptor(
            format!("{}/media/one.jpg", server.uri()),
            MediaKind::Video,
        )];

        let outcome = executor(tmp.path(), false)
            .process(&test_post(), &descriptors)
            .await
            .unwrap();

        assert_eq!(outcome.new_files, 1);
        assert_eq!(std::fs::read(&target).unwrap(), b"recovered");
    }

    #[tokio::test]
    async fn test_author_subdirectory_is_checked_too() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let author_dir = tmp.path().join("koirakoirana");
        std::fs::create_dir(&author_dir).unwrap();
        std::fs::write(
            author_dir.join("koirakoirana_2022-08-09_1557022684373983234_1.jpg"),
            b"moved here earlier",
        )
        .unwrap();

        let descriptors = vec![descriptor(
            format!("{}/media/one.jpg", server.uri()),
            MediaKind::Video,
        )];

        let outcome = executor(tmp.path(), false)
            .process(&test_post(), &descriptors)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            DownloadOutcome {
                new_files: 0,
                media_found: true
            }
        );
    }

    #[tokio::test]
    async fn test_force_mode_overwrites_existing_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/one.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fresh".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let target = tmp
            .path()
            .join("koirakoirana_2022-08-09_1557022684373983234_1.jpg");
        std::fs::write(&target, b"stale").unwrap();

        let descriptors = vec![descriptor(
            format!("{}/media/one.jpg", server.uri()),
            MediaKind::Video,
        )];

        let outcome = executor(tmp.path(), true)
            .process(&test_post(), &descriptors)
            .await
            .unwrap();

        assert_eq!(outcome.new_files, 1);
        assert_eq!(std::fs::read(&target).unwrap(), b"fresh");
    }

    #[tokio::test]
    async fn test_persistent_failure_exhausts_attempts_and_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/one.jpg"))
            .respond_with(ResponseTemplate::new(500))
            .expect(5)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let descriptors = vec![descriptor(
            format!("{}/media/one.jpg", server.uri()),
            MediaKind::Video,
        )];

        let result = executor(tmp.path(), false)
            .process(&test_post(), &descriptors)
            .await;

        assert!(matches!(result, Err(Error::Download(_))));
    }

    #[tokio::test]
    async fn test_missing_download_directory_is_a_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");

        let result = DownloadExecutor::new(
            &missing,
            Duration::from_secs(5),
            RetryPolicy::default(),
            false,
        );
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }
}
