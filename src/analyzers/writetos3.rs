use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::info;

/// Uploads the file at `path` to `bucket` under `key`, gzip-compressing it
/// first when `gzip` is set (the key gains a `.gz` suffix).
pub async fn upload_file(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    path: &Path,
    gzip: bool,
) -> anyhow::Result<()> {
    let contents = std::fs::read(path)?;

    let (body, key, content_type) = if gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&contents)?;
        let compressed = encoder.finish()?;

        (compressed, format!("{key}.gz"), "application/gzip")
    } else {
        (contents, key.to_string(), "text/csv")
    };

    client
        .put_object()
        .bucket(bucket)
        .key(&key)
        .body(body.into())
        .content_type(content_type)
        .send()
        .await?;

    info!(bucket, key = %key, "Upload complete");
    Ok(())
}
