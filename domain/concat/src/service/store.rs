use async_trait::async_trait;

use crate::model::vo::{ByteRange, ObjectUrl};

/// # Object store collaborator
///
/// The slice of an S3-compatible store the concatenation core calls. Retry
/// and timeout policy belong to the implementation, not to callers.
#[async_trait]
pub trait ObjectStoreService: Send + Sync {
    /// Object size in bytes, or `None` when the object does not exist.
    ///
    /// Not-found is only ever soft here; any other failure is an error.
    async fn head_object(&self, url: &ObjectUrl) -> anyhow::Result<Option<u64>>;

    /// Read the whole object, or only `range` when given.
    async fn get_object_range(
        &self,
        url: &ObjectUrl,
        range: Option<ByteRange>,
    ) -> anyhow::Result<Vec<u8>>;

    async fn put_object(&self, url: &ObjectUrl, content: Vec<u8>) -> anyhow::Result<()>;

    /// Open a multipart upload and return its upload id.
    async fn create_multipart_upload(&self, url: &ObjectUrl) -> anyhow::Result<String>;

    /// Upload one part; returns the part's etag.
    async fn upload_part(
        &self,
        url: &ObjectUrl,
        upload_id: &str,
        part_number: i32,
        content: Vec<u8>,
    ) -> anyhow::Result<String>;

    /// Server-side copy of `source` (or `range` of it) into one part;
    /// returns the part's etag.
    async fn upload_part_copy(
        &self,
        url: &ObjectUrl,
        upload_id: &str,
        part_number: i32,
        source: &ObjectUrl,
        range: Option<ByteRange>,
    ) -> anyhow::Result<String>;

    async fn complete_multipart_upload(
        &self,
        url: &ObjectUrl,
        upload_id: &str,
        parts: &[(i32, String)],
    ) -> anyhow::Result<()>;

    async fn abort_multipart_upload(&self, url: &ObjectUrl, upload_id: &str)
        -> anyhow::Result<()>;

    /// Bulk delete within one bucket; callers keep `keys` within the store's
    /// 1000-key limit.
    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> anyhow::Result<()>;
}
