use std::sync::Arc;

use domain_concat::exception::ConcatResult;
use domain_concat::model::vo::{ByteRange, ObjectUrl};
use domain_concat::service::ObjectStoreService;
use tracing::debug;

/// One open multipart upload against a destination object.
///
/// Part numbers are 1-based and follow call order, so callers must add parts
/// in plan order and finish with exactly one of [`MultipartSession::complete`]
/// or [`MultipartSession::abort`].
pub struct MultipartSession {
    store: Arc<dyn ObjectStoreService>,
    destination: ObjectUrl,
    upload_id: String,
    parts: Vec<(i32, String)>,
}

impl MultipartSession {
    /// Open the upload and acquire its id from the store.
    pub async fn begin(
        store: Arc<dyn ObjectStoreService>,
        destination: ObjectUrl,
    ) -> ConcatResult<Self> {
        let upload_id = store.create_multipart_upload(&destination).await?;
        debug!(%destination, %upload_id, "opened multipart upload");
        Ok(Self {
            store,
            destination,
            upload_id,
            parts: vec![],
        })
    }

    pub fn upload_id(&self) -> &str {
        &self.upload_id
    }

    pub async fn add_copy_part(
        &mut self,
        source: &ObjectUrl,
        range: Option<ByteRange>,
    ) -> ConcatResult<()> {
        let part_number = self.next_part_number();
        let etag = self
            .store
            .upload_part_copy(&self.destination, &self.upload_id, part_number, source, range)
            .await?;
        debug!(part_number, %source, "copied part");
        self.parts.push((part_number, etag));
        Ok(())
    }

    pub async fn add_buffer_part(&mut self, content: Vec<u8>) -> ConcatResult<()> {
        let part_number = self.next_part_number();
        let size = content.len();
        let etag = self
            .store
            .upload_part(&self.destination, &self.upload_id, part_number, content)
            .await?;
        debug!(part_number, size, "uploaded buffered part");
        self.parts.push((part_number, etag));
        Ok(())
    }

    /// Finish the upload; the destination becomes durable.
    pub async fn complete(self) -> ConcatResult<()> {
        self.store
            .complete_multipart_upload(&self.destination, &self.upload_id, &self.parts)
            .await?;
        Ok(())
    }

    /// Discard every uploaded part.
    pub async fn abort(&self) -> ConcatResult<()> {
        self.store
            .abort_multipart_upload(&self.destination, &self.upload_id)
            .await?;
        Ok(())
    }

    fn next_part_number(&self) -> i32 {
        self.parts.len() as i32 + 1
    }
}
