use async_trait::async_trait;
use mockall::mock;

use crate::exception::ConcatResult;
use crate::model::vo::{ByteRange, ObjectUrl, SourceMeta};
use crate::service::{ObjectStoreService, ProbeService};

mock! {
    pub ObjectStoreService {}
    #[async_trait]
    impl ObjectStoreService for ObjectStoreService {
        async fn head_object(&self, url: &ObjectUrl) -> anyhow::Result<Option<u64>>;
        async fn get_object_range(
            &self,
            url: &ObjectUrl,
            range: Option<ByteRange>,
        ) -> anyhow::Result<Vec<u8>>;
        async fn put_object(&self, url: &ObjectUrl, content: Vec<u8>) -> anyhow::Result<()>;
        async fn create_multipart_upload(&self, url: &ObjectUrl) -> anyhow::Result<String>;
        async fn upload_part(
            &self,
            url: &ObjectUrl,
            upload_id: &str,
            part_number: i32,
            content: Vec<u8>,
        ) -> anyhow::Result<String>;
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
        async fn delete_objects(&self, bucket: &str, keys: &[String]) -> anyhow::Result<()>;
    }
}

mock! {
    pub ProbeService {}
    #[async_trait]
    impl ProbeService for ProbeService {
        async fn probe(&self, urls: &[ObjectUrl]) -> ConcatResult<Vec<SourceMeta>>;
    }
}
