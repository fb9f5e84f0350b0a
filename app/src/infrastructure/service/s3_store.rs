use anyhow::anyhow;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart, Delete, ObjectIdentifier};
use aws_sdk_s3::Client;
use domain_concat::model::vo::{ByteRange, ObjectUrl};
use domain_concat::service::ObjectStoreService;
use typed_builder::TypedBuilder;

use crate::infrastructure::config::S3ConcatConfig;

/// Store client over the S3 API.
#[derive(TypedBuilder)]
pub struct S3ObjectStoreService {
    client: Client,
}

impl S3ObjectStoreService {
    /// Build a client from the app configuration.
    pub async fn from_config(config: &S3ConcatConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }
        builder = builder.force_path_style(config.force_path_style);
        Self {
            client: Client::from_conf(builder.build()),
        }
    }

    fn copy_source(url: &ObjectUrl) -> String {
        format!("{}/{}", url.bucket, url.key)
    }
}

#[async_trait]
impl ObjectStoreService for S3ObjectStoreService {
    async fn head_object(&self, url: &ObjectUrl) -> anyhow::Result<Option<u64>> {
        match self
            .client
            .head_object()
            .bucket(&url.bucket)
            .key(&url.key)
            .send()
            .await
        {
            Ok(output) => Ok(Some(output.content_length().unwrap_or_default() as u64)),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn get_object_range(
        &self,
        url: &ObjectUrl,
        range: Option<ByteRange>,
    ) -> anyhow::Result<Vec<u8>> {
        let mut request = self.client.get_object().bucket(&url.bucket).key(&url.key);
        if let Some(range) = range {
            request = request.range(range.to_http_range());
        }
        let output = request.send().await?;
        let data = output.body.collect().await?;
        Ok(data.into_bytes().to_vec())
    }

    async fn put_object(&self, url: &ObjectUrl, content: Vec<u8>) -> anyhow::Result<()> {
        self.client
            .put_object()
            .bucket(&url.bucket)
            .key(&url.key)
            .body(ByteStream::from(content))
            .send()
            .await?;
        Ok(())
    }

    async fn create_multipart_upload(&self, url: &ObjectUrl) -> anyhow::Result<String> {
        let output = self
            .client
            .create_multipart_upload()
            .bucket(&url.bucket)
            .key(&url.key)
            .send()
            .await?;
        output
            .upload_id()
            .map(str::to_owned)
            .ok_or_else(|| anyhow!("store returned no upload id for {url}"))
    }

    async fn upload_part(
        &self,
        url: &ObjectUrl,
        upload_id: &str,
        part_number: i32,
        content: Vec<u8>,
    ) -> anyhow::Result<String> {
        let output = self
            .client
            .upload_part()
            .bucket(&url.bucket)
            .key(&url.key)
            .upload_id(upload_id)
            .part_number(part_number)
            .body(ByteStream::from(content))
            .send()
            .await?;
        output
            .e_tag()
            .map(str::to_owned)
            .ok_or_else(|| anyhow!("store returned no etag for part {part_number}"))
    }

    async fn upload_part_copy(
        &self,
        url: &ObjectUrl,
        upload_id: &str,
        part_number: i32,
        source: &ObjectUrl,
        range: Option<ByteRange>,
    ) -> anyhow::Result<String> {
        let mut request = self
            .client
            .upload_part_copy()
            .bucket(&url.bucket)
            .key(&url.key)
            .upload_id(upload_id)
            .part_number(part_number)
            .copy_source(Self::copy_source(source));
        if let Some(range) = range {
            request = request.copy_source_range(range.to_http_range());
        }
        let output = request.send().await?;
        output
            .copy_part_result()
            .and_then(|result| result.e_tag())
            .map(str::to_owned)
            .ok_or_else(|| anyhow!("store returned no etag for copy part {part_number}"))
    }

    async fn complete_multipart_upload(
        &self,
        url: &ObjectUrl,
        upload_id: &str,
        parts: &[(i32, String)],
    ) -> anyhow::Result<()> {
        let completed: Vec<_> = parts
            .iter()
            .map(|(part_number, etag)| {
                CompletedPart::builder()
                    .part_number(*part_number)
                    .e_tag(etag)
                    .build()
            })
            .collect();
        self.client
            .complete_multipart_upload()
            .bucket(&url.bucket)
            .key(&url.key)
            .upload_id(upload_id)
            .multipart_upload(
                CompletedMultipartUpload::builder()
                    .set_parts(Some(completed))
                    .build(),
            )
            .send()
            .await?;
        Ok(())
    }

    async fn abort_multipart_upload(
        &self,
        url: &ObjectUrl,
        upload_id: &str,
    ) -> anyhow::Result<()> {
        self.client
            .abort_multipart_upload()
            .bucket(&url.bucket)
            .key(&url.key)
            .upload_id(upload_id)
            .send()
            .await?;
        Ok(())
    }

    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> anyhow::Result<()> {
        let objects = keys
            .iter()
            .map(|key| ObjectIdentifier::builder().key(key).build())
            .collect::<Result<Vec<_>, _>>()?;
        self.client
            .delete_objects()
            .bucket(bucket)
            .delete(Delete::builder().set_objects(Some(objects)).build()?)
            .send()
            .await?;
        Ok(())
    }
}
