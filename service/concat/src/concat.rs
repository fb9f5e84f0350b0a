use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use domain_concat::command::{AppendCommand, ConcatManyCommand};
use domain_concat::exception::{ConcatException, ConcatResult};
use domain_concat::model::vo::{ObjectUrl, PartPlan, SourceMeta, MIN_PART_SIZE};
use domain_concat::service::{ObjectConcatService, ObjectStoreService, ProbeService};
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

use crate::planner::plan_parts;
use crate::session::MultipartSession;

/// The store rejects more keys than this in one bulk delete.
const DELETE_BATCH_LIMIT: usize = 1000;

#[derive(TypedBuilder)]
pub struct ObjectConcatServiceImpl {
    store: Arc<dyn ObjectStoreService>,
    probe_service: Arc<dyn ProbeService>,
}

#[async_trait]
impl ObjectConcatService for ObjectConcatServiceImpl {
    async fn append(&self, cmd: AppendCommand) -> ConcatResult<()> {
        let AppendCommand { url, content } = cmd;
        match self.store.head_object(&url).await? {
            None => {
                debug!(%url, "destination absent, writing fresh object");
                self.write_object(&url, content).await
            }
            Some(size) if size < MIN_PART_SIZE => {
                // Too small for a copy part: merge client-side and rewrite.
                let mut merged = self.store.get_object_range(&url, None).await?;
                merged.extend(content);
                self.write_object(&url, merged).await
            }
            Some(_) => {
                let mut session =
                    MultipartSession::begin(self.store.clone(), url.clone()).await?;
                let outcome: ConcatResult<()> = async {
                    session.add_copy_part(&url, None).await?;
                    for chunk in chunks(content) {
                        session.add_buffer_part(chunk).await?;
                    }
                    Ok(())
                }
                .await;
                self.finish(session, outcome).await
            }
        }
    }

    async fn concat_many(&self, cmd: ConcatManyCommand) -> ConcatResult<()> {
        let ConcatManyCommand {
            urls,
            remove_originals,
        } = cmd;
        if urls.len() < 2 {
            return Err(ConcatException::TooFewSources);
        }
        let destination = urls[0].clone();

        let sources = self.resolve_sources(&urls).await?;
        let plans = plan_parts(&sources);

        let mut session =
            MultipartSession::begin(self.store.clone(), destination.clone()).await?;
        let outcome = self.drive(&mut session, &plans).await;
        self.finish(session, outcome).await?;
        info!(%destination, sources = sources.len(), "concatenation complete");

        if remove_originals {
            self.remove_originals(&destination, &sources).await?;
        }
        Ok(())
    }
}

impl ObjectConcatServiceImpl {
    /// Probe all urls and keep those that exist, in input order.
    async fn resolve_sources(&self, urls: &[ObjectUrl]) -> ConcatResult<Vec<SourceMeta>> {
        let metas = self.probe_service.probe(urls).await?;
        let mut sources = Vec::with_capacity(metas.len());
        for (position, meta) in metas.into_iter().enumerate() {
            if meta.exists {
                sources.push(meta);
            } else if position == 0 {
                // An absent destination just means a fresh write.
                debug!(url = %meta.url, "destination does not exist yet");
            } else {
                warn!(url = %meta.url, "skipping missing source");
            }
        }
        if sources.is_empty() {
            return Err(ConcatException::NoSourceExists);
        }
        Ok(sources)
    }

    /// Execute the plans, in order, on one open session.
    async fn drive(
        &self,
        session: &mut MultipartSession,
        plans: &[PartPlan],
    ) -> ConcatResult<()> {
        for plan in plans {
            match plan {
                PartPlan::Copy { source, range } => {
                    session.add_copy_part(source, *range).await?;
                }
                PartPlan::Buffer { segments } => {
                    let mut content = Vec::new();
                    // Segment order is the byte order of the final object.
                    for segment in segments {
                        let bytes = self
                            .store
                            .get_object_range(&segment.source, segment.range)
                            .await?;
                        content.extend(bytes);
                    }
                    session.add_buffer_part(content).await?;
                }
            }
        }
        Ok(())
    }

    /// Complete on success; abort exactly once on failure and re-raise the
    /// original error. An abort failure is logged, never surfaced.
    async fn finish(&self, session: MultipartSession, outcome: ConcatResult<()>) -> ConcatResult<()> {
        match outcome {
            Ok(()) => session.complete().await,
            Err(err) => {
                if let Err(abort_err) = session.abort().await {
                    warn!(
                        upload_id = session.upload_id(),
                        error = %abort_err,
                        "failed to abort multipart upload"
                    );
                }
                Err(err)
            }
        }
    }

    /// Plain write, or a chunked multipart write once the content itself
    /// reaches the minimum part size.
    async fn write_object(&self, url: &ObjectUrl, content: Vec<u8>) -> ConcatResult<()> {
        if (content.len() as u64) < MIN_PART_SIZE {
            self.store.put_object(url, content).await?;
            return Ok(());
        }
        let mut session = MultipartSession::begin(self.store.clone(), url.clone()).await?;
        let outcome: ConcatResult<()> = async {
            for chunk in chunks(content) {
                session.add_buffer_part(chunk).await?;
            }
            Ok(())
        }
        .await;
        self.finish(session, outcome).await
    }

    /// Delete the consumed sources, destination excepted, within the store's
    /// bulk-delete limit.
    async fn remove_originals(
        &self,
        destination: &ObjectUrl,
        sources: &[SourceMeta],
    ) -> ConcatResult<()> {
        let mut seen = HashSet::new();
        let mut by_bucket: Vec<(String, Vec<String>)> = vec![];
        for source in sources {
            let url = &source.url;
            if url == destination || !seen.insert(url.clone()) {
                continue;
            }
            match by_bucket.iter_mut().find(|(bucket, _)| bucket == &url.bucket) {
                Some((_, keys)) => keys.push(url.key.clone()),
                None => by_bucket.push((url.bucket.clone(), vec![url.key.clone()])),
            }
        }
        for (bucket, keys) in by_bucket {
            for batch in keys.chunks(DELETE_BATCH_LIMIT) {
                self.store.delete_objects(&bucket, batch).await?;
            }
            info!(%bucket, removed = keys.len(), "removed original objects");
        }
        Ok(())
    }
}

/// Split into `MIN_PART_SIZE` chunks; the final chunk keeps the remainder.
fn chunks(content: Vec<u8>) -> Vec<Vec<u8>> {
    content
        .chunks(MIN_PART_SIZE as usize)
        .map(<[u8]>::to_vec)
        .collect()
}
