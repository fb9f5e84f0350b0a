use std::sync::Arc;

use async_trait::async_trait;
use domain_concat::exception::ConcatResult;
use domain_concat::model::vo::{ObjectUrl, SourceMeta};
use domain_concat::service::{ObjectStoreService, ProbeService};
use futures::future::try_join_all;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct ProbeServiceImpl {
    store: Arc<dyn ObjectStoreService>,
}

#[async_trait]
impl ProbeService for ProbeServiceImpl {
    async fn probe(&self, urls: &[ObjectUrl]) -> ConcatResult<Vec<SourceMeta>> {
        let lookups = urls.iter().map(|url| async move {
            let size = self.store.head_object(url).await?;
            Ok::<_, anyhow::Error>(match size {
                Some(size) => SourceMeta {
                    url: url.clone(),
                    size,
                    exists: true,
                },
                None => SourceMeta {
                    url: url.clone(),
                    size: 0,
                    exists: false,
                },
            })
        });
        // try_join_all keeps input order regardless of completion order.
        Ok(try_join_all(lookups).await?)
    }
}
