use async_trait::async_trait;

use crate::exception::ConcatResult;
use crate::model::vo::{ObjectUrl, SourceMeta};

/// # Metadata prober
///
/// Resolves sizes for many urls concurrently. Output keeps the input order;
/// a url that does not resolve yields `exists = false` instead of an error.
#[async_trait]
pub trait ProbeService: Send + Sync {
    async fn probe(&self, urls: &[ObjectUrl]) -> ConcatResult<Vec<SourceMeta>>;
}
