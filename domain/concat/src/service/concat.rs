use async_trait::async_trait;

use crate::command::{AppendCommand, ConcatManyCommand};
use crate::exception::ConcatResult;

/// # Object concatenation service
///
/// Either operation completes with a durable, correct destination object, or
/// returns one error and leaves the destination unmodified.
#[async_trait]
pub trait ObjectConcatService: Send + Sync {
    /// Append bytes to the destination, creating it when absent.
    async fn append(&self, cmd: AppendCommand) -> ConcatResult<()>;

    /// Concatenate every existing listed object, in order, into the first.
    async fn concat_many(&self, cmd: ConcatManyCommand) -> ConcatResult<()>;
}
