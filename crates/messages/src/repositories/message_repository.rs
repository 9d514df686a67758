//! Storage contract for messages.

use async_trait::async_trait;

use crate::entities::MessageSnapshot;
use crate::types::MessageResult;

/// Persistence boundary for messages.
///
/// Implementations must surface every storage failure as
/// [`MessageError::Storage`](crate::types::MessageError::Storage); a `create`
/// either stores the whole record or nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist one message. A duplicate `message_id` is a storage failure.
    async fn create(&self, message: MessageSnapshot) -> MessageResult<()>;

    /// Every stored message. No filtering or pagination at this level.
    async fn list(&self) -> MessageResult<Vec<MessageSnapshot>>;
}
