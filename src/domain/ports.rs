use crate::domain::model::OutgoingMail;
use crate::utils::error::Result;
use async_trait::async_trait;

/// External mail-sending capability. Retry and queueing, if any, belong to
/// the implementation's provider; callers make exactly one attempt.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<()>;

    fn name(&self) -> &'static str;
}
