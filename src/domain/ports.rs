use crate::domain::model::RelayPayload;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn content_path(&self) -> Option<&str>;
    fn loading_screen_ms(&self) -> u64;
    fn relay_timeout_seconds(&self) -> u64;
}

/// External email-dispatch service. One call per accepted submission.
#[async_trait]
pub trait MailRelay: Send + Sync {
    async fn send(&self, payload: &RelayPayload) -> Result<()>;
}
