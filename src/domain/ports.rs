use crate::domain::model::ServiceReply;
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
    fn host_and_port(&self) -> &str;
    fn template_path(&self) -> &str;
    /// `None` leaves the template's `dataSource` untouched.
    fn data_path(&self) -> Option<&str>;
    fn send_inline(&self) -> bool;
    fn output_path(&self) -> &str;
    fn field_separator(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> Option<u64>;
    fn ascii_only(&self) -> bool;
}

#[async_trait]
pub trait ModelService: Send + Sync {
    async fn build_model(&self, body: Vec<u8>) -> Result<ServiceReply>;
}
