pub mod call;
pub mod encoding;
pub mod request;

pub use crate::domain::model::{CallOutcome, DataFileSpec, ResponseSummary, ServiceReply};
pub use crate::domain::ports::{ConfigProvider, ModelService, Storage};
pub use crate::utils::error::Result;
