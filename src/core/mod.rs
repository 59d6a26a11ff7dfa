pub mod codec;
pub mod normalize;
pub mod store;

pub use crate::domain::model::{CompanyRecord, ImportReport, RowOutcome, SkipReason};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
