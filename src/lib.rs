pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::storage::LocalStorage;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::codec::{Codec, Format};
pub use crate::core::store::{Binding, CompanyStore, ImportSummary};
pub use crate::domain::model::{AliasTable, CompanyRecord, SkipReason};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::{RegistryError, Result};
