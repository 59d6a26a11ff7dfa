use crate::domain::model::AliasTable;
use crate::utils::error::Result;
use std::path::Path;

pub trait Storage {
    fn exists(&self, path: &Path) -> bool;
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn default_path(&self) -> &str;
    fn delimiter(&self) -> char;
    fn auto_load(&self) -> bool;

    fn alias_table(&self) -> AliasTable {
        AliasTable::default()
    }
}
