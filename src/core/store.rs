use crate::core::codec::{Codec, Format};
use crate::core::normalize::normalize_rows;
use crate::core::{ConfigProvider, Storage};
use crate::domain::model::{AliasTable, CompanyRecord, SkipReason};
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{parse_budget, validate_non_empty_string};
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE: &str = "companies.txt";

/// The file a store persists to and the encoding derived from its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub path: PathBuf,
    pub format: Format,
}

impl Binding {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = Format::from_path(&path);
        Self { path, format }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub binding: Binding,
    pub imported: usize,
    pub skipped: Vec<SkipReason>,
}

impl ImportSummary {
    pub fn skip_count(&self) -> usize {
        self.skipped.len()
    }
}

/// In-memory company list bound to one file. Every mutation rewrites that
/// file before it takes effect in memory.
pub struct CompanyStore<S: Storage> {
    storage: S,
    codec: Codec,
    aliases: AliasTable,
    binding: Binding,
    records: Vec<CompanyRecord>,
}

impl<S: Storage> CompanyStore<S> {
    /// Empty store bound to `path`. Nothing is read or written.
    pub fn new(storage: S, path: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            codec: Codec::default(),
            aliases: AliasTable::default(),
            binding: Binding::new(path),
            records: Vec::new(),
        }
    }

    /// Builds a store from configuration and, when enabled, loads the default file.
    pub fn open<C: ConfigProvider>(storage: S, config: &C) -> Self {
        let mut store = Self::new(storage, config.default_path())
            .with_codec(Codec::new(config.delimiter()))
            .with_aliases(config.alias_table());

        if config.auto_load() {
            store.load_initial_data();
        }
        store
    }

    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    /// Imports the bound file if it exists. Failures are logged, never returned.
    pub fn load_initial_data(&mut self) {
        let path = self.binding.path.clone();
        if !self.storage.exists(&path) {
            tracing::debug!("No existing data file at {}, starting empty", path.display());
            return;
        }

        match self.import(&path) {
            Ok(summary) => tracing::info!(
                "Loaded {} companies from {}",
                summary.imported,
                path.display()
            ),
            Err(e) => {
                tracing::error!("Error loading initial file {}: {}", path.display(), e);
                self.records.clear();
            }
        }
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn find(&self, id: &str) -> Option<&CompanyRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Case-insensitive substring match on id or name, in store order.
    pub fn search(&self, term: &str) -> Vec<&CompanyRecord> {
        let needle = term.to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.id.to_lowercase().contains(&needle)
                    || r.name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Fields are stored trimmed, the same way import normalizes them.
    pub fn add(&mut self, id: &str, name: &str, address: &str, budget_raw: &str) -> Result<()> {
        let id = id.trim();
        if self.contains(id) {
            return Err(RegistryError::DuplicateId { id: id.to_string() });
        }
        let record = build_record(id, name, address, budget_raw)?;

        let mut next = self.records.clone();
        next.push(record);
        self.commit(next)?;

        tracing::info!("Added company {}", id);
        Ok(())
    }

    pub fn update(
        &mut self,
        original_id: &str,
        new_id: &str,
        name: &str,
        address: &str,
        budget_raw: &str,
    ) -> Result<()> {
        let original_id = original_id.trim();
        let new_id = new_id.trim();
        let index = self
            .position(original_id)
            .ok_or_else(|| RegistryError::NotFound {
                id: original_id.to_string(),
            })?;
        if new_id != original_id && self.contains(new_id) {
            return Err(RegistryError::DuplicateId {
                id: new_id.to_string(),
            });
        }
        let record = build_record(new_id, name, address, budget_raw)?;

        let mut next = self.records.clone();
        next[index] = record;
        self.commit(next)?;

        tracing::info!("Updated company {} (now {})", original_id, new_id);
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        let index = self
            .position(id)
            .ok_or_else(|| RegistryError::NotFound { id: id.to_string() })?;

        let mut next = self.records.clone();
        next.remove(index);
        self.commit(next)?;

        tracing::info!("Deleted company {}", id);
        Ok(())
    }

    /// Replaces the whole store with the normalized contents of `path` and
    /// rebinds to it. Rows that cannot be normalized are skipped and reported.
    pub fn import(&mut self, path: impl AsRef<Path>) -> Result<ImportSummary> {
        let path = path.as_ref();
        let source = path.display().to_string();
        if !self.storage.exists(path) {
            return Err(RegistryError::FileNotFound { path: source });
        }

        let binding = Binding::new(path);
        tracing::debug!("Importing {} as {}", source, binding.format.name());

        let bytes = self.storage.read_file(path)?;
        let rows = self.codec.parse(binding.format, &source, &bytes)?;
        let report = normalize_rows(&rows, &self.aliases);

        if report.skip_count() > 0 {
            tracing::warn!(
                "Skipped {} rows with missing required fields (id, name, address) or repeated ids in {}",
                report.skip_count(),
                source
            );
        }

        let summary = ImportSummary {
            binding: binding.clone(),
            imported: report.records.len(),
            skipped: report.skipped,
        };
        self.records = report.records;
        self.binding = binding;

        Ok(summary)
    }

    /// Rewrites the bound file with the current contents.
    pub fn save(&self) -> Result<()> {
        self.persist(&self.records)
    }

    /// Writes the current contents to `path` in the format its extension
    /// selects. The store stays bound to its current file.
    pub fn export_to(&self, path: impl AsRef<Path>) -> Result<Format> {
        let path = path.as_ref();
        let format = Format::from_path(path);
        let bytes = self.codec.encode(format, &self.records)?;
        self.storage.write_file(path, &bytes)?;

        tracing::info!(
            "Exported {} companies to {} ({})",
            self.records.len(),
            path.display(),
            format.name()
        );
        Ok(format)
    }

    fn persist(&self, records: &[CompanyRecord]) -> Result<()> {
        let bytes = self.codec.encode(self.binding.format, records)?;
        self.storage.write_file(&self.binding.path, &bytes)?;
        tracing::debug!(
            "Saved {} companies to {}",
            records.len(),
            self.binding.path.display()
        );
        Ok(())
    }

    fn commit(&mut self, next: Vec<CompanyRecord>) -> Result<()> {
        self.persist(&next)?;
        self.records = next;
        Ok(())
    }
}

fn build_record(id: &str, name: &str, address: &str, budget_raw: &str) -> Result<CompanyRecord> {
    validate_non_empty_string("id", id)?;
    validate_non_empty_string("name", name)?;
    validate_non_empty_string("address", address)?;
    let budget = parse_budget(budget_raw)?;

    Ok(CompanyRecord {
        id: id.trim().to_string(),
        name: name.trim().to_string(),
        address: address.trim().to_string(),
        budget,
    })
}
