use serde::{Deserialize, Serialize};

pub const ID_CANDIDATES: &[&str] = &["id", "nit", "ID", "NIT"];
pub const NAME_CANDIDATES: &[&str] = &["name", "nombre", "NAME", "NOMBRE", "label", "LABEL"];
pub const ADDRESS_CANDIDATES: &[&str] = &[
    "address",
    "direccion",
    "ADDRESS",
    "DIRECCION",
    "loc",
    "LOC",
    "location",
    "LOCATION",
];
pub const BUDGET_CANDIDATES: &[&str] = &[
    "budget",
    "presupuesto",
    "BUDGET",
    "PRESUPUESTO",
    "money",
    "MONEY",
];

/// Canonical company shape. Field order here is the export column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub budget: f64,
}

/// Ordered candidate source keys per canonical field. Lookup is first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTable {
    pub id: Vec<String>,
    pub name: Vec<String>,
    pub address: Vec<String>,
    pub budget: Vec<String>,
}

impl Default for AliasTable {
    fn default() -> Self {
        let owned = |keys: &[&str]| keys.iter().map(|k| k.to_string()).collect();
        Self {
            id: owned(ID_CANDIDATES),
            name: owned(NAME_CANDIDATES),
            address: owned(ADDRESS_CANDIDATES),
            budget: owned(BUDGET_CANDIDATES),
        }
    }
}

impl AliasTable {
    /// Appends extra candidates after the built-in ones, skipping keys already present.
    pub fn extend(&mut self, extra: &AliasTable) {
        fn merge(target: &mut Vec<String>, extra: &[String]) {
            for key in extra {
                if !target.contains(key) {
                    target.push(key.clone());
                }
            }
        }
        merge(&mut self.id, &extra.id);
        merge(&mut self.name, &extra.name);
        merge(&mut self.address, &extra.address);
        merge(&mut self.budget, &extra.budget);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// JSON array element that is not an object
    NotAnObject,
    MissingField(&'static str),
    DuplicateId(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotAnObject => write!(f, "row is not an object"),
            SkipReason::MissingField(field) => write!(f, "missing required field '{}'", field),
            SkipReason::DuplicateId(id) => write!(f, "duplicate id '{}'", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Normalized(CompanyRecord),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub records: Vec<CompanyRecord>,
    pub skipped: Vec<SkipReason>,
}

impl ImportReport {
    pub fn skip_count(&self) -> usize {
        self.skipped.len()
    }
}
