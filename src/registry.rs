//! RegistryEntry + CSV ingestion — §3, §6, §9.
//!
//! The CSV header is resolved once into column indices up front (§9 "runtime
//! reflection on row dictionaries" redesign note — the reference implementation
//! probes a row dict for alternative column names on every row; this port
//! resolves `name`/`entity_name` fallback a single time at header-parse time).

use crate::error::ScreeningError;
use std::collections::HashMap;
use std::path::Path;

/// Registry entry classification (§3). Matched by substring on the known
/// Russian tokens; anything else (including plain "иноагенты") falls back to
/// `ForeignAgent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    ForeignAgent,
    Extremist,
    Terrorist,
    Undesirable,
    /// A label containing both "террорист" and "экстремист" substrings. Not
    /// named in the distilled spec's enum but present in real registry data
    /// (rows tagged with both the terrorist and extremist lists); dispatched
    /// to the terrorist expansion strategy since it carries the broader
    /// abbreviation table (see DESIGN.md).
    TerroristOrExtremist,
}

impl EntryType {
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        let has_terrorist = lower.contains("террорист");
        let has_extremist = lower.contains("экстремист");

        if has_terrorist && has_extremist {
            EntryType::TerroristOrExtremist
        } else if has_terrorist {
            EntryType::Terrorist
        } else if has_extremist {
            EntryType::Extremist
        } else if lower.contains("нежелательн") {
            EntryType::Undesirable
        } else {
            EntryType::ForeignAgent
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::ForeignAgent => "foreign_agent",
            EntryType::Extremist => "extremist",
            EntryType::Terrorist => "terrorist",
            EntryType::Undesirable => "undesirable",
            EntryType::TerroristOrExtremist => "terrorist_or_extremist",
        }
    }
}

/// One row of the source registry (§3). `markup_phrase`/`legal_basis` are
/// opaque payload, never consulted by the matching core.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub id: String,
    pub name: String,
    pub entry_type: EntryType,
    pub aliases_precomputed: Option<Vec<String>>,
    pub markup_phrase: Option<String>,
    pub legal_basis: Option<String>,
}

/// The full immutable registry snapshot, read once at startup (§3 lifecycle).
#[derive(Debug, Default)]
pub struct Registry {
    pub entries: Vec<RegistryEntry>,
}

struct Columns {
    id: Option<usize>,
    name: Option<usize>,
    entity_name: Option<usize>,
    entry_type: Option<usize>,
    aliases: Option<usize>,
    markup_phrase: Option<usize>,
    legal_basis: Option<usize>,
}

fn resolve_columns(header: &csv::StringRecord) -> Columns {
    let mut index: HashMap<String, usize> = HashMap::new();
    for (i, field) in header.iter().enumerate() {
        index.insert(field.trim().to_lowercase(), i);
    }
    Columns {
        id: index.get("id").copied(),
        name: index.get("name").copied(),
        entity_name: index.get("entity_name").copied(),
        entry_type: index.get("type").copied(),
        aliases: index.get("aliases").copied(),
        markup_phrase: index.get("markup_phrase").copied(),
        legal_basis: index.get("legal_basis").copied(),
    }
}

fn field<'a>(record: &'a csv::StringRecord, idx: Option<usize>) -> Option<&'a str> {
    idx.and_then(|i| record.get(i)).map(str::trim).filter(|s| !s.is_empty())
}

impl Registry {
    /// Load and parse the registry CSV (§6). Fatal if the path doesn't exist;
    /// malformed individual rows are skipped with a warning (§7).
    pub fn load_csv(path: &Path) -> Result<Self, ScreeningError> {
        if !path.exists() {
            return Err(ScreeningError::RegistryMissing(path.to_path_buf()));
        }

        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
        let header = reader.headers()?.clone();
        if header.is_empty() {
            return Err(ScreeningError::RegistryMissingHeader);
        }
        let columns = resolve_columns(&header);
        if columns.name.is_none() && columns.entity_name.is_none() {
            return Err(ScreeningError::RegistryMissingNameColumn);
        }

        let mut entries = Vec::new();
        for (row_idx, record) in reader.records().enumerate() {
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(row = row_idx, error = %e, "skipping malformed registry row");
                    continue;
                }
            };

            let name = field(&record, columns.entity_name)
                .or_else(|| field(&record, columns.name))
                .unwrap_or("")
                .to_string();

            if name.is_empty() {
                tracing::warn!(row = row_idx, "skipping registry row with empty name");
                continue;
            }

            let id = field(&record, columns.id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("unknown_{row_idx}"));

            let entry_type = EntryType::from_label(field(&record, columns.entry_type).unwrap_or("иноагенты"));

            let aliases_precomputed = field(&record, columns.aliases).and_then(|raw| {
                match serde_json::from_str::<Vec<String>>(raw) {
                    Ok(list) => Some(list),
                    Err(e) => {
                        tracing::warn!(row = row_idx, entity_id = %id, error = %e, "failed to parse aliases json; will generate");
                        None
                    }
                }
            });

            entries.push(RegistryEntry {
                id,
                name,
                entry_type,
                aliases_precomputed,
                markup_phrase: field(&record, columns.markup_phrase).map(str::to_string),
                legal_basis: field(&record, columns.legal_basis).map(str::to_string),
            });
        }

        let ids_seen = entries.len();
        let mut unique: HashMap<&str, ()> = HashMap::with_capacity(ids_seen);
        for entry in &entries {
            if unique.insert(entry.id.as_str(), ()).is_some() {
                tracing::warn!(entity_id = %entry.id, "duplicate registry id; later row shadows earlier");
            }
        }

        Ok(Registry { entries })
    }

    pub fn get(&self, id: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_basic_rows_and_classifies_type() {
        let csv = "id,name,type\n1,Алексей Навальный,иностранный агент\n2,Исламское государство,террористическая организация\n";
        let f = write_csv(csv);
        let registry = Registry::load_csv(f.path()).unwrap();
        assert_eq!(registry.entries.len(), 2);
        assert_eq!(registry.entries[0].entry_type, EntryType::ForeignAgent);
        assert_eq!(registry.entries[1].entry_type, EntryType::Terrorist);
    }

    #[test]
    fn falls_back_from_name_to_entity_name_column() {
        let csv = "id,entity_name,type\n1,Тестовая организация,иноагент\n";
        let f = write_csv(csv);
        let registry = Registry::load_csv(f.path()).unwrap();
        assert_eq!(registry.entries[0].name, "Тестовая организация");
    }

    #[test]
    fn skips_rows_with_empty_name() {
        let csv = "id,name,type\n1,,иноагент\n2,Кто-то,иноагент\n";
        let f = write_csv(csv);
        let registry = Registry::load_csv(f.path()).unwrap();
        assert_eq!(registry.entries.len(), 1);
    }

    #[test]
    fn parses_precomputed_aliases_json() {
        let csv = "id,name,type,aliases\n1,Кто-то,иноагент,\"[\"\"алиас1\"\",\"\"алиас2\"\"]\"\n";
        let f = write_csv(csv);
        let registry = Registry::load_csv(f.path()).unwrap();
        assert_eq!(
            registry.entries[0].aliases_precomputed,
            Some(vec!["алиас1".to_string(), "алиас2".to_string()])
        );
    }

    #[test]
    fn missing_file_is_fatal() {
        let result = Registry::load_csv(Path::new("/nonexistent/path/registry.csv"));
        assert!(matches!(result, Err(ScreeningError::RegistryMissing(_))));
    }

    #[test]
    fn unparseable_aliases_falls_back_to_none() {
        let csv = "id,name,type,aliases\n1,Кто-то,иноагент,not json\n";
        let f = write_csv(csv);
        let registry = Registry::load_csv(f.path()).unwrap();
        assert_eq!(registry.entries[0].aliases_precomputed, None);
    }
}
