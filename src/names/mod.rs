//! Country-name resolution across provider conventions.
//!
//! National and international providers spell countries differently
//! ("Alemania" vs "Germany"). `CountryNames` maps every known spelling back to
//! one canonical identity and forward to whichever convention a caller needs.
//! Unknown names pass through untouched so new countries in the corpus degrade
//! gracefully instead of disappearing.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::Convention;
use crate::error::AppError;

mod table;

/// One country and its spellings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryNameEntry {
    pub canonical: String,
    pub localized: String,
    pub english: String,
    pub display: String,
}

impl CountryNameEntry {
    pub fn spelling(&self, convention: Convention) -> &str {
        match convention {
            Convention::Canonical => &self.canonical,
            Convention::Localized => &self.localized,
            Convention::English => &self.english,
            Convention::Display => &self.display,
        }
    }
}

/// Bidirectional country-name lookup.
#[derive(Debug, Clone)]
pub struct CountryNames {
    entries: Vec<CountryNameEntry>,
    /// Lower-cased spelling (canonical, localized or english) -> entry index.
    index: HashMap<String, usize>,
}

impl Default for CountryNames {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CountryNames {
    /// The built-in European table.
    pub fn builtin() -> Self {
        Self::from_entries(table::BUILTIN.iter().map(|&(canonical, localized, english, display)| {
            CountryNameEntry {
                canonical: canonical.to_string(),
                localized: localized.to_string(),
                english: english.to_string(),
                display: display.to_string(),
            }
        }))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = CountryNameEntry>) -> Self {
        let entries: Vec<CountryNameEntry> = entries.into_iter().collect();
        let mut index = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            for spelling in [&entry.canonical, &entry.localized, &entry.english] {
                // First entry claiming a spelling keeps it.
                index.entry(lookup_key(spelling)).or_insert(idx);
            }
        }
        Self { entries, index }
    }

    /// Load a table from CSV with columns `canonical,localized,english,display`.
    pub fn from_csv_path(path: &Path) -> Result<Self, AppError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| AppError::new(2, format!("Failed to open names CSV '{}': {e}", path.display())))?;

        let mut entries = Vec::new();
        for (idx, result) in reader.deserialize::<CountryNameEntry>().enumerate() {
            let entry = result
                .map_err(|e| AppError::new(2, format!("Invalid names CSV row {}: {e}", idx + 2)))?;
            entries.push(entry);
        }
        Ok(Self::from_entries(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry for any known spelling.
    pub fn lookup(&self, name: &str) -> Option<&CountryNameEntry> {
        self.index.get(&lookup_key(name)).map(|&idx| &self.entries[idx])
    }

    /// Resolve `name` into the `target` convention.
    ///
    /// Returns `None` only for absent/blank input; unknown names come back unchanged.
    pub fn resolve(&self, name: Option<&str>, target: Convention) -> Option<String> {
        let name = name.filter(|n| !n.trim().is_empty())?;
        match self.lookup(name) {
            Some(entry) => Some(entry.spelling(target).to_string()),
            None => Some(name.to_string()),
        }
    }

    /// Shorthand for resolving a present name; never fails.
    pub fn to_convention(&self, name: &str, target: Convention) -> String {
        self.resolve(Some(name), target).unwrap_or_default()
    }

    pub fn canonical(&self, name: &str) -> String {
        self.to_convention(name, Convention::Canonical)
    }
}

fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> CountryNames {
        CountryNames::from_entries([CountryNameEntry {
            canonical: "DEU".to_string(),
            localized: "Alemania".to_string(),
            english: "Germany".to_string(),
            display: "Germany".to_string(),
        }])
    }

    #[test]
    fn resolves_from_every_direction() {
        let n = names();
        assert_eq!(n.resolve(Some("Alemania"), Convention::English).as_deref(), Some("Germany"));
        assert_eq!(n.resolve(Some("Germany"), Convention::Localized).as_deref(), Some("Alemania"));
        assert_eq!(n.resolve(Some("DEU"), Convention::Localized).as_deref(), Some("Alemania"));
        assert_eq!(n.resolve(Some(" germany "), Convention::Canonical).as_deref(), Some("DEU"));
    }

    #[test]
    fn canonical_is_idempotent() {
        let n = names();
        let once = n.canonical("Alemania");
        assert_eq!(n.canonical(&once), once);
    }

    #[test]
    fn unknown_and_blank_names() {
        let n = names();
        assert_eq!(n.resolve(Some("Atlantis"), Convention::English).as_deref(), Some("Atlantis"));
        assert_eq!(n.resolve(Some("   "), Convention::English), None);
        assert_eq!(n.resolve(None, Convention::English), None);
    }

    #[test]
    fn builtin_table_knows_spain() {
        let n = CountryNames::builtin();
        assert_eq!(n.canonical("España"), "ESP");
        assert_eq!(n.to_convention("Spain", Convention::Localized), "España");
    }
}
