//! Parameter metadata catalogue: side-channel descriptive data about
//! parameters, separate from their live values.
//!
//! The engine consults the catalogue one attribute at a time through the
//! [`MetadataCatalogue`] trait. Two implementations are provided:
//! [`MemoryCatalogue`] for tests and statically defined parameter sets, and
//! [`TomlCatalogue`] backed by a TOML file that `reload` re-reads.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::Deserialize;

use crate::error::{PanelError, PanelResult};

/// The distinguished mode whose view also shows parameters carrying no mode
/// attribute.
pub const ADVANCED_MODE: &str = "Advanced";

/// The fixed set of per-parameter attributes a catalogue can supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    DisplayName,
    Mode,
    Description,
    Units,
    Range,
    Increment,
    Values,
}

/// Read-only metadata source.
///
/// `lookup` returns `Ok(None)` for names or attributes the catalogue has no
/// entry for — a miss is ordinary, not an error. An `Err` means the lookup
/// itself failed; the classifier treats that as "skip this parameter" and
/// keeps going.
pub trait MetadataCatalogue: Send + Sync {
    /// Looks up one attribute of one parameter. Empty attribute values are
    /// reported as `None`.
    fn lookup(&self, name: &str, key: MetadataKey) -> PanelResult<Option<String>>;

    /// Re-reads the backing source. Implementations without one may no-op.
    fn reload(&self) -> PanelResult<()>;
}

/// One parameter's catalogue entry.
///
/// All attributes are kept as strings: the catalogue format is shared with
/// other tooling and numeric attributes (`range`, `increment`) are parsed
/// tolerantly at classification time.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ParameterMeta {
    pub display_name: Option<String>,
    pub mode: Option<String>,
    pub description: Option<String>,
    pub units: Option<String>,
    pub range: Option<String>,
    pub increment: Option<String>,
    pub values: Option<String>,
}

impl ParameterMeta {
    /// Creates an empty entry for builder-style population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the human-friendly display name.
    pub fn display_name(mut self, value: &str) -> Self {
        self.display_name = Some(value.to_string());
        self
    }

    /// Sets the operating mode this parameter belongs to.
    pub fn mode(mut self, value: &str) -> Self {
        self.mode = Some(value.to_string());
        self
    }

    /// Sets the long description.
    pub fn description(mut self, value: &str) -> Self {
        self.description = Some(value.to_string());
        self
    }

    /// Sets the physical units label.
    pub fn units(mut self, value: &str) -> Self {
        self.units = Some(value.to_string());
        self
    }

    /// Sets the legal range as two whitespace-separated bounds.
    pub fn range(mut self, value: &str) -> Self {
        self.range = Some(value.to_string());
        self
    }

    /// Sets the step size.
    pub fn increment(mut self, value: &str) -> Self {
        self.increment = Some(value.to_string());
        self
    }

    /// Sets the enumerated values string (`raw[:label]` entries, comma
    /// separated).
    pub fn values(mut self, value: &str) -> Self {
        self.values = Some(value.to_string());
        self
    }

    fn attribute(&self, key: MetadataKey) -> Option<String> {
        let field = match key {
            MetadataKey::DisplayName => &self.display_name,
            MetadataKey::Mode => &self.mode,
            MetadataKey::Description => &self.description,
            MetadataKey::Units => &self.units,
            MetadataKey::Range => &self.range,
            MetadataKey::Increment => &self.increment,
            MetadataKey::Values => &self.values,
        };
        field.clone().filter(|value| !value.is_empty())
    }
}

/// In-memory catalogue for tests and statically defined parameter sets.
#[derive(Default)]
pub struct MemoryCatalogue {
    entries: RwLock<HashMap<String, ParameterMeta>>,
}

impl MemoryCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one parameter's entry.
    pub fn insert(&self, name: &str, meta: ParameterMeta) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(name.to_string(), meta);
    }
}

impl MetadataCatalogue for MemoryCatalogue {
    fn lookup(&self, name: &str, key: MetadataKey) -> PanelResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(name).and_then(|meta| meta.attribute(key)))
    }

    fn reload(&self) -> PanelResult<()> {
        Ok(())
    }
}

/// Catalogue backed by a TOML file mapping parameter names to attribute
/// tables:
///
/// ```toml
/// [NAVL1_PERIOD]
/// display_name = "Navigation period"
/// mode = "Standard"
/// units = "seconds"
/// range = "1 60"
/// increment = "1"
/// ```
#[derive(Debug)]
pub struct TomlCatalogue {
    path: PathBuf,
    entries: RwLock<HashMap<String, ParameterMeta>>,
}

impl TomlCatalogue {
    /// Loads the catalogue from `path`, failing if the file is missing or
    /// malformed.
    pub fn load(path: impl AsRef<Path>) -> PanelResult<Self> {
        let catalogue = Self {
            path: path.as_ref().to_path_buf(),
            entries: RwLock::new(HashMap::new()),
        };
        catalogue.reload()?;
        Ok(catalogue)
    }

    /// The file this catalogue reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetadataCatalogue for TomlCatalogue {
    fn lookup(&self, name: &str, key: MetadataKey) -> PanelResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(name).and_then(|meta| meta.attribute(key)))
    }

    fn reload(&self) -> PanelResult<()> {
        let raw = std::fs::read_to_string(&self.path)?;
        let parsed: HashMap<String, ParameterMeta> =
            toml::from_str(&raw).map_err(|err| PanelError::Catalogue(err.to_string()))?;
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        *entries = parsed;
        Ok(())
    }
}
