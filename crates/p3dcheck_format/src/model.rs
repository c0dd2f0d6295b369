//! Decoded model tree: LODs, property tables, diagnostics.
//!
//! The decoder creates a [`Model`], fills it LOD by LOD, and hands it to the
//! verification pass, which appends diagnostics. Consumers downstream only
//! read. LOD and property order is decode order, which is not sorted by
//! resolution in real files.

use std::path::{Path, PathBuf};

use crate::resolution::LodResolution;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worth looking at, does not fail a check run.
    Warning,
    /// A finding that fails the check run.
    Error,
}

/// A finding attached to the LOD that carries the offending property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Lower-cased property name, or the colliding resolution for LOD-level
    /// findings.
    pub property: String,
    /// Human-readable message.
    pub message: String,
    /// Finding severity.
    pub severity: Severity,
}

impl Diagnostic {
    /// Creates an error-severity diagnostic.
    #[must_use]
    pub fn error(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Creates a warning-severity diagnostic.
    #[must_use]
    pub fn warning(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// A property value plus where its key started in the source stream.
///
/// The position is kept for future quick-fix tooling; nothing in the check
/// pipeline reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Raw value string as stored in the file.
    pub value: String,
    /// Absolute byte offset of the key field.
    pub position: usize,
}

/// One level of detail: named properties plus the diagnostics raised on them.
#[derive(Debug, Clone, Default)]
pub struct Lod {
    properties: Vec<(String, Property)>,
    diagnostics: Vec<Diagnostic>,
}

impl Lod {
    /// Creates an empty LOD.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a property under its lower-cased key.
    ///
    /// A key seen before keeps its FIRST value; the repeat is discarded and
    /// recorded as an error diagnostic.
    pub fn insert_property(&mut self, key: &str, value: String, position: usize) {
        let key = key.to_lowercase();
        if self.property(&key).is_some() {
            self.diagnostics.push(Diagnostic::error(
                key,
                "Duplicate property definition. First value is kept",
            ));
            return;
        }
        self.properties.push((key, Property { value, position }));
    }

    /// Looks up a property by its lower-cased name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, p)| p)
    }

    /// Properties in decode order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.properties.iter().map(|(k, p)| (k.as_str(), p))
    }

    /// Number of properties in the table.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Appends a diagnostic.
    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Diagnostics in the order they were raised.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether any diagnostic has error severity.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Whether any diagnostic has warning severity.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Warning)
    }
}

/// Insertion-ordered resolution → LOD mapping.
///
/// Keys are addressed by exact bit value: resolutions read back from a file
/// repeat bit-for-bit, and shifted keys such as a shadow LOD's base offset
/// must not swallow near misses. The tolerant comparison on
/// [`LodResolution`] itself is for category tests, not table addressing.
/// Decode order must survive, so this is a vector of pairs with linear
/// lookup; real models hold a handful of LODs.
#[derive(Debug, Clone, Default)]
pub struct LodMap {
    entries: Vec<(LodResolution, Lod)>,
}

fn same_key(a: LodResolution, b: LodResolution) -> bool {
    a.value().to_bits() == b.value().to_bits()
}

impl LodMap {
    /// Number of LODs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no LODs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a LOD exists at exactly this resolution.
    #[must_use]
    pub fn contains(&self, resolution: LodResolution) -> bool {
        self.entries.iter().any(|(r, _)| same_key(*r, resolution))
    }

    /// The LOD at exactly this resolution, if any.
    #[must_use]
    pub fn get(&self, resolution: LodResolution) -> Option<&Lod> {
        self.entries
            .iter()
            .find(|(r, _)| same_key(*r, resolution))
            .map(|(_, lod)| lod)
    }

    /// Inserts a LOD, replacing the incumbent when the key already exists.
    pub fn insert(&mut self, resolution: LodResolution, lod: Lod) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(r, _)| same_key(*r, resolution))
        {
            entry.1 = lod;
        } else {
            self.entries.push((resolution, lod));
        }
    }

    /// LODs in decode order.
    pub fn iter(&self) -> impl Iterator<Item = (&LodResolution, &Lod)> {
        self.entries.iter().map(|(r, lod)| (r, lod))
    }

    /// Mutable iteration in decode order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&LodResolution, &mut Lod)> {
        self.entries.iter_mut().map(|(r, lod)| (&*r, lod))
    }
}

/// A decoded model file: source path plus its LODs.
#[derive(Debug, Clone)]
pub struct Model {
    path: PathBuf,
    lods: LodMap,
}

impl Model {
    /// Creates an empty model for the given source path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lods: LodMap::default(),
        }
    }

    /// The file this model was decoded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The LOD mapping.
    #[must_use]
    pub fn lods(&self) -> &LodMap {
        &self.lods
    }

    /// Mutable access for the verification pass.
    pub fn lods_mut(&mut self) -> &mut LodMap {
        &mut self.lods
    }

    /// Inserts a freshly decoded LOD.
    ///
    /// A resolution collision marks the NEW LOD with a diagnostic and lands
    /// it under both `resolution + 5` and the original key, displacing the
    /// incumbent. Compatibility behavior; see the duplicate handling notes
    /// in the decoder.
    pub fn insert_lod(&mut self, resolution: LodResolution, mut lod: Lod) {
        if self.lods.contains(resolution) {
            lod.push_diagnostic(Diagnostic::error(
                resolution.value().to_string(),
                "Duplicate LOD resolution",
            ));
            self.lods
                .insert(LodResolution::new(resolution.value() + 5.0), lod.clone());
            self.lods.insert(resolution, lod);
        } else {
            self.lods.insert(resolution, lod);
        }
    }

    /// Whether any LOD carries at least one diagnostic.
    #[must_use]
    pub fn has_diagnostics(&self) -> bool {
        self.lods.iter().any(|(_, lod)| !lod.diagnostics().is_empty())
    }

    /// Whether any LOD carries an error-severity diagnostic.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.lods.iter().any(|(_, lod)| lod.has_errors())
    }
}
