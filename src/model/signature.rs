use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

use super::ids::{ContentHash, FilePath, VersionLabel};

/// One version label and the hash the checked file had under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureEntry {
    pub label: VersionLabel,
    pub hash: ContentHash,
}

/// Signatures of a single checked file across all detected versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureDocument {
    pub project: String,
    pub check_file: FilePath,
    entries: Vec<SignatureEntry>,
}

impl SignatureDocument {
    pub fn new(project: impl Into<String>, check_file: FilePath) -> Self {
        Self {
            project: project.into(),
            check_file,
            entries: Vec::new(),
        }
    }

    /// Add an entry. An existing label keeps its position and takes the new hash.
    pub fn insert(&mut self, label: VersionLabel, hash: ContentHash) {
        match self.entries.iter_mut().find(|e| e.label == label) {
            Some(entry) => entry.hash = hash,
            None => self.entries.push(SignatureEntry { label, hash }),
        }
    }

    pub fn get(&self, label: &VersionLabel) -> Option<&ContentHash> {
        self.entries
            .iter()
            .find(|e| &e.label == label)
            .map(|e| &e.hash)
    }

    pub fn entries(&self) -> &[SignatureEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Serialized as {"config": {"app_name", "check_file"}, "sigs": {label: hash}}
// with sigs in insertion order.
impl Serialize for SignatureDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut doc = serializer.serialize_struct("SignatureDocument", 2)?;
        doc.serialize_field(
            "config",
            &DocumentConfig {
                app_name: &self.project,
                check_file: &self.check_file,
            },
        )?;
        doc.serialize_field("sigs", &SigsTable(&self.entries))?;
        doc.end()
    }
}

#[derive(serde::Serialize)]
struct DocumentConfig<'a> {
    app_name: &'a str,
    check_file: &'a FilePath,
}

struct SigsTable<'a>(&'a [SignatureEntry]);

impl Serialize for SigsTable<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.label, &entry.hash)?;
        }
        map.end()
    }
}
