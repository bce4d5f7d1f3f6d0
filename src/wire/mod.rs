use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// ========================================
/// Pipeline data model and request/response wire shapes
/// ========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationCategory {
    Crud,
    Static,
}

impl ApplicationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationCategory::Crud => "crud",
            ApplicationCategory::Static => "static",
        }
    }
}

impl fmt::Display for ApplicationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative, '/'-separated.
    pub path: String,
    pub content: String,
}

/// Ordered path -> content mapping. Order is first appearance; a repeated
/// path replaces the earlier content in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: Vec<GeneratedFile>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        let path = path.into();
        let content = content.into();
        match self.files.iter_mut().find(|f| f.path == path) {
            Some(existing) => existing.content = content,
            None => self.files.push(GeneratedFile { path, content }),
        }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.iter().find(|f| f.path == path).map(|f| f.content.as_str())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for FileSet {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut set = FileSet::new();
        for (p, c) in iter {
            set.insert(p, c);
        }
        set
    }
}

impl Serialize for FileSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.files.len()))?;
        for f in &self.files {
            map.serialize_entry(&f.path, &f.content)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FileSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FileSetVisitor;

        impl<'de> Visitor<'de> for FileSetVisitor {
            type Value = FileSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of file path to file content")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FileSet, A::Error> {
                let mut set = FileSet::new();
                while let Some((path, content)) = access.next_entry::<String, String>()? {
                    set.insert(path, content);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(FileSetVisitor)
    }
}

/// Inbound generation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub requested_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<FileSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_path: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<ApplicationCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateResponse {
    pub fn failure(msg: impl Into<String>) -> Self {
        Self { success: false, error: Some(msg.into()), ..Default::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Millisecond timestamp; also names the archive.
    #[serde(rename = "_id")]
    pub id: String,
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub generated_files: FileSet,
    pub created_at: DateTime<Utc>,
}

/// Record held by the co-located item collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrudItem {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Keys owned by the store; caller-supplied values for them are ignored.
pub const RESERVED_ITEM_KEYS: [&str; 3] = ["id", "createdAt", "updatedAt"];

impl CrudItem {
    /// Shallow merge of `patch` over the user fields.
    pub fn merge_fields(&mut self, patch: Map<String, Value>) {
        for (k, v) in patch {
            if RESERVED_ITEM_KEYS.contains(&k.as_str()) {
                continue;
            }
            self.fields.insert(k, v);
        }
    }
}
