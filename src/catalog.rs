// 🗃️ Catalog - the shared project collection and its two backing files
//
// One catalog is constructed at process start and cloned wherever a handle
// is needed; clones share the same Arc-backed storage, so every holder
// observes the same sequence. Saves are full overwrites, one file each.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::codec::{json, text};
use crate::error::{LedgerError, Result};
use crate::record::Project;

/// Default backing file names, kept from the legacy tool (including the
/// upper-case JSON extension).
pub const TEXT_FILE: &str = "ARENA_projects.txt";
pub const JSON_FILE: &str = "ARENA_projects.JSON";

/// Which backing file a load ended up reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Structured,
    Text,
    /// Neither file exists. An empty catalog is a valid initial state,
    /// so this is an outcome, not an error.
    NoData,
}

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Arc<RwLock<Vec<Project>>>,
    text_path: PathBuf,
    json_path: PathBuf,
}

impl Catalog {
    /// Catalog backed by the default file names inside `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        Catalog::with_paths(data_dir.join(TEXT_FILE), data_dir.join(JSON_FILE))
    }

    pub fn with_paths(text_path: PathBuf, json_path: PathBuf) -> Self {
        Catalog {
            projects: Arc::new(RwLock::new(Vec::new())),
            text_path,
            json_path,
        }
    }

    pub fn text_path(&self) -> &Path {
        &self.text_path
    }

    pub fn json_path(&self) -> &Path {
        &self.json_path
    }

    /// Load from the preferred backing file, replacing the collection
    /// wholesale. Structured data wins when both files exist; the text
    /// file is the fallback; neither existing leaves the catalog empty.
    ///
    /// Structured decode errors abort the load. Text decode never fails,
    /// it just drops bad blocks.
    pub fn load(&mut self) -> Result<LoadSource> {
        if self.json_path.exists() {
            let content = fs::read_to_string(&self.json_path)
                .map_err(|e| LedgerError::io(&self.json_path, e))?;
            let loaded = json::decode(&content)?;
            *self.projects.write().unwrap() = loaded;
            return Ok(LoadSource::Structured);
        }

        if self.text_path.exists() {
            let content = fs::read_to_string(&self.text_path)
                .map_err(|e| LedgerError::io(&self.text_path, e))?;
            *self.projects.write().unwrap() = text::decode(&content);
            return Ok(LoadSource::Text);
        }

        Ok(LoadSource::NoData)
    }

    /// Overwrite the structured file with the current collection.
    pub fn save_json(&self) -> Result<()> {
        let encoded = json::encode(&self.projects.read().unwrap())?;
        fs::write(&self.json_path, encoded).map_err(|e| LedgerError::io(&self.json_path, e))
    }

    /// Overwrite the text file with the current collection. Independent of
    /// `save_json`; nothing enforces that the two files ever agree.
    pub fn save_text(&self) -> Result<()> {
        let encoded = text::encode(&self.projects.read().unwrap());
        fs::write(&self.text_path, encoded).map_err(|e| LedgerError::io(&self.text_path, e))
    }

    /// Append to the end of the sequence.
    pub fn add(&mut self, project: Project) {
        self.projects.write().unwrap().push(project);
    }

    /// Full replacement of one entry, old variant and fields discarded.
    /// The catalog is untouched when the index is out of range.
    pub fn replace(&mut self, index: usize, project: Project) -> Result<()> {
        let mut projects = self.projects.write().unwrap();
        if index >= projects.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: projects.len(),
            });
        }
        projects[index] = project;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<Project> {
        self.projects.read().unwrap().get(index).cloned()
    }

    /// Snapshot copy of the whole collection, insertion order preserved.
    pub fn projects(&self) -> Vec<Project> {
        self.projects.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.projects.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Case-insensitive exact match on state. Returns defensive copies;
    /// mutating the result never touches the catalog.
    pub fn find_by_state(&self, state: &str) -> Vec<Project> {
        let wanted = state.to_lowercase();
        self.projects
            .read()
            .unwrap()
            .iter()
            .filter(|project| project.state.to_lowercase() == wanted)
            .cloned()
            .collect()
    }

    /// Case-insensitive exact match on category, defensive copies.
    pub fn find_by_category(&self, category: &str) -> Vec<Project> {
        let wanted = category.to_lowercase();
        self.projects
            .read()
            .unwrap()
            .iter()
            .filter(|project| project.category.to_lowercase() == wanted)
            .cloned()
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
