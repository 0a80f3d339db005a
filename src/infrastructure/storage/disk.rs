//! On-disk storage backend
//!
//! Layout under the configured root:
//!
//! ```text
//! <root>/
//!   .lock                      writer lock (fs2)
//!   records/<sha256(id)>.json  one JSON document per record
//!   alternates/<sha256(alt)>   internal id of the resource with that alternate id
//!   catalog/<kind>/<sha256(model)>/<sha256(id)>
//!                              empty marker per resource record
//! ```
//!
//! File names are hashes so any identifier is a safe file name. Every file is
//! written to a temp file in the same directory and renamed into place.
//! Scans pick and page their entries from the catalog by directory listing
//! and decode only the records they return.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::entities::StoredRecord;
use crate::domain::ports::{ModelFilter, ScanPage, StorageBackend, StorageError, StorageResult};
use crate::domain::value_objects::Identifier;

const RECORDS_DIR: &str = "records";
const ALTERNATES_DIR: &str = "alternates";
const CATALOG_DIR: &str = "catalog";
const LOCK_FILE: &str = ".lock";

#[derive(Debug, Clone)]
pub struct DiskBackend {
    root: PathBuf,
}

impl DiskBackend {
    /// Open (creating if needed) a store rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        for dir in [
            root.join(RECORDS_DIR),
            root.join(ALTERNATES_DIR),
            root.join(CATALOG_DIR),
        ] {
            fs::create_dir_all(&dir).map_err(|source| StorageError::Io { path: dir, source })?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: &Identifier) -> PathBuf {
        self.record_path_for_key(&file_key(id))
    }

    fn record_path_for_key(&self, key: &str) -> PathBuf {
        self.root.join(RECORDS_DIR).join(format!("{key}.json"))
    }

    fn catalog_path(&self, key: &str, kind: &str, model: &str) -> PathBuf {
        self.root
            .join(CATALOG_DIR)
            .join(kind)
            .join(text_key(model))
            .join(key)
    }

    /// Catalog model directories that can hold entries passing `filter`
    fn catalog_dirs(&self, filter: &ModelFilter) -> StorageResult<Vec<PathBuf>> {
        let root = self.root.join(CATALOG_DIR);
        let kind_dirs = match filter {
            ModelFilter::Kind(kind) => vec![root.join(kind.to_string())],
            _ => list_dir(&root)?,
        };
        let mut dirs = Vec::new();
        for kind_dir in kind_dirs {
            match filter {
                ModelFilter::Model(model) => dirs.push(kind_dir.join(text_key(model))),
                _ => dirs.extend(list_dir(&kind_dir)?),
            }
        }
        Ok(dirs)
    }

    fn alternate_path(&self, alternate_id: &Identifier) -> PathBuf {
        self.root.join(ALTERNATES_DIR).join(file_key(alternate_id))
    }

    fn lock(&self) -> StorageResult<fs::File> {
        let (file, path) = self.lock_file()?;
        file.lock_exclusive()
            .map_err(|source| StorageError::Io { path, source })?;
        Ok(file)
    }

    fn lock_shared(&self) -> StorageResult<fs::File> {
        let (file, path) = self.lock_file()?;
        file.lock_shared()
            .map_err(|source| StorageError::Io { path, source })?;
        Ok(file)
    }

    fn lock_file(&self) -> StorageResult<(fs::File, PathBuf)> {
        let path = self.root.join(LOCK_FILE);
        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;
        Ok((file, path))
    }

    fn load(&self, path: &Path) -> StorageResult<Option<StoredRecord>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                location: path.display().to_string(),
                message: e.to_string(),
            })
    }

    fn write_locked(&self, id: &Identifier, record: &StoredRecord) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(record).map_err(|e| StorageError::Serialization {
            id: id.to_string(),
            message: e.to_string(),
        })?;

        let path = self.record_path(id);
        if let Some(alternate) = record.alternate_id() {
            if let Some(previous) = self.load(&path)? {
                if let Some(old) = previous.alternate_id().filter(|old| *old != alternate) {
                    remove_if_present(&self.alternate_path(old))?;
                }
            }
            atomic_write(&self.alternate_path(alternate), id.as_str().as_bytes())?;
        }
        atomic_write(&path, json.as_bytes())?;
        self.catalog_locked(&file_key(id), record)
    }

    fn remove_locked(&self, id: &Identifier) -> StorageResult<()> {
        let key = file_key(id);
        let path = self.record_path_for_key(&key);
        // An unreadable record still goes; only its alternate entry may linger
        if let Ok(Some(previous)) = self.load(&path) {
            if let Some(alternate) = previous.alternate_id() {
                remove_if_present(&self.alternate_path(alternate))?;
            }
        }
        for dir in self.catalog_dirs(&ModelFilter::All)? {
            remove_if_present(&dir.join(&key))?;
        }
        remove_if_present(&path)
    }

    /// Point the catalog at the record just written under `key`
    fn catalog_locked(&self, key: &str, record: &StoredRecord) -> StorageResult<()> {
        let current = record
            .as_resource()
            .map(|r| self.catalog_path(key, &r.kind.to_string(), &r.model));
        if let Some(marker) = &current {
            if let Some(dir) = marker.parent() {
                fs::create_dir_all(dir).map_err(|source| StorageError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
            atomic_write(marker, &[])?;
        }
        for dir in self.catalog_dirs(&ModelFilter::All)? {
            let stale = dir.join(key);
            if Some(&stale) != current.as_ref() {
                remove_if_present(&stale)?;
            }
        }
        Ok(())
    }

    /// Decode the record behind a catalog entry
    fn load_entry(&self, key: &str, filter: &ModelFilter) -> StorageResult<StoredRecord> {
        let path = self.record_path_for_key(key);
        let corrupt = |message: &str| StorageError::Corrupt {
            location: path.display().to_string(),
            message: message.to_string(),
        };
        match self.load(&path)? {
            Some(record) if filter.matches(&record) => Ok(record),
            Some(_) => Err(corrupt("catalog entry disagrees with stored record")),
            None => Err(corrupt("catalogued record is missing")),
        }
    }
}

fn file_key(id: &Identifier) -> String {
    text_key(id.as_str())
}

fn text_key(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}

/// Entries of `dir`, sorted; a missing directory is empty
fn list_dir(dir: &Path) -> StorageResult<Vec<PathBuf>> {
    let io_err = |source| StorageError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(io_err(source)),
    };
    let mut paths = Vec::new();
    for entry in entries {
        paths.push(entry.map_err(io_err)?.path());
    }
    paths.sort();
    Ok(paths)
}

fn atomic_write(path: &Path, content: &[u8]) -> StorageResult<()> {
    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(content).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

fn remove_if_present(path: &Path) -> StorageResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(StorageError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl StorageBackend for DiskBackend {
    fn name(&self) -> &'static str {
        "disk"
    }

    fn write(&self, record: StoredRecord) -> StorageResult<()> {
        let id = record.id().cloned().ok_or_else(|| StorageError::Rejected {
            backend: self.name(),
            id: String::new(),
            reason: "record has no identifier".to_string(),
        })?;

        let lock = self.lock()?;
        let result = self.write_locked(&id, &record);
        let _ = lock.unlock();

        if result.is_ok() {
            debug!(id = %id, root = %self.root.display(), "wrote record");
        }
        result
    }

    fn remove(&self, id: &Identifier) -> StorageResult<()> {
        let lock = self.lock()?;
        let result = self.remove_locked(id);
        let _ = lock.unlock();
        result
    }

    fn read(&self, id: &Identifier) -> StorageResult<Option<StoredRecord>> {
        self.load(&self.record_path(id))
    }

    fn read_by_alternate(&self, alternate_id: &Identifier) -> StorageResult<Option<StoredRecord>> {
        let path = self.alternate_path(alternate_id);
        let id = match fs::read_to_string(&path) {
            Ok(id) => id,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        let Some(id) = Identifier::parse(&id) else {
            return Err(StorageError::Corrupt {
                location: path.display().to_string(),
                message: "empty alternate index entry".to_string(),
            });
        };
        self.read(&id)
    }

    fn scan(
        &self,
        filter: &ModelFilter,
        offset: usize,
        limit: usize,
    ) -> StorageResult<ScanPage> {
        let lock = self.lock_shared()?;
        let result = self.catalog_dirs(filter).and_then(|dirs| -> StorageResult<ScanPage> {
            let mut keys = Vec::new();
            for dir in dirs {
                for marker in list_dir(&dir)? {
                    let Some(key) = marker.file_name().and_then(|n| n.to_str()) else {
                        continue;
                    };
                    // Temp files from an interrupted marker write
                    if key.starts_with('.') {
                        continue;
                    }
                    keys.push(key.to_string());
                }
            }
            keys.sort();
            keys.dedup();
            Ok(keys
                .iter()
                .skip(offset)
                .take(limit)
                .map(|key| self.load_entry(key, filter))
                .collect())
        });
        let _ = lock.unlock();
        result
    }
}
