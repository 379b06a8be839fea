use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slide2048_engine::StoreError;

use crate::key_value::KeyValueStore;

/// On-disk layout of a [`JsonFileStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreDocument {
    /// When an entry was last written
    updated_at: Option<DateTime<Utc>>,
    entries: BTreeMap<String, String>,
}

/// [`KeyValueStore`] persisted as a single pretty-printed JSON document.
///
/// The whole document is rewritten on every [`set`](KeyValueStore::set). A
/// missing file opens as an empty store; an unreadable or malformed file is
/// logged and also opens empty, so a corrupt save never prevents playing.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    document: StoreDocument,
}

impl JsonFileStore {
    pub fn open<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        let path = path.into();
        let document = match read_document(&path) {
            Ok(Some(document)) => document,
            Ok(None) => StoreDocument::default(),
            Err(e) => {
                log::warn!("ignoring unreadable store {}: {e}", path.display());
                StoreDocument::default()
            }
        };
        Self { path, document }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.document.updated_at
    }

    fn write_document(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(StoreError::Io)?;
        }
        let file = File::create(&self.path).map_err(StoreError::Io)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.document).map_err(|e| {
            StoreError::Encode {
                message: format!("{}: {e}", self.path.display()),
            }
        })?;
        writeln!(&mut writer).map_err(StoreError::Io)?;
        writer.flush().map_err(StoreError::Io)?;
        Ok(())
    }
}

fn read_document(path: &Path) -> Result<Option<StoreDocument>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::Io(e)),
    };
    let document = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        StoreError::Encode {
            message: e.to_string(),
        }
    })?;
    Ok(Some(document))
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.document.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_many(&[(key, value)])
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        for &(key, value) in entries {
            self.document
                .entries
                .insert(key.to_owned(), value.to_owned());
        }
        self.document.updated_at = Some(Utc::now());
        self.write_document()
    }
}
