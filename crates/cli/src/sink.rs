// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON-lines record store.
//!
//! Each created service order is appended to the output file as one JSON
//! object per line. The folio doubles as the stored identifier.

use grua_import::{CandidateRecord, CreateError, RecordCreator};
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::CliError;

/// Appends created records to a JSON-lines file.
#[derive(Debug)]
pub struct JsonLinesCreator {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesCreator {
    /// Opens `path` for appending, creating it if missing.
    pub async fn open(path: &Path) -> Result<Self, CliError> {
        let file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| CliError::io(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// The output path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordCreator for JsonLinesCreator {
    async fn create(&self, record: &CandidateRecord) -> Result<String, CreateError> {
        let mut line: String =
            serde_json::to_string(record).map_err(|e| CreateError::Rejected(e.to_string()))?;
        line.push('\n');

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| CreateError::Transport(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| CreateError::Transport(e.to_string()))?;

        debug!("Stored folio {} in {}", record.folio, self.path.display());
        Ok(record.folio.clone())
    }
}

/// Reads the folios already stored in `path`.
///
/// A missing file yields no folios. Lines that do not parse as a record are
/// skipped with a warning.
pub async fn stored_folios(path: &Path) -> Result<Vec<String>, CliError> {
    let content: String = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(CliError::io(path, e)),
    };

    let mut folios: Vec<String> = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<CandidateRecord>(line) {
            Ok(record) => folios.push(record.folio),
            Err(e) => warn!(
                "Skipping unreadable line {} in {}: {}",
                idx + 1,
                path.display(),
                e
            ),
        }
    }

    Ok(folios)
}
