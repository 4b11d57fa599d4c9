// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference snapshot files.
//!
//! A snapshot is a JSON export of the clients, cranes, operators and
//! folios that already exist, taken once before an import run.

use grua_import::{ClientRef, CraneRef, OperatorRef, ReferenceSnapshots};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::CliError;

/// The on-disk snapshot document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// Existing clients.
    #[serde(default)]
    pub clients: Vec<ClientRef>,
    /// Existing cranes.
    #[serde(default)]
    pub cranes: Vec<CraneRef>,
    /// Existing operators.
    #[serde(default)]
    pub operators: Vec<OperatorRef>,
    /// Folios already persisted.
    #[serde(default)]
    pub existing_folios: Vec<String>,
}

impl SnapshotFile {
    /// Loads a snapshot from `path`.
    pub async fn load(path: &Path) -> Result<Self, CliError> {
        let content: String = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CliError::io(path, e))?;
        let snapshot: Self = serde_json::from_str(&content).map_err(|e| CliError::json(path, e))?;

        info!(
            "Loaded snapshot: {} clients, {} cranes, {} operators, {} folios",
            snapshot.clients.len(),
            snapshot.cranes.len(),
            snapshot.operators.len(),
            snapshot.existing_folios.len()
        );

        Ok(snapshot)
    }

    /// Borrowed reference views for validation.
    pub fn references(&self) -> ReferenceSnapshots<'_> {
        ReferenceSnapshots::new(&self.clients, &self.cranes, &self.operators)
    }

    /// Adds folios not already listed.
    pub fn extend_existing_folios(&mut self, folios: impl IntoIterator<Item = String>) {
        for folio in folios {
            if !self.existing_folios.contains(&folio) {
                self.existing_folios.push(folio);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_snapshot_missing_sections_default_to_empty() {
        let json: &str = r#"{ "clients": [ { "rut": "76.123.456-7" } ] }"#;

        let snapshot: SnapshotFile = serde_json::from_str(json).expect("valid snapshot");

        assert_eq!(snapshot.clients.len(), 1);
        assert_eq!(snapshot.clients[0].name, "");
        assert!(snapshot.cranes.is_empty());
        assert!(snapshot.existing_folios.is_empty());
    }

    #[test]
    fn test_extend_existing_folios_skips_known() {
        let mut snapshot: SnapshotFile = SnapshotFile {
            existing_folios: vec![String::from("1")],
            ..SnapshotFile::default()
        };

        snapshot.extend_existing_folios(vec![String::from("1"), String::from("2")]);

        assert_eq!(snapshot.existing_folios, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_load_reports_invalid_json() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, "{ not json").expect("write");

        let result: Result<SnapshotFile, CliError> = SnapshotFile::load(&path).await;
        assert!(matches!(result, Err(CliError::Json { .. })));
    }

    #[tokio::test]
    async fn test_load_reads_all_sections() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("snapshot.json");
        std::fs::write(
            &path,
            r#"{
                "clients": [ { "rut": "76.123.456-7", "name": "Transportes del Sur" } ],
                "cranes": [ { "plate": "ABCD-12" } ],
                "operators": [ { "rut": "12.345.678-9" } ],
                "existing_folios": [ "900" ]
            }"#,
        )
        .expect("write");

        let snapshot: SnapshotFile = SnapshotFile::load(&path).await.expect("valid snapshot");
        assert_eq!(snapshot.references().cranes[0].plate, "ABCD-12");
        assert_eq!(snapshot.existing_folios, vec!["900"]);
    }
}
