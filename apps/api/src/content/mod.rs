//! Content store — the authored data sources on disk.
//!
//! `resume.json` and `translations.json` are re-read on every request, so an
//! edit (or a fresh run of the migration utility) is visible without a
//! restart and no stale copy is ever served. Read and parse failures map to
//! the data-failure taxonomy; they never panic.

use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::models::translations::TranslationTable;

pub const RESUME_FILE: &str = "resume.json";
pub const TRANSLATIONS_FILE: &str = "translations.json";

#[derive(Debug, Clone)]
pub struct ContentStore {
    data_dir: PathBuf,
}

impl ContentStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn resume_path(&self) -> PathBuf {
        self.data_dir.join(RESUME_FILE)
    }

    pub fn translations_path(&self) -> PathBuf {
        self.data_dir.join(TRANSLATIONS_FILE)
    }

    pub async fn load_resume(&self) -> Result<ResumeRecord, AppError> {
        let path = self.resume_path();
        parse_json(&path, &read_file(&path).await?)
    }

    pub async fn load_translations(&self) -> Result<TranslationTable, AppError> {
        let path = self.translations_path();
        parse_json(&path, &read_file(&path).await?)
    }

    /// Raw file body for the data-source endpoints.
    pub async fn read_raw(&self, file_name: &str) -> Result<String, AppError> {
        read_file(&self.data_dir.join(file_name)).await
    }
}

async fn read_file(path: &Path) -> Result<String, AppError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::Data(format!("failed to read {}: {e}", path.display())))
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path, raw: &str) -> Result<T, AppError> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::Data(format!("failed to parse {}: {e}", path.display())))
}
