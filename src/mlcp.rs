//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may obtain a copy of the License at
//  http://www.apache.org/licenses/LICENSE-2.0
//
//! Driver for the MarkLogic Content Pump (`mlcp`), an external
//! command-line tool for bulk imports too large for the REST loaders.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::debug;

use crate::error::{svc_err, MgmtError};
use crate::handle::Handle;

const WORK_DIR: &str = ".mlcp";

/// Runs an `mlcp` import as a subprocess, with connection parameters
/// taken from the [`Handle`] it is given at load time.
///
/// The caller supplies the location of the `mlcp` launcher script; this
/// library does not download or install the tool.
#[derive(Debug, Clone)]
pub struct MlcpLoader {
    command: PathBuf,
    input_path: PathBuf,
    database: Option<String>,
    input_file_type: Option<String>,
    output_uri_prefix: Option<String>,
    output_collections: Vec<String>,
    work_dir: PathBuf,
}

impl MlcpLoader {
    /// Create a loader that runs the launcher at `command` to import the
    /// files under `input_path`.
    pub fn new(command: impl AsRef<Path>, input_path: impl AsRef<Path>) -> MlcpLoader {
        MlcpLoader {
            command: command.as_ref().to_path_buf(),
            input_path: input_path.as_ref().to_path_buf(),
            database: None,
            input_file_type: None,
            output_uri_prefix: None,
            output_collections: Vec::new(),
            work_dir: PathBuf::from(WORK_DIR),
        }
    }

    /// Target database. When unset, mlcp imports into the app server's
    /// attached database.
    pub fn set_database(mut self, database: &str) -> Self {
        self.database = Some(database.to_string());
        self
    }

    /// Input file type passed through as `-input_file_type`, for example
    /// `documents` or `delimited_text`.
    pub fn set_input_file_type(mut self, which: &str) -> Self {
        self.input_file_type = Some(which.to_string());
        self
    }

    pub fn set_output_uri_prefix(mut self, prefix: &str) -> Self {
        self.output_uri_prefix = Some(prefix.to_string());
        self
    }

    /// Add a collection every imported document is tagged with.
    pub fn add_output_collection(mut self, collection: &str) -> Self {
        self.output_collections.push(collection.to_string());
        self
    }

    /// Override the scratch directory. Defaults to `.mlcp`.
    pub fn set_work_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.work_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Remove the loader's scratch directory. A directory that does not
    /// exist is not an error.
    pub async fn clear_directory(&self) -> Result<(), MgmtError> {
        match tokio::fs::remove_dir_all(&self.work_dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    // The full import argument list, minus the password so it can be
    // logged.
    fn import_args(&self, h: &Handle) -> Vec<String> {
        let mut args = vec![
            "import".to_string(),
            "-host".to_string(),
            h.host().to_string(),
            "-port".to_string(),
            h.port().to_string(),
            "-username".to_string(),
            h.username().to_string(),
            "-input_file_path".to_string(),
            self.input_path.to_string_lossy().into_owned(),
        ];
        if let Some(db) = &self.database {
            args.push("-database".to_string());
            args.push(db.clone());
        }
        if let Some(t) = &self.input_file_type {
            args.push("-input_file_type".to_string());
            args.push(t.clone());
        }
        if let Some(p) = &self.output_uri_prefix {
            args.push("-output_uri_prefix".to_string());
            args.push(p.clone());
        }
        if !self.output_collections.is_empty() {
            args.push("-output_collections".to_string());
            args.push(self.output_collections.join(","));
        }
        args
    }

    /// Run the import against the server the handle points at. A launcher
    /// that cannot be spawned is an `IoError`; a nonzero exit is a
    /// `ServiceError` carrying the tool's standard error output.
    pub async fn load(&self, h: &Handle) -> Result<(), MgmtError> {
        let args = self.import_args(h);
        debug!("running {} {}", self.command.display(), args.join(" "));
        let output = Command::new(&self.command)
            .args(&args)
            .arg("-password")
            .arg(h.password())
            .output()
            .await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return svc_err!(
                "mlcp exited with {}: {}",
                output.status,
                stderr.trim_end()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_handle() -> Handle {
        Handle::builder()
            .host("ml.example.com")
            .unwrap()
            .digest_auth("admin", "admin")
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn import_args_carry_connection_settings() {
        let loader = MlcpLoader::new("/opt/mlcp/bin/mlcp.sh", "/data/in")
            .set_database("invoices_db")
            .set_input_file_type("documents")
            .add_output_collection("bulk")
            .add_output_collection("2026-08");
        let args = loader.import_args(&test_handle());
        assert_eq!(args[0], "import");
        assert!(args.windows(2).any(|w| w == ["-host", "ml.example.com"]));
        assert!(args.windows(2).any(|w| w == ["-port", "8000"]));
        assert!(args.windows(2).any(|w| w == ["-database", "invoices_db"]));
        assert!(args
            .windows(2)
            .any(|w| w == ["-output_collections", "bulk,2026-08"]));
        // the password never appears in the loggable argument list
        assert!(!args.iter().any(|a| a == "-password"));
    }

    #[tokio::test]
    async fn clear_directory_tolerates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("scratch");
        let loader = MlcpLoader::new("mlcp.sh", "/data").set_work_dir(&scratch);
        loader.clear_directory().await.unwrap();

        std::fs::create_dir(&scratch).unwrap();
        std::fs::write(scratch.join("leftover"), b"x").unwrap();
        loader.clear_directory().await.unwrap();
        assert!(!scratch.exists());
    }

    #[tokio::test]
    async fn failing_launcher_is_io_error() {
        let loader = MlcpLoader::new("/no/such/mlcp.sh", "/data");
        let err = loader.load(&test_handle()).await.unwrap_err();
        assert_eq!(err.code, crate::MgmtErrorCode::IoError);
    }
}
