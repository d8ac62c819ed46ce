use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Certificate;
use tracing::debug;

use crate::client::ClientError;

const PEM_EXTENSIONS: &[&str] = &["pem", "crt", "cer"];

/// Load the trusted roots from an optional CA bundle directory and file.
///
/// Returns an empty list when neither is set. Any bundle that is given must
/// contribute at least one certificate.
pub(crate) fn load_ca_bundle(
    dir: Option<&Path>,
    file: Option<&Path>,
) -> Result<Vec<Certificate>, ClientError> {
    let mut certs = Vec::new();

    if let Some(dir) = dir {
        let files = pem_files_in(dir)?;
        if files.is_empty() {
            return Err(config_error(dir, "no PEM files found in directory"));
        }
        for path in files {
            certs.extend(load_pem_file(&path)?);
        }
    }

    if let Some(file) = file {
        certs.extend(load_pem_file(file)?);
    }

    Ok(certs)
}

fn pem_files_in(dir: &Path) -> Result<Vec<PathBuf>, ClientError> {
    let entries = fs::read_dir(dir).map_err(|e| config_error(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| config_error(dir, e))?.path();
        let is_pem = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| PEM_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
        if is_pem && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn load_pem_file(path: &Path) -> Result<Vec<Certificate>, ClientError> {
    let pem = fs::read(path).map_err(|e| config_error(path, e))?;
    let certs = Certificate::from_pem_bundle(&pem).map_err(|e| config_error(path, e))?;
    if certs.is_empty() {
        return Err(config_error(path, "no PEM certificates found"));
    }
    debug!(path = %path.display(), count = certs.len(), "loaded CA certificates");
    Ok(certs)
}

fn config_error(path: &Path, reason: impl ToString) -> ClientError {
    ClientError::Config {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
