use std::{
    fs::{self, Permissions},
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{core::daily::DailyMinimum, error::PipelineError, prelude::*};

#[derive(Serialize)]
struct Row {
    #[serde(rename = "data")]
    date: String,

    #[serde(rename = "godzina_min")]
    hour: String,

    #[serde(rename = "cena_min_godzinna_PLN_MWh")]
    price: f64,
}

impl From<&DailyMinimum> for Row {
    fn from(minimum: &DailyMinimum) -> Self {
        Self {
            date: minimum.date.format("%Y-%m-%d").to_string(),
            hour: minimum.hour.format("%Y-%m-%d %H:%M").to_string(),
            price: minimum.price.0,
        }
    }
}

/// Write the daily minima as UTF-8 CSV, replacing the file if it exists.
///
/// The rows go into a temporary file next to the destination which then replaces it,
/// so the destination either holds the complete result or stays untouched.
/// Symlinks are followed, and an existing file keeps its permissions.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn write(minima: &[DailyMinimum], path: &Path) -> Result<usize, PipelineError> {
    let into_io = |source: csv::Error| PipelineError::Io { path: path.to_path_buf(), source };

    let target = resolve_target(path);
    let directory = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    if let Some(permissions) = target_permissions(&target) {
        builder.permissions(permissions);
    }
    let file = builder.tempfile_in(directory).map_err(|error| into_io(error.into()))?;

    let mut writer = csv::Writer::from_writer(file);
    for minimum in minima {
        writer.serialize(Row::from(minimum)).map_err(into_io)?;
    }
    let file = writer.into_inner().map_err(|error| into_io(error.into_error().into()))?;
    file.persist(&target).map_err(|error| into_io(error.error.into()))?;

    info!(n_rows = minima.len(), "written");
    Ok(minima.len())
}

/// Follow the symlinks of an existing destination.
fn resolve_target(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Permissions of the existing file, or the usual `rw-r--r--` for a new one.
fn target_permissions(target: &Path) -> Option<Permissions> {
    if let Ok(metadata) = fs::metadata(target) {
        return Some(metadata.permissions());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(Permissions::from_mode(0o644))
    }

    #[cfg(not(unix))]
    {
        None
    }
}
