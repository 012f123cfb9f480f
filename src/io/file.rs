use std::path::{Path, PathBuf};

use crate::scene::svg::scene_to_svg;
use crate::scene::Scene;

/// Errors that can occur while writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Nothing to export
    #[error("nothing to export: the schedule has no tasks")]
    Empty,

    /// Output file could not be written
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Write the scene to `path` as an SVG document.
pub fn save_svg(scene: &Scene, path: &Path) -> Result<(), ExportError> {
    std::fs::write(path, scene_to_svg(scene)).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), nodes = scene.nodes.len(), "exported SVG");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    fn empty_scene() -> Scene {
        Scene {
            width: 100.0,
            height: 50.0,
            background: Color32::BLACK,
            nodes: Vec::new(),
            hit_regions: Vec::new(),
        }
    }

    #[test]
    fn writes_svg_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        save_svg(&empty_scene(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<svg"));
    }

    #[test]
    fn unwritable_path_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("chart.svg");
        let err = save_svg(&empty_scene(), &path).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
