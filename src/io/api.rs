use std::path::{Path, PathBuf};

use crate::model::GanttApiResponse;

/// Errors that can occur while loading schedule data.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Payload is not a valid schedule response
    #[error("invalid schedule data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a schedule response from JSON text.
pub fn parse_response(json: &str) -> Result<GanttApiResponse, LoadError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a schedule response from a JSON file.
pub fn load_response(path: &Path) -> Result<GanttApiResponse, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let response = parse_response(&json)?;
    tracing::info!(path = %path.display(), tasks = response.tasks.len(), "loaded schedule");
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"tasks":[{{"id":1,"subject":"Kickoff","status":"open"}}],"date_range":{{}}}}"#
        )
        .unwrap();

        let response = load_response(file.path()).unwrap();
        assert_eq!(response.tasks.len(), 1);
        assert_eq!(response.tasks[0].subject, "Kickoff");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_response(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = parse_response("{ tasks: ").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }
}
