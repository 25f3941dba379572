use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const STYLESHEET_FILE: &str = "style.css";

/// Reads the global stylesheet once. Any failure leaves the chrome unstyled.
pub fn load(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(css) => {
            log::info!("[Style] {} loaded ({} bytes)", STYLESHEET_FILE, css.len());
            Some(css)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!(
                "[Style] {} not found at {:?}. UI may not be styled as expected.",
                STYLESHEET_FILE,
                path
            );
            None
        }
        Err(e) => {
            log::error!("[Style] Failed to read {:?}: {}", path, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STYLESHEET_FILE);
        fs::write(&path, "body { margin: 0; }").unwrap();
        assert_eq!(load(&path).as_deref(), Some("body { margin: 0; }"));
    }

    #[test]
    fn test_missing_file_degrades() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(&dir.path().join(STYLESHEET_FILE)), None);
    }

    #[test]
    fn test_directory_degrades() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(dir.path()), None);
    }
}
