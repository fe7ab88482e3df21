use std::path::Path;

use super::PredictionError;

/// Default upload limit: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// An image ready to be sent to the prediction service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ScanUpload {
    /// Read an image from disk, enforcing the size limit and an `image/*` type.
    pub fn from_path(path: &Path, max_bytes: u64) -> Result<Self, PredictionError> {
        let display = path.display().to_string();
        let size = std::fs::metadata(path)?.len();
        if size > max_bytes {
            return Err(PredictionError::FileTooLarge {
                size,
                max: max_bytes,
            });
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scan".to_string());
        let mime_type =
            image_mime_type(path).ok_or_else(|| PredictionError::NotAnImage(display.clone()))?;

        let bytes = std::fs::read(path)?;
        Self::from_bytes(file_name, mime_type, bytes, max_bytes).map_err(|e| match e {
            PredictionError::EmptyFile(_) => PredictionError::EmptyFile(display),
            other => other,
        })
    }

    /// Build an upload from bytes already in memory.
    pub fn from_bytes(
        file_name: String,
        mime_type: String,
        bytes: Vec<u8>,
        max_bytes: u64,
    ) -> Result<Self, PredictionError> {
        if bytes.is_empty() {
            return Err(PredictionError::EmptyFile(file_name));
        }
        let size = bytes.len() as u64;
        if size > max_bytes {
            return Err(PredictionError::FileTooLarge {
                size,
                max: max_bytes,
            });
        }
        if !mime_type.starts_with("image/") {
            return Err(PredictionError::NotAnImage(file_name));
        }
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Guess an `image/*` MIME type from the file extension.
fn image_mime_type(path: &Path) -> Option<String> {
    mime_guess::from_path(path)
        .iter()
        .find(|m| m.type_().as_str() == "image")
        .map(|m| m.essence_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn reads_png_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "scan.png", b"\x89PNG\r\n\x1a\nfake");
        let upload = ScanUpload::from_path(&path, DEFAULT_MAX_UPLOAD_BYTES).unwrap();
        assert_eq!(upload.file_name, "scan.png");
        assert_eq!(upload.mime_type, "image/png");
        assert_eq!(upload.len(), 12);
    }

    #[test]
    fn rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "big.jpg", &[0u8; 64]);
        let err = ScanUpload::from_path(&path, 32).unwrap_err();
        assert!(matches!(err, PredictionError::FileTooLarge { size: 64, max: 32 }));
    }

    #[test]
    fn rejects_non_image_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "report.pdf", b"%PDF-1.4");
        let err = ScanUpload::from_path(&path, DEFAULT_MAX_UPLOAD_BYTES).unwrap_err();
        assert!(matches!(err, PredictionError::NotAnImage(_)));
    }

    #[test]
    fn rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "empty.jpeg", b"");
        let err = ScanUpload::from_path(&path, DEFAULT_MAX_UPLOAD_BYTES).unwrap_err();
        assert!(matches!(err, PredictionError::EmptyFile(ref p) if p.ends_with("empty.jpeg")));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScanUpload::from_path(&dir.path().join("nope.png"), DEFAULT_MAX_UPLOAD_BYTES)
            .unwrap_err();
        assert!(matches!(err, PredictionError::Io(_)));
    }

    #[test]
    fn from_bytes_checks_mime_type() {
        let err =
            ScanUpload::from_bytes("a.txt".into(), "text/plain".into(), vec![1], 10).unwrap_err();
        assert!(matches!(err, PredictionError::NotAnImage(_)));
    }
}
