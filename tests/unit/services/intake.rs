//! Tests for validation of user-supplied image files

#[cfg(test)]
mod tests {
    use puzzleme::PuzzleError;
    use puzzleme::services::intake::{declared_image_type, intake_image_file};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    // Tests declared types come from the extension
    // Verified by sniffing file contents instead
    #[test]
    fn test_declared_image_type() {
        assert_eq!(declared_image_type(Path::new("a.png")), Some("image/png"));
        assert_eq!(declared_image_type(Path::new("a.JPG")), Some("image/jpeg"));
        assert_eq!(declared_image_type(Path::new("notes.txt")), None);
        assert_eq!(declared_image_type(Path::new("noextension")), None);
    }

    // Tests an image file is accepted
    // Verified by rejecting every upload
    #[test]
    fn test_intake_accepts_image() {
        let Ok(dir) = TempDir::new() else { return };
        let path = dir.path().join("photo.png");
        assert!(image::RgbImage::new(2, 2).save(&path).is_ok());

        let Ok(handle) = intake_image_file(&path) else {
            panic!("valid upload rejected");
        };
        assert!(handle.as_str().ends_with("photo.png"));
    }

    // Tests non-image files are rejected with their declared type
    // Verified by accepting any existing file
    #[test]
    fn test_intake_rejects_non_image() {
        let Ok(dir) = TempDir::new() else { return };
        let path = dir.path().join("notes.txt");
        assert!(fs::write(&path, "hello").is_ok());

        match intake_image_file(&path) {
            Err(PuzzleError::InvalidFile { declared_type, .. }) => assert_eq!(declared_type, "txt"),
            other => panic!("expected InvalidFile, got {other:?}"),
        }
    }

    // Tests a missing image file is a file system error
    // Verified by skipping the existence check
    #[test]
    fn test_intake_missing_file() {
        assert!(matches!(
            intake_image_file(Path::new("/nonexistent/picture.png")),
            Err(PuzzleError::FileSystem { .. })
        ));
    }
}
