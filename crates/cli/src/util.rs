use std::io::Read;
use std::path::Path;

/// Read a file and convert to UTF-8 if needed. Spreadsheet exports are
/// frequently Windows-1252; decode those instead of failing.
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| format!("{}: {e}", path.display()))?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.csv");
        std::fs::write(&path, "Name\nAsha Rao\n").unwrap();
        assert_eq!(read_file_as_utf8(&path).unwrap(), "Name\nAsha Rao\n");
    }

    #[test]
    fn falls_back_to_windows_1252() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.csv");
        // 0xE9 is 'é' in Windows-1252 but invalid standalone UTF-8.
        std::fs::write(&path, b"Name\nRen\xE9e\n").unwrap();
        assert_eq!(read_file_as_utf8(&path).unwrap(), "Name\nRenée\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file_as_utf8(&dir.path().join("absent.csv")).unwrap_err();
        assert!(err.contains("absent.csv"));
    }
}
