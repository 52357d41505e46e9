use std::fs;
use std::path::Path;

use snafu::prelude::*;

use super::{ConvertResult, ReadingFileSnafu};

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// A form, as read from the disk.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FormFile {
    pub path: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FormFile {
    pub fn read(path: &str) -> ConvertResult<FormFile> {
        let bytes = fs::read(path).context(ReadingFileSnafu { path })?;
        Ok(FormFile::new(path, bytes))
    }

    pub fn new(path: &str, bytes: Vec<u8>) -> FormFile {
        FormFile {
            path: path.to_string(),
            file_name: simplify_file_name(path),
            bytes,
        }
    }

    /// The lower-cased extension of the file name.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
    }

    pub fn name_without_extension(&self) -> String {
        Path::new(&self.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.file_name)
            .to_string()
    }

    /// The SHA-256 digest of the content, in hexadecimal.
    pub fn checksum(&self) -> String {
        sha256::digest(self.bytes.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        let f = FormFile::new("/tmp/forms/Census 2022.XLSX", b"abc".to_vec());
        assert_eq!(f.file_name, "Census 2022.XLSX");
        assert_eq!(f.extension().as_deref(), Some("xlsx"));
        assert_eq!(f.name_without_extension(), "Census 2022");
        assert_eq!(
            f.checksum(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        let f = FormFile::new("form", vec![]);
        assert_eq!(f.extension(), None);
        assert_eq!(f.name_without_extension(), "form");
    }
}
