use crate::PendingFile;

pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["pdf", "txt", "md"];
/// Per-file upload ceiling (10 MiB).
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Whether a picked file may be queued for upload.
pub fn is_accepted(file: &PendingFile) -> bool {
    has_accepted_extension(&file.name) && file.size <= MAX_FILE_BYTES
}

fn has_accepted_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        ACCEPTED_EXTENSIONS
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(ext))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64) -> PendingFile {
        PendingFile::new(name, size, name)
    }

    #[test]
    fn extension_check_ignores_case() {
        assert!(is_accepted(&file("Report.PDF", 10)));
        assert!(is_accepted(&file("notes.Md", 10)));
        assert!(!is_accepted(&file("setup.exe", 10)));
        assert!(!is_accepted(&file("README", 10)));
        assert!(!is_accepted(&file("archive.txt.zip", 10)));
    }

    #[test]
    fn size_ceiling_is_inclusive() {
        assert!(is_accepted(&file("a.txt", MAX_FILE_BYTES)));
        assert!(!is_accepted(&file("a.txt", MAX_FILE_BYTES + 1)));
    }
}
