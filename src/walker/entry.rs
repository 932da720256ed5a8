//! Directory entry classification
//!
//! Entries are classified from `lstat`-style metadata, so a symbolic link is
//! always reported as [`EntryType::Symlink`] no matter what it points to.

use std::ffi::OsStr;
use std::fs::FileType;

/// Suffix a regular file needs to be indexed (case-sensitive)
pub const TEXT_FILE_SUFFIX: &str = ".txt";

/// Type of filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Symbolic link
    Symlink,
    /// Block device
    BlockDevice,
    /// Character device
    CharDevice,
    /// Named pipe (FIFO)
    Fifo,
    /// Unix socket
    Socket,
    /// Unknown type
    Unknown,
}

impl EntryType {
    /// Classify a non-followed file type
    pub fn from_file_type(ft: FileType) -> Self {
        if ft.is_symlink() {
            return EntryType::Symlink;
        }
        if ft.is_dir() {
            return EntryType::Directory;
        }
        if ft.is_file() {
            return EntryType::File;
        }
        Self::special(ft)
    }

    #[cfg(unix)]
    fn special(ft: FileType) -> Self {
        use std::os::unix::fs::FileTypeExt;

        if ft.is_block_device() {
            EntryType::BlockDevice
        } else if ft.is_char_device() {
            EntryType::CharDevice
        } else if ft.is_fifo() {
            EntryType::Fifo
        } else if ft.is_socket() {
            EntryType::Socket
        } else {
            EntryType::Unknown
        }
    }

    #[cfg(not(unix))]
    fn special(_ft: FileType) -> Self {
        EntryType::Unknown
    }

    /// Check if this is a regular file
    pub fn is_file(&self) -> bool {
        *self == EntryType::File
    }

    /// Check if this is a directory
    pub fn is_dir(&self) -> bool {
        *self == EntryType::Directory
    }

    /// Check if this is a symbolic link
    pub fn is_symlink(&self) -> bool {
        *self == EntryType::Symlink
    }

    /// Short name for log output
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::File => "file",
            EntryType::Directory => "dir",
            EntryType::Symlink => "symlink",
            EntryType::BlockDevice => "block",
            EntryType::CharDevice => "char",
            EntryType::Fifo => "fifo",
            EntryType::Socket => "socket",
            EntryType::Unknown => "unknown",
        }
    }
}

/// True if a file name ends with [`TEXT_FILE_SUFFIX`]
pub fn is_text_file_name(name: &OsStr) -> bool {
    name.as_encoded_bytes()
        .ends_with(TEXT_FILE_SUFFIX.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_text_file_suffix() {
        assert!(is_text_file_name(OsStr::new("notes.txt")));
        assert!(is_text_file_name(OsStr::new("archive.tar.txt")));
        assert!(is_text_file_name(OsStr::new(".txt")));
        assert!(!is_text_file_name(OsStr::new("notes.TXT")));
        assert!(!is_text_file_name(OsStr::new("notes.txt.bak")));
        assert!(!is_text_file_name(OsStr::new("c.log")));
        assert!(!is_text_file_name(OsStr::new("txt")));
    }

    #[test]
    fn test_classify_file_and_dir() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();

        let ft = fs::symlink_metadata(&file).unwrap().file_type();
        assert!(EntryType::from_file_type(ft).is_file());

        let ft = fs::symlink_metadata(dir.path()).unwrap().file_type();
        assert!(EntryType::from_file_type(ft).is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_classify_symlink_not_followed() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        let link = dir.path().join("link.txt");
        fs::write(&file, "x").unwrap();
        std::os::unix::fs::symlink(&file, &link).unwrap();

        let ft = fs::symlink_metadata(&link).unwrap().file_type();
        assert_eq!(EntryType::from_file_type(ft), EntryType::Symlink);
        assert_eq!(EntryType::Symlink.as_str(), "symlink");
    }
}
