use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const MAX_HISTORY_SIZE: u64 = 1024 * 1024; // 1MB

const SESSION_MARKER: &str = "# session ";

/// Append-only history file, one input line per entry
///
/// Each flushed session is preceded by a `# session <timestamp>` marker line,
/// which `read` skips.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    /// Create a HistoryLog at `path`, creating its directory
    pub fn with_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self { path })
    }

    /// Append one session's entries
    pub fn append(&self, entries: &[String]) -> io::Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        self.rotate_if_needed()?;

        let mut contents = format!("{}{}\n", SESSION_MARKER, Utc::now().to_rfc3339());
        for entry in entries {
            // Entries are single lines by construction; keep the file line-oriented anyway
            contents.push_str(&entry.replace(['\n', '\r'], " "));
            contents.push('\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.write_all(contents.as_bytes())?;
        file.flush()?;

        Ok(())
    }

    /// All recorded entries, oldest first; a missing file is empty history
    pub fn read(&self) -> io::Result<Vec<String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        Ok(contents
            .lines()
            .filter(|line| !line.is_empty() && !line.starts_with(SESSION_MARKER))
            .map(str::to_string)
            .collect())
    }

    /// Rotate history file if it exceeds MAX_HISTORY_SIZE
    fn rotate_if_needed(&self) -> io::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let metadata = fs::metadata(&self.path)?;
        if metadata.len() > MAX_HISTORY_SIZE {
            fs::rename(&self.path, self.backup_path())?;
        }

        Ok(())
    }

    /// `<history file>.1`
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".1");
        PathBuf::from(name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entries(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn test_create_log() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("history");

        let log = HistoryLog::with_path(&path).unwrap();
        assert_eq!(log.path(), path);
        assert!(path.parent().unwrap().exists());
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let log = HistoryLog::with_path(temp_dir.path().join("history")).unwrap();
        assert!(log.read().unwrap().is_empty());
    }

    #[test]
    fn test_append_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let log = HistoryLog::with_path(temp_dir.path().join("history")).unwrap();

        log.append(&entries(&["!ls", "what time is it"])).unwrap();
        log.append(&entries(&["exit"])).unwrap();

        assert_eq!(log.read().unwrap(), entries(&["!ls", "what time is it", "exit"]));

        let raw = fs::read_to_string(log.path()).unwrap();
        assert_eq!(raw.matches(SESSION_MARKER).count(), 2);
    }

    #[test]
    fn test_empty_session_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let log = HistoryLog::with_path(temp_dir.path().join("history")).unwrap();

        log.append(&[]).unwrap();
        assert!(!log.path().exists());
    }

    #[test]
    fn test_multiline_entry_flattened() {
        let temp_dir = TempDir::new().unwrap();
        let log = HistoryLog::with_path(temp_dir.path().join("history")).unwrap();

        log.append(&entries(&["a\nb"])).unwrap();
        assert_eq!(log.read().unwrap(), entries(&["a b"]));
    }

    #[test]
    fn test_rotation() {
        let temp_dir = TempDir::new().unwrap();
        let log = HistoryLog::with_path(temp_dir.path().join(".shellmind_history")).unwrap();

        let large = "x".repeat(MAX_HISTORY_SIZE as usize);
        log.append(&[large]).unwrap();
        log.append(&entries(&["pwd"])).unwrap();

        let backup = temp_dir.path().join(".shellmind_history.1");
        assert_eq!(log.backup_path(), backup);
        assert!(backup.exists());
        assert_eq!(log.read().unwrap(), entries(&["pwd"]));
        assert!(fs::metadata(log.path()).unwrap().len() < MAX_HISTORY_SIZE);
    }
}
