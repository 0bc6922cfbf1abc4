use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the data directory, both local and in the home directory
pub const DATA_DIR_NAME: &str = ".sixfocus";

/// Get the data directory - checks for a local .sixfocus first, then falls back to ~/.sixfocus
pub fn get_data_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_data_dir(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DATA_DIR_NAME))
}

/// Find a local .sixfocus directory by walking up the directory tree
fn find_local_data_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let candidate = current.join(DATA_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        current = current.parent()?;
    }
}

/// Resolve the data directory, honouring an explicit override, and make sure it exists
pub fn ensure_data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => get_data_dir()?,
    };
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .sixfocus directory in `parent`
pub fn init_local_data_dir(parent: &Path) -> Result<PathBuf> {
    create_new_dir(parent.join(DATA_DIR_NAME))
}

/// Initialize the explicit data directory when given, else a local .sixfocus in `cwd`
pub fn init_data_dir(override_dir: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    match override_dir {
        Some(dir) => create_new_dir(dir.to_path_buf()),
        None => init_local_data_dir(cwd),
    }
}

fn create_new_dir(data_dir: PathBuf) -> Result<PathBuf> {
    if data_dir.exists() {
        anyhow::bail!("Data directory already exists: {}", data_dir.display());
    }

    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create directory: {}", data_dir.display()))?;

    Ok(data_dir)
}

/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "sixfocus.log";

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir).context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, None if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_data_dir() {
        let dir = get_data_dir().unwrap();
        assert!(dir.to_string_lossy().contains(DATA_DIR_NAME));
    }

    #[test]
    fn test_find_local_data_dir_walks_up() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = init_local_data_dir(temp_dir.path()).unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_local_data_dir(&nested), Some(data_dir));
    }

    #[test]
    fn test_init_twice_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        init_local_data_dir(temp_dir.path()).unwrap();
        assert!(init_local_data_dir(temp_dir.path()).is_err());
    }

    #[test]
    fn test_init_data_dir_uses_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("target_dd");

        let dir = init_data_dir(Some(&target), temp_dir.path()).unwrap();
        assert_eq!(dir, target);
        assert!(target.is_dir());
        assert!(!temp_dir.path().join(DATA_DIR_NAME).exists());

        // Already there
        assert!(init_data_dir(Some(&target), temp_dir.path()).is_err());
    }

    #[test]
    fn test_init_data_dir_defaults_to_cwd() {
        let temp_dir = tempfile::tempdir().unwrap();

        let dir = init_data_dir(None, temp_dir.path()).unwrap();
        assert_eq!(dir, temp_dir.path().join(DATA_DIR_NAME));
        assert!(dir.is_dir());
    }

    #[test]
    fn test_ensure_data_dir_with_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("custom");

        let dir = ensure_data_dir(Some(&target)).unwrap();
        assert_eq!(dir, target);
        assert!(target.is_dir());
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.txt");

        atomic_write(&test_file, "Hello, world!").unwrap();

        let read_content = read_file(&test_file).unwrap();
        assert_eq!(read_content.as_deref(), Some("Hello, world!"));
    }

    #[test]
    fn test_read_nonexistent_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("nonexistent.txt");

        assert_eq!(read_file(&test_file).unwrap(), None);
    }
}
