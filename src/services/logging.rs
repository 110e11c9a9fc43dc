use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub mod logger {
    use super::*;

    static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

    /// Truncates (or creates) the run log and routes every later line to it.
    ///
    /// The run log is fixed for the life of the process: initialising it
    /// again with a different path is an error.
    pub fn init(path: &Path) -> std::io::Result<()> {
        if let Some(current) = LOG_PATH.get() {
            if current != path {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("run log already set to {}", current.display()),
                ));
            }
        }

        open_log(path)?;
        LOG_PATH.get_or_init(|| path.to_path_buf());
        Ok(())
    }

    pub fn log_new_line(line: &str) -> std::io::Result<()> {
        match LOG_PATH.get() {
            Some(path) => append_line(path, line),
            None => Ok(()),
        }
    }

    /// Prints a line to the console and records it in the run log.
    pub fn report(line: &str) -> std::io::Result<()> {
        println!("{}", line);
        log_new_line(line)
    }

    pub(crate) fn open_log(path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        File::create(path)?;
        Ok(())
    }

    pub(crate) fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .append(true)
            .create(true)
            .open(path)?;

        writeln!(file, "{}", line)?;
        Ok(())
    }
}
