/// Optional plain-text mirror of console output
use super::config::get_logger_config;
use once_cell::sync::Lazy;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

static LOG_FILE: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));

fn open_log_file(path: &Path) -> std::io::Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BufWriter::new(file))
}

/// Open the configured log file, if any; a failure only disables file output
pub fn init_file_logging() {
    let path = match get_logger_config().file_path {
        Some(path) => path,
        None => return,
    };

    match open_log_file(&path) {
        Ok(writer) => {
            if let Ok(mut slot) = LOG_FILE.lock() {
                *slot = Some(writer);
            }
        }
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
        }
    }
}

pub fn write_to_file(line: &str) {
    if let Ok(mut slot) = LOG_FILE.lock() {
        if let Some(writer) = slot.as_mut() {
            let _ = writeln!(writer, "{}", line);
        }
    }
}

pub fn flush_file_logging() {
    if let Ok(mut slot) = LOG_FILE.lock() {
        if let Some(writer) = slot.as_mut() {
            let _ = writer.flush();
        }
    }
}
