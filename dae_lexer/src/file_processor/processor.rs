//! Reading script files from disk with size limits and lenient decoding

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success, log_warning};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .d, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub path: PathBuf,
    pub size: u64,
    /// Lower-cased extension, if any
    pub extension: Option<String>,
    pub line_count: usize,
    pub is_daedalus_file: bool,
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        human_size(self.size)
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

fn human_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit])
    }
}

/// Decoded file contents plus metadata
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    /// Invalid UTF-8 sequences were replaced with U+FFFD
    pub lossy: bool,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    /// Wrap in-memory source, e.g. from stdin or tests
    pub fn from_source(path: impl Into<PathBuf>, source: String) -> Self {
        let path = path.into();
        let extension = lowercase_extension(&path);
        Self {
            metadata: FileMetadata {
                is_daedalus_file: extension.as_deref() == Some("d"),
                size: source.len() as u64,
                line_count: source.lines().count(),
                path,
                extension,
                modified: None,
            },
            source,
            lossy: false,
            processing_duration: Duration::ZERO,
        }
    }

    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

pub struct FileProcessor {
    pub require_daedalus_extension: bool,
    pub enable_performance_logging: bool,
    pub lossy_decoding: bool,
    /// Reject files over the size and line limits; when off they are only logged
    pub enforce_limits: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            require_daedalus_extension: false,
            enable_performance_logging: true,
            lossy_decoding: true,
            enforce_limits: true,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_daedalus_extension: prefs.require_daedalus_extension,
            enable_performance_logging: prefs.enable_performance_logging,
            lossy_decoding: prefs.lossy_decoding,
            enforce_limits: true,
        }
    }

    pub fn with_daedalus_extension_required(mut self, required: bool) -> Self {
        self.require_daedalus_extension = required;
        self
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    pub fn with_lossy_decoding(mut self, enabled: bool) -> Self {
        self.lossy_decoding = enabled;
        self
    }

    pub fn with_limits_enforced(mut self, enforced: bool) -> Self {
        self.enforce_limits = enforced;
        self
    }

    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Validate, read and decode a script file
    pub fn process_file<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();
        let display = file_path.as_ref().display().to_string();

        log_debug!("Starting file processing", "file" => display);

        let path = self.validate_path(file_path.as_ref(), &display)?;
        let mut metadata = self.get_metadata(&path)?;
        self.validate_file(&metadata, &display)?;

        let (source, lossy) = self.read_file(&path, &display)?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT_FOR_ANALYSIS && !self.enforce_limits {
            log_warning!(code = codes::file_processing::TOO_MANY_LINES,
                "File exceeds maximum line count; continuing",
                "file" => display,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT_FOR_ANALYSIS);
        } else if line_count > MAX_LINE_COUNT_FOR_ANALYSIS {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT_FOR_ANALYSIS,
            };
            log_error!(error.error_code(), "File exceeds maximum line count for analysis",
                "file" => display,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT_FOR_ANALYSIS);
            return Err(error);
        }
        metadata.line_count = line_count;

        let result = FileProcessingResult {
            source,
            metadata,
            lossy,
            processing_duration: start_time.elapsed(),
        };

        self.log_processing_success(&result, &display);

        Ok(result)
    }

    fn log_processing_success(&self, result: &FileProcessingResult, file_path: &str) {
        let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);

        if self.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully with performance metrics",
                "file" => file_path,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "duration_ms" => duration_ms,
                "is_large_file" => result.metadata.is_large_file()
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "lines" => result.metadata.line_count
            );
        }
    }

    fn validate_path(&self, path: &Path, display: &str) -> Result<PathBuf, FileProcessorError> {
        if path.as_os_str().is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: display.to_string(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        if !path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: display.to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => display);
            return Err(error);
        }

        if !path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: display.to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => display);
            return Err(error);
        }

        path.canonicalize().map_err(|e| {
            let error = FileProcessorError::IoError {
                message: format!("Failed to resolve path '{}': {}", display, e),
            };
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => display,
                "io_error" => e);
            error
        })
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| io_error(path, e, "Failed to read metadata"))?;

        let extension = lowercase_extension(path);
        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            is_daedalus_file: extension.as_deref() == Some("d"),
            extension,
            line_count: 0,
            modified: metadata.modified().ok(),
        };

        log_debug!("File metadata collected",
            "size_human" => file_metadata.human_readable_size(),
            "extension" => file_metadata.extension.as_deref().unwrap_or("none"),
            "is_daedalus" => file_metadata.is_daedalus_file);

        Ok(file_metadata)
    }

    fn validate_file(&self, metadata: &FileMetadata, file_path: &str) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE && !self.enforce_limits {
            log_warning!(code = codes::file_processing::FILE_TOO_LARGE,
                "File exceeds compile-time maximum size limit; continuing",
                "file" => file_path,
                "size_human" => metadata.human_readable_size(),
                "limit_human" => human_size(MAX_FILE_SIZE));
        } else if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => file_path,
                "size_human" => metadata.human_readable_size(),
                "limit_human" => human_size(MAX_FILE_SIZE));
            return Err(error);
        }

        if self.require_daedalus_extension && !metadata.is_daedalus_file {
            let error = FileProcessorError::InvalidExtension {
                extension: metadata.extension.clone(),
            };
            log_error!(error.error_code(), "File does not have required .d extension",
                "file" => file_path,
                "extension" => metadata.extension.as_deref().unwrap_or("none"));
            return Err(error);
        }

        Ok(())
    }

    /// Scripts often come in legacy code pages, so decoding may be lossy
    fn read_file(&self, path: &Path, file_path: &str) -> Result<(String, bool), FileProcessorError> {
        let bytes = fs::read(path).map_err(|e| io_error(path, e, "Failed to read file"))?;

        match String::from_utf8(bytes) {
            Ok(content) => Ok((content, false)),
            Err(e) if self.lossy_decoding => {
                let valid_up_to = e.utf8_error().valid_up_to();
                log_warning!(code = codes::file_processing::INVALID_ENCODING,
                    "File is not valid UTF-8; invalid bytes replaced",
                    "file" => file_path,
                    "first_invalid_byte" => valid_up_to);
                Ok((String::from_utf8_lossy(e.as_bytes()).into_owned(), true))
            }
            Err(_) => {
                let error = FileProcessorError::InvalidEncoding {
                    path: path.display().to_string(),
                };
                log_error!(error.error_code(), "Invalid UTF-8 encoding in file",
                    "file" => file_path);
                Err(error)
            }
        }
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn io_error(path: &Path, e: std::io::Error, context: &str) -> FileProcessorError {
    let error = match e.kind() {
        std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
            path: path.display().to_string(),
        },
        _ => FileProcessorError::IoError {
            message: format!("{} '{}': {}", context, path.display(), e),
        },
    };
    log_error!(error.error_code(), context,
        "path" => path.display(),
        "io_error" => e);
    error
}
