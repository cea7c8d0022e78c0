use thiserror::Error;

/// Failures while packing, inspecting or extracting a ZIP archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Nothing to pack.
    #[error("No files were provided")]
    Empty,

    /// Archive holds more entries than allowed.
    #[error("Archive has {count} entries, limit is {limit}")]
    TooManyEntries { count: usize, limit: usize },

    /// A single entry is larger than allowed.
    #[error("Entry '{name}' is {size} bytes, limit is {limit}")]
    EntryTooLarge { name: String, size: u64, limit: u64 },

    /// Sum of entry sizes is larger than allowed.
    #[error("Archive content totals {size} bytes, limit is {limit}")]
    TotalTooLarge { size: u64, limit: u64 },

    /// Entry name would escape the extraction root.
    #[error("Entry '{0}' has an unsafe path")]
    UnsafePath(String),

    /// Entry is password protected and cannot be read.
    #[error("Entry '{0}' is encrypted")]
    Encrypted(String),

    /// Input is not a readable ZIP container.
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    /// Read or write on the in-memory buffer failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ArchiveError {
    /// Message shown to the user in chat or in an HTTP error body.
    pub fn user_message(&self) -> String {
        match self {
            Self::Empty => "Attach at least one file to archive.".to_string(),
            Self::TooManyEntries { limit, .. } => {
                format!("That archive has too many files (limit {}).", limit)
            }
            Self::EntryTooLarge { name, limit, .. } => format!(
                "`{}` is too large (limit {}).",
                name,
                format_bytes(*limit)
            ),
            Self::TotalTooLarge { limit, .. } => format!(
                "The files are too large in total (limit {}).",
                format_bytes(*limit)
            ),
            Self::UnsafePath(name) => format!("`{}` has an unsafe path and was rejected.", name),
            Self::Encrypted(name) => format!("`{}` is password protected.", name),
            Self::Zip(_) | Self::Io(_) => "That file is not a valid ZIP archive.".to_string(),
        }
    }
}

/// Renders a byte count with a binary unit, e.g. `1.5 MiB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
