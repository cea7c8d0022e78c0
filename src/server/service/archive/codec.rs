//! In-memory ZIP packing, inspection and extraction.
//!
//! Everything here is synchronous and operates on byte buffers; callers run it on a
//! blocking thread. Limits are checked against declared sizes before any content is
//! read, and again against the bytes actually produced while decompressing.

use std::collections::HashSet;
use std::io::{Cursor, Read, Write};

use sha2::{Digest, Sha256};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipArchive, ZipWriter};

use crate::server::{
    error::archive::ArchiveError,
    model::archive::{
        ArchiveLimits, EntrySummary, ExtractedFile, NamedFile, PackedArchive, UnpackedArchive,
    },
};

const MAX_ARCHIVE_NAME_CHARS: usize = 64;
const FALLBACK_FILE_NAME: &str = "file";

/// Lowercase hex SHA-256 digest of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Packs `files` into a deflated ZIP archive.
///
/// Names are flattened to their final path segment and de-duplicated, so the
/// archive never contains directories.
///
/// # Returns
/// - `Ok(PackedArchive)` - Archive bytes, digest and per-entry listing
/// - `Err(ArchiveError::Empty)` - No files given
/// - `Err(ArchiveError::TooManyEntries | EntryTooLarge | TotalTooLarge)` - Limits exceeded
pub fn pack(files: Vec<NamedFile>, limits: &ArchiveLimits) -> Result<PackedArchive, ArchiveError> {
    if files.is_empty() {
        return Err(ArchiveError::Empty);
    }
    if files.len() > limits.max_entries {
        return Err(ArchiveError::TooManyEntries {
            count: files.len(),
            limit: limits.max_entries,
        });
    }

    let mut total: u64 = 0;
    for file in &files {
        let size = file.data.len() as u64;
        if size > limits.max_entry_bytes {
            return Err(ArchiveError::EntryTooLarge {
                name: file.name.clone(),
                size,
                limit: limits.max_entry_bytes,
            });
        }
        total += size;
    }
    if total > limits.max_total_bytes {
        return Err(ArchiveError::TotalTooLarge {
            size: total,
            limit: limits.max_total_bytes,
        });
    }

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut taken = HashSet::new();
    let mut digests = Vec::with_capacity(files.len());

    for file in files {
        let name = unique_name(&mut taken, &flatten_name(&file.name));
        writer.start_file(name.as_str(), options)?;
        writer.write_all(&file.data)?;
        digests.push(sha256_hex(&file.data));
    }

    let bytes = writer.finish()?.into_inner();

    // Read the central directory back for compressed sizes
    let mut entries = inspect(&bytes, limits)?;
    for (entry, digest) in entries.iter_mut().zip(digests) {
        entry.sha256 = Some(digest);
    }

    Ok(PackedArchive {
        sha256: sha256_hex(&bytes),
        bytes,
        entries,
    })
}

/// Lists the entries of a ZIP archive without decompressing them.
///
/// # Returns
/// - `Ok(Vec<EntrySummary>)` - One summary per entry, in archive order, without digests
/// - `Err(ArchiveError::UnsafePath)` - An entry would escape the extraction root
/// - `Err(ArchiveError::Encrypted)` - An entry is password protected
/// - `Err(ArchiveError::Zip)` - Input is not a ZIP container
/// - `Err(ArchiveError::TooManyEntries | EntryTooLarge | TotalTooLarge)` - Limits exceeded
pub fn inspect(bytes: &[u8], limits: &ArchiveLimits) -> Result<Vec<EntrySummary>, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    if archive.len() > limits.max_entries {
        return Err(ArchiveError::TooManyEntries {
            count: archive.len(),
            limit: limits.max_entries,
        });
    }

    let mut entries = Vec::with_capacity(archive.len());
    let mut total: u64 = 0;

    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index)?;
        let raw_name = entry.name().to_string();
        let is_dir = entry.is_dir();

        let name = safe_entry_path(&raw_name, is_dir)
            .ok_or_else(|| ArchiveError::UnsafePath(raw_name.clone()))?;

        if entry.encrypted() {
            return Err(ArchiveError::Encrypted(name));
        }

        let size = if is_dir { 0 } else { entry.size() };
        if size > limits.max_entry_bytes {
            return Err(ArchiveError::EntryTooLarge {
                name,
                size,
                limit: limits.max_entry_bytes,
            });
        }

        total += size;
        if total > limits.max_total_bytes {
            return Err(ArchiveError::TotalTooLarge {
                size: total,
                limit: limits.max_total_bytes,
            });
        }

        entries.push(EntrySummary {
            name,
            size_bytes: size,
            compressed_bytes: if is_dir { 0 } else { entry.compressed_size() },
            sha256: None,
            is_dir,
        });
    }

    Ok(entries)
}

/// Decompresses every file entry of a ZIP archive.
///
/// Runs `inspect` first, then reads each file through a reader capped one byte past
/// the entry limit, so a header that understates its size is still caught.
///
/// # Returns
/// - `Ok(UnpackedArchive)` - Listing with digests filled in for files, plus file contents
/// - `Err(ArchiveError)` - Same failures as `inspect`, or a limit exceeded while reading
pub fn extract(bytes: &[u8], limits: &ArchiveLimits) -> Result<UnpackedArchive, ArchiveError> {
    let mut entries = inspect(bytes, limits)?;
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let mut files = Vec::new();
    let mut total: u64 = 0;

    for (index, summary) in entries.iter_mut().enumerate() {
        if summary.is_dir {
            continue;
        }

        let entry = archive.by_index(index)?;
        let mut data = Vec::with_capacity(summary.size_bytes as usize);
        entry
            .take(limits.max_entry_bytes + 1)
            .read_to_end(&mut data)?;

        let size = data.len() as u64;
        if size > limits.max_entry_bytes {
            return Err(ArchiveError::EntryTooLarge {
                name: summary.name.clone(),
                size,
                limit: limits.max_entry_bytes,
            });
        }

        total += size;
        if total > limits.max_total_bytes {
            return Err(ArchiveError::TotalTooLarge {
                size: total,
                limit: limits.max_total_bytes,
            });
        }

        let digest = sha256_hex(&data);
        summary.sha256 = Some(digest.clone());
        files.push(ExtractedFile {
            file: NamedFile::new(summary.name.clone(), data),
            sha256: digest,
        });
    }

    Ok(UnpackedArchive { entries, files })
}

/// Normalizes a raw entry name into a relative `/`-separated path.
///
/// Returns `None` for absolute paths, drive prefixes, `..` segments, NUL bytes, or
/// names with no usable segment.
pub fn safe_entry_path(raw: &str, is_dir: bool) -> Option<String> {
    if raw.contains('\0') {
        return None;
    }

    let normalized = raw.replace('\\', "/");
    if normalized.starts_with('/') {
        return None;
    }

    let mut segments = Vec::new();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            s if s.contains(':') => return None,
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return None;
    }

    let mut path = segments.join("/");
    if is_dir {
        path.push('/');
    }
    Some(path)
}

/// Reduces an uploaded file name to a single safe path segment.
///
/// The result always passes `safe_entry_path`, so packed archives can be read back.
pub fn flatten_name(name: &str) -> String {
    clean_segment(name).unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
}

/// Last path segment of `name` without control characters or drive separators, or
/// `None` when nothing usable is left.
fn clean_segment(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if c == ':' { '_' } else { c })
        .collect();

    match cleaned.trim() {
        "" | "." | ".." => None,
        s => Some(s.to_string()),
    }
}

/// Returns `name`, or `stem (n).ext` for the first free `n`, and marks it taken.
fn unique_name(taken: &mut HashSet<String>, name: &str) -> String {
    if taken.insert(name.to_string()) {
        return name.to_string();
    }

    // A leading dot belongs to the stem, e.g. ".env"
    let (stem, ext) = match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    };

    let mut n = 1;
    loop {
        let candidate = format!("{} ({}){}", stem, n, ext);
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Builds the stored file name for a new archive.
///
/// The requested name is flattened, stripped of control characters, capped in length
/// and given a `.zip` extension. Without a usable name the token is used instead.
pub fn archive_file_name(requested: Option<&str>, token: &str) -> String {
    let base = requested
        .and_then(clean_segment)
        .map(|name| name.chars().take(MAX_ARCHIVE_NAME_CHARS).collect::<String>())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    match base {
        Some(name) if name.to_ascii_lowercase().ends_with(".zip") => name,
        Some(name) => format!("{}.zip", name),
        None => format!("archive-{}.zip", token),
    }
}
