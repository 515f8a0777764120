use std::fs::{self, File};
use std::path::Path;

use memmap2::Mmap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{JisTable, TableError};

pub(crate) const HEADER_SIZE: usize = 16;
pub(crate) const VERSION: u8 = 1;
pub(crate) const TABLE_MAGIC: &[u8; 4] = b"JNTX";
pub(crate) const SHRINK_MAGIC: &[u8; 4] = b"JNSX";

/// Kind of a compiled binary file, identified by its magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFileKind {
    Table,
    Shrink,
}

/// Identify a compiled file by its first four bytes.
pub fn detect_kind(data: &[u8]) -> Result<TableFileKind, TableError> {
    match data.get(..4) {
        None => Err(TableError::InvalidHeader),
        Some(m) if m == TABLE_MAGIC => Ok(TableFileKind::Table),
        Some(m) if m == SHRINK_MAGIC => Ok(TableFileKind::Shrink),
        Some(_) => Err(TableError::InvalidMagic),
    }
}

/// Serialize `value` behind a 16-byte header:
/// magic(4) version(1) reserved(3) payload_len(u32 LE) crc32(u32 LE).
pub(crate) fn encode_container<T: Serialize>(
    magic: &[u8; 4],
    value: &T,
) -> Result<Vec<u8>, TableError> {
    let body = bincode::serialize(value).map_err(TableError::Serialize)?;
    let body_len: u32 = body
        .len()
        .try_into()
        .map_err(|_| TableError::Inconsistent("payload exceeds u32::MAX".to_string()))?;

    let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
    buf.extend_from_slice(magic);
    buf.push(VERSION);
    buf.extend_from_slice(&[0u8; 3]); // reserved
    buf.extend_from_slice(&body_len.to_le_bytes());
    buf.extend_from_slice(&crc32fast::hash(&body).to_le_bytes());
    buf.extend_from_slice(&body);
    Ok(buf)
}

pub(crate) fn decode_container<T: DeserializeOwned>(
    magic: &[u8; 4],
    data: &[u8],
) -> Result<T, TableError> {
    if data.len() < 5 {
        return Err(TableError::InvalidHeader);
    }
    if &data[..4] != magic {
        return Err(TableError::InvalidMagic);
    }
    if data[4] != VERSION {
        return Err(TableError::UnsupportedVersion(data[4]));
    }
    if data.len() < HEADER_SIZE {
        return Err(TableError::InvalidHeader);
    }

    let body_len = read_u32(&data[8..12]) as usize;
    let expected = read_u32(&data[12..16]);
    let body = data
        .get(HEADER_SIZE..HEADER_SIZE + body_len)
        .ok_or(TableError::InvalidHeader)?;
    let actual = crc32fast::hash(body);
    if actual != expected {
        return Err(TableError::ChecksumMismatch { expected, actual });
    }
    bincode::deserialize(body).map_err(TableError::Deserialize)
}

/// Map `path` read-only and decode the container in place.
pub(crate) fn open_container<T: DeserializeOwned>(
    magic: &[u8; 4],
    path: &Path,
) -> Result<T, TableError> {
    let file = File::open(path)?;
    // SAFETY: The file is opened read-only and the mapping is dropped before
    // this function returns; the decoded value owns all of its data.
    let mmap = unsafe { Mmap::map(&file)? };
    decode_container(magic, &mmap)
}

/// Atomic write: write to .tmp then rename.
pub(crate) fn save_bytes(path: &Path, bytes: &[u8]) -> Result<(), TableError> {
    let tmp = path.with_extension("tmp");
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn read_u32(b: &[u8]) -> u32 {
    let mut le = [0u8; 4];
    le.copy_from_slice(&b[..4]);
    u32::from_le_bytes(le)
}

impl JisTable {
    /// Serialize to bytes (JNTX format).
    pub fn to_bytes(&self) -> Result<Vec<u8>, TableError> {
        encode_container(TABLE_MAGIC, self)
    }

    /// Deserialize from bytes (JNTX format). The table is revalidated.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TableError> {
        let table: Self = decode_container(TABLE_MAGIC, data)?;
        table.validate()?;
        Ok(table)
    }

    pub fn open(path: &Path) -> Result<Self, TableError> {
        let table: Self = open_container(TABLE_MAGIC, path)?;
        table.validate()?;
        tracing::debug!(path = %path.display(), "jis table opened");
        Ok(table)
    }

    pub fn save(&self, path: &Path) -> Result<(), TableError> {
        save_bytes(path, &self.to_bytes()?)
    }
}
