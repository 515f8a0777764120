use std::path::Path;

use super::ShrinkMap;
use crate::table::io::{decode_container, encode_container, open_container, save_bytes, SHRINK_MAGIC};
use crate::table::TableError;

impl ShrinkMap {
    /// Serialize to bytes (JNSX format).
    pub fn to_bytes(&self) -> Result<Vec<u8>, TableError> {
        encode_container(SHRINK_MAGIC, self)
    }

    /// Deserialize from bytes (JNSX format). The map is revalidated.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TableError> {
        let map: Self = decode_container(SHRINK_MAGIC, data)?;
        map.validate()?;
        Ok(map)
    }

    pub fn open(path: &Path) -> Result<Self, TableError> {
        let map: Self = open_container(SHRINK_MAGIC, path)?;
        map.validate()?;
        tracing::debug!(path = %path.display(), "shrink map opened");
        Ok(map)
    }

    pub fn save(&self, path: &Path) -> Result<(), TableError> {
        save_bytes(path, &self.to_bytes()?)
    }
}
