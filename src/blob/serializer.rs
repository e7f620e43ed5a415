use crate::utils::error::VKStageError;

/// Append-only little-endian byte sink for the hardware blob
#[derive(Debug, Default)]
pub struct BlobSerializer {
    data: Vec<u8>,
}

impl BlobSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_u32(&mut self, value: u32) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    /// Lengths and offsets are written as u32 words on the wire. Values that do
    /// not fit are an error, never truncated.
    pub fn append_usize(&mut self, value: usize) -> Result<(), VKStageError> {
        self.append_u32(to_wire_u32(value)?);
        Ok(())
    }

    /// Reserve a u32 slot to be patched later with [`BlobSerializer::write_u32_at`]
    pub fn reserve_u32(&mut self) -> usize {
        let pos = self.data.len();
        self.append_u32(0);
        pos
    }

    pub fn write_u32_at(&mut self, pos: usize, value: u32) {
        self.data[pos..pos + 4].copy_from_slice(&value.to_le_bytes());
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Decode the written bytes back into u32 words, mostly useful for inspection
    pub fn words(&self) -> Vec<u32> {
        self.data
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }
}

pub(crate) fn to_wire_u32(value: usize) -> Result<u32, VKStageError> {
    u32::try_from(value)
        .map_err(|_| VKStageError::Blob(format!("value {} does not fit in a u32 word", value)))
}
