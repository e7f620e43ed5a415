use super::DataType;

/// Resolved constant content of a data node, stored as little-endian bytes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataContent {
    data_type: DataType,
    bytes: Box<[u8]>,
}

impl DataContent {
    pub fn from_bytes(data_type: DataType, bytes: Box<[u8]>) -> Self {
        Self { data_type, bytes }
    }

    pub fn from_i32(values: &[i32]) -> Self {
        let mut bytes = Vec::with_capacity(values.len() * 4);
        for value in values {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        Self {
            data_type: DataType::S32,
            bytes: bytes.into_boxed_slice(),
        }
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Typed view of the content, `None` unless it holds whole 32-bit signed integers
    pub fn as_i32(&self) -> Option<Vec<i32>> {
        if self.data_type != DataType::S32 || !self.bytes.len().is_multiple_of(4) {
            return None;
        }

        let mut values = Vec::with_capacity(self.bytes.len() / 4);
        for chunk in self.bytes.chunks_exact(4) {
            let mut a = [0u8; 4];
            a.copy_from_slice(chunk);
            values.push(i32::from_le_bytes(a));
        }
        Some(values)
    }
}
