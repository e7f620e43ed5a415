#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    FP16,
    FP32,
    U8,
    I8,
    S32,
}

impl DataType {
    pub fn bytes_per_element(&self) -> usize {
        match self {
            DataType::U8 | DataType::I8 => 1,
            DataType::FP16 => 2,
            DataType::FP32 | DataType::S32 => 4,
        }
    }

    // Stable code written into buffer references
    pub fn wire_code(&self) -> u32 {
        match self {
            DataType::FP16 => 0,
            DataType::U8 => 1,
            DataType::S32 => 2,
            DataType::FP32 => 3,
            DataType::I8 => 4,
        }
    }
}
