use super::DataType;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataDesc {
    dims: Vec<usize>,
    data_type: DataType,
}

impl DataDesc {
    pub fn new(data_type: DataType, dims: Vec<usize>) -> Self {
        Self { dims, data_type }
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    // Get dimensions, innermost last
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    pub fn total_dim_size(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn size_in_bytes(&self) -> usize {
        self.total_dim_size() * self.data_type.bytes_per_element()
    }

    // Row-major strides in bytes
    pub fn strides(&self) -> Vec<usize> {
        let mut s = vec![self.data_type.bytes_per_element(); self.dims.len()];
        for i in (0..self.dims.len().saturating_sub(1)).rev() {
            s[i] = s[i + 1] * self.dims[i + 1];
        }
        s
    }
}
