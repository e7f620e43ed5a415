use crate::{model::DataId, stage::StageType};

use super::layer::Layer;

pub struct Layers;

impl Layers {
    /// `inputs` is `[data, begin, end]` or `[data, begin, end, strides]`
    pub fn strided_slice(name: impl Into<String>, inputs: Vec<DataId>, output: DataId) -> Layer {
        Layer::new(name, StageType::StridedSlice.layer_type(), inputs, vec![output])
    }

    pub fn strided_slice_with(
        name: impl Into<String>,
        inputs: Vec<DataId>,
        output: DataId,
        begin_mask: &str,
        end_mask: &str,
    ) -> Layer {
        Self::strided_slice(name, inputs, output)
            .with_param("begin_mask", begin_mask)
            .with_param("end_mask", end_mask)
    }
}
