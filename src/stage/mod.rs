use std::fmt::Debug;

use crate::{
    blob::BlobSerializer,
    model::{BatchSupport, DimsOrder, Model, StageDataInfo, StageNode, StridesRequirement},
    tensor::DataDesc,
    utils::error::{LoweringError, VKStageError},
};

pub mod check;
pub mod strided_slice;

pub use strided_slice::StridedSliceStage;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageType {
    StridedSlice,
}

impl StageType {
    // Stage type word at the head of every stage section in the blob
    pub fn wire_code(&self) -> u32 {
        match self {
            StageType::StridedSlice => 133,
        }
    }

    // Layer type tag this stage is lowered from
    pub fn layer_type(&self) -> &'static str {
        match self {
            StageType::StridedSlice => "StridedSlice",
        }
    }

    pub fn from_layer_type(layer_type: &str) -> Option<Self> {
        match layer_type {
            "StridedSlice" => Some(StageType::StridedSlice),
            _ => None,
        }
    }
}

/// Capabilities every lowered stage provides to the later compiler passes.
/// The layout hooks default to "no requirement", which passes layout and
/// batching through unchanged.
pub trait StageOps: Debug {
    fn stage_type(&self) -> StageType;

    // Re-validate the built stage against its own inputs and outputs
    fn initial_check(&self, stage: &StageNode, model: &Model) -> Result<(), LoweringError>;

    fn propagate_data_order(&self, _order_info: &mut StageDataInfo<DimsOrder>) {}

    fn strides_requirements(&self, _strides_info: &mut StageDataInfo<StridesRequirement>) {}

    fn finalize_data_layout(&self, _layout_info: &mut StageDataInfo<DataDesc>) {}

    fn batch_support_info(&self, _batch_info: &mut StageDataInfo<BatchSupport>) {}

    // Fixed-width parameter block
    fn serialize_params(&self, serializer: &mut BlobSerializer);

    // Buffer references for every input then every output
    fn serialize_data(
        &self,
        stage: &StageNode,
        model: &Model,
        serializer: &mut BlobSerializer,
    ) -> Result<(), VKStageError>;
}

/// Stage parameters tagged by operator kind
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageKind {
    StridedSlice(StridedSliceStage),
}

impl StageKind {
    pub fn ops(&self) -> &dyn StageOps {
        match self {
            StageKind::StridedSlice(stage) => stage,
        }
    }
}
