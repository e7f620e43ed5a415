//! VKStage - lowering of framework layers into hardware stages
//!
//! Layers are lowered by the [`FrontEnd`] into stages of a [`Model`], which the
//! [`BlobWriter`] later emits as the binary stream the hardware loader consumes.

mod blob;

mod frontend;

mod layer;

mod model;

mod stage;

mod tensor;

mod utils;

pub use blob::{BLOB_MAGIC, BLOB_VERSION, BlobSerializer, BlobWriter};
pub use frontend::{FrontEnd, FrontEndConfig, LayerErrorPolicy};
pub use layer::{Layer, Layers};
pub use model::{
    BatchSupport, DataId, DataLocation, DataNode, DataUsage, DimsOrder, Model, ModelCheckpoint,
    StageDataInfo, StageId, StageNode, StridesRequirement,
};
pub use stage::{
    StageKind, StageOps, StageType,
    strided_slice::{
        NormalizedInputs, StridedSliceStage, StridesInput,
        parse::{build_stage, gate_features, normalize_inputs, retained_masks, validate},
    },
};
pub use tensor::{DataContent, DataDesc, DataType};
pub use utils::{
    Bitmask, decode_mask,
    error::{DataSlot, ExpectedCount, LayerRef, LoweringError, MaskError, PortKind, VKStageError},
    mask::MAX_MASK_FLAGS,
};

/// Lower `layers` into `model` and emit the resulting blob
pub fn compile(
    model: &mut Model,
    layers: &[Layer],
    config: FrontEndConfig,
) -> Result<Vec<u8>, VKStageError> {
    FrontEnd::new(config).parse_layers(model, layers)?;
    BlobWriter::write_model(model)
}
