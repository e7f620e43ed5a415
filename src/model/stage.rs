use crate::{
    blob::BlobSerializer,
    model::{BatchSupport, DataId, DimsOrder, Model, StageDataInfo, StridesRequirement},
    stage::{StageKind, StageType},
    tensor::DataDesc,
    utils::error::{LayerRef, LoweringError, VKStageError},
};

// Unique identifier for a stage within a model
pub type StageId = usize;

/// One lowered operator instance in the model graph
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageNode {
    name: String,
    layer_type: String,
    kind: StageKind,
    inputs: Vec<DataId>,
    outputs: Vec<DataId>,
}

impl StageNode {
    pub fn new(
        name: impl Into<String>,
        layer_type: impl Into<String>,
        kind: StageKind,
        inputs: Vec<DataId>,
        outputs: Vec<DataId>,
    ) -> Self {
        Self {
            name: name.into(),
            layer_type: layer_type.into(),
            kind,
            inputs,
            outputs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // Type tag of the layer this stage was lowered from
    pub fn layer_type(&self) -> &str {
        &self.layer_type
    }

    pub fn stage_type(&self) -> StageType {
        self.kind.ops().stage_type()
    }

    pub fn kind(&self) -> &StageKind {
        &self.kind
    }

    pub fn inputs(&self) -> &[DataId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[DataId] {
        &self.outputs
    }

    pub fn input(&self, idx: usize) -> DataId {
        self.inputs[idx]
    }

    pub fn output(&self, idx: usize) -> DataId {
        self.outputs[idx]
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    pub fn layer_ref(&self) -> LayerRef {
        LayerRef {
            name: self.name.clone(),
            layer_type: self.layer_type.clone(),
        }
    }

    pub fn initial_check(&self, model: &Model) -> Result<(), LoweringError> {
        self.kind.ops().initial_check(self, model)
    }

    pub fn data_order_info(&self) -> StageDataInfo<DimsOrder> {
        let mut info = StageDataInfo::for_stage(self);
        self.kind.ops().propagate_data_order(&mut info);
        info
    }

    pub fn strides_info(&self) -> StageDataInfo<StridesRequirement> {
        let mut info = StageDataInfo::for_stage(self);
        self.kind.ops().strides_requirements(&mut info);
        info
    }

    pub fn finalized_layout(&self) -> StageDataInfo<DataDesc> {
        let mut info = StageDataInfo::for_stage(self);
        self.kind.ops().finalize_data_layout(&mut info);
        info
    }

    pub fn batch_support_info(&self) -> StageDataInfo<BatchSupport> {
        let mut info = StageDataInfo::for_stage(self);
        self.kind.ops().batch_support_info(&mut info);
        info
    }

    pub fn serialize_params(&self, serializer: &mut BlobSerializer) {
        self.kind.ops().serialize_params(serializer);
    }

    pub fn serialize_data(
        &self,
        model: &Model,
        serializer: &mut BlobSerializer,
    ) -> Result<(), VKStageError> {
        self.kind.ops().serialize_data(self, model, serializer)
    }
}
