use crate::{
    blob::BlobSerializer,
    model::{Model, StageNode},
    stage::{StageOps, StageType},
    utils::{
        Bitmask,
        error::{LoweringError, VKStageError},
    },
};

use super::{INPUT_COUNTS, OUTPUT_COUNTS, check_inputs_outputs};

/// Strided slice keeps only the begin/end masks, every other mask is rejected at parse time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StridedSliceStage {
    pub begin_mask: Bitmask,
    pub end_mask: Bitmask,
}

impl StridedSliceStage {
    pub fn new(begin_mask: Bitmask, end_mask: Bitmask) -> Self {
        Self {
            begin_mask,
            end_mask,
        }
    }
}

// Layout and batch hooks keep their defaults: the slice passes data order,
// strides and batching through unchanged.
impl StageOps for StridedSliceStage {
    fn stage_type(&self) -> StageType {
        StageType::StridedSlice
    }

    fn initial_check(&self, stage: &StageNode, model: &Model) -> Result<(), LoweringError> {
        check_inputs_outputs(&stage.layer_ref(), model, stage.inputs(), stage.outputs())
    }

    fn serialize_params(&self, serializer: &mut BlobSerializer) {
        serializer.append_u32(self.begin_mask);
        serializer.append_u32(self.end_mask);
    }

    fn serialize_data(
        &self,
        stage: &StageNode,
        model: &Model,
        serializer: &mut BlobSerializer,
    ) -> Result<(), VKStageError> {
        // the loader reads exactly 4 inputs then 1 output
        let canonical_inputs = INPUT_COUNTS[INPUT_COUNTS.len() - 1];
        if stage.num_inputs() != canonical_inputs || stage.num_outputs() != OUTPUT_COUNTS[0] {
            return Err(VKStageError::Blob(format!(
                "Stage '{}' must have {} inputs and {} output to be serialized, got {} and {}",
                stage.name(),
                canonical_inputs,
                OUTPUT_COUNTS[0],
                stage.num_inputs(),
                stage.num_outputs()
            )));
        }

        for &id in stage.inputs().iter().chain(stage.outputs()) {
            let node = model.data(id).ok_or_else(|| {
                VKStageError::Blob(format!(
                    "Stage '{}' references data {} which is not part of the model",
                    stage.name(),
                    id
                ))
            })?;
            node.serialize_buffer(serializer)?;
        }

        Ok(())
    }
}
