use crate::{
    frontend::FrontEndConfig,
    layer::Layer,
    model::{DataId, Model, StageId, StageNode},
    stage::{
        StageKind,
        check::{assert_count, resolve},
    },
    tensor::DataContent,
    utils::{
        Bitmask, decode_mask,
        error::{DataSlot, LayerRef, LoweringError, PortKind},
    },
};

use super::{INPUT_COUNTS, OUTPUT_COUNTS, STRIDES_INPUT, StridedSliceStage, check_inputs_outputs};

const UNSUPPORTED_MASKS: [&str; 3] = ["new_axis_mask", "shrink_axis_mask", "ellipsis_mask"];

/// Where the stage's strides come from once inputs are normalized
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StridesInput {
    Explicit(DataId),
    // absent input, every dimension steps by one
    Unit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizedInputs {
    pub data: DataId,
    pub begin: DataId,
    pub end: DataId,
    pub strides: StridesInput,
}

impl NormalizedInputs {
    /// The canonical 4-input list. A unit stride is backed by a freshly
    /// synthesized placeholder, which is the only graph mutation normalization makes.
    pub fn into_canonical(self, model: &mut Model) -> Vec<DataId> {
        let strides = match self.strides {
            StridesInput::Explicit(id) => id,
            StridesInput::Unit => model.add_fake_data(),
        };
        vec![self.data, self.begin, self.end, strides]
    }
}

/// Input/output arity and per-slot data types of the layer
pub fn validate(layer: &Layer, model: &Model) -> Result<(), LoweringError> {
    let layer_ref = layer.layer_ref();
    check_inputs_outputs(&layer_ref, model, layer.inputs(), layer.outputs())?;

    for &output in layer.outputs() {
        if resolve(&layer_ref, model, output)?.producer().is_some() {
            return Err(LoweringError::OutputAlreadyProduced {
                layer: layer_ref,
                output,
            });
        }
    }

    Ok(())
}

/// Reject axis insertion, axis removal and ellipsis expansion
pub fn gate_features(layer: &Layer) -> Result<(), LoweringError> {
    let layer_ref = layer.layer_ref();

    for feature in UNSUPPORTED_MASKS {
        if decode_param(&layer_ref, layer, feature)? != 0 {
            return Err(LoweringError::UnsupportedFeature {
                layer: layer_ref,
                feature,
            });
        }
    }

    Ok(())
}

/// Decode the two masks the stage keeps, `(begin_mask, end_mask)`
pub fn retained_masks(layer: &Layer) -> Result<(Bitmask, Bitmask), LoweringError> {
    let layer_ref = layer.layer_ref();
    let begin_mask = decode_param(&layer_ref, layer, "begin_mask")?;
    let end_mask = decode_param(&layer_ref, layer, "end_mask")?;
    Ok((begin_mask, end_mask))
}

pub fn normalize_inputs(layer: &Layer, model: &Model) -> Result<NormalizedInputs, LoweringError> {
    let layer_ref = layer.layer_ref();
    let inputs = layer.inputs();
    check_counts(&layer_ref, inputs.len(), layer.outputs().len())?;

    let strides = match inputs.get(STRIDES_INPUT) {
        Some(&id) => {
            check_strides(&layer_ref, model, id)?;
            StridesInput::Explicit(id)
        }
        None => StridesInput::Unit,
    };

    Ok(NormalizedInputs {
        data: inputs[0],
        begin: inputs[1],
        end: inputs[2],
        strides,
    })
}

pub fn build_stage(
    layer: &Layer,
    inputs: Vec<DataId>,
    begin_mask: Bitmask,
    end_mask: Bitmask,
) -> StageNode {
    StageNode::new(
        layer.name(),
        layer.layer_type(),
        StageKind::StridedSlice(StridedSliceStage::new(begin_mask, end_mask)),
        inputs,
        layer.outputs().to_vec(),
    )
}

/// Lower one strided slice layer into a stage appended to `model`.
///
/// Runs validate, feature gate, mask decoding and input normalization before
/// touching the model. Callers that need the model left untouched on failure
/// go through [`crate::frontend::FrontEnd`], which rolls back on error.
pub fn parse_strided_slice(
    model: &mut Model,
    layer: &Layer,
    config: &FrontEndConfig,
) -> Result<StageId, LoweringError> {
    validate(layer, model)?;
    gate_features(layer)?;
    let (begin_mask, end_mask) = retained_masks(layer)?;
    let normalized = normalize_inputs(layer, model)?;

    tracing::trace!(
        "{}: begin_mask={:#b} end_mask={:#b} strides={:?}",
        layer.name(),
        begin_mask,
        end_mask,
        normalized.strides
    );

    let inputs = normalized.into_canonical(model);
    let stage = build_stage(layer, inputs, begin_mask, end_mask);

    if config.run_initial_check {
        stage.initial_check(model)?;
    }

    let stage_id = model
        .add_new_stage(stage)
        .map_err(|e| LoweringError::Graph {
            layer: layer.layer_ref(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        "Lowered layer '{}' to StridedSlice stage {}",
        layer.name(),
        stage_id
    );

    Ok(stage_id)
}

fn decode_param(
    layer_ref: &LayerRef,
    layer: &Layer,
    param: &'static str,
) -> Result<Bitmask, LoweringError> {
    decode_mask(layer.param_as_string(param, "")).map_err(|source| LoweringError::MaskDecode {
        layer: layer_ref.clone(),
        param,
        source,
    })
}

fn check_counts(layer_ref: &LayerRef, inputs: usize, outputs: usize) -> Result<(), LoweringError> {
    assert_count(layer_ref, PortKind::Inputs, INPUT_COUNTS, inputs)?;
    assert_count(layer_ref, PortKind::Outputs, OUTPUT_COUNTS, outputs)
}

fn check_strides(layer_ref: &LayerRef, model: &Model, id: DataId) -> Result<(), LoweringError> {
    let values = resolve(layer_ref, model, id)?
        .content()
        .and_then(DataContent::as_i32)
        .ok_or_else(|| LoweringError::NullContent {
            layer: layer_ref.clone(),
            slot: DataSlot::Input(STRIDES_INPUT),
        })?;

    if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| **v <= 0) {
        return Err(LoweringError::NonPositiveStride {
            layer: layer_ref.clone(),
            index,
            value,
        });
    }

    Ok(())
}
