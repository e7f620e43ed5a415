use crate::{
    model::{DataId, Model},
    stage::check::{assert_count, assert_inputs_outputs_types, resolve},
    tensor::DataType,
    utils::error::{LayerRef, LoweringError, PortKind},
};

pub mod parse;
pub mod stage;

pub use parse::{NormalizedInputs, StridesInput, parse_strided_slice};
pub use stage::StridedSliceStage;

const INPUT_COUNTS: &[usize] = &[3, 4];
const OUTPUT_COUNTS: &[usize] = &[1];

// Index of the optional strides input
const STRIDES_INPUT: usize = 3;

/// Shared by the parse-time validation and the stage's own initial check.
/// `data` may be any type T, begin/end/strides are S32 and the output is T.
fn check_inputs_outputs(
    layer: &LayerRef,
    model: &Model,
    inputs: &[DataId],
    outputs: &[DataId],
) -> Result<(), LoweringError> {
    assert_count(layer, PortKind::Inputs, INPUT_COUNTS, inputs.len())?;
    assert_count(layer, PortKind::Outputs, OUTPUT_COUNTS, outputs.len())?;

    let data_type = resolve(layer, model, inputs[0])?.desc().data_type();

    let mut expected_inputs = vec![DataType::S32; inputs.len()];
    expected_inputs[0] = data_type;

    assert_inputs_outputs_types(
        layer,
        model,
        inputs,
        &expected_inputs,
        outputs,
        &[data_type],
        Some(STRIDES_INPUT),
    )
}
