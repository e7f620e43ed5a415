use crate::{
    model::{DataId, DataNode, Model},
    tensor::DataType,
    utils::error::{DataSlot, ExpectedCount, LayerRef, LoweringError, PortKind},
};

/// Look up a data node referenced by a layer or stage
pub fn resolve<'m>(
    layer: &LayerRef,
    model: &'m Model,
    id: DataId,
) -> Result<&'m DataNode, LoweringError> {
    model.data(id).ok_or_else(|| LoweringError::UnknownData {
        layer: layer.clone(),
        id,
    })
}

pub fn assert_count(
    layer: &LayerRef,
    kind: PortKind,
    expected: &'static [usize],
    actual: usize,
) -> Result<(), LoweringError> {
    if expected.contains(&actual) {
        return Ok(());
    }

    Err(LoweringError::Arity {
        layer: layer.clone(),
        kind,
        expected: ExpectedCount(expected),
        actual,
    })
}

/// Check every slot against its expected data type. Placeholder data is only
/// accepted in `optional_input`, where it stands in for an absent input and is
/// not type checked.
pub fn assert_inputs_outputs_types(
    layer: &LayerRef,
    model: &Model,
    inputs: &[DataId],
    expected_inputs: &[DataType],
    outputs: &[DataId],
    expected_outputs: &[DataType],
    optional_input: Option<usize>,
) -> Result<(), LoweringError> {
    let slots = inputs
        .iter()
        .zip(expected_inputs)
        .enumerate()
        .map(|(i, pair)| (DataSlot::Input(i), pair))
        .chain(
            outputs
                .iter()
                .zip(expected_outputs)
                .enumerate()
                .map(|(i, pair)| (DataSlot::Output(i), pair)),
        );

    for (slot, (&id, &expected)) in slots {
        let node = resolve(layer, model, id)?;
        if node.is_fake() {
            if optional_input.is_some_and(|i| slot == DataSlot::Input(i)) {
                continue;
            }
            return Err(LoweringError::Placeholder {
                layer: layer.clone(),
                slot,
            });
        }

        let actual = node.desc().data_type();
        if actual != expected {
            return Err(LoweringError::Type {
                layer: layer.clone(),
                slot,
                expected,
                actual,
            });
        }
    }

    Ok(())
}
