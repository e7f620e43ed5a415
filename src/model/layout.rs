use crate::model::StageNode;

/// Per-slot declarations a stage makes about its inputs and outputs.
/// A `None` slot means the stage has no requirement for that data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageDataInfo<T> {
    inputs: Vec<Option<T>>,
    outputs: Vec<Option<T>>,
}

impl<T> StageDataInfo<T> {
    pub fn for_stage(stage: &StageNode) -> Self {
        Self {
            inputs: (0..stage.num_inputs()).map(|_| None).collect(),
            outputs: (0..stage.num_outputs()).map(|_| None).collect(),
        }
    }

    pub fn set_input(&mut self, idx: usize, value: T) {
        self.inputs[idx] = Some(value);
    }

    pub fn set_output(&mut self, idx: usize, value: T) {
        self.outputs[idx] = Some(value);
    }

    pub fn input(&self, idx: usize) -> Option<&T> {
        self.inputs.get(idx).and_then(|v| v.as_ref())
    }

    pub fn output(&self, idx: usize) -> Option<&T> {
        self.outputs.get(idx).and_then(|v| v.as_ref())
    }

    /// True when no slot carries a declaration, i.e. the stage passes everything through
    pub fn is_empty(&self) -> bool {
        self.inputs.iter().chain(self.outputs.iter()).all(|v| v.is_none())
    }
}

/// Permutation of dimension indices, innermost last
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DimsOrder(pub Vec<usize>);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StridesRequirement {
    Compact,
    AlignedInnermost(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchSupport {
    Split,
    ReplicateConstContent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{StageKind, StridedSliceStage};

    #[test]
    fn declarations_are_per_slot() {
        let stage = StageNode::new(
            "slice",
            "StridedSlice",
            StageKind::StridedSlice(StridedSliceStage::new(0, 0)),
            vec![0, 1, 2, 3],
            vec![4],
        );
        let mut info = StageDataInfo::for_stage(&stage);
        assert!(info.is_empty());

        info.set_input(3, StridesRequirement::AlignedInnermost(16));
        info.set_output(0, StridesRequirement::Compact);

        assert!(!info.is_empty());
        assert_eq!(info.input(0), None);
        assert_eq!(info.input(3), Some(&StridesRequirement::AlignedInnermost(16)));
        assert_eq!(info.output(0), Some(&StridesRequirement::Compact));
        // out of range slots carry nothing
        assert_eq!(info.output(1), None);
    }

    #[test]
    fn batch_declarations() {
        let stage = StageNode::new(
            "slice",
            "StridedSlice",
            StageKind::StridedSlice(StridedSliceStage::new(0, 0)),
            vec![0, 1],
            vec![2],
        );
        let mut info = StageDataInfo::for_stage(&stage);
        info.set_input(0, BatchSupport::Split);
        info.set_input(1, BatchSupport::ReplicateConstContent);

        assert_eq!(info.input(0), Some(&BatchSupport::Split));
        assert_eq!(info.input(1), Some(&BatchSupport::ReplicateConstContent));
        assert_eq!(info.output(0), None);
    }
}
