use std::collections::HashMap;

use crate::{
    model::{DataId, DataLocation, DataNode, DataUsage, StageId, StageNode},
    tensor::{DataContent, DataDesc, DataType},
    utils::error::VKStageError,
};

/// Snapshot of the arena sizes, used to undo a partially lowered layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelCheckpoint {
    num_data: usize,
    num_stages: usize,
    area_sizes: [usize; 5],
}

/// Owns every data node and stage of one compilation run.
/// Everything is addressed by index, stages never hold references to data directly.
#[derive(Clone, Debug)]
pub struct Model {
    name: String,
    data: Vec<DataNode>,
    stages: Vec<StageNode>,
    // next free byte offset per memory area
    area_sizes: HashMap<DataLocation, usize>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
            stages: Vec::new(),
            area_sizes: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_input_data(&mut self, name: impl Into<String>, desc: DataDesc) -> DataId {
        self.push_data(name.into(), DataUsage::Input, desc, None)
    }

    pub fn add_output_data(&mut self, name: impl Into<String>, desc: DataDesc) -> DataId {
        self.push_data(name.into(), DataUsage::Output, desc, None)
    }

    pub fn add_intermediate_data(&mut self, name: impl Into<String>, desc: DataDesc) -> DataId {
        self.push_data(name.into(), DataUsage::Intermediate, desc, None)
    }

    pub fn add_const_data(
        &mut self,
        name: impl Into<String>,
        desc: DataDesc,
        content: DataContent,
    ) -> Result<DataId, VKStageError> {
        let name = name.into();

        if content.data_type() != desc.data_type() {
            return Err(VKStageError::Model(format!(
                "Const data '{}' has content of type {:?} but descriptor type {:?}",
                name,
                content.data_type(),
                desc.data_type()
            )));
        }

        if content.len_bytes() != desc.size_in_bytes() {
            return Err(VKStageError::Model(format!(
                "Const data '{}' has {} content bytes, descriptor requires {}",
                name,
                content.len_bytes(),
                desc.size_in_bytes()
            )));
        }

        Ok(self.push_data(name, DataUsage::Const, desc, Some(content)))
    }

    /// Synthesize a placeholder for an absent optional input. It has no content
    /// and no memory behind it.
    pub fn add_fake_data(&mut self) -> DataId {
        let name = format!("@fake_{}", self.data.len());
        self.push_data(
            name,
            DataUsage::Fake,
            DataDesc::new(DataType::FP16, vec![1]),
            None,
        )
    }

    /// Append a stage and wire it up as producer of its outputs and consumer of its inputs
    pub fn add_new_stage(&mut self, stage: StageNode) -> Result<StageId, VKStageError> {
        for &id in stage.inputs().iter().chain(stage.outputs()) {
            if id >= self.data.len() {
                return Err(VKStageError::Model(format!(
                    "Stage '{}' references data {} which is not part of model '{}'",
                    stage.name(),
                    id,
                    self.name
                )));
            }
        }

        for &id in stage.outputs() {
            if self.data[id].is_fake() {
                return Err(VKStageError::Model(format!(
                    "Stage '{}' cannot produce placeholder data '{}'",
                    stage.name(),
                    self.data[id].name
                )));
            }
            if let Some(producer) = self.data[id].producer {
                return Err(VKStageError::Model(format!(
                    "Stage '{}' output '{}' is already produced by stage '{}'",
                    stage.name(),
                    self.data[id].name,
                    self.stages[producer].name()
                )));
            }
        }

        let stage_id = self.stages.len();
        for &id in stage.inputs() {
            if !self.data[id].is_fake() {
                self.data[id].consumers.push(stage_id);
            }
        }
        for &id in stage.outputs() {
            self.data[id].producer = Some(stage_id);
        }

        self.stages.push(stage);
        Ok(stage_id)
    }

    pub fn data(&self, id: DataId) -> Option<&DataNode> {
        self.data.get(id)
    }

    pub fn stage(&self, id: StageId) -> Option<&StageNode> {
        self.stages.get(id)
    }

    pub fn stages(&self) -> impl Iterator<Item = &StageNode> {
        self.stages.iter()
    }

    pub fn num_stages(&self) -> usize {
        self.stages.len()
    }

    pub fn num_data(&self) -> usize {
        self.data.len()
    }

    // Bytes used so far in the given memory area
    pub fn area_size(&self, location: DataLocation) -> usize {
        self.area_sizes.get(&location).copied().unwrap_or(0)
    }

    pub fn checkpoint(&self) -> ModelCheckpoint {
        ModelCheckpoint {
            num_data: self.data.len(),
            num_stages: self.stages.len(),
            area_sizes: [
                DataLocation::None,
                DataLocation::Input,
                DataLocation::Output,
                DataLocation::Blob,
                DataLocation::Bss,
            ]
            .map(|location| self.area_size(location)),
        }
    }

    /// Drop everything added after `checkpoint` and unlink it from the surviving data
    pub fn rollback(&mut self, checkpoint: ModelCheckpoint) {
        self.data.truncate(checkpoint.num_data);
        self.stages.truncate(checkpoint.num_stages);

        for node in &mut self.data {
            node.consumers.retain(|&s| s < checkpoint.num_stages);
            if node.producer.is_some_and(|s| s >= checkpoint.num_stages) {
                node.producer = None;
            }
        }

        for (location, size) in [
            DataLocation::None,
            DataLocation::Input,
            DataLocation::Output,
            DataLocation::Blob,
            DataLocation::Bss,
        ]
        .into_iter()
        .zip(checkpoint.area_sizes)
        {
            self.area_sizes.insert(location, size);
        }
    }

    fn push_data(
        &mut self,
        name: String,
        usage: DataUsage,
        desc: DataDesc,
        content: Option<DataContent>,
    ) -> DataId {
        let location = DataLocation::for_usage(usage);
        let offset = if location == DataLocation::None {
            0
        } else {
            let area = self.area_sizes.entry(location).or_insert(0);
            let offset = *area;
            *area += desc.size_in_bytes();
            offset
        };

        let id = self.data.len();
        self.data.push(DataNode {
            id,
            name,
            usage,
            desc,
            content,
            location,
            offset,
            producer: None,
            consumers: Vec::new(),
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{StageKind, StridedSliceStage};

    fn s32(dims: Vec<usize>) -> DataDesc {
        DataDesc::new(DataType::S32, dims)
    }

    #[test]
    fn packs_areas_sequentially() {
        let mut model = Model::new("m");
        let a = model.add_input_data("a", DataDesc::new(DataType::FP16, vec![2, 4]));
        let b = model.add_input_data("b", s32(vec![2]));
        let c = model
            .add_const_data("c", s32(vec![3]), DataContent::from_i32(&[1, 1, 1]))
            .unwrap();

        assert_eq!(model.data(a).unwrap().offset(), 0);
        assert_eq!(model.data(b).unwrap().offset(), 16);
        assert_eq!(model.data(c).unwrap().location(), DataLocation::Blob);
        assert_eq!(model.data(c).unwrap().offset(), 0);
        assert_eq!(model.area_size(DataLocation::Input), 24);
    }

    #[test]
    fn const_content_must_match_desc() {
        let mut model = Model::new("m");
        let err = model
            .add_const_data("c", s32(vec![4]), DataContent::from_i32(&[1, 1, 1]))
            .unwrap_err();
        assert!(matches!(err, VKStageError::Model(_)));
        assert_eq!(model.num_data(), 0);
    }

    #[test]
    fn fake_data_has_no_content_or_memory() {
        let mut model = Model::new("m");
        let fake = model.add_fake_data();
        let node = model.data(fake).unwrap();

        assert!(node.is_fake());
        assert!(node.content().is_none());
        assert_eq!(node.location(), DataLocation::None);
        assert_eq!(model.area_size(DataLocation::None), 0);
    }

    #[test]
    fn add_new_stage_wires_producers_and_consumers() {
        let mut model = Model::new("m");
        let inputs: Vec<DataId> = (0..3)
            .map(|i| model.add_input_data(format!("in{}", i), s32(vec![2])))
            .collect();
        let fake = model.add_fake_data();
        let out = model.add_output_data("out", s32(vec![2]));

        let mut stage_inputs = inputs.clone();
        stage_inputs.push(fake);
        let stage = StageNode::new(
            "slice",
            "StridedSlice",
            StageKind::StridedSlice(StridedSliceStage::new(0, 0)),
            stage_inputs,
            vec![out],
        );
        let id = model.add_new_stage(stage.clone()).unwrap();

        assert_eq!(model.data(out).unwrap().producer(), Some(id));
        assert_eq!(model.data(inputs[0]).unwrap().consumers(), &[id]);
        assert!(model.data(fake).unwrap().consumers().is_empty());

        // a second producer for the same output is rejected
        assert!(model.add_new_stage(stage).is_err());
        assert_eq!(model.num_stages(), 1);
    }

    #[test]
    fn add_new_stage_rejects_placeholder_output() {
        let mut model = Model::new("m");
        let inputs: Vec<DataId> = (0..3)
            .map(|i| model.add_input_data(format!("in{}", i), s32(vec![2])))
            .collect();
        let fake = model.add_fake_data();

        let stage = StageNode::new(
            "slice",
            "StridedSlice",
            StageKind::StridedSlice(StridedSliceStage::new(0, 0)),
            inputs.clone(),
            vec![fake],
        );
        assert!(matches!(
            model.add_new_stage(stage),
            Err(VKStageError::Model(_))
        ));
        assert_eq!(model.data(fake).unwrap().producer(), None);
        assert!(model.data(inputs[0]).unwrap().consumers().is_empty());
        assert_eq!(model.num_stages(), 0);
    }

    #[test]
    fn add_new_stage_rejects_unknown_data() {
        let mut model = Model::new("m");
        let stage = StageNode::new(
            "slice",
            "StridedSlice",
            StageKind::StridedSlice(StridedSliceStage::new(0, 0)),
            vec![0, 1, 2, 3],
            vec![4],
        );
        assert!(matches!(
            model.add_new_stage(stage),
            Err(VKStageError::Model(_))
        ));
    }

    #[test]
    fn rollback_restores_arena() {
        let mut model = Model::new("m");
        let input = model.add_input_data("in", s32(vec![2]));
        let checkpoint = model.checkpoint();

        model.add_fake_data();
        model.add_intermediate_data("tmp", s32(vec![8]));
        let out = model.add_output_data("out", s32(vec![2]));
        model
            .add_new_stage(StageNode::new(
                "slice",
                "StridedSlice",
                StageKind::StridedSlice(StridedSliceStage::new(0, 0)),
                vec![input],
                vec![out],
            ))
            .unwrap();

        model.rollback(checkpoint);

        assert_eq!(model.num_data(), 1);
        assert_eq!(model.num_stages(), 0);
        assert!(model.data(input).unwrap().consumers().is_empty());
        assert_eq!(model.area_size(DataLocation::Bss), 0);
        assert_eq!(model.checkpoint(), checkpoint);
    }
}
