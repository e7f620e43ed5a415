use crate::{
    blob::BlobSerializer,
    model::StageId,
    tensor::{DataContent, DataDesc},
    utils::error::VKStageError,
};

// Unique identifier for a data node within a model
pub type DataId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataUsage {
    Input,
    Output,
    Const,
    Intermediate,
    Fake,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataLocation {
    None,
    Input,
    Output,
    Blob,
    Bss,
}

impl DataLocation {
    pub fn wire_code(&self) -> u32 {
        match self {
            DataLocation::None => 0,
            DataLocation::Input => 1,
            DataLocation::Output => 2,
            DataLocation::Blob => 3,
            DataLocation::Bss => 4,
        }
    }

    pub fn for_usage(usage: DataUsage) -> Self {
        match usage {
            DataUsage::Input => DataLocation::Input,
            DataUsage::Output => DataLocation::Output,
            DataUsage::Const => DataLocation::Blob,
            DataUsage::Intermediate => DataLocation::Bss,
            DataUsage::Fake => DataLocation::None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DataNode {
    pub(crate) id: DataId,
    pub(crate) name: String,
    pub(crate) usage: DataUsage,
    pub(crate) desc: DataDesc,
    pub(crate) content: Option<DataContent>,
    pub(crate) location: DataLocation,
    pub(crate) offset: usize,
    pub(crate) producer: Option<StageId>,
    pub(crate) consumers: Vec<StageId>,
}

impl DataNode {
    pub fn id(&self) -> DataId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn usage(&self) -> DataUsage {
        self.usage
    }

    pub fn desc(&self) -> &DataDesc {
        &self.desc
    }

    pub fn content(&self) -> Option<&DataContent> {
        self.content.as_ref()
    }

    pub fn location(&self) -> DataLocation {
        self.location
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn producer(&self) -> Option<StageId> {
        self.producer
    }

    pub fn consumers(&self) -> &[StageId] {
        &self.consumers
    }

    pub fn is_fake(&self) -> bool {
        self.usage == DataUsage::Fake
    }

    /// Write the buffer reference the hardware loader uses to find this data:
    /// `[location][offset][data_type][ndims][dims..][strides..]`
    pub fn serialize_buffer(&self, serializer: &mut BlobSerializer) -> Result<(), VKStageError> {
        serializer.append_u32(self.location.wire_code());
        serializer.append_usize(self.offset)?;
        serializer.append_u32(self.desc.data_type().wire_code());
        serializer.append_usize(self.desc.ndim())?;
        for &dim in self.desc.dims() {
            serializer.append_usize(dim)?;
        }
        for stride in self.desc.strides() {
            serializer.append_usize(stride)?;
        }
        Ok(())
    }
}
