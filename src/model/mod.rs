mod data;
pub use data::{DataId, DataLocation, DataNode, DataUsage};
mod layout;
pub use layout::{BatchSupport, DimsOrder, StageDataInfo, StridesRequirement};
#[allow(clippy::module_inception)]
mod model;
pub use model::{Model, ModelCheckpoint};
mod stage;
pub use stage::{StageId, StageNode};
