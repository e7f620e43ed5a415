use crate::{model::Model, utils::error::VKStageError};

use super::serializer::{BlobSerializer, to_wire_u32};

pub const BLOB_MAGIC: u32 = u32::from_le_bytes(*b"VKSB");
pub const BLOB_VERSION: u32 = 1;

/// Emits every stage of a model into a single blob:
/// `[magic][version][stage_count]` then per stage
/// `[stage_type][section_len][params][data]`
pub struct BlobWriter;

impl BlobWriter {
    pub fn write_model(model: &Model) -> Result<Vec<u8>, VKStageError> {
        let mut serializer = BlobSerializer::new();
        serializer.append_u32(BLOB_MAGIC);
        serializer.append_u32(BLOB_VERSION);
        serializer.append_usize(model.num_stages())?;

        for stage in model.stages() {
            serializer.append_u32(stage.stage_type().wire_code());

            let size_pos = serializer.reserve_u32();
            let section_start = serializer.len();

            stage.serialize_params(&mut serializer);
            stage.serialize_data(model, &mut serializer)?;

            let section_len = serializer.len() - section_start;
            serializer.write_u32_at(size_pos, to_wire_u32(section_len)?);

            tracing::trace!(
                "Serialized stage '{}' ({} bytes)",
                stage.name(),
                section_len
            );
        }

        tracing::debug!(
            "Wrote blob for model '{}': {} stages, {} bytes",
            model.name(),
            model.num_stages(),
            serializer.len()
        );

        Ok(serializer.into_bytes())
    }
}
