mod serializer;
pub use serializer::BlobSerializer;
mod writer;
pub use writer::{BLOB_MAGIC, BLOB_VERSION, BlobWriter};
