mod content;
pub use content::DataContent;
mod data_type;
pub use data_type::DataType;
mod desc;
pub use desc::DataDesc;
