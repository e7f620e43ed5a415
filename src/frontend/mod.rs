pub mod config;
#[allow(clippy::module_inception)]
pub mod frontend;

pub use config::{FrontEndConfig, LayerErrorPolicy};
pub use frontend::FrontEnd;
