pub mod factory;
#[allow(clippy::module_inception)]
pub mod layer;

pub use factory::Layers;
pub use layer::Layer;
