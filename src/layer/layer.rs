use std::collections::HashMap;

use crate::{model::DataId, utils::error::LayerRef};

/// Framework-supplied description of one operator invocation, before lowering.
/// Inputs and outputs refer to data nodes already present in the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    name: String,
    layer_type: String,
    params: HashMap<String, String>,
    inputs: Vec<DataId>,
    outputs: Vec<DataId>,
}

impl Layer {
    pub fn new(
        name: impl Into<String>,
        layer_type: impl Into<String>,
        inputs: Vec<DataId>,
        outputs: Vec<DataId>,
    ) -> Self {
        Self {
            name: name.into(),
            layer_type: layer_type.into(),
            params: HashMap::new(),
            inputs,
            outputs,
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layer_type(&self) -> &str {
        &self.layer_type
    }

    pub fn inputs(&self) -> &[DataId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[DataId] {
        &self.outputs
    }

    pub fn param_as_string<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.params.get(key).map(String::as_str).unwrap_or(default)
    }

    pub fn layer_ref(&self) -> LayerRef {
        LayerRef {
            name: self.name.clone(),
            layer_type: self.layer_type.clone(),
        }
    }
}
