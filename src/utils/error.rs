use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::{model::DataId, tensor::DataType};

#[derive(Error, Debug)]
pub enum VKStageError {
    #[error("Model error: {0}")]
    Model(String),

    #[error("Blob error: {0}")]
    Blob(String),

    #[error(transparent)]
    Lowering(#[from] LoweringError),
}

/// Errors raised while decoding a textual bitmask. These carry no layer context,
/// the front end wraps them into [`LoweringError::MaskDecode`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    #[error(
        "Unsupported mask value: only 0 or 1 are supported, but got '{character}' at position {position}"
    )]
    InvalidCharacter { character: char, position: usize },

    #[error("Mask encodes more than {limit} flags")]
    TooManyFlags { limit: u32 },
}

/// Name and type of the layer being lowered, used to prefix every lowering error
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerRef {
    pub name: String,
    pub layer_type: String,
}

impl Display for LayerRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} with type {}", self.name, self.layer_type)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortKind {
    Inputs,
    Outputs,
}

impl Display for PortKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PortKind::Inputs => write!(f, "inputs"),
            PortKind::Outputs => write!(f, "outputs"),
        }
    }
}

/// Position of a data reference on a layer or stage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSlot {
    Input(usize),
    Output(usize),
}

impl Display for DataSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DataSlot::Input(i) => write!(f, "input #{}", i),
            DataSlot::Output(i) => write!(f, "output #{}", i),
        }
    }
}

/// Set of accepted counts, rendered as "3 or 4"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpectedCount(pub &'static [usize]);

impl Display for ExpectedCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let rendered: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", rendered.join(" or "))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoweringError {
    #[error(
        "Validating layer {layer} failed: number of {kind} should be {expected}, but {actual} were provided"
    )]
    Arity {
        layer: LayerRef,
        kind: PortKind,
        expected: ExpectedCount,
        actual: usize,
    },

    #[error(
        "Validating layer {layer} failed: {slot} should have data type {expected:?}, but {actual:?} was provided"
    )]
    Type {
        layer: LayerRef,
        slot: DataSlot,
        expected: DataType,
        actual: DataType,
    },

    #[error("Validating layer {layer} failed: {slot} cannot be placeholder data")]
    Placeholder { layer: LayerRef, slot: DataSlot },

    #[error("Checking {layer} failed: {feature} parameter is not supported")]
    UnsupportedFeature {
        layer: LayerRef,
        feature: &'static str,
    },

    #[error("Checking {layer} failed: cannot decode {param}: {source}")]
    MaskDecode {
        layer: LayerRef,
        param: &'static str,
        #[source]
        source: MaskError,
    },

    #[error("Checking {layer} failed: content for {slot} is null")]
    NullContent { layer: LayerRef, slot: DataSlot },

    #[error(
        "Checking {layer} failed: non-positive stride is not supported, got {value} at index {index}"
    )]
    NonPositiveStride {
        layer: LayerRef,
        index: usize,
        value: i32,
    },

    #[error("Parsing layer {layer} failed: layer type is not supported")]
    UnsupportedLayer { layer: LayerRef },

    #[error("Parsing layer {layer} failed: data {id} is not part of the model")]
    UnknownData { layer: LayerRef, id: DataId },

    #[error("Parsing layer {layer} failed: output data {output} already has a producer")]
    OutputAlreadyProduced { layer: LayerRef, output: DataId },

    #[error("Parsing layer {layer} failed: {message}")]
    Graph { layer: LayerRef, message: String },
}

impl LoweringError {
    /// The layer the error was raised for
    pub fn layer(&self) -> &LayerRef {
        match self {
            LoweringError::Arity { layer, .. }
            | LoweringError::Type { layer, .. }
            | LoweringError::Placeholder { layer, .. }
            | LoweringError::UnsupportedFeature { layer, .. }
            | LoweringError::MaskDecode { layer, .. }
            | LoweringError::NullContent { layer, .. }
            | LoweringError::NonPositiveStride { layer, .. }
            | LoweringError::UnsupportedLayer { layer }
            | LoweringError::UnknownData { layer, .. }
            | LoweringError::OutputAlreadyProduced { layer, .. }
            | LoweringError::Graph { layer, .. } => layer,
        }
    }
}
