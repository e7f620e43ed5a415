use crate::{
    layer::Layer,
    model::{Model, StageId},
    stage::{StageType, strided_slice::parse_strided_slice},
    utils::error::LoweringError,
};

use super::config::{FrontEndConfig, LayerErrorPolicy};

/// Lowers framework layers into stages of a [`Model`]
pub struct FrontEnd {
    config: FrontEndConfig,
}

impl FrontEnd {
    pub fn new(config: FrontEndConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FrontEndConfig {
        &self.config
    }

    /// Lower one layer. On failure the model is left exactly as it was.
    pub fn parse_layer(&self, model: &mut Model, layer: &Layer) -> Result<StageId, LoweringError> {
        let stage_type = StageType::from_layer_type(layer.layer_type()).ok_or_else(|| {
            LoweringError::UnsupportedLayer {
                layer: layer.layer_ref(),
            }
        })?;

        let checkpoint = model.checkpoint();
        let result = match stage_type {
            StageType::StridedSlice => parse_strided_slice(model, layer, &self.config),
        };

        if result.is_err() {
            model.rollback(checkpoint);
        }
        result
    }

    /// Lower layers in order, applying the configured [`LayerErrorPolicy`].
    /// Returns the ids of the stages that were appended.
    pub fn parse_layers(
        &self,
        model: &mut Model,
        layers: &[Layer],
    ) -> Result<Vec<StageId>, LoweringError> {
        tracing::info!(
            "Lowering {} layers into model '{}'",
            layers.len(),
            model.name()
        );

        let mut stage_ids = Vec::with_capacity(layers.len());
        for layer in layers {
            match self.parse_layer(model, layer) {
                Ok(id) => stage_ids.push(id),
                Err(err) => match self.config.layer_error_policy {
                    LayerErrorPolicy::Abort => return Err(err),
                    LayerErrorPolicy::Skip => {
                        tracing::warn!("Skipping layer '{}': {}", layer.name(), err);
                    }
                },
            }
        }

        tracing::info!(
            "Model '{}' now has {} stages ({} layers skipped)",
            model.name(),
            model.num_stages(),
            layers.len() - stage_ids.len()
        );

        Ok(stage_ids)
    }
}

impl Default for FrontEnd {
    fn default() -> Self {
        Self::new(FrontEndConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        layer::Layers,
        model::DataId,
        tensor::{DataDesc, DataType},
    };

    fn io(model: &mut Model, tag: &str) -> (Vec<DataId>, DataId) {
        let data = model.add_input_data(
            format!("{}_data", tag),
            DataDesc::new(DataType::FP16, vec![4]),
        );
        let begin = model.add_input_data(
            format!("{}_begin", tag),
            DataDesc::new(DataType::S32, vec![1]),
        );
        let end = model.add_input_data(
            format!("{}_end", tag),
            DataDesc::new(DataType::S32, vec![1]),
        );
        let out = model.add_output_data(
            format!("{}_out", tag),
            DataDesc::new(DataType::FP16, vec![2]),
        );
        (vec![data, begin, end], out)
    }

    #[test]
    fn unknown_layer_type_is_unsupported() {
        let mut model = Model::new("m");
        let (inputs, out) = io(&mut model, "a");
        let layer = Layer::new("relu", "ReLU", inputs, vec![out]);

        assert_eq!(
            FrontEnd::default().parse_layer(&mut model, &layer),
            Err(LoweringError::UnsupportedLayer {
                layer: layer.layer_ref()
            })
        );
    }

    #[test]
    fn failed_layer_leaves_model_untouched() {
        let mut model = Model::new("m");
        let (inputs, out) = io(&mut model, "a");
        let layer = Layers::strided_slice("slice", inputs, out).with_param("end_mask", "1,2");

        let before = model.checkpoint();
        let result = FrontEnd::default().parse_layer(&mut model, &layer);

        assert!(matches!(result, Err(LoweringError::MaskDecode { param: "end_mask", .. })));
        assert_eq!(model.checkpoint(), before);
    }

    #[test]
    fn abort_policy_stops_at_first_error() {
        let mut model = Model::new("m");
        let (inputs_a, out_a) = io(&mut model, "a");
        let (inputs_b, out_b) = io(&mut model, "b");
        let layers = vec![
            Layers::strided_slice("bad", inputs_a, out_a).with_param("shrink_axis_mask", "1"),
            Layers::strided_slice("good", inputs_b, out_b),
        ];

        let err = FrontEnd::default()
            .parse_layers(&mut model, &layers)
            .unwrap_err();
        assert_eq!(err.layer().name, "bad");
        assert_eq!(model.num_stages(), 0);
    }

    #[test]
    fn skip_policy_continues_past_bad_layer() {
        let mut model = Model::new("m");
        let (inputs_a, out_a) = io(&mut model, "a");
        let (inputs_b, out_b) = io(&mut model, "b");
        let layers = vec![
            Layers::strided_slice("bad", inputs_a, out_a).with_param("shrink_axis_mask", "1"),
            Layers::strided_slice("good", inputs_b, out_b),
        ];

        let front_end = FrontEnd::new(FrontEndConfig {
            layer_error_policy: LayerErrorPolicy::Skip,
            ..Default::default()
        });
        let ids = front_end.parse_layers(&mut model, &layers).unwrap();

        assert_eq!(ids.len(), 1);
        assert_eq!(model.stage(ids[0]).unwrap().name(), "good");
        assert_eq!(model.data(out_a).unwrap().producer(), None);
    }
}
