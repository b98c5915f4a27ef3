use crate::error::RenderInitError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub ideal_edge_length: f32,
    pub node_overlap: f32,
    pub node_repulsion: f32,
    pub edge_elasticity: f32,
    pub gravity: f32,
    pub max_iterations: usize,
    pub initial_temperature: f32,
    pub cooling_factor: f32,
    pub min_temperature: f32,
    pub padding: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            ideal_edge_length: 100.0,
            node_overlap: 20.0,
            node_repulsion: 400_000.0,
            edge_elasticity: 100.0,
            gravity: 80.0,
            max_iterations: 1000,
            initial_temperature: 200.0,
            cooling_factor: 0.95,
            min_temperature: 1.0,
            padding: 30.0,
            min_zoom: 0.3,
            max_zoom: 3.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), RenderInitError> {
        let positive = [
            ("ideal_edge_length", self.ideal_edge_length),
            ("node_repulsion", self.node_repulsion),
            ("edge_elasticity", self.edge_elasticity),
            ("gravity", self.gravity),
            ("initial_temperature", self.initial_temperature),
            ("min_temperature", self.min_temperature),
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(RenderInitError::InvalidLayout(name));
            }
        }

        if !self.node_overlap.is_finite() || self.node_overlap < 0.0 {
            return Err(RenderInitError::InvalidLayout("node_overlap"));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(RenderInitError::InvalidLayout("padding"));
        }
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(RenderInitError::InvalidLayout("cooling_factor"));
        }
        if self.max_iterations == 0 {
            return Err(RenderInitError::InvalidLayout("max_iterations"));
        }
        if self.min_zoom >= self.max_zoom {
            return Err(RenderInitError::InvalidZoomBounds {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }

        Ok(())
    }

    pub fn clamp_zoom(&self, level: f32) -> f32 {
        level.clamp(self.min_zoom, self.max_zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(LayoutConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_finite_and_inverted_values() {
        let layout = LayoutConfig {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert_eq!(layout.validate(), Err(RenderInitError::InvalidLayout("gravity")));

        let layout = LayoutConfig {
            cooling_factor: 1.0,
            ..Default::default()
        };
        assert_eq!(layout.validate(), Err(RenderInitError::InvalidLayout("cooling_factor")));

        let layout = LayoutConfig {
            min_zoom: 3.0,
            max_zoom: 0.3,
            ..Default::default()
        };
        assert!(matches!(
            layout.validate(),
            Err(RenderInitError::InvalidZoomBounds { .. })
        ));
    }

    #[test]
    fn zoom_is_clamped() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.clamp_zoom(10.0), 3.0);
        assert_eq!(layout.clamp_zoom(0.01), 0.3);
        assert_eq!(layout.clamp_zoom(1.5), 1.5);
    }
}
