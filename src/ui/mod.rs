/// UI layer: thin egui wrappers over the data layer's outputs.
pub mod charts;
pub mod panels;
