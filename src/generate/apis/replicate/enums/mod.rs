pub mod replicate_aspect_ratio;
pub mod replicate_model;
pub mod replicate_prediction_status;
