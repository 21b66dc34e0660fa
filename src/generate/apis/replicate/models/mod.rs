pub mod input_spec;
pub mod input_spec_image;
