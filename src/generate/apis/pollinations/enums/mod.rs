pub mod pollinations_aspect_ratio;
pub mod pollinations_style;
