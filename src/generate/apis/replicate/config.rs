pub const DEFAULT_CFG_SCALE: f32 = 7.5;
pub const DEFAULT_IMAGE_STRENGTH: f32 = 0.8;
