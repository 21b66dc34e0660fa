pub const DEFAULT_CFG_SCALE: f32 = 7.5;
pub const DEFAULT_STEPS: u16 = 25;
