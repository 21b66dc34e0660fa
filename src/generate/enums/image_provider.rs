#[non_exhaustive]
pub struct ImageProvider;

impl ImageProvider {
    pub const POLLINATIONS: &'static str = "pollinations";
    pub const REPLICATE: &'static str = "replicate";
}
