/// (width, height) for a ratio tag. Unknown tags fall back to square.
pub fn dimensions(aspect_ratio: &str) -> (u16, u16) {
    match aspect_ratio {
        "1:1" => (1024, 1024),
        "16:9" => (1536, 864),
        "9:16" => (864, 1536),
        "4:3" => (1024, 768),
        "3:4" => (768, 1024),
        _ => (1024, 1024),
    }
}
