/// SDXL-friendly (width, height) for a ratio tag. Unknown tags fall back to square.
pub fn dimensions(aspect_ratio: Option<&str>) -> (u16, u16) {
    match aspect_ratio {
        Some("1:1") => (1024, 1024),
        Some("16:9") => (1344, 768),
        Some("9:16") => (768, 1344),
        Some("4:3") => (1152, 896),
        Some("3:4") => (896, 1152),
        _ => (1024, 1024),
    }
}
