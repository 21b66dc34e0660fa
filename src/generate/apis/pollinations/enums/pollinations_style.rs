use std::collections::HashMap;

lazy_static! {
    static ref STYLE_SUFFIXES: HashMap<&'static str, &'static str> = HashMap::from([
        (
            "Hyperrealistic",
            ", 8k, photorealistic, cinematic lighting, ultra-detailed, professional photography",
        ),
        (
            "Anime",
            ", anime style, key visual, vibrant colors, digital art, by makoto shinkai",
        ),
        (
            "Digital Painting",
            ", digital painting, concept art, smooth, sharp focus, illustration, by artgerm",
        ),
        (
            "Cinematic",
            ", cinematic still, movie poster, dramatic lighting, epic, emotional",
        ),
        (
            "Retro Futurism",
            ", retro futurism, 1980s style, synthwave, vintage sci-fi poster, grainy",
        ),
        (
            "Low Poly",
            ", low poly, 3d render, isometric, vibrant colors, simple shapes",
        ),
        (
            "Comic Book",
            ", comic book art, graphic novel style, bold lines, cel shading, by jim lee",
        ),
        (
            "Dark Fantasy",
            ", dark fantasy art, intricate detail, epic scale, magical, ominous, by greg rutkowski",
        ),
        (
            "Cyberpunk",
            ", cyberpunk, neon lights, futuristic city, blade runner aesthetic, dystopian",
        ),
    ]);
}

pub const NEGATIVE_PROMPT_PREFIX: &str =
    ", (worst quality, low quality, normal quality, blurry, deformed, ugly), ";

/// Prompt suffix for a style tag. Unknown tags get no suffix.
pub fn style_suffix(style: &str) -> &'static str {
    STYLE_SUFFIXES.get(style).copied().unwrap_or("")
}
