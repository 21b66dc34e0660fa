#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplicateModel {
    pub identifier: &'static str,
    pub default_steps: u16,
}

impl ReplicateModel {
    pub const STABLE_DIFFUSION_XL: ReplicateModel = ReplicateModel {
        identifier:
            "stability-ai/sdxl:39ed52f2a78e934b3ba6e2a89f5b1c712de7dfea535525255b1aa35c5565e08b",
        default_steps: 25,
    };
    pub const PHOTOREALISTIC: ReplicateModel = ReplicateModel {
        identifier: "lucataco/photorealistic-fuen-v1:517f51b64653b68334467389441113b2e0430154cf5e296e8648ba745c2698e6",
        default_steps: 30,
    };
    pub const ANIME: ReplicateModel = ReplicateModel {
        identifier: "lucataco/anime-fuen-v1:30a73c9b4c73f78e02554792a6c3f25b304c005b630e527f316223b209d7010f",
        default_steps: 25,
    };

    pub fn from_tag(tag: &str) -> Option<ReplicateModel> {
        match tag {
            "stable-diffusion-xl" => Some(Self::STABLE_DIFFUSION_XL),
            "photorealistic" => Some(Self::PHOTOREALISTIC),
            "anime" => Some(Self::ANIME),
            _ => None,
        }
    }

    /// Version hash after the `owner/name:` prefix.
    pub fn version(&self) -> &'static str {
        match self.identifier.split_once(':') {
            Some((_, version)) => version,
            None => self.identifier,
        }
    }
}
