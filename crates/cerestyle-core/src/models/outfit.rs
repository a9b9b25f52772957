use serde::{Deserialize, Serialize};

/// Number of outfit images requested per search
pub const OUTFIT_PAGE_SIZE: u32 = 6;

/// One display-ready outfit image. Replaced wholesale on every search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitItem {
    pub image_url: String,
    pub label: String,
}
