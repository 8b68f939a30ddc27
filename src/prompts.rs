use crate::models::Medium;

pub const MUG: &str = include_str!("../data/prompts/mug.txt");
pub const T_SHIRT: &str = include_str!("../data/prompts/t_shirt.txt");
pub const BILLBOARD: &str = include_str!("../data/prompts/billboard.txt");

/// Scene prompts, indexed by [`Medium::index`].
const MEDIUM_PROMPTS: [&str; Medium::ALL.len()] = [MUG, T_SHIRT, BILLBOARD];

/// Fixed scene prompt for a marketing medium.
pub fn for_medium(medium: Medium) -> &'static str {
    MEDIUM_PROMPTS[medium.index()]
}
