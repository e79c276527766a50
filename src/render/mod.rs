//! Presentation layer
//!
//! The couplet text library lives here on every target so the sim's count
//! can be checked against it; the Canvas-2D renderer itself is wasm-only.

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

/// Spring couplet library shown during the reward cutscene.
/// Indexed by `GameState::couplet`; length must match `COUPLET_COUNT`.
pub const COUPLETS: [[&str; 2]; 10] = [
    ["天增岁月人增寿", "春满乾坤福满门"],
    ["门迎百福福星照", "户纳千祥祥云开"],
    ["一帆风顺年年好", "万事如意步步高"],
    ["春临大地百花艳", "节至人间万象新"],
    ["事事如意大吉祥", "家家顺心长安康"],
    ["和顺一门有百福", "平安二字值千金"],
    ["喜居宝地千年旺", "福照家门万事兴"],
    ["新年有福随心到", "好岁无虞顺意来"],
    ["金马奔腾开胜局", "神龙起舞展宏图"],
    ["四海迎春千卉放", "九州庆节万家欢"],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_couplet_library_matches_sim_count() {
        assert_eq!(COUPLETS.len() as u32, crate::sim::COUPLET_COUNT);
    }

    #[test]
    fn test_every_couplet_has_matched_seven_character_lines() {
        for [upper, lower] in COUPLETS {
            assert_eq!(upper.chars().count(), 7);
            assert_eq!(lower.chars().count(), 7);
        }
    }
}
