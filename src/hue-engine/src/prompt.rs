//! Prompt sent to the model for theme generation.

/// Number of colors the model is asked for.
pub const MIN_THEME_COLORS: usize = 5;
pub const MAX_THEME_COLORS: usize = 7;

/// Wrap a theme description in designer instructions asking for a bare JSON
/// array of hex codes.
pub fn designer_prompt(description: &str) -> String {
    format!(
        "You are an expert UI and brand color designer. Create a cohesive color theme \
         for the following description:\n\n\
         {description}\n\n\
         Respond with a JSON array of {MIN_THEME_COLORS} to {MAX_THEME_COLORS} hex color \
         codes in the form \"#RRGGBB\", ordered from primary to accent, for example \
         [\"#1E3A5F\", \"#3D5A80\", \"#98C1D9\", \"#E0FBFC\", \"#EE6C4D\"]. \
         Output only the array and nothing else."
    )
}
