use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Category;

/// Portfolio line and total-row highlight (`#007BFF`).
pub const ACCENT: Color32 = Color32::from_rgb(0x00, 0x7B, 0xFF);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Category → Color32
// ---------------------------------------------------------------------------

/// Distinct colour per category, used for filter labels and the table.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<Category, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    pub fn new(categories: &BTreeSet<Category>) -> Self {
        let mapping = categories
            .iter()
            .copied()
            .zip(generate_palette(categories.len()))
            .collect();

        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, category: Category) -> Color32 {
        self.mapping
            .get(&category)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct() {
        let palette = generate_palette(3);
        assert_eq!(palette.len(), 3);
        assert_ne!(palette[0], palette[1]);
        assert_ne!(palette[1], palette[2]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_missing_category_falls_back_to_gray() {
        let colors = CategoryColors::new(&[Category::Cash, Category::Risk].into_iter().collect());
        assert_ne!(colors.color_for(Category::Cash), Color32::GRAY);
        assert_eq!(colors.color_for(Category::Property), Color32::GRAY);
    }
}
