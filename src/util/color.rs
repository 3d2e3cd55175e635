//! Color constants and helpers for the interface.

use eframe::egui::Color32;

/// Visualization background.
pub const VOID_BLACK: Color32 = Color32::from_rgb(5, 5, 6);

/// Panel background.
pub const PANEL_DARK: Color32 = Color32::from_rgb(16, 18, 20);

/// Primary accent.
pub const TACTICAL_CYAN: Color32 = Color32::from_rgb(0, 200, 220);

/// Secondary accent for outlines and marks.
pub const DIM_CYAN: Color32 = Color32::from_rgb(0, 90, 100);

/// Primary readout text.
pub const DATA_WHITE: Color32 = Color32::from_rgb(225, 228, 230);

/// Secondary/label text.
pub const MUTED_TEXT: Color32 = Color32::from_rgb(120, 128, 134);

/// Error / high-entropy accent.
pub const ALERT_RED: Color32 = Color32::from_rgb(255, 70, 70);

/// Nominal-state accent.
pub const OPERATIONAL_GREEN: Color32 = Color32::from_rgb(80, 220, 120);

/// Get color for a byte value based on its characteristics.
/// Used for hex dump highlighting in the inspector.
pub fn byte_color(byte: u8) -> Color32 {
    if byte == 0 {
        Color32::from_rgb(60, 60, 80) // Null - dark blue-gray
    } else if (0x20..=0x7e).contains(&byte) {
        Color32::from_rgb(180, 180, 220) // Printable ASCII - light
    } else if byte == 0xff {
        Color32::from_rgb(255, 100, 100) // 0xFF - red
    } else if byte > 0x7f {
        Color32::from_rgb(255, 180, 100) // High bytes - orange
    } else {
        Color32::from_rgb(100, 180, 255) // Control chars - blue
    }
}

/// Get color for an entropy value in the inspector panel.
pub fn entropy_indicator_color(entropy: f64) -> Color32 {
    if entropy > 7.0 {
        Color32::from_rgb(255, 80, 80) // Red
    } else if entropy > 4.0 {
        Color32::from_rgb(80, 255, 80) // Green
    } else {
        Color32::from_rgb(80, 150, 255) // Blue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_color_classes() {
        assert_eq!(byte_color(0), Color32::from_rgb(60, 60, 80));
        assert_eq!(byte_color(b'A'), Color32::from_rgb(180, 180, 220));
        assert_eq!(byte_color(0xff), Color32::from_rgb(255, 100, 100));
        assert_eq!(byte_color(0x90), Color32::from_rgb(255, 180, 100));
        assert_eq!(byte_color(0x07), Color32::from_rgb(100, 180, 255));
    }

    #[test]
    fn test_entropy_indicator_thresholds() {
        assert_eq!(entropy_indicator_color(7.5), Color32::from_rgb(255, 80, 80));
        assert_eq!(entropy_indicator_color(5.0), Color32::from_rgb(80, 255, 80));
        assert_eq!(entropy_indicator_color(1.0), Color32::from_rgb(80, 150, 255));
    }
}
