use smart_leds::RGB8;

/// Logical RGB color of a single ring position.
///
/// Brightness scaling and wire order are applied by the display sink.
pub type Color = RGB8;

pub const OFF: Color = rgb(0, 0, 0);
pub const RED: Color = rgb(255, 0, 0);
pub const GREEN: Color = rgb(0, 255, 0);
pub const BLUE: Color = rgb(0, 0, 255);
pub const CYAN: Color = rgb(0, 255, 255);
pub const ORANGE: Color = rgb(140, 55, 0);
pub const BRIGHT_WHITE: Color = rgb(255, 255, 255);
pub const QUARTER_GREY: Color = rgb(70, 60, 60);
pub const HOUR_GREY: Color = rgb(7, 5, 5);

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    RGB8 { r, g, b }
}

/// Colors for every semantic role a ring position can take.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub zero_marker: Color,
    pub quarter_marker: Color,
    pub hour_marker: Color,
    pub hour: Color,
    pub minute: Color,
    pub second: Color,
    pub hour_minute: Color,
    pub all_aligned: Color,

    /// Second hand sharing its position with the minute hand only.
    /// Unset means the plain second color wins.
    pub minute_second: Option<Color>,

    /// Second hand sharing its position with the hour hand only.
    pub hour_second: Option<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            zero_marker: ORANGE,
            quarter_marker: QUARTER_GREY,
            hour_marker: HOUR_GREY,
            hour: GREEN,
            minute: BLUE,
            second: RED,
            hour_minute: CYAN,
            all_aligned: BRIGHT_WHITE,
            minute_second: None,
            hour_second: None,
        }
    }
}

/// `#rrggbb`, as printed by the `render` command.
pub fn to_hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(to_hex(ORANGE), "#8c3700");
        assert_eq!(to_hex(OFF), "#000000");
        assert_eq!(to_hex(BRIGHT_WHITE), "#ffffff");
    }

    #[test]
    fn test_partial_palette_keeps_defaults() {
        let palette: Palette = toml::from_str(
            r#"
            second = { r = 200, g = 0, b = 0 }
            minute_second = { r = 140, g = 0, b = 120 }
            "#,
        )
        .unwrap();

        assert_eq!(palette.second, rgb(200, 0, 0));
        assert_eq!(palette.minute_second, Some(rgb(140, 0, 120)));
        assert_eq!(palette.hour, GREEN);
        assert_eq!(palette.hour_second, None);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result: Result<Palette, _> = toml::from_str("tail = { r = 1, g = 2, b = 3 }");
        assert!(result.is_err());
    }
}
