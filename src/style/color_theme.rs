use super::Color;

/// A 24-bit color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// The sixteen colors of a [Base16](http://chriskempson.com/projects/base16/) theme.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorTheme {
    pub palette: [Rgb; 16],
}

impl Rgb {
    pub const fn from_hex(hex: u32) -> Rgb {
        Rgb {
            red: (hex >> 16) as u8,
            green: (hex >> 8) as u8,
            blue: hex as u8,
        }
    }
}

impl ColorTheme {
    /// The "default dark" theme, by Chris Kempson.
    pub fn default_dark() -> ColorTheme {
        ColorTheme {
            palette: [
                Rgb::from_hex(0x181818),
                Rgb::from_hex(0x282828),
                Rgb::from_hex(0x383838),
                Rgb::from_hex(0x585858),
                Rgb::from_hex(0xb8b8b8),
                Rgb::from_hex(0xd8d8d8),
                Rgb::from_hex(0xe8e8e8),
                Rgb::from_hex(0xf8f8f8),
                Rgb::from_hex(0xab4642),
                Rgb::from_hex(0xdc9656),
                Rgb::from_hex(0xf7ca88),
                Rgb::from_hex(0xa1b56c),
                Rgb::from_hex(0x86c1b9),
                Rgb::from_hex(0x7cafc2),
                Rgb::from_hex(0xba8baf),
                Rgb::from_hex(0xa16946),
            ],
        }
    }

    pub fn rgb(&self, color: Color) -> Rgb {
        self.palette[color as usize]
    }
}

impl Default for ColorTheme {
    fn default() -> Self {
        ColorTheme::default_dark()
    }
}
