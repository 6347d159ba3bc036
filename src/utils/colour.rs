// Disable this lint to avoid it wanting to change `0xABCDEF` to `0xAB_CDEF`.
#![allow(clippy::unreadable_literal)]

use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;

/// A utility struct to help with working with the basic representation of a colour. This is
/// particularly useful when setting an embed's colour, as the API works with an integer value
/// instead of an RGB value.
///
/// Instances can be created by using the struct's associated functions, by parsing a `#RRGGBB`
/// string or one of the preset names found in the official client's colour picker.
///
/// # Examples
///
/// Creating an instance with the [`Self::DARK_TEAL`] preset:
///
/// ```rust
/// use interactions::utils::Colour;
///
/// let colour = Colour::DARK_TEAL;
///
/// assert_eq!(colour.tuple(), (17, 128, 106));
/// ```
///
/// Parsing a hex string or a name:
///
/// ```rust
/// use interactions::utils::Colour;
///
/// assert_eq!("#31B505".parse::<Colour>().unwrap(), Colour::new(0x31B505));
/// assert_eq!("DarkTeal".parse::<Colour>().unwrap(), Colour::DARK_TEAL);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Colour(pub u32);

impl Colour {
    /// Generates a new Colour with the given integer value set.
    #[inline]
    #[must_use]
    pub const fn new(value: u32) -> Colour {
        Colour(value)
    }

    /// Generates a new Colour from an RGB value, creating an inner u32 representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use interactions::utils::Colour;
    ///
    /// let colour = Colour::from_rgb(255, 0, 0);
    /// assert_eq!(colour.r(), 255);
    /// assert_eq!(colour.g(), 0);
    /// assert_eq!(colour.b(), 0);
    /// ```
    // Clippy wants to use `u32::from` instead `as`-casts,
    // but this not doable as `u32::from` is not a const fn.
    #[allow(clippy::cast_lossless)]
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Colour {
        Colour((red as u32) << 16 | (green as u32) << 8 | blue as u32)
    }

    /// Returns the red RGB component of this Colour.
    #[must_use]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 255) as u8
    }

    /// Returns the green RGB component of this Colour.
    #[must_use]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 255) as u8
    }

    /// Returns the blue RGB component of this Colour.
    #[must_use]
    pub const fn b(self) -> u8 {
        (self.0 & 255) as u8
    }

    /// Returns a tuple of the red, green, and blue components of this Colour.
    #[must_use]
    pub const fn tuple(self) -> (u8, u8, u8) {
        (self.r(), self.g(), self.b())
    }

    /// Returns a hexadecimal string of this Colour, such as `"31B505"`.
    #[must_use]
    pub fn hex(self) -> String {
        format!("{:06X}", self.0)
    }

    /// Looks up a preset by the name it has in the official client's colour picker, such as
    /// `"Blurple"` or `"DarkVividPink"`. The lookup ignores case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Colour> {
        PRESETS
            .iter()
            .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
            .map(|&(_, colour)| colour)
    }
}

impl From<u32> for Colour {
    fn from(value: u32) -> Colour {
        Colour(value)
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Colour::from_rgb(red, green, blue)
    }
}

/// The string could not be parsed into a [`Colour`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseColourError(String);

impl fmt::Display for ParseColourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is neither a colour name nor a #RRGGBB value", self.0)
    }
}

impl StdError for ParseColourError {}

impl FromStr for Colour {
    type Err = ParseColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(colour) = Self::from_name(s) {
            return Ok(colour);
        }

        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColourError(s.to_string()));
        }
        u32::from_str_radix(hex, 16).map(Colour).map_err(|_| ParseColourError(s.to_string()))
    }
}

const PRESETS: &[(&str, Colour)] = &[
    ("Default", Colour(0x000000)),
    ("White", Colour(0xFFFFFF)),
    ("Aqua", Colour(0x1ABC9C)),
    ("Green", Colour(0x57F287)),
    ("Blue", Colour(0x3498DB)),
    ("Yellow", Colour(0xFEE75C)),
    ("Purple", Colour(0x9B59B6)),
    ("LuminousVividPink", Colour(0xE91E63)),
    ("Fuchsia", Colour(0xEB459E)),
    ("Gold", Colour(0xF1C40F)),
    ("Orange", Colour(0xE67E22)),
    ("Red", Colour(0xED4245)),
    ("Grey", Colour(0x95A5A6)),
    ("Navy", Colour(0x34495E)),
    ("DarkAqua", Colour(0x11806A)),
    ("DarkTeal", Colour(0x11806A)),
    ("DarkGreen", Colour(0x1F8B4C)),
    ("DarkBlue", Colour(0x206694)),
    ("DarkPurple", Colour(0x71368A)),
    ("DarkVividPink", Colour(0xAD1457)),
    ("DarkGold", Colour(0xC27C0E)),
    ("DarkOrange", Colour(0xA84300)),
    ("DarkRed", Colour(0x992D22)),
    ("DarkGrey", Colour(0x979C9F)),
    ("DarkerGrey", Colour(0x7F8C8D)),
    ("LightGrey", Colour(0xBCC0C0)),
    ("DarkNavy", Colour(0x2C3E50)),
    ("Blurple", Colour(0x5865F2)),
    ("DarkButNotBlack", Colour(0x2C2F33)),
    ("NotQuiteBlack", Colour(0x23272A)),
];

impl Colour {
    /// Creates a new [`Colour`], setting its RGB value to `(111, 198, 226)`.
    pub const BLITZ_BLUE: Colour = Colour(0x6FC6E2);
    /// Creates a new [`Colour`], setting its RGB value to `(52, 152, 219)`.
    pub const BLUE: Colour = Colour(0x3498DB);
    /// Creates a new [`Colour`], setting its RGB value to `(88, 101, 242)`.
    pub const BLURPLE: Colour = Colour(0x5865F2);
    /// Creates a new [`Colour`], setting its RGB value to `(32, 102, 148)`.
    pub const DARK_BLUE: Colour = Colour(0x206694);
    /// Creates a new [`Colour`], setting its RGB value to `(194, 124, 14)`.
    pub const DARK_GOLD: Colour = Colour(0xC27C0E);
    /// Creates a new [`Colour`], setting its RGB value to `(31, 139, 76)`.
    pub const DARK_GREEN: Colour = Colour(0x1F8B4C);
    /// Creates a new [`Colour`], setting its RGB value to `(96, 125, 139)`.
    pub const DARK_GREY: Colour = Colour(0x607D8B);
    /// Creates a new [`Colour`], setting its RGB value to `(173, 20, 87)`.
    pub const DARK_MAGENTA: Colour = Colour(0xAD1457);
    /// Creates a new [`Colour`], setting its RGB value to `(168, 67, 0)`.
    pub const DARK_ORANGE: Colour = Colour(0xA84300);
    /// Creates a new [`Colour`], setting its RGB value to `(113, 54, 138)`.
    pub const DARK_PURPLE: Colour = Colour(0x71368A);
    /// Creates a new [`Colour`], setting its RGB value to `(153, 45, 34)`.
    pub const DARK_RED: Colour = Colour(0x992D22);
    /// Creates a new [`Colour`], setting its RGB value to `(17, 128, 106)`.
    pub const DARK_TEAL: Colour = Colour(0x11806A);
    /// Creates a new [`Colour`], setting its RGB value to `(84, 110, 122)`.
    pub const DARKER_GREY: Colour = Colour(0x546E7A);
    /// Creates a new [`Colour`], setting its RGB value to `(241, 196, 15)`.
    pub const GOLD: Colour = Colour(0xF1C40F);
    /// Creates a new [`Colour`], setting its RGB value to `(151, 156, 159)`.
    pub const LIGHT_GREY: Colour = Colour(0x979C9F);
    /// Creates a new [`Colour`], setting its RGB value to `(149, 165, 166)`.
    pub const LIGHTER_GREY: Colour = Colour(0x95A5A6);
    /// Creates a new [`Colour`], setting its RGB value to `(233, 30, 99)`.
    pub const MAGENTA: Colour = Colour(0xE91E63);
    /// Creates a new [`Colour`], setting its RGB value to `(230, 126, 34)`.
    pub const ORANGE: Colour = Colour(0xE67E22);
    /// Creates a new [`Colour`], setting its RGB value to `(155, 89, 182)`.
    pub const PURPLE: Colour = Colour(0x9B59B6);
    /// Creates a new [`Colour`], setting its RGB value to `(231, 76, 60)`.
    pub const RED: Colour = Colour(0xE74C3C);
    /// Creates a new [`Colour`], setting its RGB value to `(26, 188, 156)`.
    pub const TEAL: Colour = Colour(0x1ABC9C);
}

/// Colour constants used by Discord for their branding, role colour palette, etc.
pub mod colours {
    pub mod branding {
        use super::super::Colour;

        /// Creates a new [`Colour`], setting its value to `0x5865F2`.
        pub const BLURPLE: Colour = Colour(0x5865F2);
        /// Creates a new [`Colour`], setting its value to `0x57F287`.
        pub const GREEN: Colour = Colour(0x57F287);
        /// Creates a new [`Colour`], setting its value to `0xFEE75C`.
        pub const YELLOW: Colour = Colour(0xFEE75C);
        /// Creates a new [`Colour`], setting its value to `0xEB459E`.
        pub const FUCHSIA: Colour = Colour(0xEB459E);
        /// Creates a new [`Colour`], setting its value to `0xED4245`.
        pub const RED: Colour = Colour(0xED4245);
        /// Creates a new [`Colour`], setting its value to `0xFFFFFF`.
        pub const WHITE: Colour = Colour(0xFFFFFF);
        /// Creates a new [`Colour`], setting its value to `0x23272A`.
        pub const BLACK: Colour = Colour(0x23272A);
    }

    pub mod css {
        use super::super::Colour;

        /// Creates a new [`Colour`], setting its value to `0x3BA55D`.
        pub const POSITIVE: Colour = Colour(0x3BA55D);
        /// Creates a new [`Colour`], setting its value to `0xFAA81A`.
        pub const WARNING: Colour = Colour(0xFAA81A);
        /// Creates a new [`Colour`], setting its value to `0xED4245`.
        pub const DANGER: Colour = Colour(0xED4245);
    }
}
