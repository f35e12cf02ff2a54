use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Largest value a packed 24-bit color integer can hold.
pub const MAX_PACKED_COLOR: u32 = 0xFF_FFFF;

/// An RGB color with each channel normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Decodes a packed color integer (red in bits 16–23, green in 8–15, blue in 0–7).
    ///
    /// Bits above 23 are ignored.
    pub fn from_packed(color: u32) -> Self {
        let [r, g, b] = Self::channels(color);
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
        }
    }

    /// Extracts the three 8-bit channels of a packed color integer.
    pub fn channels(color: u32) -> [u8; 3] {
        [
            ((color >> 16) & 0xFF) as u8,
            ((color >> 8) & 0xFF) as u8,
            (color & 0xFF) as u8,
        ]
    }

    /// True when every channel differs from `other` by strictly less than `tolerance`.
    ///
    /// This is the single comparison used for color matching; callers must not
    /// inline their own channel arithmetic.
    pub fn approx_eq(&self, other: &Rgb, tolerance: f32) -> bool {
        approx_eq(self.r, other.r, tolerance)
            && approx_eq(self.g, other.g, tolerance)
            && approx_eq(self.b, other.b, tolerance)
    }

    pub fn as_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn is_normalized(&self) -> bool {
        self.as_array().iter().all(|c| (0.0..=1.0).contains(c))
    }
}

/// Scalar form of [`Rgb::approx_eq`].
pub fn approx_eq(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() < tolerance
}

impl From<[f32; 3]> for Rgb {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self { r, g, b }
    }
}

// Wire format is a bare `[r, g, b]` array.
impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let channels = Vec::<f32>::deserialize(deserializer)?;
        match channels.as_slice() {
            [r, g, b] => Ok(Rgb::new(*r, *g, *b)),
            other => Err(de::Error::invalid_length(other.len(), &"an array of 3 numbers")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_extremes_decode_exactly() {
        assert_eq!(Rgb::from_packed(0x000000), Rgb::BLACK);
        assert_eq!(Rgb::from_packed(0xFFFFFF), Rgb::WHITE);
    }

    #[test]
    fn packed_brand_blue_decodes_to_channels() {
        assert_eq!(Rgb::channels(0x3A6BA9), [58, 107, 169]);
        let c = Rgb::from_packed(0x3A6BA9);
        assert!((c.r - 0.227).abs() < 0.001);
        assert!((c.g - 0.420).abs() < 0.001);
        assert!((c.b - 0.663).abs() < 0.001);
    }

    #[test]
    fn approx_eq_is_strict() {
        let base = Rgb::new(0.5, 0.5, 0.5);
        assert!(base.approx_eq(&Rgb::new(0.6, 0.45, 0.5), 0.2));
        assert!(!base.approx_eq(&Rgb::new(0.5, 0.5, 0.75), 0.2));
    }

    #[test]
    fn deserialize_rejects_wrong_arity() {
        assert!(serde_json::from_str::<Rgb>("[0.1, 0.2]").is_err());
        assert!(serde_json::from_str::<Rgb>("[0.1, 0.2, 0.3, 0.4]").is_err());
        let c: Rgb = serde_json::from_str("[0.1, 0.2, 0.3]").unwrap();
        assert_eq!(c, Rgb::new(0.1, 0.2, 0.3));
    }
}
