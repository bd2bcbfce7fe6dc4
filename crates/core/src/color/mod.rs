use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{AnimationError, Result};

/// 8-bit RGB fill color, written as `#rrggbb` wherever it is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Achromatic color with every channel set to `level`.
    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    pub fn is_achromatic(&self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// Current intensity. For gray colors this is the shared channel value;
    /// chromatic colors report the rounded mean of their channels.
    pub fn brightness(&self) -> u8 {
        if self.is_achromatic() {
            return self.r;
        }
        let sum = u16::from(self.r) + u16::from(self.g) + u16::from(self.b);
        ((f64::from(sum) / 3.0).round()) as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::gray(0x44)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || AnimationError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
