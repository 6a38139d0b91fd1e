//! Strongly-typed numeric primitives for timeline geometry.
//!
//! Vertical metrics are carried as [`Length`] so that slot heights, spacing
//! and cursors cannot be confused with unitless ratios. Horizontal and 2D
//! geometry (spine points, frames, outlines) uses `glam::DVec2`.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use glam::{DVec2, dvec2};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Distance along the card, in logical points
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    /// Create a Length from points (const-friendly, unchecked).
    /// Use `try_new` for caller-provided values.
    #[inline]
    pub const fn pt(val: f64) -> Length {
        Length(val)
    }

    /// Create a Length with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Length, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Length(val))
        }
    }

    /// Create a non-negative Length with validation
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Length, NumericError> {
        let len = Length::try_new(val)?;
        if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(len)
        }
    }

    #[inline]
    pub fn min(self, other: Length) -> Length {
        Length(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Length) -> Length {
        Length(self.0.max(other.0))
    }

    /// How far `self` sticks out past `limit`, never negative.
    #[inline]
    pub fn overflow_past(self, limit: Length) -> Length {
        (self - limit).max(Length::ZERO)
    }

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length { Length(self.0 + rhs.0) }
}
impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length { Length(self.0 - rhs.0) }
}
impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length { Length(self.0 * rhs) }
}
impl Div<f64> for Length {
    type Output = Length;
    fn div(self, rhs: f64) -> Length { Length(self.0 / rhs) }
}

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length { Length(-self.0) }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Length) {
        self.0 -= rhs.0;
    }
}

impl std::iter::Sum for Length {
    fn sum<I: Iterator<Item = Length>>(iter: I) -> Length {
        iter.fold(Length::ZERO, |acc, l| acc + l)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Length {
    fn from(val: f64) -> Self {
        Length(val)
    }
}

/// Axis-aligned rectangle in card coordinates (y grows downward)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub origin: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { origin: dvec2(x, y), size: dvec2(width, height) }
    }

    pub fn min(&self) -> DVec2 {
        self.origin
    }

    pub fn max(&self) -> DVec2 {
        self.origin + self.size
    }

    pub fn center(&self) -> DVec2 {
        self.origin + self.size / 2.0
    }

    pub fn width(&self) -> f64 {
        self.size.x
    }

    pub fn height(&self) -> f64 {
        self.size.y
    }

    /// Half-open containment: the min edges belong to the rect, the max edges don't.
    pub fn contains(&self, p: DVec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.x < max.x && p.y >= self.origin.y && p.y < max.y
    }
}

/// Simple color model, enough to hand stroke/border colors to a surface.
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, u8),
}

impl Color {
    pub fn named(name: impl Into<String>) -> Self {
        Color::Named(name.into())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(s) => write!(f, "{}", s),
            Color::Rgb(r, g, b) => write!(f, "rgb({},{},{})", r, g, b),
            Color::Rgba(r, g, b, a) => write!(f, "rgba({},{},{},{})", r, g, b, a),
        }
    }
}

/// Error returned when a color string can't be understood
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color: {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || ParseColorError(s.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            let channel = |i: usize| {
                u8::from_str_radix(hex.get(i..i + 2).ok_or_else(bad)?, 16).map_err(|_| bad())
            };
            return match hex.len() {
                6 => Ok(Color::Rgb(channel(0)?, channel(2)?, channel(4)?)),
                8 => Ok(Color::Rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
                _ => Err(bad()),
            };
        }

        if let Some(inner) = s.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
            let parts = parse_channels(inner).ok_or_else(bad)?;
            return match parts.as_slice() {
                [r, g, b, a] => Ok(Color::Rgba(*r, *g, *b, *a)),
                _ => Err(bad()),
            };
        }

        if let Some(inner) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            let parts = parse_channels(inner).ok_or_else(bad)?;
            return match parts.as_slice() {
                [r, g, b] => Ok(Color::Rgb(*r, *g, *b)),
                _ => Err(bad()),
            };
        }

        if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Color::Named(s.to_ascii_lowercase()))
        } else {
            Err(bad())
        }
    }
}

fn parse_channels(inner: &str) -> Option<Vec<u8>> {
    inner.split(',').map(|p| p.trim().parse::<u8>().ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_try_new_rejects_nan_and_infinity() {
        assert_eq!(Length::try_new(f64::NAN), Err(NumericError::NaN));
        assert_eq!(Length::try_new(f64::INFINITY), Err(NumericError::Infinite));
        assert!(Length::try_new(-3.0).is_ok());
    }

    #[test]
    fn length_try_non_negative_rejects_negative() {
        assert_eq!(Length::try_non_negative(-0.5), Err(NumericError::Negative));
        assert_eq!(Length::try_non_negative(0.0), Ok(Length::ZERO));
        assert_eq!(Length::try_non_negative(f64::NAN), Err(NumericError::NaN));
    }

    #[test]
    fn length_arithmetic() {
        let a = Length(30.0);
        let b = Length(12.0);
        assert_eq!(a + b, Length(42.0));
        assert_eq!(a - b, Length(18.0));
        assert_eq!(a * 2.0, Length(60.0));
        assert_eq!(a / 2.0, Length(15.0));
        assert_eq!(-a, Length(-30.0));

        let mut c = a;
        c += b;
        c -= Length(2.0);
        assert_eq!(c, Length(40.0));
    }

    #[test]
    fn overflow_is_clamped_at_zero() {
        assert_eq!(Length(60.0).overflow_past(Length(40.0)), Length(20.0));
        assert_eq!(Length(30.0).overflow_past(Length(40.0)), Length::ZERO);
    }

    #[test]
    fn lengths_sum() {
        let total: Length = [Length(1.0), Length(2.5), Length(3.5)].into_iter().sum();
        assert_eq!(total, Length(7.0));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!(r.contains(dvec2(10.0, 20.0)));
        assert!(r.contains(dvec2(39.9, 59.9)));
        assert!(!r.contains(dvec2(40.0, 30.0)));
        assert!(!r.contains(dvec2(20.0, 60.0)));
        assert!(!r.contains(dvec2(9.9, 30.0)));
    }

    #[test]
    fn rect_center_and_max() {
        let r = Rect::new(0.0, 0.0, 50.0, 40.0);
        assert_eq!(r.center(), dvec2(25.0, 20.0));
        assert_eq!(r.max(), dvec2(50.0, 40.0));
    }

    #[test]
    fn color_parses_hex_rgb_and_names() {
        assert_eq!("#a9a9a9".parse::<Color>(), Ok(Color::Rgb(169, 169, 169)));
        assert_eq!("#00000080".parse::<Color>(), Ok(Color::Rgba(0, 0, 0, 128)));
        assert_eq!("rgb(1, 2, 3)".parse::<Color>(), Ok(Color::Rgb(1, 2, 3)));
        assert_eq!("rgba(1,2,3,4)".parse::<Color>(), Ok(Color::Rgba(1, 2, 3, 4)));
        assert_eq!("DarkGray".parse::<Color>(), Ok(Color::named("darkgray")));
        assert!("#12".parse::<Color>().is_err());
        assert!("rgb(1,2)".parse::<Color>().is_err());
        assert!("not a color".parse::<Color>().is_err());
    }

    #[test]
    fn color_display_is_css() {
        assert_eq!(Color::Rgb(1, 2, 3).to_string(), "rgb(1,2,3)");
        assert_eq!(Color::named("lightgray").to_string(), "lightgray");
    }
}
