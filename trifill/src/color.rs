//! RGB color and interpolation.
//!
//! This module provides the [`Rgb`] color type used by vertex data along with
//! [`Corners`] and [`Palette`], which describe how generators assign colors to
//! the vertices that they emit.
//!
//! # Examples
//!
//! Blending the corners of a unit square:
//!
//! ```rust
//! use trifill::color::{Corners, Rgb};
//!
//! let corners = Corners::new(Rgb::RED, Rgb::GREEN, Rgb::BLUE, Rgb::YELLOW);
//! assert_eq!(Rgb::RED, corners.at(0.0, 0.0));
//! assert_eq!(Rgb::YELLOW, corners.at(1.0, 1.0));
//! ```
//!
//! [`Corners`]: crate::color::Corners
//! [`Palette`]: crate::color::Palette
//! [`Rgb`]: crate::color::Rgb

use std::fmt::{self, Display, Formatter};

/// 24-bit RGB color.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Rgb::new(0, 0, 0);
    pub const WHITE: Self = Rgb::new(255, 255, 255);
    pub const RED: Self = Rgb::new(255, 0, 0);
    pub const GREEN: Self = Rgb::new(0, 255, 0);
    pub const BLUE: Self = Rgb::new(0, 0, 255);
    pub const YELLOW: Self = Rgb::new(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub fn from_channels(channels: [u8; 3]) -> Self {
        let [r, g, b] = channels;
        Rgb::new(r, g, b)
    }

    pub fn into_channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Bilinearly interpolates four corner colors.
    ///
    /// The corners are conceptually placed at $(0, 0)$, $(1, 0)$, $(0, 1)$,
    /// and $(1, 1)$ of the unit square. Each channel is blended along $s$
    /// between `c00` and `c10` and between `c01` and `c11`, then along $t$
    /// between those intermediate values. The result is truncated toward zero.
    ///
    /// No clamping is performed beyond truncation. Blend factors outside of
    /// $[0, 1]$ saturate at the bounds of a channel.
    pub fn bilinear(c00: Rgb, c10: Rgb, c01: Rgb, c11: Rgb, s: f64, t: f64) -> Self {
        let channel = |c00: u8, c10: u8, c01: u8, c11: u8| {
            let (c00, c10, c01, c11) = (
                f64::from(c00),
                f64::from(c10),
                f64::from(c01),
                f64::from(c11),
            );
            let near = c00 + ((c10 - c00) * s);
            let far = c01 + ((c11 - c01) * s);
            (near + ((far - near) * t)).trunc() as u8
        };
        Rgb::new(
            channel(c00.r, c10.r, c01.r, c11.r),
            channel(c00.g, c10.g, c01.g, c11.g),
            channel(c00.b, c10.b, c01.b, c11.b),
        )
    }
}

impl Display for Rgb {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(channels: [u8; 3]) -> Self {
        Rgb::from_channels(channels)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.into_channels()
    }
}

/// Colors at the corners of a unit square.
///
/// Corners are named by their coordinates in the square, so `c10` is the color
/// at $(1, 0)$.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Corners {
    pub c00: Rgb,
    pub c10: Rgb,
    pub c01: Rgb,
    pub c11: Rgb,
}

impl Corners {
    pub const fn new(c00: Rgb, c10: Rgb, c01: Rgb, c11: Rgb) -> Self {
        Corners { c00, c10, c01, c11 }
    }

    /// Gets the bilinearly interpolated color at $(s, t)$.
    ///
    /// See [`Rgb::bilinear`].
    ///
    /// [`Rgb::bilinear`]: crate::color::Rgb::bilinear
    pub fn at(&self, s: f64, t: f64) -> Rgb {
        Rgb::bilinear(self.c00, self.c10, self.c01, self.c11, s, t)
    }
}

impl Default for Corners {
    fn default() -> Self {
        Corners::new(Rgb::RED, Rgb::GREEN, Rgb::BLUE, Rgb::YELLOW)
    }
}

/// Three-color palette that is indexed cyclically.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Palette([Rgb; 3]);

impl Palette {
    pub const fn new(a: Rgb, b: Rgb, c: Rgb) -> Self {
        Palette([a, b, c])
    }

    /// Gets the color at `index` modulo the size of the palette.
    pub fn get(&self, index: usize) -> Rgb {
        self.0[index % self.0.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::new(Rgb::RED, Rgb::GREEN, Rgb::BLUE)
    }
}

impl From<[Rgb; 3]> for Palette {
    fn from(colors: [Rgb; 3]) -> Self {
        Palette(colors)
    }
}
