//! Page geometry types.
//!
//! Dimensions are PostScript points (72 per inch) as reported by the
//! backend; [`Page::width_mm`] and [`Page::height_mm`] convert to whole
//! millimetres.

use std::fmt;

use crate::error::PdfError;

/// ISO 216 A-series sheet sizes in millimetres (portrait).
pub mod page_size {
    pub const A0_HEIGHT: i64 = 1189;
    pub const A0_WIDTH: i64 = 841;

    pub const A1_HEIGHT: i64 = 841;
    pub const A1_WIDTH: i64 = 594;

    pub const A2_HEIGHT: i64 = 594;
    pub const A2_WIDTH: i64 = 420;

    pub const A3_HEIGHT: i64 = 420;
    pub const A3_WIDTH: i64 = 297;

    pub const A4_HEIGHT: i64 = 297;
    pub const A4_WIDTH: i64 = 210;

    pub const A5_HEIGHT: i64 = 210;
    pub const A5_WIDTH: i64 = 148;

    pub const A6_HEIGHT: i64 = 148;
    pub const A6_WIDTH: i64 = 105;
}

/// Convert PostScript points to millimetres, rounded to the nearest integer.
pub fn points_to_mm(points: f64) -> i64 {
    (points / 72.0 * 25.4).round() as i64
}

/// Page rotation in clockwise quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Rotation {
    /// Rotation in degrees: 0, 90, 180, or 270.
    pub fn degrees(self) -> i64 {
        match self {
            Rotation::Up => 0,
            Rotation::Right => 90,
            Rotation::Down => 180,
            Rotation::Left => 270,
        }
    }

    /// Parse a rotation in degrees; negative and >= 360 values are normalized.
    ///
    /// Returns `None` for angles that are not a multiple of 90.
    pub fn from_degrees(degrees: i64) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::Up),
            90 => Some(Rotation::Right),
            180 => Some(Rotation::Down),
            270 => Some(Rotation::Left),
            _ => None,
        }
    }
}

impl TryFrom<i64> for Rotation {
    type Error = PdfError;

    fn try_from(degrees: i64) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees).ok_or_else(|| {
            PdfError::InvalidArgument(format!("invalid page rotation: {degrees}"))
        })
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// Geometry of a single page.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    page_number: u32,
    width: f64,
    height: f64,
    rotation: Rotation,
}

impl Page {
    pub fn new(page_number: u32, width: f64, height: f64, rotation: Rotation) -> Self {
        Self {
            page_number,
            width,
            height,
            rotation,
        }
    }

    /// 1-indexed page number.
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Width in points.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in points.
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn width_mm(&self) -> i64 {
        points_to_mm(self.width)
    }

    pub fn height_mm(&self) -> i64 {
        points_to_mm(self.height)
    }

    /// Returns `true` if the unrotated media box is wider than tall.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    pub fn set_page_number(&mut self, page_number: u32) -> &mut Self {
        self.page_number = page_number;
        self
    }

    pub fn set_width(&mut self, width: f64) -> &mut Self {
        self.width = width;
        self
    }

    pub fn set_height(&mut self, height: f64) -> &mut Self {
        self.height = height;
        self
    }

    pub fn set_rotation(&mut self, rotation: Rotation) -> &mut Self {
        self.rotation = rotation;
        self
    }
}

/// Pages of a document in ascending page-number order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pages {
    pages: Vec<Page>,
}

impl Pages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, page: Page) -> &mut Self {
        self.pages.push(page);
        self
    }

    pub fn all(&self) -> &[Page] {
        &self.pages
    }

    /// Find a page by its 1-indexed number.
    pub fn get(&self, page_number: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn clear(&mut self) -> &mut Self {
        self.pages.clear();
        self
    }
}

impl<'a> IntoIterator for &'a Pages {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}
