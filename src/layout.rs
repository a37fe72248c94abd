//! Page geometry in PDF points (1/72 inch)

use std::fmt;

/// Length in points
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Length(pub f32);

impl Length {
    /// Create a length from inches
    pub fn from_inches(inches: f32) -> Self {
        Length(inches * 72.0)
    }

    /// Get the value in points
    pub fn pt(&self) -> f32 {
        self.0
    }
}

/// Page orientation as seen by a reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => f.write_str("portrait"),
            Orientation::Landscape => f.write_str("landscape"),
        }
    }
}

/// Page dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: Length,
    pub height: Length,
}

impl PageSize {
    /// US Letter size (8.5" × 11"), portrait
    pub fn letter() -> Self {
        Self {
            width: Length::from_inches(8.5),
            height: Length::from_inches(11.0),
        }
    }

    /// The same page turned on its side (long edge horizontal)
    pub fn landscape(self) -> Self {
        let (short, long) = if self.width.pt() <= self.height.pt() {
            (self.width, self.height)
        } else {
            (self.height, self.width)
        };
        Self {
            width: long,
            height: short,
        }
    }

    /// Letter paper in the requested orientation
    pub fn letter_for(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Portrait => Self::letter(),
            Orientation::Landscape => Self::letter().landscape(),
        }
    }

    /// MediaBox array `[0 0 width height]`
    pub fn media_box(&self) -> [f32; 4] {
        [0.0, 0.0, self.width.pt(), self.height.pt()]
    }
}

/// Margins reserved around slipsheet content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Left (and, by symmetry, right) margin
    pub left: Length,
    /// Spacer kept clear at the top of the page
    pub top: Length,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: Length::from_inches(0.8),
            top: Length::from_inches(2.0),
        }
    }
}
