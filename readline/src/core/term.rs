// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::IntoDiagnostic;

pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// Used when the terminal can't tell us how big it is.
pub const DEFAULT_TERM_SIZE: Size = Size {
    col_width: DEFAULT_WIDTH,
    row_height: DEFAULT_HEIGHT,
};

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub col_width: u16,
    pub row_height: u16,
}

impl Size {
    #[must_use]
    pub const fn new(col_width: u16, row_height: u16) -> Self {
        Self {
            col_width,
            row_height,
        }
    }

    /// Width as a `usize`, never less than 1 so it is safe to divide by.
    #[must_use]
    pub fn width(&self) -> usize { usize::from(self.col_width.max(1)) }

    /// Height as a `usize`, never less than 1.
    #[must_use]
    pub fn height(&self) -> usize { usize::from(self.row_height.max(1)) }
}

impl Default for Size {
    fn default() -> Self { DEFAULT_TERM_SIZE }
}

/// Get the terminal size using [`crossterm`].
///
/// # Errors
///
/// Returns an error if:
/// - The terminal size cannot be determined
/// - The terminal is not available or not a TTY
pub fn get_size() -> miette::Result<Size> {
    let (columns, rows) = crossterm::terminal::size().into_diagnostic()?;
    Ok(Size::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zero_sized_dimensions_are_clamped() {
        let size = Size::new(0, 0);
        assert_eq!(size.width(), 1);
        assert_eq!(size.height(), 1);
    }

    #[test]
    fn test_default_is_80x24() {
        assert_eq!(Size::default(), Size::new(80, 24));
    }
}
