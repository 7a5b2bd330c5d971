// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores and displays the Chip-8's screen memory

use std::fmt::{Display, Formatter, Result};

/// Width of the screen, in pixels
pub const WIDTH: usize = 64;
/// Height of the screen, in pixels
pub const HEIGHT: usize = 32;

/// A 64x32 monochrome framebuffer, indexed `x + y * WIDTH`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Screen {
    pixels: [bool; WIDTH * HEIGHT],
}

impl Default for Screen {
    fn default() -> Self {
        Screen {
            pixels: [false; WIDTH * HEIGHT],
        }
    }
}

impl Screen {
    /// Constructs a blank screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns every pixel off
    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    /// Gets the pixel at (x, y). Coordinates wrap around the edges of the screen.
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// let mut screen = Screen::new();
    /// screen.toggle(0, 0);
    /// assert!(screen.get(WIDTH, HEIGHT));
    /// ```
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[Self::index(x, y)]
    }

    /// XORs a lit pixel into (x, y), wrapping around the edges of the screen.
    ///
    /// Returns true if the pixel was lit, and is now unlit.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[Self::index(x, y)];
        *pixel = !*pixel;
        !*pixel
    }

    /// Gets the whole framebuffer as a slice
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// Iterates over the rows of the framebuffer, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks_exact(WIDTH)
    }

    /// Returns true if no pixel is lit
    pub fn is_blank(&self) -> bool {
        !self.pixels.contains(&true)
    }

    #[inline(always)]
    fn index(x: usize, y: usize) -> usize {
        x % WIDTH + (y % HEIGHT) * WIDTH
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for row in self.rows() {
            let line: String = row
                .iter()
                .map(|&lit| if lit { '█' } else { ' ' })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
