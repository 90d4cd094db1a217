#![forbid(unsafe_code)]

//! Rasterize a sequence into a grid of terminal cells.
//!
//! [`Scene::rasterize`] is pure: values, highlight and theme in, glyph grid
//! out. Each value owns one horizontal slot of `width / len` columns and is
//! scaled vertically against the logical canvas height. Highlighted values
//! are drawn after the rest, with their own glyph and colour, so they stay
//! visible where shapes overlap.
//!
//! [`Scene::paint`] writes the grid through crossterm commands to any
//! [`Write`] sink.

use std::io::{self, Write};

use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor::MoveTo, queue};
use sortviz_core::{Highlight, Theme};

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb { r, g, b }
    }
}

/// One drawn cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: Rgb,
    pub highlighted: bool,
}

/// Logical height of the ground strip under the trees.
const GROUND_HEIGHT: f64 = 50.0;

const BAR_GLYPH: char = '█';
const BAR_HIGHLIGHT_GLYPH: char = '▓';
const STAR_GLYPH: char = '●';
const STAR_HIGHLIGHT_GLYPH: char = '◉';
const CANOPY_GLYPH: char = '▲';
const CANOPY_HIGHLIGHT_GLYPH: char = '◆';
const GROUND_GLYPH: char = '▒';

const HIGHLIGHT: Rgb = Rgb(255, 100, 100);
const TREE_HIGHLIGHT: Rgb = Rgb(255, 215, 0);
const STAR: Rgb = Rgb(255, 255, 200);
const CANOPY: Rgb = Rgb(34, 139, 34);
const GROUND: Rgb = Rgb(139, 69, 19);

/// Background colour for a theme.
#[must_use]
pub fn background(theme: Theme) -> Rgb {
    match theme {
        Theme::Default => Rgb(50, 50, 70),
        Theme::Space => Rgb(20, 20, 50),
        Theme::Tree => Rgb(100, 150, 200),
    }
}

/// Bar colour ramps with position from dim to bright red channel.
fn bar_color(index: usize, len: usize) -> Rgb {
    let t = index as f64 / len.max(1) as f64;
    Rgb((100.0 + t * 155.0).round() as u8, 150, 200)
}

/// A rasterized frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    width: u16,
    height: u16,
    background: Rgb,
    cells: Vec<Option<Cell>>,
}

impl Scene {
    /// Empty scene of the given size.
    #[must_use]
    pub fn blank(width: u16, height: u16, background: Rgb) -> Self {
        Self {
            width,
            height,
            background,
            cells: vec![None; usize::from(width) * usize::from(height)],
        }
    }

    /// Draw `values` for `theme` into a `width` x `height` grid.
    ///
    /// `canvas_height` is the logical height the values were sampled
    /// against; it maps onto the full grid height.
    #[must_use]
    pub fn rasterize(
        values: &[f64],
        highlight: &Highlight,
        theme: Theme,
        canvas_height: f64,
        width: u16,
        height: u16,
    ) -> Self {
        let mut scene = Self::blank(width, height, background(theme));
        if width == 0 || height == 0 {
            return scene;
        }

        let scale = f64::from(height) / canvas_height.max(1.0);
        if theme == Theme::Tree {
            scene.draw_ground(scale);
        }

        let normal = (0..values.len()).filter(|&k| !highlight.contains(k));
        let lit = highlight.indices().iter().copied();
        for k in normal.chain(lit) {
            let Some(&value) = values.get(k) else {
                continue;
            };
            let lit = highlight.contains(k);
            let (x0, x1) = scene.slot(k, values.len());
            match theme {
                Theme::Default => scene.draw_bar(x0, x1, value * scale, k, values.len(), lit),
                Theme::Space => scene.draw_star(x0, x1, value * scale, lit),
                Theme::Tree => scene.draw_tree(x0, x1, value * scale, scale, lit),
            }
        }
        scene
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Cell at column `x`, row `y` (row 0 is the top).
    #[must_use]
    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[self.index(x, y)]
    }

    /// Number of cells drawn with a highlight.
    #[must_use]
    pub fn highlighted_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.highlighted).count()
    }

    /// Write the grid starting at terminal row `top`.
    pub fn paint<W: Write>(&self, out: &mut W, top: u16) -> io::Result<()> {
        queue!(out, SetBackgroundColor(self.background.into()))?;
        for y in 0..self.height {
            queue!(out, MoveTo(0, top + y))?;
            for x in 0..self.width {
                match self.cell(x, y) {
                    Some(cell) => queue!(
                        out,
                        SetForegroundColor(cell.color.into()),
                        Print(cell.glyph)
                    )?,
                    None => queue!(out, Print(' '))?,
                }
            }
        }
        queue!(out, ResetColor)
    }

    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }

    fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return;
        }
        let idx = self.index(x as u16, y as u16);
        self.cells[idx] = Some(cell);
    }

    /// Column span `[x0, x1)` of slot `k` out of `len`. Never empty.
    fn slot(&self, k: usize, len: usize) -> (i32, i32) {
        let width = usize::from(self.width);
        let len = len.max(1);
        let x0 = k * width / len;
        let x1 = ((k + 1) * width / len).max(x0 + 1);
        (x0 as i32, x1 as i32)
    }

    /// Rows a magnitude occupies, at least one.
    fn rows(&self, magnitude: f64) -> i32 {
        (magnitude.round() as i32).clamp(1, i32::from(self.height))
    }

    fn bottom(&self) -> i32 {
        i32::from(self.height) - 1
    }

    fn draw_bar(&mut self, x0: i32, x1: i32, magnitude: f64, k: usize, len: usize, lit: bool) {
        let cell = Cell {
            glyph: if lit { BAR_HIGHLIGHT_GLYPH } else { BAR_GLYPH },
            color: if lit { HIGHLIGHT } else { bar_color(k, len) },
            highlighted: lit,
        };
        // One-column gap between bars when there is room for it.
        let x1 = if x1 - x0 > 1 { x1 - 1 } else { x1 };
        let top = self.bottom() - self.rows(magnitude) + 1;
        for y in top..=self.bottom() {
            for x in x0..x1 {
                self.set(x, y, cell);
            }
        }
    }

    fn draw_star(&mut self, x0: i32, x1: i32, magnitude: f64, lit: bool) {
        let cell = Cell {
            glyph: if lit { STAR_HIGHLIGHT_GLYPH } else { STAR_GLYPH },
            color: if lit { HIGHLIGHT } else { STAR },
            highlighted: lit,
        };
        let y = self.bottom() - self.rows(magnitude) + 1;
        self.set(x0 + (x1 - x0) / 2, y, cell);
    }

    fn draw_ground(&mut self, scale: f64) {
        let cell = Cell {
            glyph: GROUND_GLYPH,
            color: GROUND,
            highlighted: false,
        };
        let rows = self.rows(GROUND_HEIGHT * scale);
        for y in (self.bottom() - rows + 1)..=self.bottom() {
            for x in 0..i32::from(self.width) {
                self.set(x, y, cell);
            }
        }
    }

    /// Triangle standing on the ground strip: apex `magnitude` rows up, base
    /// `magnitude` wide. Terminal cells are about twice as tall as wide, so
    /// the half-width in columns equals the height in rows.
    fn draw_tree(&mut self, x0: i32, x1: i32, magnitude: f64, scale: f64, lit: bool) {
        let cell = Cell {
            glyph: if lit { CANOPY_HIGHLIGHT_GLYPH } else { CANOPY_GLYPH },
            color: if lit { TREE_HIGHLIGHT } else { CANOPY },
            highlighted: lit,
        };
        let ground_top = self.bottom() - self.rows(GROUND_HEIGHT * scale) + 1;
        let rows = self.rows(magnitude);
        let center = x0 + (x1 - x0) / 2;
        for r in 0..rows {
            let y = ground_top - 1 - r;
            let half = f64::from(rows - r) * magnitude / f64::from(rows) / 2.0;
            let half = half.floor() as i32;
            for x in (center - half)..=(center + half) {
                self.set(x, y, cell);
            }
        }
    }
}
