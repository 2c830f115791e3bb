use ratatui::layout::Rect;

use crate::game::{Position, ScreenSide};

/// Where the board sits on screen and how grid cells map onto it.
///
/// A cell's top-left corner is `cell_index * cell_size + origin`, with one
/// terminal row per cell and `cell_width` columns per cell. Grid `y` grows
/// upward, so row order is flipped against the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    outer: Rect,
    grid_size: usize,
    cell_width: u16,
}

impl BoardLayout {
    /// Centre a bordered board for `grid_size` cells inside `area`
    pub fn new(area: Rect, grid_size: usize, cell_width: u16) -> Self {
        let cells = grid_size.min(u16::MAX as usize) as u16;
        let width = cells.saturating_mul(cell_width).saturating_add(2);
        let height = cells.saturating_add(2);

        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;

        Self {
            outer: Rect::new(x, y, width.min(area.width), height.min(area.height)),
            grid_size,
            cell_width,
        }
    }

    /// Board rectangle including its border
    pub fn outer(&self) -> Rect {
        self.outer
    }

    /// Board rectangle inside the border, where cells are drawn
    pub fn inner(&self) -> Rect {
        Rect::new(
            self.outer.x.saturating_add(1),
            self.outer.y.saturating_add(1),
            self.outer.width.saturating_sub(2),
            self.outer.height.saturating_sub(2),
        )
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_width
    }

    /// Screen column and row of a cell's top-left corner.
    ///
    /// `None` for positions off the grid or clipped by a small terminal.
    pub fn cell_origin(&self, pos: Position) -> Option<(u16, u16)> {
        if !pos.is_within(self.grid_size) {
            return None;
        }

        let inner = self.inner();
        let column = (pos.x as u64)
            .checked_mul(u64::from(self.cell_width))?
            .checked_add(u64::from(inner.x))?;
        let row = (self.grid_size as u64 - 1 - pos.y as u64).checked_add(u64::from(inner.y))?;

        let fits = column + u64::from(self.cell_width) <= u64::from(inner.right())
            && row < u64::from(inner.bottom());
        fits.then_some((column as u16, row as u16))
    }

    /// Which half of the play area a screen column falls in
    pub fn side_of(&self, column: u16) -> ScreenSide {
        let midpoint = self.outer.x + self.outer.width / 2;
        if column < midpoint {
            ScreenSide::Left
        } else {
            ScreenSide::Right
        }
    }
}
