/// One grid position, in cells rather than pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The neighbouring cell in `direction`, without wrapping.
    pub fn step(&self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Cell::new(self.col, self.row - 1),
            Direction::Down => Cell::new(self.col, self.row + 1),
            Direction::Left => Cell::new(self.col - 1, self.row),
            Direction::Right => Cell::new(self.col + 1, self.row),
        }
    }

    /// Brings a cell that stepped at most one grid length off an edge back
    /// onto the opposite side. Cells already on the grid are returned as is.
    pub fn wrapped(&self, grid: GridSize) -> Self {
        Cell::new(wrap_axis(self.col, grid.width), wrap_axis(self.row, grid.height))
    }
}

fn wrap_axis(value: i32, extent: i32) -> i32 {
    if value < 0 {
        value + extent
    } else if value >= extent {
        value - extent
    } else {
        value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Playfield dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

impl GridSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.col >= 0 && cell.row >= 0 && cell.col < self.width && cell.row < self.height
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Every cell on the grid, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |row| (0..width).map(move |col| Cell::new(col, row)))
    }
}
