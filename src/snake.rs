use crate::grid::{Cell, Direction, GridSize};
use std::collections::VecDeque;

/// Shortest non-reversing unit-step walk that returns to its start
/// without wrapping: a 2x2 loop.
const SHORTEST_LOOP: usize = 4;

/// Snake body, head first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Lays out `length` segments in a line, the head at `head` and the rest
    /// trailing behind it opposite to `direction`.
    pub fn new(head: Cell, direction: Direction, length: usize, grid: GridSize) -> Self {
        let behind = direction.opposite();
        let mut body = VecDeque::with_capacity(length);
        let mut cell = head.wrapped(grid);

        for _ in 0..length {
            body.push_back(cell);
            cell = cell.step(behind).wrapped(grid);
        }

        Self { body }
    }

    /// Builds a snake from explicit cells, head first.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            body: cells.into_iter().collect(),
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Segments from head to tail.
    pub fn cells(&self) -> impl DoubleEndedIterator<Item = Cell> + ExactSizeIterator + '_ {
        self.body.iter().copied()
    }

    pub fn next_head(&self, direction: Direction, grid: GridSize) -> Cell {
        self.head().step(direction).wrapped(grid)
    }

    /// Moves the snake onto `new_head`. The tail is kept when it `grew`.
    pub fn advance(&mut self, new_head: Cell, grew: bool) {
        self.body.push_front(new_head);
        if !grew {
            self.body.pop_back();
        }
    }

    pub fn growth_threshold_crossed(&self, threshold: usize) -> bool {
        threshold > 0 && self.len() % threshold == 0
    }
}

/// First body index that can ever coincide with the head.
///
/// Segments closer to the head than this are unreachable in a single-step
/// walk, except by wrapping straight around a grid axis shorter than the
/// shortest loop.
pub fn collision_offset(grid: GridSize) -> usize {
    SHORTEST_LOOP
        .min(grid.width.max(1) as usize)
        .min(grid.height.max(1) as usize)
}

/// True when the head sits on a segment at or past `offset`.
pub fn self_collision(snake: &Snake, offset: usize) -> bool {
    let head = snake.head();
    snake.cells().skip(offset.max(1)).any(|cell| cell == head)
}
