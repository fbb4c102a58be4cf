use crate::error::LoadError;
use crate::State;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Contents of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Free,
    Obstacle,
    /// Terminal-failure cell; entering it is penalised by the reward model
    Lose,
}

/// Grid world: bounds, obstacles and lose cells.
/// Cells are stored row-major, id = x + y * cols.
#[derive(Clone, Debug)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
    cells: Vec<Cell>,
}

/// A parsed layout file: the grid plus any start/goal markers found in it
#[derive(Clone, Debug)]
pub struct Layout {
    pub grid: Grid,
    pub start: Option<State>,
    pub goals: Vec<State>,
}

impl Grid {
    /// Create a new grid with all cells free
    pub fn new(cols: i32, rows: i32) -> Self {
        let cols = cols.max(0);
        let rows = rows.max(0);
        Grid {
            cols,
            rows,
            cells: vec![Cell::Free; (cols * rows) as usize],
        }
    }

    /// Create a grid with specific obstacle cells
    pub fn with_obstacles(cols: i32, rows: i32, obstacles: &[State]) -> Self {
        let mut grid = Self::new(cols, rows);
        for s in obstacles {
            grid.set_cell(s.x, s.y, Cell::Obstacle);
        }
        grid
    }

    /// The 51x31 bordered world with four interior walls and a lose strip
    pub fn reference_map() -> Self {
        let (cols, rows) = (51, 31);
        let mut grid = Self::new(cols, rows);

        // Border
        for x in 0..cols {
            grid.set_cell(x, 0, Cell::Obstacle);
            grid.set_cell(x, rows - 1, Cell::Obstacle);
        }
        for y in 0..rows {
            grid.set_cell(0, y, Cell::Obstacle);
            grid.set_cell(cols - 1, y, Cell::Obstacle);
        }

        // Interior walls
        for x in 10..=20 {
            grid.set_cell(x, 15, Cell::Obstacle);
        }
        for y in 0..15 {
            grid.set_cell(20, y, Cell::Obstacle);
        }
        for y in 15..30 {
            grid.set_cell(30, y, Cell::Obstacle);
        }
        for y in 0..=15 {
            grid.set_cell(40, y, Cell::Obstacle);
        }

        for x in 25..=35 {
            grid.set_cell(x, 13, Cell::Lose);
        }

        grid
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.cols && y >= 0 && y < self.rows
    }

    /// Convert (x, y) coordinates to cell ID
    pub fn get_id(&self, x: i32, y: i32) -> i32 {
        x + y * self.cols
    }

    /// Get cell at (x, y). Out of bounds is treated as an obstacle.
    pub fn get_cell(&self, x: i32, y: i32) -> Cell {
        if !self.in_bounds(x, y) {
            return Cell::Obstacle;
        }
        self.cells[self.get_id(x, y) as usize]
    }

    /// Set cell at (x, y); ignored when out of bounds
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        if self.in_bounds(x, y) {
            let id = self.get_id(x, y);
            self.cells[id as usize] = cell;
        }
    }

    /// Check if a state is an obstacle (or outside the grid)
    pub fn is_blocked(&self, state: State) -> bool {
        self.get_cell(state.x, state.y) == Cell::Obstacle
    }

    pub fn is_lose(&self, state: State) -> bool {
        self.get_cell(state.x, state.y) == Cell::Lose
    }

    /// Admissible states in x-major order
    pub fn states(&self) -> Vec<State> {
        let mut states = Vec::new();
        for x in 0..self.cols {
            for y in 0..self.rows {
                let s = State::new(x, y);
                if !self.is_blocked(s) {
                    states.push(s);
                }
            }
        }
        states
    }

    pub fn obstacles(&self) -> BTreeSet<State> {
        self.cells_of_kind(Cell::Obstacle)
    }

    pub fn lose_states(&self) -> BTreeSet<State> {
        self.cells_of_kind(Cell::Lose)
    }

    fn cells_of_kind(&self, kind: Cell) -> BTreeSet<State> {
        let mut found = BTreeSet::new();
        for y in 0..self.rows {
            for x in 0..self.cols {
                if self.get_cell(x, y) == kind {
                    found.insert(State::new(x, y));
                }
            }
        }
        found
    }

    /// Parse a text layout.
    ///
    /// One line per row. `□` or `.` free, `■` or `#` obstacle, `x` lose,
    /// `s` start, `g` goal. Blank lines are skipped; all rows must have the
    /// same width.
    pub fn parse_layout(text: &str) -> Result<Layout, LoadError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end())
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            return Err(LoadError::Layout("layout has no rows".to_string()));
        }

        let cols = lines[0].chars().count() as i32;
        let rows = lines.len() as i32;
        let mut grid = Grid::new(cols, rows);
        let mut start = None;
        let mut goals = Vec::new();

        for (y, line) in lines.iter().enumerate() {
            let width = line.chars().count() as i32;
            if width != cols {
                return Err(LoadError::Layout(format!(
                    "row {} has width {}, expected {}",
                    y, width, cols
                )));
            }

            for (x, ch) in line.chars().enumerate() {
                let (x, y) = (x as i32, y as i32);
                match ch {
                    '□' | '.' => {}
                    '■' | '#' => grid.set_cell(x, y, Cell::Obstacle),
                    'x' => grid.set_cell(x, y, Cell::Lose),
                    's' => {
                        if start.is_some() {
                            return Err(LoadError::Layout(format!(
                                "second start marker at ({},{})",
                                x, y
                            )));
                        }
                        start = Some(State::new(x, y));
                    }
                    'g' => goals.push(State::new(x, y)),
                    other => {
                        return Err(LoadError::Layout(format!(
                            "unknown character '{}' at ({},{})",
                            other, x, y
                        )));
                    }
                }
            }
        }

        Ok(Layout { grid, start, goals })
    }

    /// Load a layout from a text file
    pub fn load_layout(path: impl AsRef<Path>) -> Result<Layout, LoadError> {
        let contents = fs::read_to_string(path)?;
        Self::parse_layout(&contents)
    }
}
