use crate::error::BoardError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Dark,
    Light,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Dark => 0,
            Self::Light => 1,
        }
    }

    /// Player number used on the wire: 1 for dark, 2 for light.
    pub const fn code(self) -> u8 {
        match self {
            Self::Dark => 1,
            Self::Light => 2,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Dark),
            2 => Some(Self::Light),
            _ => None,
        }
    }
}

/// A disk placement, addressed by column then row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move {
    pub col: u8,
    pub row: u8,
}

impl Move {
    #[must_use]
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Builds a move from grid indices. Boards never exceed `u8::MAX` cells
    /// per side, so the narrowing is lossless for any in-bounds square.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn at(col: usize, row: usize) -> Self {
        Self {
            col: col as u8,
            row: row as u8,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.col, self.row)
    }
}

/// Square grid of disks. Boards are values: rule functions return a new
/// board instead of editing one in place, which lets a board serve directly
/// as a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    // Row-major, index = row * size + col
    cells: Vec<Option<Color>>,
}

impl Board {
    #[must_use]
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// The usual starting position: two disks per side crossed in the centre,
    /// light on the main diagonal.
    #[must_use]
    pub fn standard(size: usize) -> Self {
        debug_assert!(size >= 2, "standard position needs at least a 2x2 grid");
        let mid = size / 2;
        let mut board = Self::empty(size);
        board.set(mid, mid, Color::Light);
        board.set(mid - 1, mid - 1, Color::Light);
        board.set(mid, mid - 1, Color::Dark);
        board.set(mid - 1, mid, Color::Dark);
        board
    }

    /// Builds a board from rows of cell codes (0 empty, 1 dark, 2 light).
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, BoardError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardError::Empty);
        }
        if size > usize::from(u8::MAX) {
            return Err(BoardError::TooLarge(size));
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, codes) in rows.iter().enumerate() {
            if codes.len() != size {
                return Err(BoardError::NotSquare {
                    row,
                    len: codes.len(),
                    size,
                });
            }
            for (col, &code) in codes.iter().enumerate() {
                let cell = match code {
                    0 => None,
                    _ => Some(
                        Color::from_code(code).ok_or(BoardError::CellCode { code, col, row })?,
                    ),
                };
                cells.push(cell);
            }
        }

        Ok(Self { size, cells })
    }

    /// Parses the manager's board line. Both list syntax `[[0, 1], [2, 0]]`
    /// and tuple syntax `((0, 1), (2, 0))` are accepted.
    pub fn parse(line: &str) -> Result<Self, BoardError> {
        let normalized: String = line
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '(' => '[',
                ')' => ']',
                other => other,
            })
            .collect();
        // Single-element tuples carry a trailing comma
        let normalized = normalized.replace(",]", "]");
        let rows: Vec<Vec<u8>> = serde_json::from_str(&normalized)?;
        Self::from_rows(&rows)
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Owner of the disk at `(col, row)`, `None` for empty or off-board squares.
    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> Option<Color> {
        if col >= self.size || row >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied().flatten()
    }

    #[must_use]
    pub fn is_empty_at(&self, col: usize, row: usize) -> bool {
        col < self.size && row < self.size && self.get(col, row).is_none()
    }

    /// Copy of this board with one square replaced.
    #[must_use]
    pub fn with_cell(&self, col: usize, row: usize, cell: Option<Color>) -> Self {
        let mut next = self.clone();
        if let Some(slot) = next.cell_mut(col, row) {
            *slot = cell;
        }
        next
    }

    pub(crate) fn set(&mut self, col: usize, row: usize, color: Color) {
        if let Some(slot) = self.cell_mut(col, row) {
            *slot = Some(color);
        }
    }

    fn cell_mut(&mut self, col: usize, row: usize) -> Option<&mut Option<Color>> {
        if col >= self.size || row >= self.size {
            return None;
        }
        self.cells.get_mut(row * self.size + col)
    }

    #[must_use]
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Rows of cell codes, the inverse of [`Board::from_rows`].
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| row.iter().map(|c| c.map_or(0, Color::code)).collect())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            let line: String = row
                .iter()
                .map(|c| match c {
                    None => '.',
                    Some(Color::Dark) => 'X',
                    Some(Color::Light) => 'O',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
