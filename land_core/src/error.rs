use thiserror::Error;

/// Reasons a board received from the game manager cannot be used.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("board line is not a nested sequence of cell codes: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("board has no rows")]
    Empty,
    #[error("row {row} has {len} cells, expected {size}")]
    NotSquare {
        row: usize,
        len: usize,
        size: usize,
    },
    #[error("board size {0} is larger than {max}", max = u8::MAX)]
    TooLarge(usize),
    #[error("unknown cell code {code} at column {col}, row {row}")]
    CellCode { code: u8, col: usize, row: usize },
}

/// Failures of the line protocol spoken with the game manager.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("input closed while waiting for the {0}")]
    UnexpectedEof(&'static str),
    #[error("malformed configuration line {line:?}: {reason}")]
    Config { line: String, reason: String },
    #[error("malformed status line {0:?}")]
    Status(String),
    #[error("unreadable board: {0}")]
    Board(#[from] BoardError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
