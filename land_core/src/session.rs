use crate::engine::config::{CachePolicy, EngineConfig};
use crate::engine::minimax::MinimaxEngine;
use crate::engine::search::AlphaBetaEngine;
use crate::engine::tt::TranspositionCache;
use crate::engine::{Depth, SearchOptions, Searcher};
use crate::error::ProtocolError;
use crate::logic::board::{Board, Color, Move};
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;

pub const ENGINE_NAME: &str = "Bidding AI";

/// Coordinates written when the engine has no legal move.
pub const PASS: Move = Move::new(0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    AlphaBeta,
    Minimax,
}

/// The manager's configuration line: `color,depth,strategy,caching,ordering`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub color: Color,
    pub depth: Depth,
    pub strategy: Strategy,
    pub caching: bool,
    pub ordering: bool,
}

impl SessionConfig {
    #[must_use]
    pub const fn search_options(&self) -> SearchOptions {
        SearchOptions::new(self.depth)
            .with_caching(self.caching)
            .with_ordering(self.ordering)
    }

    fn log_summary(&self) {
        match self.strategy {
            Strategy::Minimax => log::info!("Running MINIMAX as {:?}", self.color),
            Strategy::AlphaBeta => log::info!("Running ALPHA-BETA as {:?}", self.color),
        }
        log::info!("State caching is {}", on_off(self.caching));
        log::info!("Node ordering is {}", on_off(self.ordering));
        log::info!("Depth limit is {}", self.depth);
        if self.strategy == Strategy::Minimax && self.ordering {
            log::warn!("Node ordering has no effect on minimax");
        }
    }
}

const fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

impl FromStr for SessionConfig {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| ProtocolError::Config {
            line: line.to_owned(),
            reason,
        };

        let fields = line
            .split(',')
            .map(|field| {
                let field = field.trim();
                field
                    .parse::<i32>()
                    .map_err(|e| invalid(format!("field {field:?}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let &[color, depth, strategy, caching, ordering] = fields.as_slice() else {
            return Err(invalid(format!("expected 5 fields, got {}", fields.len())));
        };

        let color = u8::try_from(color)
            .ok()
            .and_then(Color::from_code)
            .ok_or_else(|| invalid(format!("unknown color {color}")))?;

        Ok(Self {
            color,
            depth: Depth::from_protocol(depth),
            strategy: if strategy == 1 {
                Strategy::Minimax
            } else {
                Strategy::AlphaBeta
            },
            caching: caching == 1,
            ordering: ordering == 1,
        })
    }
}

/// Status line sent before every turn, scores as `(dark, light)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Score(u32, u32),
    Final(u32, u32),
}

impl FromStr for Status {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let invalid = || ProtocolError::Status(line.to_owned());
        let mut tokens = line.split_whitespace();
        let (Some(tag), Some(dark), Some(light), None) =
            (tokens.next(), tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(invalid());
        };
        let dark = dark.parse().map_err(|_| invalid())?;
        let light = light.parse().map_err(|_| invalid())?;
        match tag {
            "SCORE" => Ok(Self::Score(dark, light)),
            "FINAL" => Ok(Self::Final(dark, light)),
            _ => Err(invalid()),
        }
    }
}

/// One game against the manager over a pair of line streams.
pub struct Session<R, W> {
    reader: R,
    writer: W,
    name: String,
    engine_config: Arc<EngineConfig>,
    cache: TranspositionCache,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        reader: R,
        writer: W,
        name: impl Into<String>,
        engine_config: Arc<EngineConfig>,
    ) -> Self {
        Self {
            reader,
            writer,
            name: name.into(),
            engine_config,
            cache: TranspositionCache::new(),
        }
    }

    /// Positions currently held in the search cache.
    #[must_use]
    pub const fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Plays until the manager reports `FINAL`, returning the final
    /// `(dark, light)` score.
    pub fn run(&mut self) -> Result<(u32, u32), ProtocolError> {
        let name = self.name.clone();
        self.send(&name)?;

        let config: SessionConfig = self
            .read_line()?
            .ok_or(ProtocolError::UnexpectedEof("configuration line"))?
            .parse()?;
        config.log_summary();

        let mut searcher: Box<dyn Searcher> = match config.strategy {
            Strategy::Minimax => Box::new(MinimaxEngine::new(self.engine_config.clone())),
            Strategy::AlphaBeta => Box::new(AlphaBetaEngine::new(self.engine_config.clone())),
        };

        loop {
            let status: Status = self
                .read_line()?
                .ok_or(ProtocolError::UnexpectedEof("status line"))?
                .parse()?;

            let (dark, light) = match status {
                Status::Final(dark, light) => {
                    log::info!("Game over: dark {dark}, light {light}");
                    return Ok((dark, light));
                }
                Status::Score(dark, light) => (dark, light),
            };

            let line = self
                .read_line()?
                .ok_or(ProtocolError::UnexpectedEof("board line"))?;
            let board = Board::parse(&line)?;
            log::debug!("Score dark {dark}, light {light}\n{board}");

            if self.engine_config.cache_policy == CachePolicy::ClearPerMove {
                self.cache.clear();
            }

            let (outcome, stats) =
                searcher.search(&board, config.color, config.search_options(), &mut self.cache);
            log::debug!(
                "Chose {:?} (value {}, {} nodes, {} cache hits, cache size {}, {} ms)",
                outcome.best_move,
                outcome.value,
                stats.nodes,
                stats.cache_hits,
                self.cache.len(),
                stats.time_ms
            );

            let mv = outcome.best_move.unwrap_or_else(|| {
                log::warn!("No legal move for {:?}, passing", config.color);
                PASS
            });
            self.send(&mv.to_string())?;
        }
    }

    /// Next non-blank line without its line ending, `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, ProtocolError> {
        loop {
            let mut buf = String::new();
            if self.reader.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            let line = buf.trim();
            if !line.is_empty() {
                return Ok(Some(line.to_owned()));
            }
        }
    }

    fn send(&mut self, line: &str) -> Result<(), ProtocolError> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }
}
