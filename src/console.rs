//! Line-oriented text protocol for driving a game.
//!
//! The framing follows GTP: each command line may start with a numeric id,
//! and every response is `=` (success) or `?` (failure), followed by the id,
//! the message and an empty line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - Start a new game on a `size x size` board
//! - `clear_board` - Start a new game with the current size
//! - `play <color> <row> <col>` - Play a stone, answers with the captured count
//! - `showboard` - Print the board, one row per line
//! - `captures` - Captured stones per side
//! - `turn` - The side to move
//! - `close` - Release the board
//!
//! ## Example
//!
//! ```
//! use go_rules::console::Console;
//!
//! let mut console = Console::new(5).unwrap();
//! let mut out = Vec::new();
//! console.run("play black 2 2\nshowboard\n".as_bytes(), &mut out).unwrap();
//! let out = String::from_utf8(out).unwrap();
//! assert!(out.contains("*****\n*****\n**B**"));
//! ```

use std::io::{self, BufRead, Write};

use tracing::{info, warn};

use crate::error::GameError;
use crate::game::Game;
use crate::point::Color;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "captures",
    "clear_board",
    "close",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "turn",
    "version",
];

/// Console state: the current game and the size used by `clear_board`.
pub struct Console {
    game: Game,
    size: usize,
}

impl Console {
    pub fn new(size: usize) -> Result<Self, GameError> {
        Ok(Self {
            game: Game::new(size)?,
            size,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Read commands from `input` and write responses to `output` until
    /// `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let (command, (success, message)) = match parts.split_first() {
                Some((command, args)) => {
                    let command = command.to_lowercase();
                    let response = self.execute(&command, args);
                    (command, response)
                }
                None => (String::new(), (false, "missing command".to_string())),
            };
            if !success {
                warn!(%command, %message, "command failed");
            }
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Ok(size) = arg.parse::<i64>() else {
                    return (false, "invalid size".to_string());
                };
                match Game::from_signed(size) {
                    Ok(game) => {
                        self.game = game;
                        self.size = size as usize;
                        info!(size, "new game");
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "clear_board" => match Game::new(self.size) {
                Ok(game) => {
                    self.game = game;
                    (true, String::new())
                }
                Err(e) => (false, e.to_string()),
            },

            "play" => {
                let [color, row, col] = args else {
                    return (false, "expected: play <color> <row> <col>".to_string());
                };
                let Some(color) = Color::parse(color) else {
                    return (false, format!("invalid color: {color}"));
                };
                let (Ok(row), Ok(col)) = (row.parse::<i64>(), col.parse::<i64>()) else {
                    return (false, "invalid coordinates".to_string());
                };
                match self.game.play_signed(row, col, color) {
                    Ok(captured) => (true, captured.to_string()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "showboard" => match self.game.board() {
                Some(board) => (true, format!("\n{}", board.render_rows())),
                None => (false, GameError::GameClosed.to_string()),
            },

            "captures" => (
                true,
                format!(
                    "black {} white {}",
                    self.game.captures(Color::Black),
                    self.game.captures(Color::White)
                ),
            ),

            "turn" => (true, self.game.to_move().to_string()),

            "close" => {
                self.game.close();
                (true, String::new())
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
