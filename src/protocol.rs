//! Line-oriented coach protocol. One command per line, at most one reply line
//! per command:
//!
//! ```text
//! position startpos|fen <fen> [moves <m1> <m2> ...]
//! go | hint | analyze | opening | classify <move> | difficulty <tier>
//! isready | newgame | quit
//! ```

use log::debug;
use std::io::{self, BufRead, Write};

use crate::board::cozy::Position;
use crate::coach::{Engine, EngineMove};
use crate::config::Difficulty;
use crate::error::Result;

pub struct CoachProtocol {
    pos: Position,
    engine: Engine,
}

impl CoachProtocol {
    pub fn new(engine: Engine) -> Self {
        Self { pos: Position::startpos(), engine }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    fn cmd_position(&mut self, args: &str) -> Result<()> {
        let (setup, moves) = match args.split_once(" moves ") {
            Some((setup, moves)) => (setup.trim(), Some(moves)),
            None => (args.trim().trim_end_matches(" moves"), None),
        };
        let mut pos = match setup.strip_prefix("fen ") {
            Some(fen) => Position::from_fen(fen)?,
            None => Position::parse(setup)?,
        };
        pos.play_line(moves.unwrap_or_default().split_whitespace())?;
        self.pos = pos;
        Ok(())
    }

    fn cmd_go(&mut self) -> String {
        match self.engine.best_move(&mut self.pos) {
            Some(m) => format!("bestmove {} {}", m.uci, describe(&m)),
            None => "bestmove 0000".to_string(),
        }
    }

    fn cmd_hint(&mut self) -> String {
        match self.engine.hint(&mut self.pos) {
            Some(m) => format!("hint {}", describe(&m)),
            None => "hint none".to_string(),
        }
    }

    fn cmd_opening(&self) -> String {
        match self.engine.detect_opening(&self.pos) {
            Some(o) => format!("opening {}: {}", o.name, o.description),
            None => "opening none".to_string(),
        }
    }

    fn cmd_classify(&self, text: &str) -> Result<String> {
        let mv = self.pos.find_move(text)?;
        Ok(format!("tags {}", self.engine.classify(&self.pos, &mv).join(" | ")))
    }

    fn cmd_difficulty(&mut self, name: &str) -> Result<String> {
        let tier: Difficulty = name.parse()?;
        self.engine.set_difficulty(tier);
        Ok(format!("difficulty {tier}"))
    }

    /// Handles one command. `None` means the command produced no reply;
    /// `quit` is silent here and ends [`CoachProtocol::run_loop`].
    pub fn handle_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        debug!("protocol <- {line}");
        let reply = match cmd {
            "" | "quit" => return None,
            "isready" => Ok("readyok".to_string()),
            "newgame" => {
                self.pos = Position::startpos();
                return None;
            }
            "position" => match self.cmd_position(rest) {
                Ok(()) => return None,
                Err(e) => Err(e),
            },
            "go" => Ok(self.cmd_go()),
            "hint" => Ok(self.cmd_hint()),
            "analyze" => Ok(format!("analysis {}", self.engine.analyze_position(&mut self.pos).join(" | "))),
            "opening" => Ok(self.cmd_opening()),
            "classify" => self.cmd_classify(rest),
            "difficulty" => self.cmd_difficulty(rest),
            other => return Some(format!("error unknown command `{other}`")),
        };
        Some(reply.unwrap_or_else(|e| format!("error {e}")))
    }

    /// Reads commands until `quit` or end of input.
    pub fn run_loop<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            if line.trim() == "quit" {
                break;
            }
            if let Some(reply) = self.handle_line(&line) {
                writeln!(output, "{reply}")?;
                output.flush()?;
            }
        }
        Ok(())
    }
}

fn describe(m: &EngineMove) -> String {
    format!("{}: {}", m.notation, m.explanation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::MoveGenerator;
    use crate::config::EngineConfig;
    use pretty_assertions::assert_eq;

    fn proto() -> CoachProtocol {
        CoachProtocol::new(Engine::with_seed(Difficulty::Medium, 1))
    }

    #[test]
    fn position_with_moves_then_opening() {
        let mut p = proto();
        assert_eq!(p.handle_line("position startpos moves e2e4 e7e5 g1f3"), None);
        assert_eq!(p.position().ply_count(), 3);
        assert_eq!(
            p.handle_line("opening").as_deref(),
            Some("opening King's Knight Opening: Developing the knight to attack the center")
        );
    }

    #[test]
    fn fen_moves_are_played_on_the_fen() {
        let mut p = proto();
        p.handle_line("position fen 4k3/8/8/8/8/8/4P3/4K3 w - - 0 1 moves e2e4");
        assert_eq!(p.position().canonical_key(), "4k3/8/8/8/4P3/8/8/4K3");
        assert_eq!(p.position().ply_count(), 1);
    }

    #[test]
    fn bad_input_gets_an_error_line() {
        let mut p = proto();
        assert!(p.handle_line("position fen not a fen").unwrap().starts_with("error "));
        assert!(p.handle_line("classify e2e5").unwrap().starts_with("error "));
        assert!(p.handle_line("difficulty impossible").unwrap().starts_with("error "));
        assert_eq!(p.handle_line("fly").as_deref(), Some("error unknown command `fly`"));
    }

    #[test]
    fn classify_and_go() {
        let mut p = proto();
        assert_eq!(
            p.handle_line("classify Nf3").as_deref(),
            Some("tags 🎯 Development: Bringing pieces into play")
        );
        p.handle_line("position fen 4k3/8/8/3q4/8/8/8/3QK3 w - - 0 1");
        assert_eq!(
            p.handle_line("go").as_deref(),
            Some("bestmove d1d5 Qxd5: 📍 Capture: Takes Q (Tactical play)")
        );
    }

    #[test]
    fn difficulty_change_keeps_the_move_budget() {
        let cfg = EngineConfig { difficulty: Difficulty::Medium, seed: Some(1), movetime_ms: Some(0) };
        let mut p = CoachProtocol::new(Engine::from_config(&cfg));
        assert_eq!(p.handle_line("difficulty hard").as_deref(), Some("difficulty hard"));
        assert_eq!(p.handle_line("go").as_deref(), Some("bestmove 0000"));
    }

    #[test]
    fn seeded_easy_stays_reproducible_after_tier_change() {
        let cfg = EngineConfig { difficulty: Difficulty::Hard, seed: Some(7), movetime_ms: None };
        let replies: Vec<_> = (0..2)
            .map(|_| {
                let mut p = CoachProtocol::new(Engine::from_config(&cfg));
                p.handle_line("difficulty easy");
                p.handle_line("go")
            })
            .collect();
        assert_eq!(replies[0], replies[1]);
    }

    #[test]
    fn quit_has_no_reply() {
        let mut p = proto();
        assert_eq!(p.handle_line("quit"), None);
    }

    #[test]
    fn loop_stops_at_quit() {
        let mut p = proto();
        let input = b"isready\ndifficulty easy\nquit\nisready\n";
        let mut out = Vec::new();
        p.run_loop(&input[..], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "readyok\ndifficulty easy\n");
    }
}
