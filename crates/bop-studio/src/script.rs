//! Gesture scripts: one step per line, `#` starts a comment.
//!
//! ```text
//! drag 0.2          # pointer down on the card, move 20% of the width
//! drag 0.45 0.05    # keep dragging (offsets are from the press point)
//! release
//! swipe left        # full drag + release + settle
//! like | dislike | rewind
//! tap 0.9 0.4       # fractions of the screen
//! wait 300          # milliseconds, at most ten minutes
//! settle            # run until nothing animates
//! ```

use std::time::Duration;

use bop_ui::swipe::Direction;
use thiserror::Error as ThisError;

/// Longest single `wait`, in milliseconds.
pub const MAX_WAIT_MS: u64 = 10 * 60 * 1000;

///
/// ScriptError
///

#[derive(Debug, ThisError, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown step '{word}'")]
    UnknownStep { line: usize, word: String },

    #[error("line {line}: '{step}' expects {expected}")]
    Arity { line: usize, step: String, expected: &'static str },

    #[error("line {line}: '{value}' is not a number")]
    BadNumber { line: usize, value: String },

    #[error("line {line}: '{value}' is not left or right")]
    BadDirection { line: usize, value: String },

    #[error("line {line}: wait of {ms} ms exceeds the {} ms limit", MAX_WAIT_MS)]
    WaitTooLong { line: usize, ms: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Pointer held on the card, moved to the press point plus
    /// `(dx, dy)` screen widths.
    Drag { dx: f32, dy: f32 },
    Release,
    Swipe(Direction),
    Like,
    Dislike,
    Rewind,
    /// Press and release at a point given as screen fractions.
    Tap { fx: f32, fy: f32 },
    Wait(Duration),
    Settle,
}

/// Parses a script file.
pub fn parse(text: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        if let Some(step) = parse_line(i + 1, raw)? {
            steps.push(step);
        }
    }

    Ok(steps)
}

/// Parses `--steps` text: the same syntax with `;` between steps.
///
/// Errors report the step's 1-based position as its line.
pub fn parse_inline(text: &str) -> Result<Vec<Step>, ScriptError> {
    parse(&text.replace(';', "\n"))
}

fn parse_line(line: usize, raw: &str) -> Result<Option<Step>, ScriptError> {
    let content = raw.split('#').next().unwrap_or_default();
    let words: Vec<&str> = content.split_whitespace().collect();
    let Some((&word, args)) = words.split_first() else {
        return Ok(None);
    };

    let arity =
        |expected: &'static str| ScriptError::Arity { line, step: word.to_string(), expected };
    let number = |s: &str| -> Result<f32, ScriptError> {
        s.parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ScriptError::BadNumber { line, value: s.to_string() })
    };

    let step = match (word, args) {
        ("drag", [dx]) => Step::Drag { dx: number(*dx)?, dy: 0.0 },
        ("drag", [dx, dy]) => Step::Drag { dx: number(*dx)?, dy: number(*dy)? },
        ("drag", _) => return Err(arity("<dx> [dy]")),

        ("swipe", [dir]) => match *dir {
            "left" => Step::Swipe(Direction::Left),
            "right" => Step::Swipe(Direction::Right),
            other => return Err(ScriptError::BadDirection { line, value: other.to_string() }),
        },
        ("swipe", _) => return Err(arity("left or right")),

        ("tap", [fx, fy]) => Step::Tap { fx: number(*fx)?, fy: number(*fy)? },
        ("tap", _) => return Err(arity("<fx> <fy>")),

        ("wait", [ms]) => {
            let ms = ms
                .parse::<u64>()
                .map_err(|_| ScriptError::BadNumber { line, value: ms.to_string() })?;
            if ms > MAX_WAIT_MS {
                return Err(ScriptError::WaitTooLong { line, ms });
            }
            Step::Wait(Duration::from_millis(ms))
        }
        ("wait", _) => return Err(arity("<ms>")),

        ("release" | "like" | "dislike" | "rewind" | "settle", [_, ..]) => {
            return Err(arity("no arguments"));
        }
        ("release", []) => Step::Release,
        ("like", []) => Step::Like,
        ("dislike", []) => Step::Dislike,
        ("rewind", []) => Step::Rewind,
        ("settle", []) => Step::Settle,

        _ => return Err(ScriptError::UnknownStep { line, word: word.to_string() }),
    };

    Ok(Some(step))
}
