//! Scripted `frame:direction` inputs replayed by the headless backend.

use std::collections::BTreeMap;

use bug_crossing_core::Direction;
use bug_crossing_rendering::{direction_from_key_code, FrameInput};
use thiserror::Error;

/// Errors raised while parsing a scripted input entry.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// The entry lacked the `:` separator.
    #[error("input `{0}` is not of the form frame:direction")]
    MissingSeparator(String),
    /// The frame index was not a non-negative integer.
    #[error("input `{entry}` has an invalid frame index")]
    InvalidFrame {
        /// Offending entry.
        entry: String,
    },
    /// The direction was neither a name nor an arrow key code.
    #[error("input `{entry}` has an unknown direction")]
    InvalidDirection {
        /// Offending entry.
        entry: String,
    },
}

/// Inputs keyed by the frame they are delivered on.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct InputScript {
    inputs: BTreeMap<u32, Direction>,
}

impl InputScript {
    /// Parses every entry; a later entry for the same frame replaces an earlier one.
    pub(crate) fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self, ScriptError> {
        let mut inputs = BTreeMap::new();
        for entry in entries {
            let (frame, direction) = parse_entry(entry.as_ref())?;
            if let Some(previous) = inputs.insert(frame, direction) {
                log::debug!("frame {frame}: {direction} replaces scripted {previous}");
            }
        }
        Ok(Self { inputs })
    }

    /// Input delivered on `frame`.
    pub(crate) fn input_for(&self, frame: u32) -> FrameInput {
        FrameInput {
            direction: self.inputs.get(&frame).copied(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.inputs.len()
    }
}

fn parse_entry(entry: &str) -> Result<(u32, Direction), ScriptError> {
    let (frame, direction) = entry
        .split_once(':')
        .ok_or_else(|| ScriptError::MissingSeparator(entry.to_owned()))?;

    let frame = frame
        .trim()
        .parse::<u32>()
        .map_err(|_| ScriptError::InvalidFrame {
            entry: entry.to_owned(),
        })?;

    let direction = direction.trim();
    let parsed = match direction.parse::<u32>() {
        Ok(code) => direction_from_key_code(code),
        Err(_) => direction.parse::<Direction>().ok(),
    };
    let direction = parsed.ok_or_else(|| ScriptError::InvalidDirection {
        entry: entry.to_owned(),
    })?;
    Ok((frame, direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_key_codes() {
        let script = InputScript::parse(&["3:up", " 7 : Left", "9:40"]).expect("script parses");
        assert_eq!(script.len(), 3);
        assert_eq!(script.input_for(3).direction, Some(Direction::Up));
        assert_eq!(script.input_for(7).direction, Some(Direction::Left));
        assert_eq!(script.input_for(9).direction, Some(Direction::Down));
        assert_eq!(script.input_for(4), FrameInput::default());
    }

    #[test]
    fn later_entries_replace_earlier_ones() {
        let script = InputScript::parse(&["5:up", "5:right"]).expect("script parses");
        assert_eq!(script.len(), 1);
        assert_eq!(script.input_for(5).direction, Some(Direction::Right));
    }

    #[test]
    fn reports_malformed_entries() {
        assert_eq!(
            InputScript::parse(&["up"]),
            Err(ScriptError::MissingSeparator("up".to_owned()))
        );
        assert_eq!(
            InputScript::parse(&["-1:up"]),
            Err(ScriptError::InvalidFrame {
                entry: "-1:up".to_owned()
            })
        );
        assert_eq!(
            InputScript::parse(&["2:jump"]),
            Err(ScriptError::InvalidDirection {
                entry: "2:jump".to_owned()
            })
        );
        assert_eq!(
            InputScript::parse(&["2:13"]),
            Err(ScriptError::InvalidDirection {
                entry: "2:13".to_owned()
            })
        );
    }
}
