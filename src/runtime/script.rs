//! Line-oriented scripts replayed by the `confview` binary.
//!
//! One command per line. Blank lines and lines starting with `//` are skipped.
//!
//! | Line | Effect |
//! |------|--------|
//! | `configs/42/name:x` | navigate (any line that is not a command) |
//! | `press new` | press a toolbar button |
//! | `confirm name=X xml=<a/>` | confirm the newest open dialog |
//! | `cancel` | cancel the newest open dialog |
//! | `edit` | click the rendered detail |
//! | `reset` | clear the sticky session flags |
//! | `timers` | fire every armed timer |
//! | `defer on` / `defer off` | hold store requests / answer them at once |
//! | `release` / `release 3` | answer every held request / ticket 3 |

use super::Driver;
use crate::app::Event;
use crate::domain::error::{ConfviewError, Result};
use crate::store::{RemoteStore, Ticket};
use crate::ui::{DialogDecision, Surface, ToolbarButton};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Navigate(String),
    Press(ToolbarButton),
    Confirm(BTreeMap<String, String>),
    Cancel,
    Edit,
    Reset,
    Timers,
    Defer(bool),
    Release(Option<Ticket>),
}

impl FromStr for ScriptCommand {
    type Err = ConfviewError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let invalid = |reason: &str| ConfviewError::Config(format!("{reason}: '{line}'"));

        match word {
            "press" => serde_json::from_value(serde_json::Value::String(rest.to_string()))
                .map(Self::Press)
                .map_err(|_| invalid("unknown toolbar button")),
            "confirm" => rest
                .split_whitespace()
                .map(|pair| {
                    pair.split_once('=')
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .ok_or_else(|| invalid("expected key=value"))
                })
                .collect::<Result<BTreeMap<_, _>>>()
                .map(Self::Confirm),
            "cancel" => Ok(Self::Cancel),
            "edit" => Ok(Self::Edit),
            "reset" => Ok(Self::Reset),
            "timers" => Ok(Self::Timers),
            "defer" => match rest {
                "on" => Ok(Self::Defer(true)),
                "off" => Ok(Self::Defer(false)),
                _ => Err(invalid("expected 'defer on' or 'defer off'")),
            },
            "release" if rest.is_empty() => Ok(Self::Release(None)),
            "release" => rest
                .trim_start_matches('#')
                .parse::<u64>()
                .map(|n| Self::Release(Some(Ticket(n))))
                .map_err(|_| invalid("expected a ticket number")),
            _ if rest.is_empty() => Ok(Self::Navigate(line.to_string())),
            _ => Err(invalid("unknown command")),
        }
    }
}

/// Parses a whole script, reporting the first bad line by number.
///
/// # Errors
///
/// Returns [`ConfviewError::Config`] naming the line that failed to parse.
///
/// # Examples
///
/// ```
/// use confview::runtime::script::{parse_script, ScriptCommand};
///
/// let commands = parse_script("// open the list\nconfigs\n\npress new\ncancel\n")?;
/// assert_eq!(commands.len(), 3);
/// assert_eq!(commands[0], ScriptCommand::Navigate("configs".into()));
/// # Ok::<(), confview::ConfviewError>(())
/// ```
pub fn parse_script(source: &str) -> Result<Vec<ScriptCommand>> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with("//")
        })
        .map(|(index, line)| {
            line.parse().map_err(|e| match e {
                ConfviewError::Config(message) => ConfviewError::Config(format!("line {}: {message}", index + 1)),
                other => other,
            })
        })
        .collect()
}

impl<S: RemoteStore, U: Surface> Driver<S, U> {
    /// Runs one script command.
    ///
    /// # Errors
    ///
    /// Propagates errors from the view.
    pub fn run_command(&mut self, command: &ScriptCommand) -> Result<()> {
        tracing::debug!(?command, "running script command");
        match command {
            ScriptCommand::Navigate(path) => self.navigate(path.clone()),
            ScriptCommand::Press(button) => self.press(*button),
            ScriptCommand::Confirm(fields) => self.resolve_newest(DialogDecision::Confirmed {
                fields: fields.clone(),
            }),
            ScriptCommand::Cancel => self.resolve_newest(DialogDecision::Cancelled),
            ScriptCommand::Edit => self.request_edit(),
            ScriptCommand::Reset => self.dispatch(Event::SessionReset),
            ScriptCommand::Timers => self.fire_timers().map(|_| ()),
            ScriptCommand::Defer(defer) => {
                self.set_deferred(*defer);
                Ok(())
            }
            ScriptCommand::Release(Some(ticket)) => self.release(*ticket).map(|_| ()),
            ScriptCommand::Release(None) => self.release_all(),
        }
    }

    fn resolve_newest(&mut self, decision: DialogDecision) -> Result<()> {
        let Some(dialog) = self.open_dialogs().keys().next_back().copied() else {
            tracing::debug!("no open dialog to resolve");
            return Ok(());
        };
        self.resolve_dialog(dialog, decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        assert_eq!("press delete".parse::<ScriptCommand>().unwrap(), ScriptCommand::Press(ToolbarButton::Delete));
        assert_eq!("timers".parse::<ScriptCommand>().unwrap(), ScriptCommand::Timers);
        assert_eq!("reset".parse::<ScriptCommand>().unwrap(), ScriptCommand::Reset);
        assert_eq!("release #4".parse::<ScriptCommand>().unwrap(), ScriptCommand::Release(Some(Ticket(4))));
        assert_eq!("defer on".parse::<ScriptCommand>().unwrap(), ScriptCommand::Defer(true));
        let ScriptCommand::Confirm(fields) = "confirm name=X xml=<a/>".parse().unwrap() else {
            panic!("expected confirm");
        };
        assert_eq!(fields.get("xml").map(String::as_str), Some("<a/>"));
    }

    #[test]
    fn anything_else_is_a_route() {
        assert_eq!(
            "#configs/1".parse::<ScriptCommand>().unwrap(),
            ScriptCommand::Navigate("#configs/1".into())
        );
    }

    #[test]
    fn bad_lines_are_reported_with_their_number() {
        let err = parse_script("configs\npress nothing\n").unwrap_err();
        assert!(matches!(err, ConfviewError::Config(message) if message.starts_with("line 2:")));
    }
}
