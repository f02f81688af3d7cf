//! Line commands for the interactive session.
//!
//! | Input | Effect |
//! |-------|--------|
//! | `buy_price=150` | edit a field (any of `buy_price`, `buy_shares`, `sell_price`, `sell_shares`, `inc_tax`) |
//! | `buy_price=` | clear a numeric field |
//! | `reset` | clear prices and share counts |
//! | `details` | show or hide the buy and sell totals |
//! | `help` | list the commands |
//! | `quit` | end the session |

use std::io::{self, BufRead, Write};

use shares_core::{FieldError, FieldEvent, InputController};
use thiserror::Error;
use tracing::{debug, info};

use crate::view;

const HELP: &str = "\
Commands:
  <field>=<value>  edit a field: buy_price, buy_shares, sell_price, sell_shares (pence / shares)
                   inc_tax=on|off toggles stamp duty; an empty value clears a field
  reset            clear prices and share counts
  details          show or hide the buy and sell totals
  help             show this list
  quit             end the session
";

/// Errors from parsing a command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("unrecognised command '{0}' (type 'help' for a list)")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Edit(FieldEvent),
    Reset,
    ToggleDetails,
    Help,
    Quit,
}

impl Command {
    /// Parses one line. Returns `Ok(None)` for a blank line.
    ///
    /// Only the field name is trimmed; the value after `=` is passed on as
    /// typed, so `buy_price=` clears the field.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(None);
        }

        if let Some((name, raw)) = line.split_once('=') {
            return Ok(Some(Self::Edit(FieldEvent::parse(name, raw)?)));
        }

        match line.trim().to_ascii_lowercase().as_str() {
            "reset" => Ok(Some(Self::Reset)),
            "details" => Ok(Some(Self::ToggleDetails)),
            "help" | "?" => Ok(Some(Self::Help)),
            "quit" | "exit" | "q" => Ok(Some(Self::Quit)),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Runs commands from `input` against the controller until `quit` or end
/// of input, writing the re-rendered form to `output` after every change.
///
/// Bad commands are reported on `output` and the session carries on. Bytes
/// that are not valid UTF-8 are replaced with `U+FFFD` before parsing.
pub fn run_session<R: BufRead, W: Write>(
    controller: &mut InputController,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    info!("interactive session started");
    write!(output, "{}\n{}", HELP, view::render(controller))?;
    prompt(&mut output)?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);

        match Command::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => write!(output, "{HELP}")?,
            Ok(Some(command)) => {
                apply(controller, command);
                write!(output, "{}", view::render(controller))?;
            }
            Err(e) => {
                debug!(%line, error = %e, "command rejected");
                writeln!(output, "error: {e}")?;
            }
        }
        prompt(&mut output)?;
    }

    info!("interactive session ended");
    writeln!(output)
}

/// Applies a state-changing command. `Help` and `Quit` are no-ops here.
pub fn apply(
    controller: &mut InputController,
    command: Command,
) {
    match command {
        Command::Edit(event) => controller.on_field_change(event),
        Command::Reset => controller.reset(),
        Command::ToggleDetails => {
            controller.toggle_details();
        }
        Command::Help | Command::Quit => {}
    }
}

fn prompt<W: Write>(output: &mut W) -> io::Result<()> {
    write!(output, "> ")?;
    output.flush()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use shares_core::Entry;

    use super::*;

    #[test]
    fn parse_edit_commands() {
        assert_eq!(
            Command::parse("buy_price=150"),
            Ok(Some(Command::Edit(FieldEvent::BuyPrice("150".to_string()))))
        );
        assert_eq!(
            Command::parse(" sell_shares =250\n"),
            Ok(Some(Command::Edit(FieldEvent::SellShares("250".to_string()))))
        );
        assert_eq!(
            Command::parse("inc_tax=on"),
            Ok(Some(Command::Edit(FieldEvent::IncTax(true))))
        );
    }

    #[test]
    fn parse_empty_value_clears() {
        assert_eq!(
            Command::parse("buy_shares="),
            Ok(Some(Command::Edit(FieldEvent::BuyShares(String::new()))))
        );
    }

    #[test]
    fn parse_keywords() {
        assert_eq!(Command::parse("reset"), Ok(Some(Command::Reset)));
        assert_eq!(Command::parse("DETAILS"), Ok(Some(Command::ToggleDetails)));
        assert_eq!(Command::parse("help"), Ok(Some(Command::Help)));
        assert_eq!(Command::parse("quit"), Ok(Some(Command::Quit)));
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn parse_rejects_unknown_input() {
        assert_eq!(
            Command::parse("sell everything"),
            Err(CommandError::Unknown("sell everything".to_string()))
        );
        assert_eq!(
            Command::parse("fees=10"),
            Err(CommandError::Field(FieldError::UnknownField("fees".to_string())))
        );
    }

    #[test]
    fn session_applies_edits_and_stops_at_quit() {
        let mut controller = InputController::new();
        let input = "buy_price=150\nbuy_shares=500\nsell_price=200\nquit\nbuy_price=999\n";
        let mut output = Vec::new();

        run_session(&mut controller, input.as_bytes(), &mut output).unwrap();

        assert_eq!(controller.inputs().buy_price, Entry::parse("150"));
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Return      £250.00"));
    }

    #[test]
    fn session_reports_bad_commands_and_continues() {
        let mut controller = InputController::new();
        let input = "nonsense\nbuy_shares=10\n";
        let mut output = Vec::new();

        run_session(&mut controller, input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("error: unrecognised command 'nonsense'"));
        assert_eq!(controller.inputs().buy_shares, Entry::parse("10"));
    }

    #[test]
    fn session_survives_bytes_that_are_not_utf8() {
        let mut controller = InputController::new();
        let input: &[u8] = b"buy_price=150\n\xff\xfe\nbuy_shares=500\n";
        let mut output = Vec::new();

        let result = run_session(&mut controller, input, &mut output);

        assert!(result.is_ok());
        assert_eq!(controller.inputs().buy_price, Entry::parse("150"));
        assert_eq!(controller.inputs().buy_shares, Entry::parse("500"));
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("error: unrecognised command '\u{FFFD}\u{FFFD}'"));
    }

    #[test]
    fn apply_reset_and_details() {
        let mut controller = InputController::new();
        apply(&mut controller, Command::Edit(FieldEvent::BuyPrice("150".into())));

        apply(&mut controller, Command::ToggleDetails);
        apply(&mut controller, Command::Reset);

        assert!(controller.show_details());
        assert!(controller.inputs().buy_price.is_unset());
    }
}
