//! Interactive LED controller prompt

use std::io::{BufRead, Write};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use log::{debug, warn};
use sensorlab_hal::UartTx;
use sensorlab_protocol::{LedCommand, LedStatus};

use crate::error::{HostError, Result};

/// Prompt printed before every command
pub const PROMPT: &str = "command > ";

/// Printed for anything that is not a command
pub const USAGE: &str = "Unknown command. Use: on, off, blink, status, exit, or quit.";

/// What the user typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptInput {
    Command(LedCommand),
    Exit,
    Blank,
    Unknown,
}

impl PromptInput {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return PromptInput::Blank;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            return PromptInput::Exit;
        }
        match LedCommand::parse(input) {
            Ok(command) => PromptInput::Command(command),
            Err(_) => PromptInput::Unknown,
        }
    }
}

/// Human-readable form of a status reply
///
/// Unrecognised replies are shown verbatim.
pub fn describe_reply(reply: &str) -> String {
    match LedStatus::parse(reply) {
        Some(status) => status.describe().to_owned(),
        None => reply.trim().to_owned(),
    }
}

/// Human-readable form of a command that changes the LED
fn describe_command(command: LedCommand) -> &'static str {
    match command {
        LedCommand::On => LedStatus::On.describe(),
        LedCommand::Off => LedStatus::Off.describe(),
        LedCommand::Blink => LedStatus::Blinking.describe(),
        LedCommand::Status => "",
    }
}

/// Run the prompt until `exit`, `quit` or end of input
pub fn run<I, O, T>(
    input: I,
    output: &mut O,
    tx: &mut T,
    replies: &Receiver<String>,
    reply_timeout: Duration,
) -> Result<()>
where
    I: BufRead,
    O: Write,
    T: UartTx<Error = std::io::Error>,
{
    writeln!(output, "Sensorlab LED control")?;
    writeln!(output, "Commands: on, off, blink, status, exit, quit")?;

    let mut lines = input.lines();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;

        match PromptInput::parse(&line) {
            PromptInput::Command(LedCommand::Status) => {
                // Drop anything that arrived unasked
                for stale in replies.try_iter() {
                    debug!("Dropping stale reply {:?}", stale);
                }

                tx.write_line(LedCommand::Status.as_str())?;
                tx.flush()?;

                match replies.recv_timeout(reply_timeout) {
                    Ok(reply) => writeln!(output, "{}", describe_reply(&reply))?,
                    Err(RecvTimeoutError::Timeout) => {
                        warn!("No status reply within {:?}", reply_timeout);
                    }
                    Err(RecvTimeoutError::Disconnected) => return Err(HostError::Disconnected),
                }
            }
            PromptInput::Command(command) => {
                writeln!(output, "{}", describe_command(command))?;
                tx.write_line(command.as_str())?;
                tx.flush()?;
            }
            PromptInput::Exit => {
                writeln!(output, "Exiting program.")?;
                break;
            }
            PromptInput::Blank => {}
            PromptInput::Unknown => writeln!(output, "{}", USAGE)?,
        }
    }

    Ok(())
}
