//! Read-eval-print loop.

use std::io::Write;

use anyhow::{anyhow, Result};
use colored::*;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::commands::{Command, Flow, Session};

pub const PROMPT: &str = "Pokedex > ";

/// Splits a line into lowercase words, dropping empty ones.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Parses and runs a single input line, returning any command failure.
///
/// An unknown command is an error here; one-shot mode relies on this to exit
/// non-zero.
pub async fn execute_line(session: &mut Session, line: &str, out: &mut dyn Write) -> Result<Flow> {
    let words = clean_input(line);
    let Some(name) = words.first() else {
        return Ok(Flow::Continue);
    };

    let command = name
        .parse::<Command>()
        .map_err(|_| anyhow!("Unknown command '{}'", name))?;

    let arg = words.get(1).map(String::as_str);
    let flow = session.execute(command, arg, out).await?;
    Ok(flow)
}

/// Parses and runs a single input line.
///
/// Command failures are reported to `out` and do not end the session.
pub async fn dispatch(session: &mut Session, line: &str, out: &mut dyn Write) -> Result<Flow> {
    let words = clean_input(line);
    let Some(name) = words.first() else {
        return Ok(Flow::Continue);
    };

    if name.parse::<Command>().is_err() {
        writeln!(out, "Unknown command")?;
        return Ok(Flow::Continue);
    }

    match execute_line(session, line, out).await {
        Ok(flow) => Ok(flow),
        Err(e) => {
            warn!(command = name.as_str(), error = %e, "Command failed");
            writeln!(out, "{} {:#}", "Error:".red().bold(), e)?;
            Ok(Flow::Continue)
        }
    }
}

/// Runs the REPL until `exit` or end of input.
pub async fn run<R>(session: &mut Session, input: R, out: &mut dyn Write) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        if dispatch(session, &line, out).await? == Flow::Exit {
            break;
        }
    }

    debug!(stats = ?session.client().cache().stats(), "REPL finished");
    Ok(())
}
