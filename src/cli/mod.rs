use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::domain::{DEFAULT_AVATAR_BASE, SortCriterion};

mod commands;
mod session;

pub use commands::*;
pub use session::*;

/// Evenly - split bills with friends
#[derive(Parser, Debug)]
#[command(name = "evenly")]
#[command(about = "Split bills with friends and keep track of who owes whom")]
#[command(version)]
pub struct Cli {
    /// Start with the demo friends (Ravi, Rahul and Durgesh)
    #[arg(long, env = "EVENLY_DEMO")]
    pub demo: bool,

    /// Initial sort order: alphabetical, youHaveToPay, theyHaveToPay, zeroAndYouHaveToPay
    #[arg(long, env = "EVENLY_SORT", default_value = "alphabetical")]
    pub sort: SortCriterion,

    /// Base URL for generated avatars
    #[arg(long, env = "EVENLY_AVATAR_BASE", default_value = DEFAULT_AVATAR_BASE)]
    pub avatar_base: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            demo: self.demo,
            sort: self.sort,
            avatar_base: self.avatar_base.clone(),
        }
    }

    /// Read shell commands from stdin until `quit` or end of input.
    pub fn run(self) -> Result<()> {
        let mut session = Session::new(self.session_config());

        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        let mut stdout = io::stdout().lock();
        if interactive {
            writeln!(
                stdout,
                "evenly {} - type 'help' for commands, 'quit' to leave",
                env!("CARGO_PKG_VERSION")
            )?;
        }

        let mut lines = stdin.lock().lines();
        loop {
            if interactive {
                write!(stdout, "> ")?;
                stdout.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Failed to read command")?;

            match session.execute(&line, &mut stdout) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => report_failure(&line, &e, &mut io::stderr())?,
            }
            stdout.flush()?;
        }

        Ok(())
    }
}

// Shown to the user once; the log only keeps it at debug level.
fn report_failure<W: Write>(line: &str, err: &anyhow::Error, out: &mut W) -> Result<()> {
    debug!(command = %line.trim(), "command failed: {:#}", err);
    writeln!(out, "Error: {:#}", err)?;
    Ok(())
}
