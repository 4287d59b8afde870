use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::{Amount, Payer, SortCriterion, parse_amount};

/// One line typed into the shell.
#[derive(Parser, Debug)]
#[command(name = "evenly", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// List friends and their balances
    #[command(visible_alias = "ls")]
    List {
        /// Sort order for this listing (defaults to the session order)
        #[arg(short, long)]
        sort: Option<SortCriterion>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },

    /// Open or close the add-friend panel
    Panel,

    /// Add a friend (the add-friend panel must be open)
    Add {
        /// Friend name
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Avatar URL (generated when omitted)
        #[arg(short, long)]
        image: Option<String>,
    },

    /// Select a friend by name or id; selecting them again deselects
    Select {
        /// Friend name or id
        #[arg(required = true, num_args = 1..)]
        friend: Vec<String>,
    },

    /// Split a bill with the selected friend
    Split {
        /// Total bill value
        #[arg(short, long, value_parser = parse_amount, allow_negative_numbers = true)]
        bill: Option<Amount>,

        /// Your own expense
        #[arg(short, long, value_parser = parse_amount, allow_negative_numbers = true)]
        paid: Option<Amount>,

        /// Who is paying the bill: you or friend
        #[arg(long, default_value = "you")]
        payer: Payer,
    },

    /// Change the order of the friend list
    Sort {
        /// alphabetical, youHaveToPay, theyHaveToPay or zeroAndYouHaveToPay
        criterion: SortCriterion,
    },

    /// Show the selection, the add-friend panel and the sort order
    Status,

    /// Export the friend list
    Export {
        /// csv or json
        #[arg(value_enum)]
        format: ExportFormat,

        /// Output file (the shell output if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Leave the shell
    #[command(visible_alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Split a command line into words. Single or double quotes group words,
/// a backslash outside quotes escapes the next character.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, '\\') => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                    in_word = true;
                }
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        bail!("Unterminated {} quote", q);
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}
