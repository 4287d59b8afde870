use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result, bail};
use clap::Parser;
use clap::error::ErrorKind;
use serde::Serialize;
use tracing::{debug, info};

use crate::application::{AppError, LedgerService};
use crate::domain::{
    DEFAULT_AVATAR_BASE, Friend, FriendId, Ledger, Payer, SelectionEvent, SortCriterion,
    demo_friends, format_amount,
};
use crate::io::Exporter;

use super::commands::{ExportFormat, ListFormat, ShellCommand, ShellLine, split_words};

/// Resolved startup settings for a shell session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub demo: bool,
    pub sort: SortCriterion,
    pub avatar_base: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            demo: false,
            sort: SortCriterion::default(),
            avatar_base: DEFAULT_AVATAR_BASE.to_string(),
        }
    }
}

/// Whether the shell should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Presentation state around the ledger: the add-friend panel and the
/// chosen sort order. Neither is part of the ledger itself.
pub struct Session {
    service: LedgerService,
    show_add_friend: bool,
    sort: SortCriterion,
}

/// One row of `list --format json`
#[derive(Serialize)]
struct FriendRow<'a> {
    id: FriendId,
    name: &'a str,
    image: &'a str,
    balance: i64,
    status: String,
    selected: bool,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let ledger = if config.demo {
            Ledger::with_friends(demo_friends())
        } else {
            Ledger::new()
        };
        let service = LedgerService::new(ledger).with_avatar_base(config.avatar_base);

        info!(
            friends = service.friends().len(),
            sort = %config.sort,
            "session started"
        );

        Self {
            service,
            show_add_friend: false,
            sort: config.sort,
        }
    }

    pub fn service(&self) -> &LedgerService {
        &self.service
    }

    pub fn is_add_friend_open(&self) -> bool {
        self.show_add_friend
    }

    pub fn sort(&self) -> SortCriterion {
        self.sort
    }

    /// Run one line of input, writing any output to `out`.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let words = split_words(line)?;
        if words.is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed.command,
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::DisplayHelp
                        | ErrorKind::DisplayVersion
                        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) =>
            {
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
            Err(e) => bail!("{}", e.render().to_string().trim_end()),
        };

        debug!(?command, "running shell command");
        self.run_command(command, out)
    }

    fn run_command<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> Result<Flow> {
        match command {
            ShellCommand::List { sort, format } => {
                let criterion = sort.unwrap_or(self.sort);
                self.write_list(out, criterion, format)?;
            }

            ShellCommand::Panel => {
                self.show_add_friend = !self.show_add_friend;
                let state = if self.show_add_friend { "open" } else { "closed" };
                writeln!(out, "Add-friend panel {}", state)?;
            }

            ShellCommand::Add { name, image } => {
                if !self.show_add_friend {
                    return Err(AppError::AddFriendPanelClosed.into());
                }
                let friend = self.service.add_friend(&name.join(" "), image.as_deref())?;
                self.show_add_friend = false;
                writeln!(out, "Added friend: {} ({})", friend.name, friend.id)?;
            }

            ShellCommand::Select { friend } => {
                let event = self.service.select_friend(&friend.join(" "))?;
                self.on_selection(event);
                self.write_selection(out, event)?;
            }

            ShellCommand::Split { bill, paid, payer } => {
                let result = self.service.split_bill(bill, paid, payer)?;
                let name = &result.friend.name;
                let bill = result.form.bill().unwrap_or_default();
                let paid = result.form.paid_by_user().unwrap_or_default();
                let share = result.form.paid_by_friend().unwrap_or_default();
                let paid_by = match payer {
                    Payer::User => "you",
                    Payer::Friend => name.as_str(),
                };

                writeln!(
                    out,
                    "Split a bill of {} with {}: your expense {}, {}'s expense {}, paid by {}",
                    format_amount(bill),
                    name,
                    format_amount(paid),
                    name,
                    format_amount(share),
                    paid_by
                )?;
                writeln!(out, "{}", result.friend.status().describe(name))?;
            }

            ShellCommand::Sort { criterion } => {
                self.sort = criterion;
                writeln!(out, "Sorting by: {}", criterion.label())?;
            }

            ShellCommand::Status => self.write_status(out)?,

            ShellCommand::Export { format, output } => {
                let exporter = Exporter::new(&self.service);
                match output {
                    Some(path) => {
                        let file = File::create(&path).with_context(|| {
                            format!("Failed to create output file: {}", path.display())
                        })?;
                        let count = match format {
                            ExportFormat::Csv => exporter.export_friends_csv(file, self.sort)?,
                            ExportFormat::Json => exporter.export_json(file)?.friends.len(),
                        };
                        writeln!(out, "Exported {} friends to {}", count, path.display())?;
                    }
                    None => match format {
                        ExportFormat::Csv => {
                            exporter.export_friends_csv(&mut *out, self.sort)?;
                        }
                        ExportFormat::Json => {
                            exporter.export_json(&mut *out)?;
                        }
                    },
                }
            }

            ShellCommand::Quit => {
                info!("session ended");
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    // Selecting anyone, or deselecting, closes the add-friend panel.
    fn on_selection(&mut self, event: SelectionEvent) {
        if let SelectionEvent::Selected(_) | SelectionEvent::Cleared(_) = event {
            self.show_add_friend = false;
        }
    }

    fn write_selection<W: Write>(&self, out: &mut W, event: SelectionEvent) -> Result<()> {
        match event {
            SelectionEvent::Selected(id) => {
                let name = self.friend_name(id);
                writeln!(out, "Selected {}", name)?;
                writeln!(
                    out,
                    "Split a bill with {}: split --bill <amount> --paid <amount> [--payer you|friend]",
                    name
                )?;
            }
            SelectionEvent::Cleared(id) => writeln!(out, "Deselected {}", self.friend_name(id))?,
            SelectionEvent::Ignored(id) => writeln!(out, "No friend with id {}", id)?,
        }
        Ok(())
    }

    fn write_list<W: Write>(
        &self,
        out: &mut W,
        criterion: SortCriterion,
        format: ListFormat,
    ) -> Result<()> {
        let friends = self.service.sorted_friends(criterion);
        let selected = self.service.current_selection().map(|f| f.id);

        match format {
            ListFormat::Json => {
                let rows: Vec<FriendRow> = friends
                    .iter()
                    .map(|f| FriendRow {
                        id: f.id,
                        name: &f.name,
                        image: &f.image,
                        balance: f.balance,
                        status: f.status().describe(&f.name),
                        selected: selected == Some(f.id),
                    })
                    .collect();
                writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
            }
            ListFormat::Csv => {
                Exporter::new(&self.service).export_friends_csv(&mut *out, criterion)?;
            }
            ListFormat::Table => {
                if friends.is_empty() {
                    writeln!(out, "No friends yet. Open the panel with 'panel', then 'add <name>'.")?;
                    return Ok(());
                }
                writeln!(out, "Sort by: {}", criterion.label())?;
                writeln!(out, "  {:<20} {:>10}  {}", "NAME", "BALANCE", "STATUS")?;
                writeln!(out, "{}", "-".repeat(60))?;
                for friend in friends {
                    write_friend_row(out, friend, selected == Some(friend.id))?;
                }
            }
        }
        Ok(())
    }

    fn write_status<W: Write>(&self, out: &mut W) -> Result<()> {
        let selection = self
            .service
            .current_selection()
            .map(|f| f.name.as_str())
            .unwrap_or("none");
        let panel = if self.show_add_friend { "open" } else { "closed" };

        writeln!(out, "Friends:          {}", self.service.friends().len())?;
        writeln!(out, "Selected:         {}", selection)?;
        writeln!(out, "Add-friend panel: {}", panel)?;
        writeln!(out, "Sort by:          {}", self.sort.label())?;
        Ok(())
    }

    fn friend_name(&self, id: FriendId) -> &str {
        self.service
            .ledger()
            .get(id)
            .map(|f| f.name.as_str())
            .unwrap_or("unknown friend")
    }
}

fn write_friend_row<W: Write>(out: &mut W, friend: &Friend, selected: bool) -> Result<()> {
    let marker = if selected { "*" } else { " " };
    writeln!(
        out,
        "{} {:<20} {:>10}  {}",
        marker,
        truncate(&friend.name, 20),
        format_amount(friend.balance),
        friend.status().describe(&friend.name)
    )?;
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}
