use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::{Friend, FriendId, SortCriterion};

/// Snapshot of the friend list for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub selected: Option<FriendId>,
    pub friends: Vec<Friend>,
}

/// Writes the current friend list out. Nothing here is ever read back.
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export friends to CSV, in the given display order
    pub fn export_friends_csv<W: Write>(
        &self,
        writer: W,
        criterion: SortCriterion,
    ) -> Result<usize> {
        let friends = self.service.sorted_friends(criterion);
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record(["id", "name", "image", "balance", "status", "added_at"])?;

        let mut count = 0;
        for friend in &friends {
            csv_writer.write_record([
                friend.id.to_string().as_str(),
                friend.name.as_str(),
                friend.image.as_str(),
                friend.balance.to_string().as_str(),
                friend.status().as_str(),
                friend.added_at.to_rfc3339().as_str(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the friend list as a pretty-printed JSON snapshot, in insertion order
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            selected: self.service.current_selection().map(|f| f.id),
            friends: self.service.friends().to_vec(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(snapshot)
    }
}
