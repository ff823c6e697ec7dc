//! Shortage computation and the plain-text shortage report.

use serde::{Deserialize, Serialize};

use stockroom_core::ItemName;

use crate::ledger::Ledger;
use crate::targets::TargetLevels;

/// One item below its target level. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortageRecord {
    pub name: ItemName,
    pub deficit: u64,
    pub on_hand: u64,
    pub target: u64,
}

impl Ledger {
    /// Items whose on-hand quantity is below target, sorted by name.
    ///
    /// Pure read: the ledger is not touched.
    pub fn shortages(&self, targets: &TargetLevels) -> Vec<ShortageRecord> {
        let records: Vec<ShortageRecord> = targets
            .iter()
            .filter_map(|(name, target)| {
                let on_hand = self.on_hand(name.as_str());
                (on_hand < target).then(|| ShortageRecord {
                    name: name.clone(),
                    deficit: target - on_hand,
                    on_hand,
                    target,
                })
            })
            .collect();

        tracing::debug!(
            targets = targets.len(),
            shortages = records.len(),
            "shortages computed"
        );
        records
    }
}

/// Ordered shortage records with presentation helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortageReport {
    records: Vec<ShortageRecord>,
}

impl ShortageReport {
    pub fn compute(ledger: &Ledger, targets: &TargetLevels) -> Self {
        Self {
            records: ledger.shortages(targets),
        }
    }

    pub fn records(&self) -> &[ShortageRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of every deficit; saturates rather than wrapping.
    pub fn total_deficit(&self) -> u64 {
        self.records
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.deficit))
    }

    /// Render as an aligned text table.
    pub fn to_table(&self) -> String {
        const HEADERS: [&str; 4] = ["Item", "On hand", "Target", "Deficit"];

        if self.records.is_empty() {
            return "No shortages.\n".to_string();
        }

        let rows: Vec<[String; 4]> = self
            .records
            .iter()
            .map(|r| {
                [
                    r.name.to_string(),
                    r.on_hand.to_string(),
                    r.target.to_string(),
                    r.deficit.to_string(),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_row(&mut out, &HEADERS.map(str::to_string), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("-+-"));
        out.push('\n');
        for row in &rows {
            push_row(&mut out, row, &widths);
        }
        out.push_str(&format!(
            "{} item(s) short, {} unit(s) missing in total\n",
            self.records.len(),
            self.total_deficit()
        ));
        out
    }
}

/// First column left-aligned, numeric columns right-aligned.
fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let mut parts = Vec::with_capacity(4);
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        let pad = width.saturating_sub(cell.chars().count());
        if i == 0 {
            parts.push(format!("{cell}{}", " ".repeat(pad)));
        } else {
            parts.push(format!("{}{cell}", " ".repeat(pad)));
        }
    }
    out.push_str(parts.join(" | ").trim_end());
    out.push('\n');
}
