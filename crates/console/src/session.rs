//! One console session: owns a ledger and decides how long it lives.

use std::io::{BufRead, Write};

use stockroom_core::DomainError;
use stockroom_inventory::{Ledger, ShortageReport, TargetLevels};

use crate::action::{self, Action, HELP};
use crate::config::{ConsoleConfig, Retention};
use crate::notice::Notice;
use crate::render;

/// What an interaction produced for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Notice(Notice),
    Text(String),
    Quit,
}

impl Reply {
    pub fn render(&self) -> Option<String> {
        match self {
            Reply::Notice(n) => Some(format!("{}\n", n.render())),
            Reply::Text(t) => Some(t.clone()),
            Reply::Quit => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    initial: (Ledger, TargetLevels),
    ledger: Ledger,
    targets: TargetLevels,
    retention: Retention,
}

impl Session {
    pub fn new(ledger: Ledger, targets: TargetLevels, retention: Retention) -> Self {
        Self {
            initial: (ledger.clone(), targets.clone()),
            ledger,
            targets,
            retention,
        }
    }

    pub fn from_config(config: &ConsoleConfig) -> Result<Self, DomainError> {
        let (ledger, targets) = config.seed.build()?;
        Ok(Self::new(ledger, targets, config.retention))
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn targets(&self) -> &TargetLevels {
        &self.targets
    }

    pub fn retention(&self) -> Retention {
        self.retention
    }

    fn restore(&mut self) {
        self.ledger = self.initial.0.clone();
        self.targets = self.initial.1.clone();
    }

    /// Run one interaction against the ledger.
    pub fn interact(&mut self, action: Action) -> Reply {
        if self.retention == Retention::Reset {
            self.restore();
        }

        match action {
            Action::Add { name, quantity } => match self.ledger.add(&name, quantity) {
                Ok(outcome) => Reply::Notice(Notice::from(&outcome)),
                Err(err) => Reply::Notice(Notice::from(&err)),
            },
            Action::Remove { name, quantity } => match self.ledger.remove(&name, quantity) {
                Ok(outcome) => Reply::Notice(Notice::from(&outcome)),
                Err(err) => Reply::Notice(Notice::from(&err)),
            },
            Action::SetTarget { name, level } => match self.targets.set(&name, level) {
                Ok(()) => Reply::Notice(Notice::info(format!(
                    "Target for '{}' set to {level}",
                    name.trim()
                ))),
                Err(err) => Reply::Notice(Notice::from(&err)),
            },
            Action::List => Reply::Text(render::stock_table(&self.ledger)),
            Action::Shortages => {
                Reply::Text(ShortageReport::compute(&self.ledger, &self.targets).to_table())
            }
            Action::Reset => {
                self.restore();
                Reply::Notice(Notice::info("Stock and targets restored to the starting seed"))
            }
            Action::Help => Reply::Text(HELP.to_string()),
            Action::Quit => Reply::Quit,
        }
    }

    /// Parse and run one input line. Blank lines produce nothing.
    pub fn interact_line(&mut self, line: &str) -> Option<Reply> {
        match action::parse(line) {
            Ok(Some(action)) => Some(self.interact(action)),
            Ok(None) => None,
            Err(err) => Some(Reply::Notice(Notice::from(&err))),
        }
    }

    /// Read lines until end of input or `quit`, writing every reply.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> std::io::Result<()> {
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            match self.interact_line(&line) {
                Some(Reply::Quit) => {
                    tracing::info!("session ended by user");
                    return Ok(());
                }
                Some(reply) => {
                    if let Some(text) = reply.render() {
                        output.write_all(text.as_bytes())?;
                    }
                }
                None => {}
            }
            write!(output, "> ")?;
            output.flush()?;
        }

        writeln!(output)?;
        tracing::info!("session ended at end of input");
        Ok(())
    }
}
