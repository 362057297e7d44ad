//! Directions, decisions and run reports.

use std::fmt;

/// Which way secrets flow.
///
/// `Sync` is `Pull` followed by `Push`, so on a conflict the remote
/// value wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Direction {
    Sync,
    Pull,
    Push,
}

impl Direction {
    /// Every direction, in the order they are offered interactively.
    pub const ALL: [Direction; 3] = [Direction::Sync, Direction::Pull, Direction::Push];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Sync => "sync",
            Direction::Pull => "pull",
            Direction::Push => "push",
        }
    }

    /// One-line description shown next to the choice in the selector.
    pub fn describe(self) -> &'static str {
        match self {
            Direction::Sync => "Sync  — pull, then push, then save the env file",
            Direction::Pull => "Pull  — copy remote secrets into the env file",
            Direction::Push => "Push  — copy env file secrets to the remote",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
}

/// The mapping a change was written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Local,
    Remote,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Local => f.write_str("local"),
            Side::Remote => f.write_str("remote"),
        }
    }
}

/// A single create/update decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub key: String,
    pub kind: ChangeKind,
    pub side: Side,
}

impl Change {
    pub fn new(key: &str, kind: ChangeKind, side: Side) -> Self {
        Self {
            key: key.to_string(),
            kind,
            side,
        }
    }

    /// Short past-tense label, e.g. `created local`.
    pub fn label(&self) -> String {
        let verb = match self.kind {
            ChangeKind::Created => "created",
            ChangeKind::Updated => "updated",
        };
        format!("{verb} {}", self.side)
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            ChangeKind::Created => "Creating",
            ChangeKind::Updated => "Updating",
        };
        write!(f, "{verb} {} secret {}", self.side, self.key)
    }
}

/// Outcome of one reconciliation run.
#[derive(Debug, Clone)]
pub struct Report {
    pub direction: Direction,
    /// Every decision, in the order it was applied.
    pub changes: Vec<Change>,
    /// Whether the env file was rewritten.
    pub persisted: bool,
}

impl Report {
    pub fn local_changes(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(|c| c.side == Side::Local)
    }

    pub fn remote_changes(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(|c| c.side == Side::Remote)
    }

    /// True when nothing had to change on either side.
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }

    /// Human summary, e.g. `2 local, 1 remote change(s)`.
    pub fn summary(&self) -> String {
        format!(
            "{} local, {} remote change(s)",
            self.local_changes().count(),
            self.remote_changes().count()
        )
    }
}
