//! Side-by-side comparison of the local and remote mappings.
//!
//! Read-only: used by `envsync status` to preview what each direction
//! would do.

use std::collections::BTreeSet;

use super::Direction;
use crate::envfile::SecretMap;

/// Keys of both mappings, categorized. Each list is sorted.
#[derive(Debug, Default)]
pub struct Comparison {
    pub only_local: Vec<String>,
    pub only_remote: Vec<String>,
    pub changed: Vec<String>,
    pub unchanged: Vec<String>,
}

/// Number of create/update writes a direction would issue per side.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Planned {
    pub local_creates: usize,
    pub local_updates: usize,
    pub remote_creates: usize,
    pub remote_updates: usize,
}

impl Planned {
    pub fn total(&self) -> usize {
        self.local_creates + self.local_updates + self.remote_creates + self.remote_updates
    }
}

/// Compare two secret maps and categorize keys.
pub fn compare(local: &SecretMap, remote: &SecretMap) -> Comparison {
    let local_keys: BTreeSet<&String> = local.keys().collect();
    let remote_keys: BTreeSet<&String> = remote.keys().collect();

    let only_local = local_keys
        .difference(&remote_keys)
        .map(|k| (*k).clone())
        .collect();

    let only_remote = remote_keys
        .difference(&local_keys)
        .map(|k| (*k).clone())
        .collect();

    // Keys in both: changed vs unchanged.
    let (changed, unchanged): (Vec<String>, Vec<String>) = local_keys
        .intersection(&remote_keys)
        .map(|k| (*k).clone())
        .partition(|key| local[key] != remote[key]);

    Comparison {
        only_local,
        only_remote,
        changed,
        unchanged,
    }
}

impl Comparison {
    /// True when both sides already hold the same secrets.
    pub fn in_sync(&self) -> bool {
        self.only_local.is_empty() && self.only_remote.is_empty() && self.changed.is_empty()
    }

    /// What running `direction` against these mappings would write.
    pub fn planned(&self, direction: Direction) -> Planned {
        match direction {
            Direction::Pull => Planned {
                local_creates: self.only_remote.len(),
                local_updates: self.changed.len(),
                ..Planned::default()
            },
            Direction::Push => Planned {
                remote_creates: self.only_local.len(),
                remote_updates: self.changed.len(),
                ..Planned::default()
            },
            // After the pull half, differing keys already match, so the
            // push half only creates the local-only keys.
            Direction::Sync => Planned {
                local_creates: self.only_remote.len(),
                local_updates: self.changed.len(),
                remote_creates: self.only_local.len(),
                remote_updates: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> SecretMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn compare_mixed_changes() {
        let local = map(&[("KEEP", "same"), ("MODIFY", "old"), ("MINE", "x")]);
        let remote = map(&[("KEEP", "same"), ("MODIFY", "new"), ("THEIRS", "y")]);

        let cmp = compare(&local, &remote);
        assert_eq!(cmp.only_local, vec!["MINE"]);
        assert_eq!(cmp.only_remote, vec!["THEIRS"]);
        assert_eq!(cmp.changed, vec!["MODIFY"]);
        assert_eq!(cmp.unchanged, vec!["KEEP"]);
        assert!(!cmp.in_sync());
    }

    #[test]
    fn identical_maps_are_in_sync() {
        let m = map(&[("A", "1")]);
        let cmp = compare(&m, &m);
        assert!(cmp.in_sync());
        assert_eq!(cmp.planned(Direction::Sync).total(), 0);
    }

    #[test]
    fn planned_counts_per_direction() {
        let local = map(&[("A", "1"), ("L", "l")]);
        let remote = map(&[("A", "2"), ("B", "3")]);
        let cmp = compare(&local, &remote);

        assert_eq!(
            cmp.planned(Direction::Pull),
            Planned {
                local_creates: 1,
                local_updates: 1,
                ..Planned::default()
            }
        );
        assert_eq!(
            cmp.planned(Direction::Push),
            Planned {
                remote_creates: 1,
                remote_updates: 1,
                ..Planned::default()
            }
        );
        assert_eq!(
            cmp.planned(Direction::Sync),
            Planned {
                local_creates: 1,
                local_updates: 1,
                remote_creates: 1,
                remote_updates: 0,
            }
        );
    }
}
