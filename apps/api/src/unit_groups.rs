use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One NOC 2016 unit group from the bundled reference dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitGroup {
    pub noc: String,
    pub title: String,
    pub jobs: Vec<String>,
    pub requirements: Vec<String>,
    pub duties: Vec<String>,
}

const UNIT_GROUPS_JSON: &str = include_str!("../data/noc_2016_unit_groups.json");

/// Immutable directory of NOC 2016 unit groups, loaded once at startup and
/// shared read-only across requests.
pub struct UnitGroupDirectory {
    groups: HashMap<String, UnitGroup>,
}

impl UnitGroupDirectory {
    /// Loads the dataset compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let groups: Vec<UnitGroup> = serde_json::from_str(UNIT_GROUPS_JSON)
            .context("bundled NOC unit group dataset is malformed")?;
        let directory = Self {
            groups: groups.into_iter().map(|g| (g.noc.clone(), g)).collect(),
        };
        anyhow::ensure!(
            !directory.is_empty(),
            "bundled NOC unit group dataset is empty"
        );
        Ok(directory)
    }

    /// Looks up a unit group by exact NOC code.
    pub fn find(&self, noc: &str) -> Option<&UnitGroup> {
        self.groups.get(noc)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
