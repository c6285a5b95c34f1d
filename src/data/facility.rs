use crate::data::persistence::Persistable;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A bookable unit (room type). `name` is the key reservations refer to.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Facility {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_group: Option<String>,
}

impl Facility {
    pub fn new(id: u64, name: &str, group: Option<&str>) -> Self {
        Facility {
            id,
            name: name.to_string(),
            facility_group: group.map(str::to_string),
        }
    }

    /// `"[group] name"` when the facility belongs to a group.
    pub fn display_name(&self) -> String {
        match self.group() {
            Some(group) => format!("[{}] {}", group, self.name),
            None => self.name.clone(),
        }
    }

    fn group(&self) -> Option<&str> {
        self.facility_group
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }
}

/// Grouped facilities first (by group, then name), ungrouped ones after by name.
pub fn display_order(a: &Facility, b: &Facility) -> Ordering {
    match (a.group(), b.group()) {
        (Some(ga), Some(gb)) => ga.cmp(gb).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    }
}

#[derive(Serialize, Deserialize, Default, Debug)]
pub struct FacilityData {
    pub facilities: Vec<Facility>,
}

impl Persistable for FacilityData {
    fn filename() -> &'static str {
        "facilities.yaml"
    }
}

impl FacilityData {
    pub fn add(&mut self, facility: Facility) {
        self.facilities.push(facility);
    }

    pub fn sorted(&self) -> Vec<&Facility> {
        let mut sorted: Vec<&Facility> = self.facilities.iter().collect();
        sorted.sort_by(|a, b| display_order(a, b));
        sorted
    }
}
