use crate::calc::normalize::NormalizedReservation;
use serde::Serialize;

/// Same-day turnover markers. The renderer splits the shared cell in half.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConflictFlags {
    /// Another stay in the facility checks out on this one's check-in date.
    pub has_check_in_conflict: bool,
    /// Another stay in the facility checks in on this one's check-out date.
    pub has_check_out_conflict: bool,
}

/// Flags for every stay of one facility group, index-aligned with `group`.
///
/// Runs over the whole group, not per displayed week, so a turnover falling on
/// a week boundary is still detected.
pub fn detect_conflicts(group: &[NormalizedReservation]) -> Vec<ConflictFlags> {
    let mut flags = vec![ConflictFlags::default(); group.len()];
    for (i, a) in group.iter().enumerate() {
        for b in group {
            if a.id == b.id {
                continue;
            }
            if a.check_in == b.check_out {
                flags[i].has_check_in_conflict = true;
            }
            if a.check_out == b.check_in {
                flags[i].has_check_out_conflict = true;
            }
        }
    }

    let turnovers = flags.iter().filter(|f| f.has_check_in_conflict).count();
    tracing::debug!(stays = group.len(), turnovers, "detected turnover conflicts");
    flags
}
