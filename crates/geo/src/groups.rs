//! Per-fleet proximity aggregation.

use serde::{Deserialize, Serialize};

use crate::ranking::{rank_from, RankedAircraft};
use crate::record::Group;
use crate::validation::ensure_user_position;
use crate::{Coordinate, Result};

/// Ranking for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupResult {
    pub group_name: String,
    /// First entry of `members_ranked`, `null` when the group has no valid aircraft
    pub closest_aircraft: Option<RankedAircraft>,
    pub members_ranked: Vec<RankedAircraft>,
    /// Requested identifiers that had no usable position
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

impl GroupResult {
    pub(crate) fn new(group_name: impl Into<String>, members_ranked: Vec<RankedAircraft>) -> Self {
        Self {
            group_name: group_name.into(),
            closest_aircraft: members_ranked.first().cloned(),
            members_ranked,
            missing: Vec::new(),
        }
    }
}

/// Ranks every group independently, returning one result per group in input
/// order.
///
/// Aircraft appearing in several groups are ranked in each of them.
///
/// # Errors
/// Fails if the user position is missing or not finite.
///
/// # Example
/// ```
/// use skywatch_geo::{group_proximity, AircraftRecord, Group};
///
/// let groups = vec![
///     Group::new("Fleet A", vec![AircraftRecord::new("AAA100", 52.52, 13.405)]),
///     Group::new("Empty", vec![]),
/// ];
///
/// let results = group_proximity(50.1109, 8.6821, &groups).unwrap();
/// assert_eq!(results[0].closest_aircraft.as_ref().unwrap().callsign, "AAA100");
/// assert!(results[1].closest_aircraft.is_none());
/// ```
pub fn group_proximity(
    user_lat: impl Into<Option<f64>>,
    user_lon: impl Into<Option<f64>>,
    groups: &[Group],
) -> Result<Vec<GroupResult>> {
    let user = ensure_user_position(user_lat.into(), user_lon.into())?;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        Ok(groups.par_iter().map(|group| rank_group(&user, group)).collect())
    }

    #[cfg(not(feature = "parallel"))]
    {
        Ok(groups.iter().map(|group| rank_group(&user, group)).collect())
    }
}

#[inline]
fn rank_group(user: &Coordinate, group: &Group) -> GroupResult {
    let report = rank_from(user, group.resolved_aircraft());
    GroupResult::new(group.resolved_name(), report.ranked)
}
