//! Map-reachability checks over the environment snapshot.

use crate::context::EnvSnapshot;
use crate::state::{CityId, NationId, NO_NATION};
use game_routing::{Bfs, Graph};

/// Adjacency view with optional ownership gating.
///
/// When `allowed_owners` is set, a city is passable only if its owner is
/// in the list (wilderness included only if `NO_NATION` is listed). The
/// start city is always exempt, matching the routing crate's contract.
struct OwnedMap<'a> {
    allowed_owners: Option<&'a [NationId]>,
}

impl<'a> Graph<CityId, EnvSnapshot> for OwnedMap<'a> {
    fn neighbors(&self, city: CityId, env: &EnvSnapshot) -> Vec<CityId> {
        env.neighbors(city).to_vec()
    }

    fn passable(&self, city: CityId, env: &EnvSnapshot) -> bool {
        let Some(allowed) = self.allowed_owners else {
            return true;
        };
        let owner = env.owners.get(&city).copied().unwrap_or(NO_NATION);
        allowed.contains(&owner)
    }
}

/// Shortest march distance between two cities, or `None` when no route
/// survives the ownership filter.
pub fn route_distance(
    env: &EnvSnapshot,
    start: CityId,
    goal: CityId,
    allowed_owners: Option<&[NationId]>,
) -> Option<u32> {
    let map = OwnedMap { allowed_owners };
    Bfs::distance(&map, start, goal, env)
}
