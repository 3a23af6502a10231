//! Per-bus aggregate statistics.

use std::collections::HashSet;

use crate::catalogue::TransportCatalogue;
use crate::models::{traits::TransitDirectory, types::*};
use crate::spatial::queries::path_length;

impl TransportCatalogue {
    /// Statistics for the named bus, see [`bus_stat`]
    pub fn bus_stat(&self, name: &str) -> Result<Option<BusStat>> {
        bus_stat(self, name)
    }
}

/// Compute statistics for the named bus.
///
/// Returns `Ok(None)` when no such bus exists. A pair of consecutive stops
/// with no recorded road distance in either direction is an
/// [`TransitError::UnknownDistance`] error rather than a silent zero.
///
/// When the route has no geographic extent (a single stop, or every stop at
/// the same coordinates) the curvature is reported as `1.0`.
pub fn bus_stat<D>(directory: &D, name: &str) -> Result<Option<BusStat>>
where
    D: TransitDirectory + ?Sized,
{
    let Some(bus) = directory.find_bus(name) else {
        return Ok(None);
    };

    let route = bus
        .effective_route()
        .into_iter()
        .map(|id| {
            directory
                .stop(id)
                .ok_or_else(|| TransitError::InvalidData(format!("bus {name} references unknown stop {id}")))
        })
        .collect::<Result<Vec<_>>>()?;

    let unique_stop_count = route.iter().map(|stop| stop.id()).collect::<HashSet<_>>().len();

    let mut route_length = 0.0;
    for leg in route.windows(2) {
        let (from, to) = (leg[0], leg[1]);
        route_length += directory
            .distance(from.id(), to.id())
            .ok_or_else(|| TransitError::UnknownDistance {
                from: from.name().clone(),
                to: to.name().clone(),
            })?;
    }

    let geo_length = path_length(route.iter().map(|stop| stop.location()));
    let curvature = if geo_length > 0.0 {
        route_length / geo_length
    } else {
        1.0
    };

    Ok(Some(BusStat {
        name: bus.name().clone(),
        stop_count: route.len(),
        unique_stop_count,
        route_length,
        geo_length,
        curvature,
    }))
}
