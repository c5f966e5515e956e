use meridian_core::{Coordinate, Location};

/// Greedy nearest-neighbour visiting order for `waypoints`, starting from
/// `start`. Returns indices into `waypoints`.
pub fn nearest_neighbour_order(start: &Coordinate, waypoints: &[Location]) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..waypoints.len()).collect();
    let mut order = Vec::with_capacity(waypoints.len());
    let mut current = *start;

    loop {
        let Some(position) = remaining
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let to_a = current.haversine_km(&waypoints[**a].coordinate);
                let to_b = current.haversine_km(&waypoints[**b].coordinate);
                to_a.total_cmp(&to_b)
            })
            .map(|(position, _)| position)
        else {
            break;
        };

        let index = remaining.remove(position);
        current = waypoints[index].coordinate;
        order.push(index);
    }

    order
}

/// Rebuilds the stop list with waypoints in `order`.
pub fn apply_order(locations: &[Location], order: &[usize]) -> Vec<Location> {
    let (Some(start), Some(end)) = (locations.first(), locations.last()) else {
        return Vec::new();
    };
    if locations.len() < 2 {
        return locations.to_vec();
    }

    let waypoints = &locations[1..locations.len() - 1];
    let mut ordered = Vec::with_capacity(locations.len());
    ordered.push(start.clone());
    ordered.extend(order.iter().filter_map(|&index| waypoints.get(index).cloned()));
    ordered.push(end.clone());
    ordered
}
