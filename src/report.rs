// Plain-text rendering of planner results for the CLI
use wayfind_core::{Location, Route};
use wayfind_planner::{Planner, RouteOutcome, TripPlan};

/// Unit appended to every printed distance.
pub const DISTANCE_UNIT: &str = "mi";

fn categories(location: &Location) -> String {
    let tags: Vec<&str> = location.categories.iter().map(String::as_str).collect();
    format!("[{}]", tags.join(", "))
}

pub fn render_locations(locations: &[Location]) -> String {
    locations
        .iter()
        .map(|location| {
            format!(
                "Destination ID: {}\nName: {}\nDescription: {}\nCategories: {}\n\n",
                location.id,
                location.name,
                location.description,
                categories(location)
            )
        })
        .collect()
}

/// One line per vertex listing its connections.
pub fn render_graph(planner: &Planner) -> String {
    let unknown = planner.config().unknown_name.clone();
    planner.with_graph(|graph| {
        let name_of = |id: &str| graph.location(id).map(|l| l.name.as_str()).unwrap_or(&unknown);
        let mut out = String::new();
        for (id, edges) in graph.adjacency() {
            out.push_str(&format!("{} ({}) is connected to:", id, name_of(id.as_str())));
            for edge in edges {
                out.push_str(&format!(
                    " {} ({}) [distance: {} {}]",
                    edge.to,
                    name_of(edge.to.as_str()),
                    edge.weight,
                    DISTANCE_UNIT
                ));
            }
            out.push('\n');
        }
        out
    })
}

pub fn render_filter(tag: &str, locations: &[Location]) -> String {
    if locations.is_empty() {
        return format!("No destinations tagged '{}'\n", tag);
    }
    let names: Vec<String> = locations.iter().map(ToString::to_string).collect();
    format!("Filtered destinations: [{}]\n", names.join(", "))
}

pub fn render_route(outcome: &RouteOutcome) -> String {
    match outcome {
        RouteOutcome::Found(route) => {
            let (from, to) = match (route.path.first(), route.path.last()) {
                (Some(from), Some(to)) => (from, to),
                _ => return String::new(),
            };
            let ids: Vec<&str> = route.path.iter().map(|id| id.as_str()).collect();
            format!(
                "Shortest path from {} to {}:\nDistance: {} {}\nPath: [{}]\n",
                from,
                to,
                route.distance,
                DISTANCE_UNIT,
                ids.join(", ")
            )
        }
        RouteOutcome::NoPath { from, to } => format!("No path found between {} and {}\n", from, to),
    }
}

fn render_leg(planner: &Planner, route: &Route) -> String {
    route
        .path
        .iter()
        .map(|id| format!("- {}\n", planner.location_name(id.as_str())))
        .collect()
}

pub fn render_trip(planner: &Planner, plan: &TripPlan) -> String {
    let mut out = String::from("Your Trip Plan:\n");
    for leg in &plan.legs {
        out.push_str(&format!(
            "From {} to {} (Distance: {} {})\nPath:\n",
            planner.location_name(leg.from.as_str()),
            planner.location_name(leg.to.as_str()),
            leg.route.distance,
            DISTANCE_UNIT
        ));
        out.push_str(&render_leg(planner, &leg.route));
    }
    match &plan.failed_leg {
        Some(failed) => out.push_str(&format!(
            "No path found between {} and {}\n",
            failed.from, failed.to
        )),
        None => out.push_str(&format!(
            "Total distance: {} {}\n",
            plan.total_distance(),
            DISTANCE_UNIT
        )),
    }
    out
}
