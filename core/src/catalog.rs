use crate::route::{RouteIndex, ROUTE_COUNT};

/// Bundled map loaded on start. A missing file just leaves the upload hint up.
pub const DEFAULT_MAP_SRC: &str = "assets/map.png";

#[derive(Clone, Copy, Debug)]
pub struct RouteCatalogEntry {
    pub label: &'static str,
    /// Reference photo shown over or beside the map.
    pub reference_src: &'static str,
}

pub const ROUTE_CATALOG: [RouteCatalogEntry; ROUTE_COUNT] = [
    RouteCatalogEntry {
        label: "Route 1",
        reference_src: "assets/1.jpg",
    },
    RouteCatalogEntry {
        label: "Route 2",
        reference_src: "assets/2.jpg",
    },
    RouteCatalogEntry {
        label: "Route 3",
        reference_src: "assets/3.jpg",
    },
];

pub fn route_entry(route: RouteIndex) -> &'static RouteCatalogEntry {
    &ROUTE_CATALOG[route.get()]
}

/// Parses a `<select>` value back into a route.
pub fn route_by_value(value: &str) -> Option<RouteIndex> {
    value.trim().parse::<usize>().ok().and_then(RouteIndex::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_values_map_to_routes() {
        assert_eq!(route_by_value("2"), RouteIndex::new(2));
        assert_eq!(route_by_value(" 0 "), RouteIndex::new(0));
        assert_eq!(route_by_value("3"), None);
        assert_eq!(route_by_value("first"), None);
    }

    #[test]
    fn every_route_has_a_reference() {
        for route in RouteIndex::all() {
            assert!(route_entry(route).reference_src.starts_with("assets/"));
        }
    }
}
