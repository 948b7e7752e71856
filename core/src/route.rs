use serde::{Deserialize, Serialize};

use crate::geometry::Path;

/// Number of independent practice scenarios.
pub const ROUTE_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMode {
    #[default]
    Ideal,
    Test,
}

/// Index of one of the [`ROUTE_COUNT`] routes. Out of range values cannot be built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RouteIndex(usize);

impl RouteIndex {
    pub fn new(value: usize) -> Option<Self> {
        (value < ROUTE_COUNT).then_some(Self(value))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn all() -> impl Iterator<Item = RouteIndex> {
        (0..ROUTE_COUNT).map(RouteIndex)
    }
}

/// Ideal and attempt paths, both stored in normalized space.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub ideal: Path,
    pub attempt: Path,
}

impl Route {
    pub fn slot(&self, mode: PathMode) -> &Path {
        match mode {
            PathMode::Ideal => &self.ideal,
            PathMode::Test => &self.attempt,
        }
    }

    pub fn slot_mut(&mut self, mode: PathMode) -> &mut Path {
        match mode {
            PathMode::Ideal => &mut self.ideal,
            PathMode::Test => &mut self.attempt,
        }
    }
}

pub fn empty_routes() -> [Route; ROUTE_COUNT] {
    std::array::from_fn(|_| Route::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn route_index_is_bounded() {
        assert_eq!(RouteIndex::new(0).map(RouteIndex::get), Some(0));
        assert_eq!(RouteIndex::new(2).map(RouteIndex::get), Some(2));
        assert!(RouteIndex::new(ROUTE_COUNT).is_none());
        assert_eq!(RouteIndex::all().count(), ROUTE_COUNT);
    }

    #[test]
    fn slot_selects_by_mode() {
        let mut route = Route::default();
        route.slot_mut(PathMode::Test).push(Point::new(1.0, 1.0));
        assert!(route.ideal.is_empty());
        assert_eq!(route.slot(PathMode::Test).len(), 1);
    }
}
