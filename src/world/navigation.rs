//! Navigable surface queries.
//!
//! The spawn director never assumes anything about the level: it asks a
//! `NavigationSurface` to project candidate points onto walkable ground.
//! Hosts with a real navmesh can swap in their own implementation through
//! the `Navigation` resource.

use bevy::prelude::*;

use super::data::ArenaDefinition;

/// Keeps projected points strictly outside obstacles.
const EDGE_MARGIN: f32 = 1.0;

/// Projection of points onto walkable terrain.
pub trait NavigationSurface: Send + Sync {
    /// Nearest navigable point to `point` within the box of half size
    /// `extent` around it, or `None` if there is none.
    fn project(&self, point: Vec3, extent: Vec3) -> Option<Vec3>;
}

/// The navigation collaborator used by the simulation.
#[derive(Resource)]
pub struct Navigation(pub Box<dyn NavigationSurface>);

impl Default for Navigation {
    fn default() -> Self {
        Self(Box::new(ArenaNavigation::from(&ArenaDefinition::default())))
    }
}

impl Navigation {
    pub fn project(&self, point: Vec3, extent: Vec3) -> Option<Vec3> {
        self.0.project(point, extent)
    }
}

/// Circular area nothing can stand in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blocker {
    pub center: Vec2,
    pub radius: f32,
}

impl Blocker {
    fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) < self.radius
    }
}

/// Flat rectangular floor with circular obstacles.
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaNavigation {
    pub half_extents: Vec2,
    pub floor_height: f32,
    pub blockers: Vec<Blocker>,
}

impl From<&ArenaDefinition> for ArenaNavigation {
    fn from(arena: &ArenaDefinition) -> Self {
        Self {
            half_extents: Vec2::new(arena.half_extents.0, arena.half_extents.1),
            floor_height: arena.floor_height,
            blockers: arena
                .obstacles
                .iter()
                .map(|o| Blocker {
                    center: Vec2::new(o.center.0, o.center.1),
                    radius: o.radius,
                })
                .collect(),
        }
    }
}

impl ArenaNavigation {
    fn in_bounds(&self, point: Vec2) -> bool {
        point.x.abs() <= self.half_extents.x && point.y.abs() <= self.half_extents.y
    }
}

impl NavigationSurface for ArenaNavigation {
    fn project(&self, point: Vec3, extent: Vec3) -> Option<Vec3> {
        if (point.y - self.floor_height).abs() > extent.y {
            return None;
        }

        let flat = Vec2::new(point.x, point.z);
        let mut candidate = flat.clamp(-self.half_extents, self.half_extents);

        // Push out of the first obstacle we land in
        if let Some(blocker) = self.blockers.iter().find(|b| b.contains(candidate)) {
            let away = (candidate - blocker.center).try_normalize().unwrap_or(Vec2::X);
            candidate = blocker.center + away * (blocker.radius + EDGE_MARGIN);
        }

        let walkable =
            self.in_bounds(candidate) && !self.blockers.iter().any(|b| b.contains(candidate));
        let offset = (candidate - flat).abs();
        if !walkable || offset.x > extent.x || offset.y > extent.z {
            return None;
        }

        Some(Vec3::new(candidate.x, self.floor_height, candidate.y))
    }
}
