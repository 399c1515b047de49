//! Sparse tile grid for entity positions, with a grid raycast
//!
//! Tracks who stands where so ranged attacks can walk a line of tiles
//! and resolve what body part the projectile enters.

use ahash::AHashMap;

use crate::core::types::EntityId;
use crate::ecs::world::World;
use crate::spatial::hit_location::determine_hit_location;

/// A raycast intersection: which entity, which part, on which tile
#[derive(Debug, Clone)]
pub struct RayHit {
    pub entity: EntityId,
    pub part_index: usize,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Default)]
pub struct SpatialGrid {
    cells: AHashMap<(i32, i32), Vec<EntityId>>,
}

impl SpatialGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: EntityId, x: i32, y: i32) {
        let cell = self.cells.entry((x, y)).or_default();
        if !cell.contains(&entity) {
            cell.push(entity);
        }
    }

    pub fn update_entity(&mut self, entity: EntityId, old_x: i32, old_y: i32, new_x: i32, new_y: i32) {
        if old_x != new_x || old_y != new_y {
            self.remove_entity(entity, old_x, old_y);
        }
        self.insert(entity, new_x, new_y);
    }

    pub fn remove_entity(&mut self, entity: EntityId, x: i32, y: i32) {
        if let Some(cell) = self.cells.get_mut(&(x, y)) {
            cell.retain(|&e| e != entity);
            if cell.is_empty() {
                self.cells.remove(&(x, y));
            }
        }
    }

    pub fn entities_at(&self, x: i32, y: i32) -> &[EntityId] {
        self.cells
            .get(&(x, y))
            .map(|cell| cell.as_slice())
            .unwrap_or(&[])
    }

    pub fn entities_in_radius(&self, x: i32, y: i32, radius: f32) -> Vec<EntityId> {
        let mut results = Vec::new();
        let r = radius.ceil() as i32;
        for dx in -r..=r {
            for dy in -r..=r {
                if (dx * dx + dy * dy) as f32 <= radius * radius {
                    results.extend_from_slice(self.entities_at(x + dx, y + dy));
                }
            }
        }
        results
    }

    pub fn are_adjacent(x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        (x1 - x2).abs() <= 1 && (y1 - y2).abs() <= 1
    }

    /// Walk the tile line from (x1, y1) to (x2, y2) and report every
    /// body-part intersection along it, in walk order
    ///
    /// Each occupied tile is tested with the hit locator using the
    /// entry-face offset (half a tile against the direction of travel).
    pub fn raycast(&self, world: &World, x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<RayHit> {
        let mut hits = Vec::new();

        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let x_inc = if x2 > x1 { 1 } else { -1 };
        let y_inc = if y2 > y1 { 1 } else { -1 };

        let mut x = x1;
        let mut y = y1;
        let mut n = 1 + dx + dy;
        let mut error = dx - dy;
        let dx = dx * 2;
        let dy = dy * 2;

        let hit_offset_x = -0.5 * x_inc as f32;
        let hit_offset_y = -0.5 * y_inc as f32;

        while n > 0 {
            for &entity in self.entities_at(x, y) {
                if let Some(anatomy) = world.anatomy(entity) {
                    if let Some(part_index) =
                        determine_hit_location(anatomy, hit_offset_x, hit_offset_y)
                    {
                        hits.push(RayHit {
                            entity,
                            part_index,
                            x,
                            y,
                        });
                    }
                }
            }

            if error > 0 {
                x += x_inc;
                error -= dy;
            } else if error < 0 {
                y += y_inc;
                error += dx;
            } else {
                // Diagonal step crosses both axes at once
                x += x_inc;
                y += y_inc;
                error += dx - dy;
                n -= 1;
            }
            n -= 1;
        }

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprints::catalog::human;
    use crate::core::types::TilePos;
    use crate::ecs::world::World;

    #[test]
    fn test_insert_and_move() {
        let mut grid = SpatialGrid::new();
        let entity = EntityId::new();

        grid.insert(entity, 2, 3);
        assert_eq!(grid.entities_at(2, 3), &[entity]);

        grid.update_entity(entity, 2, 3, 4, 4);
        assert!(grid.entities_at(2, 3).is_empty());
        assert_eq!(grid.entities_at(4, 4), &[entity]);
    }

    #[test]
    fn test_double_insert_is_single_entry() {
        let mut grid = SpatialGrid::new();
        let entity = EntityId::new();
        grid.insert(entity, 0, 0);
        grid.insert(entity, 0, 0);
        assert_eq!(grid.entities_at(0, 0).len(), 1);
    }

    #[test]
    fn test_radius_query() {
        let mut grid = SpatialGrid::new();
        let near = EntityId::new();
        let far = EntityId::new();
        grid.insert(near, 1, 0);
        grid.insert(far, 5, 5);

        let found = grid.entities_in_radius(0, 0, 2.0);
        assert!(found.contains(&near));
        assert!(!found.contains(&far));
    }

    #[test]
    fn test_adjacency() {
        assert!(SpatialGrid::are_adjacent(3, 3, 4, 4));
        assert!(SpatialGrid::are_adjacent(3, 3, 3, 3));
        assert!(!SpatialGrid::are_adjacent(3, 3, 5, 3));
    }

    /// Body wide enough that the tile entry-face offset lands inside it
    fn target_dummy() -> crate::blueprints::schema::BodyTemplate {
        use crate::anatomy::component::PhysiologyConfig;
        use crate::anatomy::part::PartKind;
        use crate::blueprints::schema::{BodyTemplate, PartBlueprint};

        let mut t = BodyTemplate::new("Dummy", PhysiologyConfig::default());
        t.add_part(
            PartBlueprint::new("Body", "ROOT", 50, PartKind::Generic).sized(1.2, 1.2, 0.5),
        );
        t
    }

    #[test]
    fn test_raycast_hits_in_walk_order() {
        let mut world = World::new();
        let mut grid = SpatialGrid::new();
        let template = target_dummy();
        let first = world.spawn("near", &template, TilePos::new(2, 0));
        let second = world.spawn("far", &template, TilePos::new(4, 0));
        grid.insert(first, 2, 0);
        grid.insert(second, 4, 0);

        let hits = grid.raycast(&world, 0, 0, 6, 0);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entity, first);
        assert_eq!(hits[1].entity, second);
        let anatomy = world.anatomy(first).unwrap();
        assert_eq!(anatomy.parts[hits[0].part_index].name, "Body");
    }

    #[test]
    fn test_raycast_respects_containment() {
        // A human torso (0.6 wide) does not reach the tile entry face,
        // so the ray passes straight through the tile
        let mut world = World::new();
        let mut grid = SpatialGrid::new();
        let entity = world.spawn("slim", &human(), TilePos::new(2, 0));
        grid.insert(entity, 2, 0);

        let hits = grid.raycast(&world, 0, 0, 6, 0);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_raycast_skips_empty_tiles() {
        let world = World::new();
        let grid = SpatialGrid::new();
        assert!(grid.raycast(&world, 0, 0, 10, 10).is_empty());
    }
}
