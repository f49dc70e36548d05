use std::collections::HashMap;

use crate::state::{MonsterId, Position};

/// Read-only view of the level the projectile resolver travels through.
pub trait CaveOracle {
    /// Whether something can walk (or fly) into the grid.
    fn is_passable(&self, grid: Position) -> bool;

    /// Whether a projection can enter the grid.
    fn is_projectable(&self, grid: Position) -> bool;

    /// Monster standing on the grid, if any.
    fn monster_at(&self, grid: Position) -> Option<MonsterId>;
}

/// Terrain classes relevant to missile travel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    #[default]
    Floor,
    Wall,
    /// Passable rubble that still blocks projections.
    PassableRubble,
    /// Projectable but not passable (glass walls, chasms).
    Window,
}

impl TerrainKind {
    pub const fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor | TerrainKind::PassableRubble)
    }

    pub const fn is_projectable(self) -> bool {
        matches!(self, TerrainKind::Floor | TerrainKind::Window)
    }
}

/// A bounded rectangular level held in memory.
///
/// Grids default to floor; anything outside the bounds is wall.
#[derive(Clone, Debug, Default)]
pub struct GridCave {
    width: i32,
    height: i32,
    terrain: HashMap<Position, TerrainKind>,
    monsters: HashMap<Position, MonsterId>,
}

impl GridCave {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn contains(&self, grid: Position) -> bool {
        grid.x >= 0 && grid.y >= 0 && grid.x < self.width && grid.y < self.height
    }

    pub fn terrain(&self, grid: Position) -> TerrainKind {
        if !self.contains(grid) {
            return TerrainKind::Wall;
        }
        self.terrain.get(&grid).copied().unwrap_or_default()
    }

    pub fn set_terrain(&mut self, grid: Position, terrain: TerrainKind) -> &mut Self {
        self.terrain.insert(grid, terrain);
        self
    }

    pub fn place_monster(&mut self, grid: Position, id: MonsterId) -> &mut Self {
        self.monsters.insert(grid, id);
        self
    }

    pub fn remove_monster(&mut self, grid: Position) -> Option<MonsterId> {
        self.monsters.remove(&grid)
    }
}

impl CaveOracle for GridCave {
    fn is_passable(&self, grid: Position) -> bool {
        self.terrain(grid).is_passable()
    }

    fn is_projectable(&self, grid: Position) -> bool {
        self.terrain(grid).is_projectable()
    }

    fn monster_at(&self, grid: Position) -> Option<MonsterId> {
        self.monsters.get(&grid).copied()
    }
}
