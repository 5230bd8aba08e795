//! World state: the composition root of the simulation.

use crate::error::{WorldError, WorldResult};
use crate::world::economy::update_production;
use crate::world::{
    Grid, HexCoord, ModelType, PEOPLE_MAX, Person, PersonId, Population, ProductionReport,
    Rotation, Tile, TileType, profile_for,
};

/// Returned by [`World::tile_info`] for coordinates outside the grid.
pub const INVALID_TILE_INFO: &str = "INVALID TILE";

/// Complete simulation state.
///
/// Owns the tile grid and the population registry. A single driver mutates
/// it: placement and queries during a frame, then one [`World::update`].
#[derive(Debug, Clone)]
pub struct World {
    /// Tile storage.
    grid: Grid,
    /// People on the grid.
    population: Population,
    /// Number of updates applied.
    tick: u64,
    /// Simulated seconds across all updates.
    elapsed: f64,
}

impl World {
    /// Create a world of `max_q * max_r` empty tiles with room for
    /// [`PEOPLE_MAX`] people.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Allocation`] if storage cannot be reserved.
    pub fn new(max_q: u16, max_r: u16) -> WorldResult<Self> {
        Self::with_people_capacity(max_q, max_r, PEOPLE_MAX)
    }

    /// Create a world with an explicit population capacity.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Allocation`] if storage cannot be reserved.
    pub fn with_people_capacity(max_q: u16, max_r: u16, people_max: usize) -> WorldResult<Self> {
        let grid = Grid::new(max_q, max_r)?;
        let population = Population::with_capacity(people_max)?;
        tracing::debug!(max_q, max_r, people_max, "world created");

        Ok(Self {
            grid,
            population,
            tick: 0,
            elapsed: 0.0,
        })
    }

    /// Release all storage owned by the world.
    pub fn destroy(self) {
        tracing::debug!(
            tiles = self.grid.len(),
            people = self.population.len(),
            "world destroyed"
        );
    }

    /// Extent along q.
    #[must_use]
    pub const fn max_q(&self) -> u16 {
        self.grid.max_q()
    }

    /// Extent along r.
    #[must_use]
    pub const fn max_r(&self) -> u16 {
        self.grid.max_r()
    }

    /// Number of updates applied so far.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds across all updates.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    /// The tile grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The population registry.
    #[must_use]
    pub const fn population(&self) -> &Population {
        &self.population
    }

    pub(crate) fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    pub(crate) fn set_clock(&mut self, tick: u64, elapsed: f64) {
        self.tick = tick;
        self.elapsed = elapsed;
    }

    /// All people in insertion order.
    #[must_use]
    pub fn people(&self) -> &[Person] {
        self.population.as_slice()
    }

    /// Every tile in flat-index order (`q * max_r + r`).
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        self.grid.tiles()
    }

    /// Tile at `coord`, or `None` (reported) if out of range.
    #[must_use]
    pub fn get_tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.grid.get(coord)
    }

    pub(crate) fn get_tile_mut(&mut self, coord: HexCoord) -> Option<&mut Tile> {
        self.grid.get_mut(coord)
    }

    /// Place a structure, replacing whatever occupied the cell.
    ///
    /// Type, rotation, model and every resource vector are overwritten from
    /// the type's profile; stock starts at zero.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] and changes nothing if `coord` is
    /// outside the grid.
    pub fn add_tile(
        &mut self,
        tile_type: TileType,
        rotation: Rotation,
        coord: HexCoord,
    ) -> WorldResult<()> {
        let Some(idx) = self.grid.index_of(coord) else {
            tracing::warn!(q = coord.q, r = coord.r, "invalid hex coordinates {coord}");
            return Err(WorldError::OutOfBounds {
                q: coord.q,
                r: coord.r,
            });
        };

        let profile = profile_for(tile_type);
        self.grid.tiles_mut()[idx] = Tile {
            tile_type,
            model_type: tile_type.model(),
            rotation,
            production: profile.production,
            demand: profile.demand,
            supply: Tile::EMPTY.supply,
            supply_max: profile.supply_max,
        };
        tracing::debug!(tile_type = tile_type.name(), %coord, "tile placed");
        Ok(())
    }

    /// Add a person standing on `coord`.
    ///
    /// # Errors
    ///
    /// Nothing changes and an error is returned if `coord` is outside the
    /// grid ([`WorldError::OutOfBounds`]), the tile there is empty
    /// ([`WorldError::EmptyTile`]), or the registry is full
    /// ([`WorldError::PopulationFull`]).
    pub fn add_person(&mut self, model_type: ModelType, coord: HexCoord) -> WorldResult<PersonId> {
        let Some(idx) = self.grid.index_of(coord) else {
            tracing::warn!(q = coord.q, r = coord.r, "cannot add person outside the grid at {coord}");
            return Err(WorldError::OutOfBounds {
                q: coord.q,
                r: coord.r,
            });
        };

        if self.grid.tiles()[idx].is_empty() {
            tracing::warn!(q = coord.q, r = coord.r, "trying to add person on empty spot {coord}");
            return Err(WorldError::EmptyTile {
                q: coord.q,
                r: coord.r,
            });
        }

        self.population
            .push(Person::new(model_type, coord))
            .inspect_err(|err| tracing::warn!("{err}"))
    }

    /// First person standing on `coord`.
    ///
    /// Out-of-range coordinates are reported and yield `None`.
    #[must_use]
    pub fn get_person(&self, coord: HexCoord) -> Option<&Person> {
        if !self.check_person_coord(coord) {
            return None;
        }
        self.population.find(coord)
    }

    /// Mutable variant of [`World::get_person`], used to relocate someone
    /// with [`Person::teleport`].
    #[must_use]
    pub fn get_person_mut(&mut self, coord: HexCoord) -> Option<&mut Person> {
        if !self.check_person_coord(coord) {
            return None;
        }
        self.population.find_mut(coord)
    }

    /// Person by registry id.
    #[must_use]
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.population.get(id)
    }

    /// Mutable person by registry id.
    #[must_use]
    pub fn person_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.population.get_mut(id)
    }

    fn check_person_coord(&self, coord: HexCoord) -> bool {
        let valid = self.grid.in_bounds(coord);
        if !valid {
            tracing::error!(q = coord.q, r = coord.r, "invalid person lookup {coord}");
        }
        valid
    }

    /// Diagnostic text for a tile: its coordinate, then each good's stock.
    ///
    /// ```text
    /// Tile: 2/3
    /// 0.000000,12.500000,
    /// ```
    ///
    /// Returns [`INVALID_TILE_INFO`] if `coord` is outside the grid.
    #[must_use]
    pub fn tile_info(&self, coord: HexCoord) -> String {
        let Some(tile) = self.grid.get(coord) else {
            return INVALID_TILE_INFO.to_string();
        };
        let supplies: String = tile.supply.0.iter().map(|s| format!("{s:.6},")).collect();
        format!("Tile: {coord}\n{supplies}")
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Every occupied tile is ticked once, in flat-index order. The tick
    /// counter always advances; a non-finite `dt` is kept out of
    /// [`World::elapsed_seconds`] so the clock stays serializable.
    pub fn update(&mut self, dt: f32) -> ProductionReport {
        let report = update_production(&mut self.grid, dt);
        self.tick += 1;
        if dt.is_finite() {
            self.elapsed += f64::from(dt);
        } else {
            tracing::warn!(tick = self.tick, "non-finite dt {dt} not added to the clock");
        }
        tracing::trace!(
            tick = self.tick,
            worked = report.worked,
            stalled = report.stalled,
            "world updated"
        );
        report
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::world::Good;
    use std::io;
    use std::sync::{Arc, Mutex, PoisonError};

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct LogCapture(Arc<Mutex<Vec<u8>>>);

    impl LogCapture {
        fn contents(&self) -> String {
            let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl io::Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
        type Writer = LogCapture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn world_with_farm() -> World {
        let mut world = World::new(7, 7).unwrap();
        world
            .add_tile(TileType::Farm, Rotation::new(0), HexCoord::new(2, 3))
            .unwrap();
        world
    }

    #[test]
    fn test_new_world_is_empty() {
        let world = World::new(7, 7).unwrap();
        assert_eq!(world.max_q(), 7);
        assert_eq!(world.max_r(), 7);
        assert_eq!(world.grid().len(), 49);
        assert!(world.people().is_empty());
        assert_eq!(world.population().capacity(), PEOPLE_MAX);
        assert!(world.grid().tiles().iter().all(Tile::is_empty));
    }

    #[test]
    fn test_add_tile_applies_profile() {
        let world = world_with_farm();
        let tile = world.get_tile(HexCoord::new(2, 3)).unwrap();
        assert_eq!(tile.tile_type, TileType::Farm);
        assert_eq!(tile.model_type, ModelType::Farm);
        assert_eq!(tile.production[Good::Wheat], 1.0);
        assert_eq!(tile.supply_max[Good::Wheat], 100.0);
        assert_eq!(tile.supply[Good::Wheat], 0.0);
    }

    #[test]
    fn test_add_tile_overwrites_previous_occupant() {
        let mut world = world_with_farm();
        world.update(30.0);
        world
            .add_tile(TileType::Forest, Rotation::new(4), HexCoord::new(2, 3))
            .unwrap();

        let tile = world.get_tile(HexCoord::new(2, 3)).unwrap();
        assert_eq!(tile.tile_type, TileType::Forest);
        assert_eq!(tile.rotation.step(), 4);
        assert_eq!(tile.supply[Good::Wheat], 0.0, "old stock must not survive");
        assert_eq!(tile.supply_max[Good::Wheat], 0.0);
        assert_eq!(tile.production[Good::Wood], 1.0);
    }

    #[test]
    fn test_add_tile_out_of_bounds_is_rejected() {
        let mut world = World::new(7, 7).unwrap();
        let err = world
            .add_tile(TileType::Farm, Rotation::new(0), HexCoord::new(7, 0))
            .unwrap_err();
        assert_eq!(err, WorldError::OutOfBounds { q: 7, r: 0 });
        assert!(world.grid().tiles().iter().all(Tile::is_empty));
    }

    #[test]
    fn test_market_gets_zero_profile_but_own_model() {
        let mut world = World::new(3, 3).unwrap();
        world
            .add_tile(TileType::Market, Rotation::new(0), HexCoord::new(1, 1))
            .unwrap();
        let tile = world.get_tile(HexCoord::new(1, 1)).unwrap();
        assert_eq!(tile.tile_type, TileType::Market);
        assert_eq!(tile.model_type, ModelType::Market);
        assert!(tile.production.is_zero() && tile.supply_max.is_zero());
    }

    #[test]
    fn test_update_advances_clock() {
        let mut world = world_with_farm();
        let report = world.update(0.5);
        assert_eq!(report, ProductionReport { worked: 1, stalled: 0 });
        world.update(0.25);
        assert_eq!(world.tick_count(), 2);
        assert!((world.elapsed_seconds() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_add_person_on_occupied_tile() {
        let mut world = world_with_farm();
        let id = world.add_person(ModelType::Agent, HexCoord::new(2, 3)).unwrap();
        assert_eq!(id, PersonId(0));
        let person = world.get_person(HexCoord::new(2, 3)).unwrap();
        assert_eq!(person.model_type, ModelType::Agent);
    }

    #[test]
    fn test_add_person_on_empty_tile_is_rejected() {
        let mut world = world_with_farm();
        assert_eq!(
            world.add_person(ModelType::Agent, HexCoord::new(0, 0)),
            Err(WorldError::EmptyTile { q: 0, r: 0 })
        );
        assert!(world.get_person(HexCoord::new(0, 0)).is_none());
        assert!(world.people().is_empty());
    }

    #[test]
    fn test_add_person_out_of_bounds_is_rejected() {
        let mut world = world_with_farm();
        assert_eq!(
            world.add_person(ModelType::Agent, HexCoord::new(-1, 3)),
            Err(WorldError::OutOfBounds { q: -1, r: 3 })
        );
        assert!(world.people().is_empty());
    }

    #[test]
    fn test_add_person_respects_capacity() {
        let mut world = World::with_people_capacity(3, 3, 1).unwrap();
        world
            .add_tile(TileType::Grass, Rotation::new(0), HexCoord::new(0, 0))
            .unwrap();
        world.add_person(ModelType::Agent, HexCoord::new(0, 0)).unwrap();
        assert_eq!(
            world.add_person(ModelType::Agent, HexCoord::new(0, 0)),
            Err(WorldError::PopulationFull { capacity: 1 })
        );
        assert_eq!(world.people().len(), 1);
    }

    #[test]
    fn test_relocation_is_unchecked() {
        let mut world = world_with_farm();
        world.add_person(ModelType::Agent, HexCoord::new(2, 3)).unwrap();
        world
            .get_person_mut(HexCoord::new(2, 3))
            .unwrap()
            .teleport(HexCoord::new(0, 0));

        // Destination is an empty tile; the move still happens.
        assert!(world.get_person(HexCoord::new(2, 3)).is_none());
        assert_eq!(world.person(PersonId(0)).unwrap().coord, HexCoord::new(0, 0));
        assert!(world.get_person(HexCoord::new(0, 0)).is_some());
    }

    #[test]
    fn test_person_mut_relocates_by_id() {
        let mut world = world_with_farm();
        world
            .add_tile(TileType::Grass, Rotation::new(0), HexCoord::new(5, 5))
            .unwrap();
        world.add_person(ModelType::Agent, HexCoord::new(2, 3)).unwrap();
        let second = world.add_person(ModelType::Agent, HexCoord::new(2, 3)).unwrap();

        world.person_mut(second).unwrap().teleport(HexCoord::new(5, 5));
        assert_eq!(world.get_person(HexCoord::new(2, 3)).unwrap().coord, HexCoord::new(2, 3));
        assert_eq!(world.get_person(HexCoord::new(5, 5)), world.person(second));
        assert!(world.person_mut(PersonId(7)).is_none());
    }

    #[test]
    fn test_infinite_dt_fills_farm_and_keeps_clock_finite() {
        let mut world = world_with_farm();
        world.update(0.5);
        let report = world.update(f32::INFINITY);

        assert_eq!(report, ProductionReport { worked: 1, stalled: 0 });
        assert_eq!(world.get_tile(HexCoord::new(2, 3)).unwrap().supply[Good::Wheat], 100.0);
        assert_eq!(world.tick_count(), 2);
        assert_eq!(world.elapsed_seconds(), 0.5);

        world.update(f32::NAN);
        assert_eq!(world.tick_count(), 3);
        assert_eq!(world.elapsed_seconds(), 0.5);
        assert_eq!(world.get_tile(HexCoord::new(2, 3)).unwrap().supply[Good::Wheat], 100.0);
    }

    #[test]
    fn test_rejected_person_is_reported_once() {
        let mut world = world_with_farm();
        let log = LogCapture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert!(world.add_person(ModelType::Agent, HexCoord::new(-4, 9)).is_err());
        });

        let text = log.contents();
        assert_eq!(text.lines().count(), 1, "{text}");
        assert!(text.contains("cannot add person outside the grid"));
    }

    #[test]
    fn test_tiles_view_matches_grid() {
        let world = world_with_farm();
        assert_eq!(world.tiles().len(), 49);
        assert_eq!(world.tiles()[2 * 7 + 3].tile_type, TileType::Farm);
        assert_eq!(world.tiles(), world.grid().tiles());
    }

    #[test]
    fn test_get_person_out_of_bounds() {
        let world = world_with_farm();
        assert!(world.get_person(HexCoord::new(99, 0)).is_none());
    }

    #[test]
    fn test_tile_info_format() {
        let mut world = world_with_farm();
        world.update(12.5);
        assert_eq!(
            world.tile_info(HexCoord::new(2, 3)),
            "Tile: 2/3\n0.000000,12.500000,"
        );
    }

    #[test]
    fn test_tile_info_invalid() {
        let world = world_with_farm();
        assert_eq!(world.tile_info(HexCoord::new(-1, 0)), INVALID_TILE_INFO);
        assert_eq!(world.tile_info(HexCoord::new(0, 7)), "INVALID TILE");
    }

    #[test]
    fn test_destroy_consumes_world() {
        let world = world_with_farm();
        world.destroy();
    }
}
