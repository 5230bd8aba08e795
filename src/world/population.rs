//! Population registry: people anchored to grid cells.

use glam::Vec3;

use crate::error::{WorldError, WorldResult};
use crate::world::{HexCoord, ModelType};

/// Default registry capacity.
pub const PEOPLE_MAX: usize = 100;

/// Render offset of a person relative to its tile's centre.
pub const PERSON_OFFSET: Vec3 = Vec3::new(0.0, 0.25, 0.0);

/// Position of a person in the registry. Stable, since people are never
/// removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId(pub usize);

/// A mobile agent standing on a grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Person {
    /// Visual identity.
    pub model_type: ModelType,
    /// Cell the person stands on.
    pub coord: HexCoord,
    /// Sub-tile offset used when drawing.
    pub offset: Vec3,
}

impl Person {
    /// Create a person at `coord` with the standard offset.
    #[must_use]
    pub const fn new(model_type: ModelType, coord: HexCoord) -> Self {
        Self {
            model_type,
            coord,
            offset: PERSON_OFFSET,
        }
    }

    /// Move instantly to `coord`.
    ///
    /// The destination is not checked: it may be empty or even outside the
    /// grid.
    pub fn teleport(&mut self, coord: HexCoord) {
        self.coord = coord;
    }
}

/// Fixed-capacity, append-only list of people.
#[derive(Debug, Clone)]
pub struct Population {
    people: Vec<Person>,
    capacity: usize,
}

impl Population {
    /// Reserve room for `capacity` people up front.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Allocation`] if the storage cannot be reserved.
    pub fn with_capacity(capacity: usize) -> WorldResult<Self> {
        let mut people = Vec::new();
        people.try_reserve_exact(capacity)?;
        Ok(Self { people, capacity })
    }

    /// Maximum number of people.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of people.
    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Whether nobody has been added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Whether the registry has no free slot.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.people.len() >= self.capacity
    }

    /// Append a person at the tail.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PopulationFull`] when at capacity.
    pub fn push(&mut self, person: Person) -> WorldResult<PersonId> {
        if self.is_full() {
            return Err(WorldError::PopulationFull {
                capacity: self.capacity,
            });
        }
        let id = PersonId(self.people.len());
        self.people.push(person);
        Ok(id)
    }

    /// First person standing on `coord`, in insertion order.
    ///
    /// Later people on the same cell are not reachable through this lookup.
    #[must_use]
    pub fn find(&self, coord: HexCoord) -> Option<&Person> {
        self.people.iter().find(|p| p.coord == coord)
    }

    /// Mutable variant of [`Population::find`].
    #[must_use]
    pub fn find_mut(&mut self, coord: HexCoord) -> Option<&mut Person> {
        self.people.iter_mut().find(|p| p.coord == coord)
    }

    /// Person by id.
    #[must_use]
    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.people.get(id.0)
    }

    /// Mutable person by id.
    #[must_use]
    pub fn get_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.people.get_mut(id.0)
    }

    /// All people in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Person] {
        &self.people
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(q: i32, r: i32) -> Person {
        Person::new(ModelType::Agent, HexCoord::new(q, r))
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut population = Population::with_capacity(4).unwrap();
        assert_eq!(population.push(agent(0, 0)).unwrap(), PersonId(0));
        assert_eq!(population.push(agent(1, 0)).unwrap(), PersonId(1));
        assert_eq!(population.len(), 2);
        assert_eq!(population.get(PersonId(1)).unwrap().coord, HexCoord::new(1, 0));
    }

    #[test]
    fn test_push_rejects_when_full() {
        let mut population = Population::with_capacity(2).unwrap();
        population.push(agent(0, 0)).unwrap();
        population.push(agent(0, 1)).unwrap();
        assert!(population.is_full());
        assert_eq!(
            population.push(agent(0, 2)),
            Err(WorldError::PopulationFull { capacity: 2 })
        );
        assert_eq!(population.len(), 2);
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let mut population = Population::with_capacity(0).unwrap();
        assert!(population.push(agent(0, 0)).is_err());
        assert!(population.is_empty());
    }

    #[test]
    fn test_find_returns_first_match() {
        let mut population = Population::with_capacity(4).unwrap();
        population.push(agent(2, 3)).unwrap();
        population
            .push(Person::new(ModelType::House, HexCoord::new(2, 3)))
            .unwrap();
        assert_eq!(
            population.find(HexCoord::new(2, 3)).unwrap().model_type,
            ModelType::Agent
        );
        assert!(population.find(HexCoord::new(0, 0)).is_none());
    }

    #[test]
    fn test_new_person_has_standard_offset() {
        assert_eq!(agent(0, 0).offset, Vec3::new(0.0, 0.25, 0.0));
    }

    #[test]
    fn test_teleport_overwrites_coord() {
        let mut population = Population::with_capacity(1).unwrap();
        let id = population.push(agent(1, 1)).unwrap();
        population.get_mut(id).unwrap().teleport(HexCoord::new(40, -2));
        assert_eq!(population.get(id).unwrap().coord, HexCoord::new(40, -2));
        assert!(population.find(HexCoord::new(1, 1)).is_none());
    }
}
