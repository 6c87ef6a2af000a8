//! The building geometry model: rooms, entrances and floor transitions.
//!
//! These types describe the venue declaratively. The routing core only reads
//! them; nothing here is mutated during a route request.
//!
//! # Example
//!
//! ```
//! use route_types::{Building, Entrance, EntranceOrientation, Room, Transition};
//! use nalgebra::{Point3, Vector3};
//!
//! let building = Building::new()
//!     .with_room(
//!         Room::new(1, Point3::new(20.0, 2.0, 20.0), Vector3::new(30.0, 4.0, 20.0))
//!             .with_name("Main Stage")
//!             .with_entrance(Entrance::new(20.0, 10.0, 6.0, EntranceOrientation::Horizontal)),
//!     )
//!     .with_transition(Transition::new(
//!         [1, 2],
//!         Point3::new(35.0, 0.0, 10.0),
//!         Point3::new(45.0, 10.0, 10.0),
//!     ));
//!
//! assert_eq!(building.rooms_on(1).count(), 1);
//! assert_eq!(building.floors(), vec![1, 2]);
//! ```

use std::hash::{DefaultHasher, Hash, Hasher};

use atrium_spatial::PlanRect;
use nalgebra::{Point2, Point3, Vector3};

/// Which way an entrance opening runs along its wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntranceOrientation {
    /// The opening runs along world X; people pass through along Z.
    #[default]
    Horizontal,
    /// The opening runs along world Z; people pass through along X.
    Vertical,
}

/// A doorway cut into a room's wall.
///
/// The anchor `(x, z)` lies on the room boundary, on the side implied by the
/// orientation: a horizontal entrance sits on a wall of constant Z.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entrance {
    /// Anchor position along world X.
    pub x: f64,
    /// Anchor position along world Z.
    pub z: f64,
    /// Width of the opening.
    pub width: f64,
    /// Direction the opening runs.
    pub orientation: EntranceOrientation,
}

impl Entrance {
    /// Creates an entrance.
    #[must_use]
    pub const fn new(x: f64, z: f64, width: f64, orientation: EntranceOrientation) -> Self {
        Self {
            x,
            z,
            width,
            orientation,
        }
    }

    /// Returns the anchor on the floor plane.
    #[must_use]
    pub fn anchor(&self) -> Point2<f64> {
        Point2::new(self.x, self.z)
    }

    /// Returns the walkable corridor punched through the wall at this entrance.
    ///
    /// Along the opening the corridor spans `width / 2 + slack` either side of
    /// the anchor; across the wall it reaches `reach` either side.
    ///
    /// # Example
    ///
    /// ```
    /// use route_types::{Entrance, EntranceOrientation};
    ///
    /// let door = Entrance::new(20.0, 10.0, 6.0, EntranceOrientation::Horizontal);
    /// let corridor = door.corridor(1.0, 8.0);
    /// assert_eq!((corridor.min.x, corridor.max.x), (16.0, 24.0));
    /// assert_eq!((corridor.min.y, corridor.max.y), (2.0, 18.0));
    /// ```
    #[must_use]
    pub fn corridor(&self, slack: f64, reach: f64) -> PlanRect {
        let along = self.width / 2.0 + slack;
        let (half_x, half_z) = match self.orientation {
            EntranceOrientation::Horizontal => (along, reach),
            EntranceOrientation::Vertical => (reach, along),
        };
        PlanRect::new(
            Point2::new(self.x - half_x, self.z - half_z),
            Point2::new(self.x + half_x, self.z + half_z),
        )
    }
}

/// An axis-aligned rectangular room on one floor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    /// Floor index the room is on.
    pub floor: i32,
    /// Display name; opaque to routing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Room type tag; opaque to routing.
    #[cfg_attr(feature = "serde", serde(default, rename = "type"))]
    pub kind: String,
    /// Center of the room in world coordinates.
    pub position: Point3<f64>,
    /// Extents along X (width), Y (height) and Z (depth).
    pub size: Vector3<f64>,
    /// Optional doorway.
    #[cfg_attr(feature = "serde", serde(default))]
    pub entrance: Option<Entrance>,
}

impl Room {
    /// Creates a room without an entrance.
    #[must_use]
    pub const fn new(floor: i32, position: Point3<f64>, size: Vector3<f64>) -> Self {
        Self {
            floor,
            name: String::new(),
            kind: String::new(),
            position,
            size,
            entrance: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the type tag.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Sets the entrance.
    #[must_use]
    pub const fn with_entrance(mut self, entrance: Entrance) -> Self {
        self.entrance = Some(entrance);
        self
    }

    /// Returns the plan-view footprint (X/Z bounds).
    #[must_use]
    pub fn footprint(&self) -> PlanRect {
        PlanRect::from_center_size(
            Point2::new(self.position.x, self.position.z),
            self.size.x,
            self.size.z,
        )
    }

    /// Inclusive plan-view containment, ignoring height.
    #[must_use]
    pub fn contains_plan(&self, point: &Point3<f64>) -> bool {
        self.footprint().contains_world(point)
    }

    /// Returns `true` if every size component is positive and finite.
    #[must_use]
    pub fn has_valid_size(&self) -> bool {
        self.size.iter().all(|s| s.is_finite() && *s > 0.0)
    }
}

/// An escalator or stair linking two floors at fixed landings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    /// Identifier; opaque to routing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: String,
    /// Connected floors as `[lower, upper]`.
    pub levels: [i32; 2],
    /// Landing on the lower floor.
    pub bottom: Point3<f64>,
    /// Landing on the upper floor.
    pub top: Point3<f64>,
}

impl Transition {
    /// Creates a transition between `levels[0]` (at `bottom`) and `levels[1]` (at `top`).
    #[must_use]
    pub const fn new(levels: [i32; 2], bottom: Point3<f64>, top: Point3<f64>) -> Self {
        Self {
            id: String::new(),
            levels,
            bottom,
            top,
        }
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Returns `true` if the transition links floors `a` and `b`, in either order.
    #[must_use]
    pub fn connects(&self, a: i32, b: i32) -> bool {
        let [low, high] = self.levels;
        (low == a && high == b) || (low == b && high == a)
    }

    /// Returns the landing on `floor`, preferring the lower landing.
    ///
    /// # Example
    ///
    /// ```
    /// use route_types::Transition;
    /// use nalgebra::Point3;
    ///
    /// let t = Transition::new(
    ///     [1, 2],
    ///     Point3::new(35.0, 0.0, 10.0),
    ///     Point3::new(45.0, 10.0, 10.0),
    /// );
    /// assert_eq!(t.landing_on(2), Some(Point3::new(45.0, 10.0, 10.0)));
    /// assert_eq!(t.landing_on(3), None);
    /// ```
    #[must_use]
    pub fn landing_on(&self, floor: i32) -> Option<Point3<f64>> {
        if self.levels[0] == floor {
            Some(self.bottom)
        } else if self.levels[1] == floor {
            Some(self.top)
        } else {
            None
        }
    }

    /// Returns every landing on `floor` (both, if the two levels coincide).
    pub fn landings_on(&self, floor: i32) -> impl Iterator<Item = Point3<f64>> + '_ {
        [(self.levels[0], self.bottom), (self.levels[1], self.top)]
            .into_iter()
            .filter(move |(level, _)| *level == floor)
            .map(|(_, landing)| landing)
    }

    /// Returns the `(entry, exit)` landings for riding from `from` to `to`.
    #[must_use]
    pub fn ride(&self, from: i32, to: i32) -> Option<(Point3<f64>, Point3<f64>)> {
        if !self.connects(from, to) {
            return None;
        }
        if self.levels[0] == from {
            Some((self.bottom, self.top))
        } else {
            Some((self.top, self.bottom))
        }
    }
}

/// A complete venue: every room and every floor transition.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Building {
    /// All rooms, in rasterization order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rooms: Vec<Room>,
    /// All floor transitions.
    #[cfg_attr(feature = "serde", serde(default, alias = "escalators"))]
    pub transitions: Vec<Transition>,
}

impl Building {
    /// Creates an empty building.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rooms: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Creates a building from parts.
    #[must_use]
    pub const fn from_parts(rooms: Vec<Room>, transitions: Vec<Transition>) -> Self {
        Self { rooms, transitions }
    }

    /// Adds a room.
    #[must_use]
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a transition.
    #[must_use]
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Iterates the rooms on `floor`, in listed order.
    pub fn rooms_on(&self, floor: i32) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.iter().filter(move |r| r.floor == floor)
    }

    /// Iterates the transitions with a landing on `floor`.
    pub fn transitions_touching(&self, floor: i32) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions.iter().filter(move |t| t.levels.contains(&floor))
    }

    /// Iterates the transitions linking `a` and `b`.
    pub fn transitions_between(&self, a: i32, b: i32) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions.iter().filter(move |t| t.connects(a, b))
    }

    /// Returns the first room on `floor` whose footprint contains `point`.
    #[must_use]
    pub fn room_at(&self, point: &Point3<f64>, floor: i32) -> Option<&Room> {
        self.rooms_on(floor).find(|r| r.contains_plan(point))
    }

    /// Returns every floor mentioned by a room or transition, sorted and unique.
    #[must_use]
    pub fn floors(&self) -> Vec<i32> {
        let mut floors: Vec<i32> = self
            .rooms
            .iter()
            .map(|r| r.floor)
            .chain(self.transitions.iter().flat_map(|t| t.levels))
            .collect();
        floors.sort_unstable();
        floors.dedup();
        floors
    }

    /// Content hash over every geometric field.
    ///
    /// Equal buildings hash equal within a process; any change to a room or
    /// transition that routing reads changes the fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.rooms.len().hash(&mut hasher);
        for room in &self.rooms {
            room.floor.hash(&mut hasher);
            hash_floats(&mut hasher, room.position.iter());
            hash_floats(&mut hasher, room.size.iter());
            match &room.entrance {
                Some(e) => {
                    1u8.hash(&mut hasher);
                    hash_floats(&mut hasher, [e.x, e.z, e.width].iter());
                    e.orientation.hash(&mut hasher);
                }
                None => 0u8.hash(&mut hasher),
            }
        }
        self.transitions.len().hash(&mut hasher);
        for t in &self.transitions {
            t.levels.hash(&mut hasher);
            hash_floats(&mut hasher, t.bottom.iter());
            hash_floats(&mut hasher, t.top.iter());
        }
        hasher.finish()
    }
}

fn hash_floats<'a>(hasher: &mut DefaultHasher, values: impl Iterator<Item = &'a f64>) {
    for v in values {
        v.to_bits().hash(hasher);
    }
}
