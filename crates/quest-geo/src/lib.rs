/// Quest Geo Library
///
/// Small, dependency-free geometry used by the game:
/// - latitude offsets for placing points just inside/outside a radius
/// - position record construction
/// - the fixed play-area polygon and its containment test
///
/// Proximity search itself is not here; it is answered by the storage
/// backend (see quest-db).

pub mod area;
pub mod offset;
pub mod position;

pub use area::{Polygon, game_area};
pub use offset::{METERS_PER_DEGREE_LAT, latitude_inside, latitude_outside};
pub use position::build_position;
#[cfg(any(test, feature = "test-support"))]
pub use position::build_position_at;
