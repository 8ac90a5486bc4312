use std::sync::LazyLock;

use quest_types::GeoPoint;
use quest_types::api::{ClientCoordinate, ClientPolygon};

/// A simple polygon without holes. The ring is stored closed
/// (first vertex repeated at the end).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    ring: Vec<GeoPoint>,
}

impl Polygon {
    /// Build a polygon from its exterior ring. An open ring is closed
    /// automatically. Returns `None` for fewer than three distinct vertices.
    pub fn new(mut ring: Vec<GeoPoint>) -> Option<Self> {
        if ring.first() != ring.last() {
            if let Some(first) = ring.first().copied() {
                ring.push(first);
            }
        }
        if ring.len() < 4 {
            return None;
        }
        Some(Self { ring })
    }

    /// Even-odd ray casting over the exterior ring, treating lon as x and
    /// lat as y. Points exactly on an edge may land on either side.
    pub fn contains(&self, point: GeoPoint) -> bool {
        let (x, y) = (point.lon, point.lat);
        let mut inside = false;

        for edge in self.ring.windows(2) {
            let (a, b) = (edge[0], edge[1]);
            if (a.lat > y) != (b.lat > y) {
                let cross_x = a.lon + (y - a.lat) * (b.lon - a.lon) / (b.lat - a.lat);
                if x < cross_x {
                    inside = !inside;
                }
            }
        }

        inside
    }

    /// Same ring with latitude first, the shape map clients expect.
    pub fn to_client(&self) -> ClientPolygon {
        ClientPolygon {
            coordinates: self
                .ring
                .iter()
                .map(|p| ClientCoordinate {
                    latitude: p.lat,
                    longitude: p.lon,
                })
                .collect(),
        }
    }
}

const GAME_AREA_RING: [(f64, f64); 7] = [
    (12.544240951538086, 55.77594546428934),
    (12.549219131469727, 55.77502825125135),
    (12.568359375, 55.77604201177451),
    (12.578487396240234, 55.7767661102896),
    (12.573423385620117, 55.79467119920912),
    (12.57059097290039, 55.795877445664104),
    (12.544240951538086, 55.77594546428934),
];

static GAME_AREA: LazyLock<Polygon> = LazyLock::new(|| {
    let ring = GAME_AREA_RING
        .iter()
        .map(|&(lon, lat)| GeoPoint::new(lon, lat))
        .collect();
    Polygon::new(ring).expect("game area ring has seven vertices")
});

/// The fixed play area.
pub fn game_area() -> &'static Polygon {
    &GAME_AREA
}
