//! Geographic primitives.

use serde::{Deserialize, Serialize};

use crate::error::{MapError, MapResult};

/// WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> MapResult<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(MapError::InvalidCoordinate { what: "latitude" });
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(MapError::InvalidCoordinate { what: "longitude" });
        }
        Ok(Self { lat, lng })
    }
}

/// Axis-aligned bounding box in the request CRS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bbox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bbox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> MapResult<Self> {
        let bbox = Self {
            min_x,
            min_y,
            max_x,
            max_y,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    pub fn validate(&self) -> MapResult<()> {
        let all_finite = [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(MapError::InvalidBbox {
                what: "non-finite corner",
            });
        }
        if self.min_x >= self.max_x || self.min_y >= self.max_y {
            return Err(MapError::InvalidBbox {
                what: "min corner must be below max corner",
            });
        }
        Ok(())
    }

    /// `minx,miny,maxx,maxy`, the form WMS expects in the `bbox` param.
    pub fn to_param(&self) -> String {
        format!("{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

impl std::str::FromStr for Bbox {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| MapError::InvalidBbox {
                what: "expected four comma-separated numbers",
            })?;
        match parts.as_slice() {
            [min_x, min_y, max_x, max_y] => Bbox::new(*min_x, *min_y, *max_x, *max_y),
            _ => Err(MapError::InvalidBbox {
                what: "expected four comma-separated numbers",
            }),
        }
    }
}
