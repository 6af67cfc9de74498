//! County boundary polygons read from a cartographic boundary shapefile.

use std::{collections::HashMap, path::Path};

use anyhow::{Context, Result, bail};
use shapefile::{
    Reader, Shape,
    dbase::{FieldValue, Record},
};

use crate::types::GeoId;

/// One county polygon keyed by its derived `GeoId`.
#[derive(Debug, Clone)]
pub struct CountyShape {
    pub geo_id: GeoId,
    pub geometry: geo::MultiPolygon<f64>,
}

/// All county polygons plus a `GeoId -> index` map for join lookups.
#[derive(Debug)]
pub struct CountyBoundaries {
    shapes: Vec<CountyShape>,
    index: HashMap<GeoId, usize>,
}

impl CountyBoundaries {
    /// Read every polygon + attribute record from a `.shp` file. A record
    /// without the `STATEFP`/`COUNTYFP` attributes is a schema error and
    /// aborts the load.
    pub fn from_shapefile(path: &Path) -> Result<CountyBoundaries> {
        let mut reader = Reader::from_path(path)
            .with_context(|| format!("[data::boundary] failed to open shapefile: {}", path.display()))?;

        let mut shapes = Vec::with_capacity(reader.shape_count()?);
        for result in reader.iter_shapes_and_records() {
            let (shape, record) = result.context("[data::boundary] error reading shape+record")?;
            let state = field_string(&record, "STATEFP")?;
            let county = field_string(&record, "COUNTYFP")?;
            let geometry = match shape {
                Shape::Polygon(polygon) => polygon_to_geo(&polygon),
                _ => {
                    log::debug!("[data::boundary] skipping non-polygon record");
                    continue;
                }
            };
            shapes.push(CountyShape {
                geo_id: GeoId::from_parts(&state, &county),
                geometry,
            });
        }
        Ok(CountyBoundaries::from_shapes(shapes))
    }

    /// Build from already-converted shapes (also the unit-test entry point).
    pub fn from_shapes(shapes: Vec<CountyShape>) -> CountyBoundaries {
        let index = shapes
            .iter()
            .enumerate()
            .map(|(idx, shape)| (shape.geo_id.clone(), idx))
            .collect();
        CountyBoundaries { shapes, index }
    }

    pub fn get(&self, geo_id: &GeoId) -> Option<&CountyShape> {
        self.index.get(geo_id).map(|&idx| &self.shapes[idx])
    }

    pub fn contains(&self, geo_id: &GeoId) -> bool {
        self.index.contains_key(geo_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountyShape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Pull a dBASE attribute as text. TIGER/cartographic files store FIPS
/// fields as fixed-width character data; numeric fallback covers re-exported
/// files that coerced them (padding is restored by `GeoId::from_parts`).
fn field_string(record: &Record, name: &str) -> Result<String> {
    match record.get(name) {
        Some(FieldValue::Character(Some(text))) => Ok(text.trim().to_string()),
        Some(FieldValue::Numeric(Some(value))) => Ok(format!("{}", *value as i64)),
        Some(FieldValue::Character(None)) | Some(FieldValue::Numeric(None)) => {
            bail!("[data::boundary] field {:?} is empty", name)
        }
        Some(other) => bail!(
            "[data::boundary] field {:?} has unsupported type {:?}",
            name,
            other
        ),
        None => bail!(
            "[data::boundary] boundary file is missing expected field {:?}",
            name
        ),
    }
}

/// Convert a shapefile polygon to `geo::MultiPolygon`.
///
/// Shapefiles store rings flat: each clockwise ring opens a polygon and the
/// counter-clockwise rings that follow are its holes.
pub(crate) fn polygon_to_geo(polygon: &shapefile::Polygon) -> geo::MultiPolygon<f64> {
    fn close_ring(coords: &mut Vec<geo::Coord<f64>>) {
        if let (Some(first), Some(last)) = (coords.first().copied(), coords.last().copied()) {
            if first != last {
                coords.push(first);
            }
        }
    }

    fn signed_area(coords: &[geo::Coord<f64>]) -> f64 {
        coords
            .windows(2)
            .map(|pair| pair[0].x * pair[1].y - pair[1].x * pair[0].y)
            .sum::<f64>()
            / 2.0
    }

    let mut polygons: Vec<geo::Polygon<f64>> = Vec::new();
    let mut exterior: Option<geo::LineString<f64>> = None;
    let mut holes: Vec<geo::LineString<f64>> = Vec::new();

    for ring in polygon.rings() {
        let mut coords: Vec<geo::Coord<f64>> = ring
            .points()
            .iter()
            .map(|point| geo::Coord { x: point.x, y: point.y })
            .collect();
        close_ring(&mut coords);

        // Clockwise (negative signed area) marks an exterior ring.
        let is_exterior = signed_area(&coords) < 0.0;
        let ring = geo::LineString(coords);
        if is_exterior {
            if let Some(done) = exterior.take() {
                polygons.push(geo::Polygon::new(done, std::mem::take(&mut holes)));
            }
            exterior = Some(ring);
        } else {
            holes.push(ring);
        }
    }
    if let Some(done) = exterior {
        polygons.push(geo::Polygon::new(done, holes));
    }

    geo::MultiPolygon(polygons)
}

/// Print a summary of a boundary shapefile: record count, geometry mix, and
/// the attribute columns of the first record.
pub fn describe_shapefile(path: &Path) -> Result<()> {
    use std::collections::BTreeMap;

    let mut reader = Reader::from_path(path)
        .with_context(|| format!("[data::boundary] failed to open shapefile: {}", path.display()))?;

    let mut total = 0usize;
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut first_record: Option<Record> = None;

    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result.context("[data::boundary] error reading shape+record")?;
        let kind = match shape {
            Shape::Point(_) | Shape::PointM(_) | Shape::PointZ(_) => "Point",
            Shape::Polygon(_) | Shape::PolygonM(_) | Shape::PolygonZ(_) => "Polygon",
            _ => "Other",
        };
        *counts.entry(kind).or_default() += 1;
        total += 1;
        if first_record.is_none() {
            first_record = Some(record);
        }
    }

    println!("Number of records: {}", total);
    println!("Geometry mix:");
    for (kind, count) in counts {
        println!("  - {}: {}", kind, count);
    }
    if let Some(record) = first_record {
        println!("Attribute columns:");
        for (field, value) in record {
            println!("  - {} ({:?})", field, value);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use shapefile::{Point, PolygonRing};

    use super::*;

    /// Clockwise square ring (shapefile exterior convention).
    fn square_cw(origin: (f64, f64), size: f64) -> Vec<Point> {
        let (x, y) = origin;
        vec![
            Point { x, y },
            Point { x, y: y + size },
            Point { x: x + size, y: y + size },
            Point { x: x + size, y },
            Point { x, y },
        ]
    }

    /// Counter-clockwise square ring (shapefile hole convention).
    fn square_ccw(origin: (f64, f64), size: f64) -> Vec<Point> {
        let mut ring = square_cw(origin, size);
        ring.reverse();
        ring
    }

    #[test]
    fn converts_simple_polygon() {
        let shp =
            shapefile::Polygon::with_rings(vec![PolygonRing::Outer(square_cw((0.0, 0.0), 1.0))]);
        let mp = polygon_to_geo(&shp);
        assert_eq!(mp.0.len(), 1);
        let poly = &mp.0[0];
        assert!(poly.interiors().is_empty());
        // Exterior ring is closed.
        let exterior = poly.exterior();
        assert_eq!(exterior.0.first(), exterior.0.last());
    }

    #[test]
    fn groups_holes_with_their_exterior() {
        let shp = shapefile::Polygon::with_rings(vec![
            PolygonRing::Outer(square_cw((0.0, 0.0), 10.0)),
            PolygonRing::Inner(square_ccw((4.0, 4.0), 1.0)),
        ]);
        let mp = polygon_to_geo(&shp);
        assert_eq!(mp.0.len(), 1);
        assert_eq!(mp.0[0].interiors().len(), 1);
    }

    #[test]
    fn index_lookups() {
        let shapes = vec![
            CountyShape {
                geo_id: GeoId::from_parts("55", "025"),
                geometry: geo::MultiPolygon(vec![]),
            },
            CountyShape {
                geo_id: GeoId::from_parts("06", "037"),
                geometry: geo::MultiPolygon(vec![]),
            },
        ];
        let boundaries = CountyBoundaries::from_shapes(shapes);
        assert_eq!(boundaries.len(), 2);
        assert!(boundaries.contains(&GeoId::new("55025")));
        assert!(boundaries.get(&GeoId::new("06037")).is_some());
        assert!(boundaries.get(&GeoId::new("99999")).is_none());
    }
}
