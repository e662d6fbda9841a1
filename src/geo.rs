//! Orthographic globe projection.
//!
//! Points are projected onto the unit disk as seen from far above the
//! projection centre; the far hemisphere is hidden.  Arcs between transfer
//! endpoints follow great circles.

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Zagreb, the default centre of the globe.
pub const ZAGREB: (f64, f64) = (45.8131, 15.978);

/// Default zoom of the map view: the visible window spans a third of the
/// globe's diameter.
pub const DEFAULT_ZOOM: f64 = 3.0;

/// A projected polyline on the unit disk.
pub type Path2 = Vec<[f64; 2]>;

/// Coarse coastline outlines drawn under the transfer arcs.
pub const COASTLINES_JSON: &str = include_str!("../assets/coastlines.json");

/// A closed coastline ring.  Vertices are `(lat, lon)` in degrees and the
/// closing edge back to the first vertex is implied.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Coastline {
    pub name: String,
    pub ring: Vec<(f64, f64)>,
}

/// Parse and check the bundled coastlines.
pub fn bundled_coastlines() -> Result<Vec<Coastline>> {
    let coastlines: Vec<Coastline> =
        serde_json::from_str(COASTLINES_JSON).context("parsing bundled coastlines")?;
    for coast in &coastlines {
        if coast.ring.len() < 3 {
            bail!("coastline '{}' has fewer than three vertices", coast.name);
        }
        if let Some((lat, lon)) = coast
            .ring
            .iter()
            .find(|(lat, lon)| lat.abs() > 90.0 || lon.abs() > 180.0)
        {
            bail!("coastline '{}' has vertex ({lat}, {lon}) off the globe", coast.name);
        }
    }
    Ok(coastlines)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeProjection {
    center_lat: f64,
    center_lon: f64,
    sin_lat0: f64,
    cos_lat0: f64,
}

impl Default for GlobeProjection {
    fn default() -> Self {
        Self::new(ZAGREB.0, ZAGREB.1)
    }
}

impl GlobeProjection {
    pub fn new(center_lat: f64, center_lon: f64) -> Self {
        let phi0 = center_lat.to_radians();
        GlobeProjection {
            center_lat,
            center_lon,
            sin_lat0: phi0.sin(),
            cos_lat0: phi0.cos(),
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.center_lat, self.center_lon)
    }

    /// Project `(lat, lon)` in degrees; `None` on the hidden hemisphere.
    pub fn project(&self, lat: f64, lon: f64) -> Option<[f64; 2]> {
        let phi = lat.to_radians();
        let dlambda = (lon - self.center_lon).to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let cos_c = self.sin_lat0 * sin_phi + self.cos_lat0 * cos_phi * dlambda.cos();
        if cos_c < 0.0 {
            return None;
        }
        Some([
            cos_phi * dlambda.sin(),
            self.cos_lat0 * sin_phi - self.sin_lat0 * cos_phi * dlambda.cos(),
        ])
    }

    /// Project a lat/lon polyline, splitting it wherever it passes behind
    /// the horizon.  Pieces shorter than two points are dropped.
    pub fn project_path(&self, path: &[(f64, f64)]) -> Vec<Path2> {
        let mut pieces = Vec::new();
        let mut current: Path2 = Vec::new();
        for &(lat, lon) in path {
            match self.project(lat, lon) {
                Some(p) => current.push(p),
                None => {
                    if current.len() >= 2 {
                        pieces.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                }
            }
        }
        if current.len() >= 2 {
            pieces.push(current);
        }
        pieces
    }

    /// Project a closed ring, clipped at the horizon like [`Self::project_path`].
    pub fn project_ring(&self, ring: &[(f64, f64)]) -> Vec<Path2> {
        let mut closed = ring.to_vec();
        if let Some(&first) = ring.first() {
            closed.push(first);
        }
        self.project_path(&closed)
    }

    /// Meridians and parallels every `step_deg` degrees, clipped at the
    /// horizon.
    pub fn graticule(&self, step_deg: f64) -> Vec<Path2> {
        const SAMPLE_DEG: f64 = 2.0;
        let mut lines = Vec::new();

        let meridian_samples: Vec<f64> = stepped(-90.0, 90.0, SAMPLE_DEG);
        for lon in stepped(-180.0, 180.0 - step_deg, step_deg) {
            let path: Vec<(f64, f64)> = meridian_samples.iter().map(|&lat| (lat, lon)).collect();
            lines.extend(self.project_path(&path));
        }

        let parallel_samples: Vec<f64> = stepped(-180.0, 180.0, SAMPLE_DEG);
        for lat in stepped(-90.0 + step_deg, 90.0 - step_deg, step_deg) {
            let path: Vec<(f64, f64)> = parallel_samples.iter().map(|&lon| (lat, lon)).collect();
            lines.extend(self.project_path(&path));
        }

        lines
    }
}

/// The horizon: a closed unit circle.
pub fn outline(segments: usize) -> Path2 {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64 * std::f64::consts::TAU;
            [t.cos(), t.sin()]
        })
        .collect()
}

/// Points along the great circle from `from` to `to`, both `(lat, lon)` in
/// degrees, endpoints included (`segments + 1` points).
///
/// Coincident endpoints give the same point repeated.  Antipodal endpoints
/// have no unique great circle; the two endpoints are returned as-is.
pub fn great_circle(from: (f64, f64), to: (f64, f64), segments: usize) -> Vec<(f64, f64)> {
    let segments = segments.max(1);
    let a = to_unit_vector(from);
    let b = to_unit_vector(to);
    let dot = (a[0] * b[0] + a[1] * b[1] + a[2] * b[2]).clamp(-1.0, 1.0);
    let d = dot.acos();

    if d < 1e-6 {
        return vec![from; segments + 1];
    }
    let sin_d = d.sin();
    if sin_d < 1e-6 {
        return vec![from, to];
    }

    (0..=segments)
        .map(|i| {
            if i == 0 {
                return from;
            }
            if i == segments {
                return to;
            }
            let t = i as f64 / segments as f64;
            let wa = ((1.0 - t) * d).sin() / sin_d;
            let wb = (t * d).sin() / sin_d;
            from_unit_vector([
                wa * a[0] + wb * b[0],
                wa * a[1] + wb * b[1],
                wa * a[2] + wb * b[2],
            ])
        })
        .collect()
}

fn to_unit_vector((lat, lon): (f64, f64)) -> [f64; 3] {
    let (sin_phi, cos_phi) = lat.to_radians().sin_cos();
    let (sin_lambda, cos_lambda) = lon.to_radians().sin_cos();
    [cos_phi * cos_lambda, cos_phi * sin_lambda, sin_phi]
}

fn from_unit_vector(v: [f64; 3]) -> (f64, f64) {
    let lat = v[2].atan2((v[0] * v[0] + v[1] * v[1]).sqrt());
    let lon = v[1].atan2(v[0]);
    (lat.to_degrees(), lon.to_degrees())
}

fn stepped(start: f64, end: f64, step: f64) -> Vec<f64> {
    let n = ((end - start) / step).floor() as usize;
    (0..=n).map(|i| start + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-6 && (a.1 - b.1).abs() < 1e-6
    }

    #[test]
    fn centre_projects_to_origin() {
        let proj = GlobeProjection::default();
        let [x, y] = proj.project(ZAGREB.0, ZAGREB.1).unwrap();
        assert!(x.abs() < EPS && y.abs() < EPS);
    }

    #[test]
    fn north_and_east_are_positive() {
        let proj = GlobeProjection::default();
        let [_, y] = proj.project(52.0, ZAGREB.1).unwrap();
        assert!(y > 0.0);
        let [x, _] = proj.project(ZAGREB.0, 30.0).unwrap();
        assert!(x > 0.0);
    }

    #[test]
    fn far_side_is_hidden() {
        let proj = GlobeProjection::default();
        assert!(proj.project(-ZAGREB.0, ZAGREB.1 - 180.0).is_none());
        // Tokyo is just inside the visible hemisphere seen from Zagreb.
        assert!(proj.project(35.8617, 139.6455).is_some());
        assert!(proj.project(40.7128, -74.006).is_some());
    }

    #[test]
    fn projected_points_stay_on_disk() {
        let proj = GlobeProjection::new(10.0, -20.0);
        for lat in (-80..=80).step_by(20) {
            for lon in (-180..180).step_by(30) {
                if let Some([x, y]) = proj.project(lat as f64, lon as f64) {
                    assert!(x * x + y * y <= 1.0 + EPS);
                }
            }
        }
    }

    #[test]
    fn bundled_coastlines_are_valid() {
        let coasts = bundled_coastlines().unwrap();
        assert!(coasts.iter().any(|c| c.name == "Eurasia"));
        assert!(coasts.iter().all(|c| c.ring.len() >= 3));
    }

    #[test]
    fn europe_faces_zagreb_and_australia_does_not() {
        let proj = GlobeProjection::default();
        let coasts = bundled_coastlines().unwrap();
        let find = |name: &str| coasts.iter().find(|c| c.name == name).unwrap();

        let britain = proj.project_ring(&find("Great Britain").ring);
        assert_eq!(britain.len(), 1);
        // The closing edge is drawn.
        let ring = &britain[0];
        assert_eq!(ring.first(), ring.last());

        assert!(proj.project_ring(&find("Australia").ring).is_empty());
    }

    #[test]
    fn great_circle_keeps_endpoints() {
        let from = ZAGREB;
        let to = (52.3676, 4.9041);
        let path = great_circle(from, to, 16);
        assert_eq!(path.len(), 17);
        assert!(close(path[0], from));
        assert!(close(path[16], to));
        // Midpoint lies between the endpoints in latitude.
        assert!(path[8].0 > from.0 && path[8].0 < to.0 + 1.0);
    }

    #[test]
    fn coincident_endpoints_repeat() {
        let path = great_circle(ZAGREB, ZAGREB, 4);
        assert_eq!(path, vec![ZAGREB; 5]);
    }

    #[test]
    fn path_split_at_horizon() {
        let proj = GlobeProjection::new(0.0, 0.0);
        // Equator from 0 to 180: visible up to 90, hidden after.
        let path: Vec<(f64, f64)> = (0..=18).map(|i| (0.0, i as f64 * 10.0)).collect();
        let pieces = proj.project_path(&path);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].len(), 10);
    }

    #[test]
    fn outline_is_closed() {
        let ring = outline(64);
        assert_eq!(ring.len(), 65);
        assert!((ring[0][0] - ring[64][0]).abs() < EPS);
    }

    #[test]
    fn graticule_nonempty() {
        assert!(!GlobeProjection::default().graticule(30.0).is_empty());
    }
}
