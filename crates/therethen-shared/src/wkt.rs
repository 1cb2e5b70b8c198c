//! Minimal WKT codec for single-ring rectangular polygons.
//!
//! Only `POLYGON((lon lat, ...))` is produced or understood. Coordinate pairs
//! are always longitude first.

use crate::types::{GeoPoint, GeoRectangle};

/// Encode a rectangle as a closed five-point WKT ring.
///
/// The rectangle is normalized first, so the ring always runs
/// north-west, north-east, south-east, south-west, north-west.
pub fn encode_rectangle(rect: &GeoRectangle) -> String {
    let ring = rectangle_ring(rect);
    let pairs: Vec<String> = ring
        .iter()
        .map(|p| format!("{} {}", p.longitude, p.latitude))
        .collect();
    format!("POLYGON(({}))", pairs.join(", "))
}

/// The closed ring [`encode_rectangle`] writes, in order.
pub fn rectangle_ring(rect: &GeoRectangle) -> [GeoPoint; 5] {
    let r = rect.normalized();
    let (tl, br) = (r.top_left, r.bottom_right);
    [
        tl,
        GeoPoint::new(tl.latitude, br.longitude),
        br,
        GeoPoint::new(br.latitude, tl.longitude),
        tl,
    ]
}

/// Decode the points of a WKT polygon's first ring.
///
/// Reads the text between the first `((` and the next `))`; the geometry
/// tag in front is not checked. Never fails: input missing either delimiter
/// yields an empty vector, and pairs that are not two finite numbers are
/// skipped.
pub fn decode_polygon(wkt: &str) -> Vec<GeoPoint> {
    let Some(open) = wkt.find("((") else {
        return Vec::new();
    };
    let interior = &wkt[open + 2..];
    let Some(close) = interior.find("))") else {
        return Vec::new();
    };

    interior[..close].split(',').filter_map(parse_pair).collect()
}

fn parse_pair(pair: &str) -> Option<GeoPoint> {
    let mut tokens = pair.split_whitespace();
    let longitude: f64 = tokens.next()?.parse().ok()?;
    let latitude: f64 = tokens.next()?.parse().ok()?;
    if !longitude.is_finite() || !latitude.is_finite() {
        return None;
    }
    Some(GeoPoint::new(latitude, longitude))
}

/// Arithmetic mean of the given vertices, `None` for an empty slice.
///
/// A closed ring counts its first vertex twice, matching how areas have
/// always been centred on the map.
pub fn polygon_center(points: &[GeoPoint]) -> Option<GeoPoint> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let lat = points.iter().map(|p| p.latitude).sum::<f64>() / n;
    let lon = points.iter().map(|p| p.longitude).sum::<f64>() / n;
    Some(GeoPoint::new(lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn sample() -> GeoRectangle {
        GeoRectangle::new(GeoPoint::new(10.0, 10.0), GeoPoint::new(9.0, 11.0))
    }

    #[test]
    fn test_encode_winding_order() {
        assert_eq!(
            encode_rectangle(&sample()),
            "POLYGON((10 10, 11 10, 11 9, 10 9, 10 10))"
        );
    }

    #[test]
    fn test_encode_normalizes_corners() {
        let swapped = GeoRectangle::new(GeoPoint::new(9.0, 11.0), GeoPoint::new(10.0, 10.0));
        assert_eq!(encode_rectangle(&swapped), encode_rectangle(&sample()));
    }

    #[test]
    fn test_decode_encoded_ring() {
        let rect = GeoRectangle::new(
            GeoPoint::new(37.78123456, -122.4321),
            GeoPoint::new(37.7651, -122.40019876),
        );
        let decoded = decode_polygon(&encode_rectangle(&rect));
        let expected = rectangle_ring(&rect);

        assert_eq!(decoded.len(), 5);
        for (got, want) in decoded.iter().zip(expected.iter()) {
            assert!((got.latitude - want.latitude).abs() < EPSILON);
            assert!((got.longitude - want.longitude).abs() < EPSILON);
        }
        assert_eq!(decoded.first(), decoded.last());
    }

    #[test]
    fn test_decode_longitude_first() {
        let points = decode_polygon("POLYGON((-122.5 37.5, -122 38))");
        assert_eq!(
            points,
            vec![GeoPoint::new(37.5, -122.5), GeoPoint::new(38.0, -122.0)]
        );
    }

    #[test]
    fn test_decode_not_a_polygon() {
        assert!(decode_polygon("not a polygon").is_empty());
        assert!(decode_polygon("").is_empty());
        assert!(decode_polygon("POINT(1 2)").is_empty());
    }

    #[test]
    fn test_decode_reads_between_delimiters() {
        assert_eq!(decode_polygon("((1 2, 3 4))").len(), 2);
        assert_eq!(decode_polygon("POLYGON((1 2)) trailing ((5 6))").len(), 1);
    }

    #[test]
    fn test_decode_empty_interior() {
        assert!(decode_polygon("POLYGON(())").is_empty());
    }

    #[test]
    fn test_decode_missing_closing_delimiter() {
        assert!(decode_polygon("POLYGON((1 2, 3 4").is_empty());
    }

    #[test]
    fn test_decode_skips_bad_pairs() {
        let points = decode_polygon("polygon((1 2, foo bar, 3, 4  5, NaN 1, 6 inf, 7 8))");
        assert_eq!(
            points,
            vec![
                GeoPoint::new(2.0, 1.0),
                GeoPoint::new(5.0, 4.0),
                GeoPoint::new(8.0, 7.0),
            ]
        );
    }

    #[test]
    fn test_polygon_center() {
        let ring = rectangle_ring(&sample());
        let center = polygon_center(&ring).unwrap();
        // Closing vertex repeats the north-west corner.
        assert!((center.latitude - 9.6).abs() < EPSILON);
        assert!((center.longitude - 10.4).abs() < EPSILON);
        assert!(polygon_center(&[]).is_none());
    }
}
