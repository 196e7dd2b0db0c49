use crate::core::transformer::{LATITUDE_MAX, LATITUDE_MIN, LONGITUDE_MAX, LONGITUDE_MIN};
use crate::domain::model::{MapBounds, Organization};

pub const BOUNDS_PADDING_FACTOR: f64 = 0.1;
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// 僅檢查範圍，不含 0 哨兵值（地圖框選用）
pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    (LATITUDE_MIN..=LATITUDE_MAX).contains(&latitude)
        && (LONGITUDE_MIN..=LONGITUDE_MAX).contains(&longitude)
}

/// 所有有效座標的外框，每軸加上 10% 跨度的留白並限制在合法範圍內
pub fn calculate_bounds(organizations: &[Organization]) -> Option<MapBounds> {
    let mut points = organizations
        .iter()
        .filter(|org| is_valid_coordinate(org.site_latitude, org.site_longitude))
        .peekable();
    points.peek()?;

    let raw = points.fold(
        MapBounds {
            north: LATITUDE_MIN,
            south: LATITUDE_MAX,
            east: LONGITUDE_MIN,
            west: LONGITUDE_MAX,
        },
        |acc, org| MapBounds {
            north: acc.north.max(org.site_latitude),
            south: acc.south.min(org.site_latitude),
            east: acc.east.max(org.site_longitude),
            west: acc.west.min(org.site_longitude),
        },
    );

    let lat_padding = (raw.north - raw.south) * BOUNDS_PADDING_FACTOR;
    let lng_padding = (raw.east - raw.west) * BOUNDS_PADDING_FACTOR;

    Some(MapBounds {
        north: (raw.north + lat_padding).min(LATITUDE_MAX),
        south: (raw.south - lat_padding).max(LATITUDE_MIN),
        east: (raw.east + lng_padding).min(LONGITUDE_MAX),
        west: (raw.west - lng_padding).max(LONGITUDE_MIN),
    })
}

impl MapBounds {
    /// (longitude, latitude)，與地圖元件的座標順序一致
    pub fn center(&self) -> (f64, f64) {
        ((self.east + self.west) / 2.0, (self.north + self.south) / 2.0)
    }
}

pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    let lat_direction = if latitude >= 0.0 { 'N' } else { 'S' };
    let lng_direction = if longitude >= 0.0 { 'E' } else { 'W' };
    format!(
        "{:.4}°{}, {:.4}°{}",
        latitude.abs(),
        lat_direction,
        longitude.abs(),
        lng_direction
    )
}

/// Haversine 大圓距離（公里）
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org_at(lat: f64, lng: f64) -> Organization {
        Organization {
            organization_name: format!("{},{}", lat, lng),
            site_latitude: lat,
            site_longitude: lng,
            ..Default::default()
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_bounds_are_padded() {
        let orgs = vec![org_at(10.0, -20.0), org_at(30.0, 20.0)];
        let bounds = calculate_bounds(&orgs).unwrap();

        assert!(approx(bounds.north, 32.0));
        assert!(approx(bounds.south, 8.0));
        assert!(approx(bounds.east, 24.0));
        assert!(approx(bounds.west, -24.0));
    }

    #[test]
    fn test_bounds_are_clamped() {
        let orgs = vec![org_at(-85.0, -175.0), org_at(85.0, 175.0)];
        let bounds = calculate_bounds(&orgs).unwrap();

        assert_eq!(bounds.north, 90.0);
        assert_eq!(bounds.south, -90.0);
        assert_eq!(bounds.east, 180.0);
        assert_eq!(bounds.west, -180.0);
    }

    #[test]
    fn test_bounds_skip_invalid_and_empty() {
        assert!(calculate_bounds(&[]).is_none());
        assert!(calculate_bounds(&[org_at(120.0, 10.0)]).is_none());

        let single = calculate_bounds(&[org_at(120.0, 10.0), org_at(5.0, 6.0)]).unwrap();
        assert_eq!(single.north, 5.0);
        assert_eq!(single.west, 6.0);
    }

    #[test]
    fn test_center() {
        let bounds = MapBounds {
            north: 40.0,
            south: 20.0,
            east: 10.0,
            west: -30.0,
        };
        assert_eq!(bounds.center(), (-10.0, 30.0));
    }

    #[test]
    fn test_format_coordinates() {
        assert_eq!(format_coordinates(10.5, -50.2), "10.5000°N, 50.2000°W");
        assert_eq!(format_coordinates(-33.8688, 151.2093), "33.8688°S, 151.2093°E");
    }

    #[test]
    fn test_distance_km() {
        assert!(approx(distance_km(12.0, 34.0, 12.0, 34.0), 0.0));

        // one degree of latitude is roughly 111 km
        let d = distance_km(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111.19).abs() < 0.01);
    }
}
