use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::thread;
use std::time::Duration;

use crate::geometry::Coordinate;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = "firesim/0.1.0";

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
}

/// A resolved address search
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub location: Coordinate,
    /// Full place name as reported by the geocoder
    pub label: String,
}

/// Build the search string, scoping bare street addresses to `region`
///
/// The region is appended unless the address already mentions it
/// (case-insensitive). Only the part before the first comma is compared, so
/// "San Francisco, CA" matches any address containing "san francisco".
pub fn build_query(address: &str, region: Option<&str>) -> String {
    let address = address.trim();
    let Some(region) = region.map(str::trim).filter(|r| !r.is_empty()) else {
        return address.to_string();
    };

    let needle = region
        .split(',')
        .next()
        .unwrap_or(region)
        .trim()
        .to_lowercase();

    if address.to_lowercase().contains(&needle) {
        address.to_string()
    } else {
        format!("{}, {}", address, region)
    }
}

fn parse_result(result: NominatimResult) -> Result<GeocodeResult> {
    let lat: f64 = result
        .lat
        .parse()
        .context("Failed to parse latitude from Nominatim response")?;
    let lon: f64 = result
        .lon
        .parse()
        .context("Failed to parse longitude from Nominatim response")?;

    Ok(GeocodeResult {
        location: Coordinate::new(lon, lat),
        label: result.display_name,
    })
}

/// Geocode a free-form address to a coordinate.
///
/// Uses the Nominatim API. Includes a 1 second delay for rate limiting
/// (Nominatim ToS).
///
/// # Arguments
/// * `address` - Street address or place name (e.g., "1 Dr Carlton B Goodlett Pl")
/// * `region` - Appended when the address does not name it (e.g., "San Francisco, CA")
///
/// # Returns
/// * `Ok(GeocodeResult)` - Best match with its display name
/// * `Err` - If the address is empty, not found, or the API fails
pub fn geocode_address(address: &str, region: Option<&str>) -> Result<GeocodeResult> {
    if address.trim().is_empty() {
        bail!("Please enter an address");
    }

    // Rate limiting - Nominatim requires max 1 request per second
    thread::sleep(Duration::from_secs(1));

    let query = build_query(address, region);

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(NOMINATIM_URL)
        .query(&[("q", query.as_str()), ("format", "json"), ("limit", "1")])
        .send()
        .context("Failed to send request to Nominatim API")?;

    if !response.status().is_success() {
        bail!("Nominatim API returned error status: {}", response.status());
    }

    let results: Vec<NominatimResult> = response
        .json()
        .context("Failed to parse Nominatim JSON response")?;

    let result = results.into_iter().next().ok_or_else(|| {
        anyhow::anyhow!("Address not found: {}. Try being more specific.", query)
    })?;

    parse_result(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nominatim_response() {
        let json = r#"[{"lat":"37.7792588","lon":"-122.4193286","display_name":"San Francisco City Hall, San Francisco, California, USA"}]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(json).unwrap();
        assert_eq!(results.len(), 1);

        let result = parse_result(results.into_iter().next().unwrap()).unwrap();
        assert_eq!(result.location, Coordinate::new(-122.4193286, 37.7792588));
        assert!(result.label.starts_with("San Francisco City Hall"));
    }

    #[test]
    fn test_parse_bad_latitude() {
        let result = NominatimResult {
            lat: "north".to_string(),
            lon: "0".to_string(),
            display_name: String::new(),
        };
        assert!(parse_result(result).is_err());
    }

    #[test]
    fn test_build_query_appends_region() {
        assert_eq!(
            build_query(" 500 Castro St ", Some("San Francisco, CA")),
            "500 Castro St, San Francisco, CA"
        );
        assert_eq!(
            build_query("Ferry Building, SAN FRANCISCO", Some("San Francisco, CA")),
            "Ferry Building, SAN FRANCISCO"
        );
        assert_eq!(build_query("Reno, NV", None), "Reno, NV");
        assert_eq!(build_query("Reno, NV", Some("  ")), "Reno, NV");
    }

    #[test]
    fn test_empty_address_is_rejected() {
        assert!(geocode_address("   ", None).is_err());
    }
}
