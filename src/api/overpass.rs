use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::OverpassConfig;
use crate::geometry::Coordinate;

const USER_AGENT: &str = "firesim/0.1.0";

/// Raw Overpass API response
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<Element>,
}

/// A single element from Overpass (node or way)
#[derive(Debug, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub type_: String,
    pub id: u64,
    #[serde(default)]
    pub nodes: Option<Vec<u64>>,
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

/// Calculate (south, west, north, east) around a center point
fn calculate_bbox(center: Coordinate, radius_m: u32) -> (f64, f64, f64, f64) {
    let radius_km = radius_m as f64 / 1000.0;

    // 1 degree latitude ≈ 111 km, 1 degree longitude ≈ 111 km * cos(lat)
    let lat_delta = radius_km / 111.0;
    let lon_delta = radius_km / (111.0 * center.lat().to_radians().cos());

    (
        center.lat() - lat_delta,
        center.lon() - lon_delta,
        center.lat() + lat_delta,
        center.lon() + lon_delta,
    )
}

fn land_cover_query(center: Coordinate, radius_m: u32) -> String {
    let (south, west, north, east) = calculate_bbox(center, radius_m);
    let bbox = format!("{south},{west},{north},{east}");

    format!(
        r#"[out:json][timeout:180];
(
  way["natural"~"^(water|wetland|bay|wood|grassland|scrub|heath|bare_rock|sand|scree|beach|glacier)$"]({bbox});
  way["landuse"~"^(reservoir|basin|forest|grass|meadow|farmland|orchard|vineyard|residential|commercial|industrial|retail)$"]({bbox});
  way["waterway"="riverbank"]({bbox});
);
out body;
>;
out skel qt;"#
    )
}

/// Fetch land cover areas (water, woods, grass, farmland, built-up) around a point
///
/// # Arguments
/// * `center` - Center of the area of interest
/// * `radius_m` - Radius in meters
/// * `config` - Mirrors, timeout and retry budget
pub fn fetch_land_cover(
    center: Coordinate,
    radius_m: u32,
    config: &OverpassConfig,
) -> Result<OverpassResponse> {
    let query = land_cover_query(center, radius_m);
    execute_overpass_query(&query, config)
}

/// Execute an Overpass query against each mirror in turn, retrying 429/504
fn execute_overpass_query(query: &str, config: &OverpassConfig) -> Result<OverpassResponse> {
    if config.urls.is_empty() {
        bail!("No Overpass API mirrors configured");
    }

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to create HTTP client")?;

    let mut last_error = None;

    for url in &config.urls {
        for attempt in 0..config.max_retries.max(1) {
            if attempt > 0 {
                // Overpass recommends backing off when overloaded
                let wait_secs = 30 * attempt as u64;
                eprintln!(
                    "Overpass API busy, retrying {} in {} seconds (attempt {}/{})",
                    url,
                    wait_secs,
                    attempt + 1,
                    config.max_retries
                );
                std::thread::sleep(Duration::from_secs(wait_secs));
            }

            // Overpass expects form-encoded POST data: data=<query>
            let response = match client.post(url).form(&[("data", query)]).send() {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(format!("{}: {}", url, e));
                    break;
                }
            };

            match response.status().as_u16() {
                200 => {
                    return response
                        .json()
                        .context("Failed to parse Overpass JSON response");
                }
                429 | 504 => {
                    last_error = Some(format!(
                        "{} returned status {} (attempt {})",
                        url,
                        response.status(),
                        attempt + 1
                    ));
                }
                status => {
                    last_error = Some(format!("{} returned error status {}", url, status));
                    break;
                }
            }
        }
    }

    bail!(
        "Overpass API failed on all {} mirrors: {}",
        config.urls.len(),
        last_error.unwrap_or_else(|| "Unknown error".to_string())
    )
}
