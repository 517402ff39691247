pub mod nominatim;
pub mod overpass;

pub use nominatim::{GeocodeResult, geocode_address};
pub use overpass::{OverpassResponse, fetch_land_cover};
