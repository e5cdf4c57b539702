const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";
const CITY_PHOTO_URL: &str = "https://source.unsplash.com/1600x900/?";
const CITY_PHOTO_QUALIFIERS: &str = "landmark,cityscape";

pub fn map_search_link(query: &str) -> String {
    format!("{MAPS_SEARCH_URL}{}", urlencoding::encode(query))
}

/// Keyless photo search for the backdrop. The caller guarantees `city` is not blank.
pub fn city_image_url(city: &str) -> String {
    format!(
        "{CITY_PHOTO_URL}{},{CITY_PHOTO_QUALIFIERS}",
        urlencoding::encode(city)
    )
}
