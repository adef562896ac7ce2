use contracts::domain::Business;
use gloo_net::http::Request;

const API_BASE: &str = "/api/search-businesses";

/// Query the server-side places proxy for businesses of a category in a
/// city. The proxy talks to the mapping provider; this client only sees
/// the normalized business records.
pub async fn search_businesses(
    query: &str,
    city: &str,
    state: &str,
) -> Result<Vec<Business>, String> {
    let url = format!(
        "{}?query={}&city={}&state={}",
        API_BASE,
        urlencoding::encode(query),
        urlencoding::encode(city),
        urlencoding::encode(state)
    );

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let data: Vec<Business> = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(data)
}
