use charter_shared::Airport;

/// Result cap for the dropdown.
pub const MAX_RESULTS: usize = 10;

/// Case-insensitive substring match over the static airport list.
///
/// Queries shorter than 2 characters mean "not yet searching" and return an
/// empty set. Matches against IATA, ICAO, name, city and state; list order is
/// preserved (no relevance ranking), capped at [`MAX_RESULTS`].
pub fn search_airports<'a>(query: &str, airports: &'a [Airport]) -> Vec<&'a Airport> {
    let trimmed = query.trim();
    if trimmed.chars().count() < 2 {
        return Vec::new();
    }

    let term = trimmed.to_lowercase();
    airports
        .iter()
        .filter(|airport| {
            airport.iata.to_lowercase().contains(&term)
                || airport.icao.to_lowercase().contains(&term)
                || airport.name.to_lowercase().contains(&term)
                || airport.city.to_lowercase().contains(&term)
                || airport
                    .state
                    .as_ref()
                    .is_some_and(|s| s.to_lowercase().contains(&term))
        })
        .take(MAX_RESULTS)
        .collect()
}

/// True when the query looks like an ICAO identifier (exactly 4 ASCII
/// letters, e.g. KBDN), which the remote lookup treats as a direct fetch.
pub fn is_icao_shaped(query: &str) -> bool {
    let trimmed = query.trim();
    trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_alphabetic())
}
