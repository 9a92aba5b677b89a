use charter_shared::Airport;

fn airport(iata: &str, icao: &str, name: &str, city: &str, state: &str) -> Airport {
    Airport {
        iata: iata.to_string(),
        icao: icao.to_string(),
        name: name.to_string(),
        city: city.to_string(),
        state: Some(state.to_string()),
        country: "USA".to_string(),
        elevation: None,
        lat: None,
        lon: None,
    }
}

/// The fallback list: curated Pacific Northwest and Western US fields used
/// whenever the remote airport lookup is unavailable or inapplicable.
pub fn fallback_airports() -> Vec<Airport> {
    vec![
        airport("BDN", "KBDN", "Bend Municipal Airport", "Bend", "OR"),
        airport("RDM", "KRDM", "Roberts Field", "Redmond", "OR"),
        airport("EUG", "KEUG", "Mahlon Sweet Field", "Eugene", "OR"),
        airport("PDX", "KPDX", "Portland International", "Portland", "OR"),
        airport("SEA", "KSEA", "Seattle-Tacoma International", "Seattle", "WA"),
        airport("BFI", "KBFI", "Boeing Field", "Seattle", "WA"),
        airport("PAE", "KPAE", "Paine Field", "Everett", "WA"),
        airport("GEG", "KGEG", "Spokane International", "Spokane", "WA"),
        airport("BOI", "KBOI", "Boise Airport", "Boise", "ID"),
        airport("SUN", "KSUN", "Friedman Memorial", "Sun Valley", "ID"),
        airport("SLC", "KSLC", "Salt Lake City International", "Salt Lake City", "UT"),
        airport("LAS", "KLAS", "Harry Reid International", "Las Vegas", "NV"),
        airport("RNO", "KRNO", "Reno-Tahoe International", "Reno", "NV"),
        airport("SFO", "KSFO", "San Francisco International", "San Francisco", "CA"),
        airport("SJC", "KSJC", "Norman Y. Mineta San Jose", "San Jose", "CA"),
        airport("LAX", "KLAX", "Los Angeles International", "Los Angeles", "CA"),
        airport("SAN", "KSAN", "San Diego International", "San Diego", "CA"),
        airport("PHX", "KPHX", "Phoenix Sky Harbor", "Phoenix", "AZ"),
        airport("DEN", "KDEN", "Denver International", "Denver", "CO"),
    ]
}
