use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use charter_core::{is_icao_shaped, search_airports};
use charter_shared::Airport;
use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::state::AppState;

// ============================================================================
// Remote ICAO lookup
// ============================================================================

/// Direct-fetch lookup for ICAO-shaped queries. Object-safe so tests can
/// stub the upstream.
#[async_trait]
pub trait IcaoLookup: Send + Sync {
    async fn fetch(&self, icao: &str) -> anyhow::Result<Airport>;
}

/// AirportDB client: `GET {base}/api/v1/airport/{ICAO}?apiToken=...`.
pub struct AirportDbClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl AirportDbClient {
    pub fn new(base_url: &str, api_token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        }
    }
}

#[async_trait]
impl IcaoLookup for AirportDbClient {
    async fn fetch(&self, icao: &str) -> anyhow::Result<Airport> {
        let url = format!(
            "{}/api/v1/airport/{}?apiToken={}",
            self.base_url, icao, self.api_token
        );
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("AirportDB responded {}", response.status());
        }

        let record: Value = response.json().await?;
        let field = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| record.get(*k).and_then(Value::as_str))
                .unwrap_or_default()
                .to_string()
        };

        Ok(Airport {
            iata: field(&["iata_code"]),
            icao: field(&["icao_code", "ident"]),
            name: field(&["name"]),
            city: field(&["municipality"]),
            state: {
                let region = field(&["region_name", "iso_region"]);
                (!region.is_empty()).then_some(region)
            },
            country: field(&["iso_country"]),
            elevation: record
                .get("elevation_ft")
                .and_then(Value::as_i64)
                .map(|v| v as i32),
            lat: record.get("latitude_deg").and_then(Value::as_f64),
            lon: record.get("longitude_deg").and_then(Value::as_f64),
        })
    }
}

// ============================================================================
// Searcher with last-writer-wins cancellation
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Results(Vec<Airport>),
    /// A newer search cancelled this one; the caller must discard it without
    /// touching result or error state.
    Superseded,
}

/// In-flight tokens keyed by client scope. The generation tag lets a
/// completed search remove its own entry without racing a newer one.
#[derive(Default)]
struct InflightTable {
    next_generation: u64,
    tokens: HashMap<String, (u64, CancellationToken)>,
}

struct InflightGuard<'a> {
    searcher: &'a AirportSearcher,
    client: &'a str,
    generation: u64,
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        self.searcher.finish(self.client, self.generation);
    }
}

/// Airport search front: remote ICAO lookup when configured and applicable,
/// local fallback matching otherwise. Within one client scope only the most
/// recently issued search may produce results; issuing a new one cancels the
/// previous in-flight request through its token. Searches from different
/// clients never supersede each other.
pub struct AirportSearcher {
    lookup: Option<Arc<dyn IcaoLookup>>,
    fallback: Vec<Airport>,
    inflight: Mutex<InflightTable>,
}

impl AirportSearcher {
    pub fn new(lookup: Option<Arc<dyn IcaoLookup>>, fallback: Vec<Airport>) -> Self {
        Self {
            lookup,
            fallback,
            inflight: Mutex::new(InflightTable::default()),
        }
    }

    pub fn has_remote(&self) -> bool {
        self.lookup.is_some()
    }

    fn begin(&self, client: &str) -> (u64, CancellationToken) {
        let mut table = self.inflight.lock().unwrap();
        table.next_generation += 1;
        let generation = table.next_generation;
        let token = CancellationToken::new();
        if let Some((_, previous)) = table
            .tokens
            .insert(client.to_string(), (generation, token.clone()))
        {
            previous.cancel();
        }
        (generation, token)
    }

    fn finish(&self, client: &str, generation: u64) {
        let mut table = self.inflight.lock().unwrap();
        if table
            .tokens
            .get(client)
            .is_some_and(|(current, _)| *current == generation)
        {
            table.tokens.remove(client);
        }
    }

    pub async fn search(&self, client: &str, query: &str) -> LookupOutcome {
        let trimmed = query.trim();
        if trimmed.chars().count() < 2 {
            // Not yet searching, not an error
            return LookupOutcome::Results(Vec::new());
        }

        let (generation, token) = self.begin(client);
        // Runs even when the request future is dropped mid-flight, so the
        // table never accumulates dead tokens.
        let _guard = InflightGuard {
            searcher: self,
            client,
            generation,
        };
        self.run(trimmed, &token).await
    }

    async fn run(&self, trimmed: &str, token: &CancellationToken) -> LookupOutcome {
        if let (Some(lookup), true) = (&self.lookup, is_icao_shaped(trimmed)) {
            let icao = trimmed.to_uppercase();
            tokio::select! {
                _ = token.cancelled() => return LookupOutcome::Superseded,
                fetched = lookup.fetch(&icao) => match fetched {
                    Ok(airport) => return LookupOutcome::Results(vec![airport]),
                    Err(err) => {
                        if token.is_cancelled() {
                            return LookupOutcome::Superseded;
                        }
                        tracing::warn!("AirportDB lookup failed, using fallback: {err}");
                    }
                },
            }
        }

        if token.is_cancelled() {
            return LookupOutcome::Superseded;
        }
        let results = search_airports(trimmed, &self.fallback)
            .into_iter()
            .cloned()
            .collect();
        LookupOutcome::Results(results)
    }
}

// ============================================================================
// Route
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
    /// Client-chosen cancellation scope. Requests sharing a `sid` supersede
    /// each other; requests without one get a fresh scope each time.
    sid: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/airports/search", get(search))
}

/// GET /api/airports/search?q=&sid=
async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<Airport>> {
    let scope = params.sid.unwrap_or_else(|| Uuid::new_v4().to_string());
    match state.airports.search(&scope, &params.q).await {
        LookupOutcome::Results(airports) => Json(airports),
        // Superseded by a newer search from the same client; nothing to show
        LookupOutcome::Superseded => Json(Vec::new()),
    }
}
