//! In-process stand-in for the upstream catalog API.
//!
//! Answers the four catalog operations from a fixed five-Pokémon list and
//! echoes anything else back together with the Authorization header it saw.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use pokedex::HttpExecutor;
use serde_json::{json, Value};

pub const VALID_PASSWORD: &str = "pikapika";
pub const ISSUED_TOKEN: &str = "token-123";

const CATALOG: [(i64, &str); 5] = [
    (1, "bulbasaur"),
    (4, "charmander"),
    (7, "squirtle"),
    (25, "pikachu"),
    (26, "raichu"),
];

/// Counts the operations the fake upstream has served.
#[derive(Debug, Clone, Default)]
pub struct Upstream {
    searches: Arc<AtomicUsize>,
    pages: Arc<AtomicUsize>,
}

impl Upstream {
    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn pages(&self) -> usize {
        self.pages.load(Ordering::SeqCst)
    }
}

/// Binds the fake upstream on an ephemeral loopback port.
pub async fn spawn_upstream() -> (String, Upstream) {
    let upstream = Upstream::default();
    let app = Router::new()
        .route("/graphql", post(graphql))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/graphql", addr), upstream)
}

pub fn executor(url: &str) -> HttpExecutor {
    HttpExecutor::new(url, Duration::from_secs(5)).unwrap()
}

fn image_url(id: i64) -> String {
    format!("https://img.example/{}.png", id)
}

async fn graphql(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let query = body["query"].as_str().unwrap_or_default();
    let variables = &body["variables"];

    if query.contains("SearchPokemon") {
        upstream.searches.fetch_add(1, Ordering::SeqCst);
        let term = variables["query"].as_str().unwrap_or_default().to_lowercase();
        let hits: Vec<Value> = CATALOG
            .iter()
            .filter(|(_, name)| name.contains(&term))
            .map(|(id, name)| json!({ "id": id, "name": name, "imageUrl": image_url(*id) }))
            .collect();
        return (StatusCode::OK, Json(json!({ "data": { "searchPokemon": hits } })));
    }

    if query.contains("GetPokemons") {
        upstream.pages.fetch_add(1, Ordering::SeqCst);
        let first = variables["first"].as_u64().unwrap_or(20) as usize;
        let start = variables["after"]
            .as_str()
            .and_then(|cursor| cursor.parse::<usize>().ok())
            .map(|index| index + 1)
            .unwrap_or(0);

        let mut ordered = CATALOG.to_vec();
        if variables["sortBy"] == "name" {
            ordered.sort_by_key(|(_, name)| *name);
        }

        let edges: Vec<Value> = ordered
            .iter()
            .enumerate()
            .skip(start)
            .take(first)
            .map(|(index, (id, name))| {
                json!({
                    "node": {
                        "id": id,
                        "name": name,
                        "number": id,
                        "imageUrl": image_url(*id),
                        "abilities": [],
                    },
                    "cursor": index.to_string(),
                })
            })
            .collect();
        let end = start + edges.len();
        let end_cursor = end.checked_sub(1).filter(|_| !edges.is_empty()).map(|i| i.to_string());

        return (
            StatusCode::OK,
            Json(json!({
                "data": {
                    "pokemons": {
                        "edges": edges,
                        "pageInfo": { "hasNextPage": end < ordered.len(), "endCursor": end_cursor },
                        "totalCount": ordered.len(),
                    }
                }
            })),
        );
    }

    if query.contains("Login") {
        let payload = if variables["password"] == VALID_PASSWORD {
            json!({ "success": true, "token": ISSUED_TOKEN, "message": null })
        } else {
            json!({ "success": false, "token": null, "message": "Invalid credentials" })
        };
        return (StatusCode::OK, Json(json!({ "data": { "login": payload } })));
    }

    if query.contains("fail") {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "errors": [{ "message": "catalog unavailable" }] })),
        );
    }

    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    (
        StatusCode::OK,
        Json(json!({ "data": { "echo": body, "authorization": authorization } })),
    )
}
