//! GraphQL client for the Pokémon catalog API
//!
//! `PokedexClient` wraps any `Executor` with typed operations.

pub mod documents;
mod executor;

#[cfg(test)]
pub(crate) mod testing;

pub use executor::{Executor, HttpExecutor};

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{PokedexError, Result};
use crate::models::{
    AuthPayload, GraphQlRequest, PokemonConnection, PokemonDetails, PreviewItem, SortBy,
};

/// Message used when the API rejects a login without saying why.
const LOGIN_FAILED: &str = "Login failed";

// == Response Shapes ==
#[derive(Deserialize)]
struct SearchData {
    #[serde(rename = "searchPokemon", default)]
    search_pokemon: Option<Vec<PreviewItem>>,
}

#[derive(Deserialize)]
struct PokemonsData {
    pokemons: PokemonConnection,
}

#[derive(Deserialize)]
struct PokemonData {
    #[serde(default)]
    pokemon: Option<PokemonDetails>,
}

#[derive(Deserialize)]
struct LoginData {
    login: AuthPayload,
}

// == Pokedex Client ==
/// Typed operations of the catalog API over a shared executor.
pub struct PokedexClient<E> {
    executor: Arc<E>,
}

impl<E> Clone for PokedexClient<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<E> fmt::Debug for PokedexClient<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PokedexClient").finish_non_exhaustive()
    }
}

impl<E: Executor> PokedexClient<E> {
    pub fn new(executor: E) -> Self {
        Self::from_shared(Arc::new(executor))
    }

    pub fn from_shared(executor: Arc<E>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &Arc<E> {
        &self.executor
    }

    // == Search ==
    /// Autocomplete lookup. A null result list is treated as empty.
    pub async fn search_pokemon(&self, query: &str) -> Result<Vec<PreviewItem>> {
        let request =
            GraphQlRequest::new(documents::SEARCH_POKEMON).variable("query", query);

        let data: SearchData = self.executor.execute(request).await?.into_data()?;
        let results = data.search_pokemon.unwrap_or_default();

        debug!(query, count = results.len(), "searchPokemon resolved");
        Ok(results)
    }

    // == List ==
    /// Fetches one catalog page. Unset arguments are left to server defaults.
    pub async fn pokemons(
        &self,
        first: Option<u32>,
        after: Option<&str>,
        sort_by: Option<SortBy>,
    ) -> Result<PokemonConnection> {
        let request = GraphQlRequest::new(documents::GET_POKEMONS)
            .variable("first", first)
            .variable("after", after)
            .variable("sortBy", sort_by)
            .without_null_variables();

        let data: PokemonsData = self.executor.execute(request).await?.into_data()?;
        Ok(data.pokemons)
    }

    // == Details ==
    /// Fetches one Pokémon, `None` if the API does not know the id.
    pub async fn pokemon(&self, id: i64) -> Result<Option<PokemonDetails>> {
        let request = GraphQlRequest::new(documents::GET_POKEMON_DETAILS).variable("id", id);

        let data: PokemonData = self.executor.execute(request).await?.into_data()?;
        Ok(data.pokemon)
    }

    // == Login ==
    /// Exchanges credentials for a bearer token.
    ///
    /// Storing the token is left to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(PokedexError::InvalidRequest(
                "Username and password are required".to_string(),
            ));
        }

        let request = GraphQlRequest::new(documents::LOGIN)
            .variable("username", username)
            .variable("password", password);

        let response = self.executor.execute(request).await?;
        if let Some(first) = response.errors.first() {
            let message = if first.message.is_empty() {
                LOGIN_FAILED.to_string()
            } else {
                first.message.clone()
            };
            return Err(PokedexError::Auth(message));
        }

        let payload = response
            .into_data::<LoginData>()
            .map_err(|_| PokedexError::Auth(LOGIN_FAILED.to_string()))?
            .login;

        match payload.token {
            Some(token) if payload.success && !token.is_empty() => {
                info!(username, "login succeeded");
                Ok(token)
            }
            _ => Err(PokedexError::Auth(
                payload.message.unwrap_or_else(|| LOGIN_FAILED.to_string()),
            )),
        }
    }
}
