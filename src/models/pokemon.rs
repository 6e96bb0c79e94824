//! Pokémon catalog models
//!
//! Typed projections of the catalog API's GraphQL objects. Wire names are camelCase.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PokedexError;

/// Lightweight autocomplete projection returned by `searchPokemon`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewItem {
    pub id: i64,
    pub name: String,
    pub image_url: String,
}

impl PreviewItem {
    pub fn new(id: i64, name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_url: image_url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    pub name: String,
    pub is_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub name: String,
    #[serde(default)]
    pub level_learned_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub name: String,
    pub url: String,
}

/// A Pokémon as listed on the catalog pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonSummary {
    pub id: i64,
    pub name: String,
    pub number: i64,
    pub image_url: String,
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

/// Full detail record of a single Pokémon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonDetails {
    pub id: i64,
    pub name: String,
    pub number: i64,
    pub image_url: String,
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub moves: Vec<Move>,
    #[serde(default)]
    pub forms: Vec<Form>,
}

impl PokemonDetails {
    /// Abilities that are not hidden.
    pub fn visible_abilities(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.iter().filter(|a| !a.is_hidden)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonEdge {
    pub node: PokemonSummary,
    pub cursor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One page of the cursor-paginated catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonConnection {
    #[serde(default)]
    pub edges: Vec<PokemonEdge>,
    pub page_info: PageInfo,
    pub total_count: i64,
}

/// Result of the `login` mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// == Sort Order ==
/// Catalog sort order understood by the `pokemons` query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Number,
    Name,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Number => "number",
            SortBy::Name => "name",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = PokedexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "number" | "id" => Ok(SortBy::Number),
            "name" => Ok(SortBy::Name),
            other => Err(PokedexError::InvalidRequest(format!(
                "Unknown sort order '{}'",
                other
            ))),
        }
    }
}
