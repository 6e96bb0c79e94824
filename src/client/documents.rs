//! GraphQL operation documents sent to the catalog API.

/// Autocomplete lookup: `searchPokemon(query: String!)`.
pub const SEARCH_POKEMON: &str = r#"query SearchPokemon($query: String!) {
  searchPokemon(query: $query) {
    id
    name
    imageUrl
  }
}"#;

/// One catalog page: `pokemons(first, after, sortBy)`.
pub const GET_POKEMONS: &str = r#"query GetPokemons($first: Int, $after: String, $sortBy: String) {
  pokemons(first: $first, after: $after, sortBy: $sortBy) {
    edges {
      node {
        id
        name
        number
        imageUrl
        abilities {
          name
          isHidden
        }
      }
      cursor
    }
    pageInfo {
      hasNextPage
      endCursor
    }
    totalCount
  }
}"#;

/// Detail record: `pokemon(id: Int!)`.
pub const GET_POKEMON_DETAILS: &str = r#"query GetPokemonDetails($id: Int!) {
  pokemon(id: $id) {
    id
    name
    number
    imageUrl
    abilities {
      name
      isHidden
    }
    moves {
      name
      levelLearnedAt
    }
    forms {
      name
      url
    }
  }
}"#;

/// Credential exchange: `login(username, password)`.
pub const LOGIN: &str = r#"mutation Login($username: String!, $password: String!) {
  login(username: $username, password: $password) {
    success
    token
    message
  }
}"#;
