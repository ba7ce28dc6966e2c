//! User directory implementations

mod graphql;

pub use graphql::GraphQlUserDirectory;
