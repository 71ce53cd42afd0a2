//! GraphQL query definitions for the upstream catalog API.

use graphql_client::GraphQLQuery;

// Scalar types for the mesh GraphQL schema.
// Must be defined in the same module where the GraphQLQuery derive is used.
// Note: these MUST match the schema scalar names exactly.
type DateTime = String;
type Decimal = String;
#[allow(clippy::upper_case_acronyms)]
type URL = String;
#[allow(clippy::upper_case_acronyms)]
type HTML = String;

// Product queries
#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/upstream/schema.graphql",
    query_path = "graphql/upstream/queries/products.graphql",
    response_derives = "Debug, Clone"
)]
pub struct GetProducts;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/upstream/schema.graphql",
    query_path = "graphql/upstream/queries/products.graphql",
    response_derives = "Debug, Clone"
)]
pub struct GetProduct;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/upstream/schema.graphql",
    query_path = "graphql/upstream/queries/products.graphql",
    response_derives = "Debug, Clone"
)]
pub struct GetProductIds;

// Newsletter mutation
#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/upstream/schema.graphql",
    query_path = "graphql/upstream/queries/newsletter.graphql",
    response_derives = "Debug, Clone"
)]
pub struct NewsletterSignup;
