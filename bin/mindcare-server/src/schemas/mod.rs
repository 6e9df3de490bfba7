//! Request / response DTO (Data Transfer Object) types.
//!
//! These types are used by Axum handlers for JSON (de)serialisation and are
//! annotated with [`utoipa`] attributes to generate an OpenAPI 3.0 schema.
//! Field names follow the camelCase wire format the web client already uses.

pub mod assistant;
pub mod wellness;
