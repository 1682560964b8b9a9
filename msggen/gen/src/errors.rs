//! Error types for the msggen generator.

use thiserror::Error;

/// Errors that can occur while loading, validating or rendering a service.
///
/// None of these are recoverable within a run: a partially generated file
/// is never written.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to read or parse a serialized service model
    #[error("Failed to load service model from '{path}': {message}")]
    LoadError { path: String, message: String },

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// An override suppresses a field the schema marks as required.
    ///
    /// Dropping it would produce a type that can never deserialize a valid
    /// message, so generation stops instead.
    #[error("Override suppresses required field at path '{path}'")]
    SuppressedRequiredField {
        /// Path of the suppressed field.
        path: String,
    },

    /// An override replaces a method's top-level payload type.
    ///
    /// The dispatch enums and sections refer to the payload by its schema
    /// type name, so the payload must always be declared.
    #[error("Override replaces top-level payload at path '{path}'")]
    OverriddenPayload { path: String },

    /// A schema name cannot be turned into a Rust identifier.
    #[error("Cannot derive a Rust identifier from '{name}' at path '{path}': {reason}")]
    InvalidIdentifier {
        name: String,
        path: String,
        reason: String,
    },

    /// A resolved target type does not parse as a Rust type.
    #[error("Invalid target type '{type_name}' at path '{path}': {reason}")]
    InvalidTypeName {
        type_name: String,
        path: String,
        reason: String,
    },

    /// The field model violates a structural rule (empty type name,
    /// zero-dimensional array, ...).
    #[error("Invalid field model at path '{path}': {reason}")]
    InvalidModel { path: String, reason: String },

    /// Two methods share a name, which would collide in the dispatch enums.
    #[error("Duplicate method name '{name}'")]
    DuplicateMethod { name: String },

    /// Two fields in the same tree share a path, making overrides ambiguous.
    #[error("Duplicate field path '{path}' in {scope}")]
    DuplicatePath { path: String, scope: String },
}
