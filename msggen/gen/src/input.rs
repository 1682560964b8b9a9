//! Loading serialized service models.
//!
//! A [`Service`] can be written out as JSON (fields are tagged by `kind`)
//! and fed back to the generator with `msggen --input`. Parse failures
//! report the JSON path of the offending node.

use std::fs;
use std::path::Path;

use msggen_model::Service;
use tracing::debug;

use crate::errors::GeneratorError;

/// Reads and parses a service model from a JSON file.
///
/// ## Errors
///
/// Returns `GeneratorError::LoadError` if the file cannot be read or does
/// not describe a valid service.
pub fn load_service(path: &Path) -> Result<Service, GeneratorError> {
    let origin = path.display().to_string();
    let source = fs::read_to_string(path).map_err(|e| GeneratorError::LoadError {
        path: origin.clone(),
        message: e.to_string(),
    })?;

    let service = parse_service(&source, &origin)?;
    debug!(path = %origin, methods = service.methods.len(), "Loaded service model");
    Ok(service)
}

/// Parses a service model from JSON text.
///
/// `origin` names the source in error messages.
///
/// ## Errors
///
/// Returns `GeneratorError::LoadError` carrying the JSON path at which
/// deserialization failed.
pub fn parse_service(source: &str, origin: &str) -> Result<Service, GeneratorError> {
    let de = &mut serde_json::Deserializer::from_str(source);
    serde_path_to_error::deserialize::<_, Service>(de).map_err(|err| {
        let json_path = err.path().to_string();
        GeneratorError::LoadError {
            path: origin.to_string(),
            message: format!("at JSON path {json_path}: {}", err.into_inner()),
        }
    })
}
