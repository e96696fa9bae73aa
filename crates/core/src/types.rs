/// Backend primary keys are plain integers.
pub type DbId = i64;

/// Extra properties the backend sends that this crate does not model.
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;
