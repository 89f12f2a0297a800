/// Error types for the mandi dashboard
use thiserror::Error;

/// Failure while reading from the document store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Store could not be reached or rejected the query
    #[error("document store unavailable: {0}")]
    StoreUnavailable(String),

    /// Store answered without any matching documents
    #[error("document store returned no documents")]
    EmptyResult,

    /// Store answered with a body that could not be decoded
    #[error("malformed store response: {0}")]
    MalformedResponse(String),
}

/// A single document that cannot be turned into a usable record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Invalid location data for mandi {name}: {reason}")]
    MalformedRecord { name: String, reason: String },
}

/// Failure while driving the chart or map libraries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Expected DOM node is absent
    #[error("render target not found: {0}")]
    RenderTargetMissing(String),

    /// JS glue or third-party library is not loaded
    #[error("JS library not available: {0}")]
    LibraryUnavailable(String),

    /// Render payload could not be serialized
    #[error("failed to encode render payload: {0}")]
    Encode(String),

    /// JS call threw
    #[error("JS call failed: {0}")]
    Js(String),
}
