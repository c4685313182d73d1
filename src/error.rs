//! Errors raised at the JavaScript boundary.
//!
//! The engines themselves never fail: degenerate input is clamped, dropped or
//! ignored. Only decoding host objects and encoding results can go wrong.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid {what}: {message}")]
    InvalidInput { what: &'static str, message: String },
    #[error("failed to encode result: {message}")]
    Encode { message: String },
}

impl LayoutError {
    pub fn invalid(what: &'static str, err: impl std::fmt::Display) -> Self {
        LayoutError::InvalidInput {
            what,
            message: err.to_string(),
        }
    }

    pub fn encode(err: impl std::fmt::Display) -> Self {
        LayoutError::Encode {
            message: err.to_string(),
        }
    }
}

impl From<LayoutError> for JsValue {
    fn from(err: LayoutError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LayoutError::invalid("node list", "missing field `id`");
        assert_eq!(err.to_string(), "invalid node list: missing field `id`");

        let err = LayoutError::encode("map key must be a string");
        assert_eq!(err.to_string(), "failed to encode result: map key must be a string");
    }
}
