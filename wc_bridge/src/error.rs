use crate::props::TagKey;

/// Errors surfaced while rendering a bridged element.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum BridgeError {
    /// The tag identifier prop is absent, empty or has an unsupported type.
    #[error("web component props require a non-empty `{key}` tag identifier (a tag name string or a component type)")]
    MissingTagIdentifier { key: TagKey },
}

impl From<BridgeError> for wasm_bindgen::JsValue {
    fn from(err: BridgeError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
