// Errors raised while wiring the particle field onto a page. Once running,
// the animation itself has no failure path.

use std::fmt;
use wasm_bindgen::JsValue;

#[derive(Clone, Debug, PartialEq)]
pub enum SetupError {
    MissingWindow,
    MissingDocument,
    MissingElement(String),
    NotACanvas(String),
    NoContext2d(String),
    InvalidConfig(String),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::MissingWindow => write!(f, "no global `window` exists"),
            SetupError::MissingDocument => write!(f, "window has no `document`"),
            SetupError::MissingElement(id) => {
                write!(f, "no element with id `{}` in the document", id)
            }
            SetupError::NotACanvas(id) => write!(f, "element `{}` is not a <canvas>", id),
            SetupError::NoContext2d(id) => {
                write!(f, "canvas `{}` did not provide a 2d rendering context", id)
            }
            SetupError::InvalidConfig(reason) => write!(f, "invalid field config: {}", reason),
        }
    }
}

impl std::error::Error for SetupError {}

impl From<SetupError> for JsValue {
    fn from(err: SetupError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_element_names_the_id() {
        let err = SetupError::MissingElement("particles".to_owned());
        assert_eq!(
            err.to_string(),
            "no element with id `particles` in the document"
        );
    }
}
