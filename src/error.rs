// error.rs - Host-facing errors
//
// Rendering degradations (no accelerated context, broken blur, low fps) are
// not errors; they select cheaper paths. These variants cover bad input from
// the embedding page.

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("viewport {width}x{height} is not drawable")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("title mask is {got} bytes, expected {expected} ({width}x{height})")]
    InvalidTitleMask {
        width: u32,
        height: u32,
        expected: usize,
        got: usize,
    },

    #[error("scene has been destroyed")]
    Destroyed,
}

pub type SceneResult<T> = Result<T, SceneError>;

impl From<SceneError> for wasm_bindgen::JsValue {
    fn from(err: SceneError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
