pub mod inference;
pub mod payload;
pub mod preprocess;
pub mod tensor;

pub use inference::{Detection, DetectionPolicy, DetectionScore, InferenceAdapter};
pub use payload::{encode, Payload, PAYLOAD_LEN, PAYLOAD_TYPE_TAG};
pub use preprocess::{crop_rect, FramePreprocessor};
pub use tensor::TensorBuffer;
