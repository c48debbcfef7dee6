//! HTTP protocol layer module
//!
//! Body streaming, response builders and method classification, decoupled
//! from the file handling itself.

pub mod body;
pub mod method;
pub mod response;

// Re-export commonly used types
pub use body::{ResponseBody, TRANSFER_BUFFER_SIZE};
pub use method::RequestMethod;
pub use response::{build_empty_response, build_file_response, build_no_content_response};
