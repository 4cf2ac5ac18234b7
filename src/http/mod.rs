//! HTTP protocol layer module
//!
//! Response builders, CORS headers and the PROPFIND stub, decoupled from
//! request dispatch and storage.

pub mod cors;
pub mod propfind;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_401_response, build_501_response, build_created_response, build_error_response,
    build_file_response, build_json_response, build_multistatus_response, build_options_response,
};
