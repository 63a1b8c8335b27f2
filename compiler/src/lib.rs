//! pblite-compiler
//!
//! Translates a `.proto` schema into Rust definitions that decode pblite
//! payloads (positional JSON arrays) through the `pblite` runtime crate:
//!  1) A loader that shells out to `protoc` for a binary descriptor set and
//!     lifts the first file entry into the `pblite-schema` model,
//!  2) A verifier (reference resolution, message-cycle analysis),
//!  3) Name sanitization and type mapping passes,
//!  4) Code generation (`generate` → `String`),
//!  5) Error types (`CodegenError`).

pub mod error;
pub mod loader;
pub mod sanitize;
pub mod typemap;
pub mod verifier;
pub mod gen_rust;

pub use error::CodegenError;
pub use gen_rust::generate;
pub use loader::load_schema;
pub use verifier::verify_schema;
