use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protoc exited with {status}: {stderr}")]
    Protoc {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("descriptor set does not parse: {0}")]
    DescriptorDecode(#[from] prost::DecodeError),

    #[error("descriptor set contains no file entry")]
    EmptyDescriptorSet,

    #[error("field \"{field}\" has unsupported type {kind}")]
    UnsupportedType { field: String, kind: String },

    #[error("unsupported construct: {0}")]
    UnsupportedConstruct(String),

    #[error("field \"{field}\" has number {number}, expected a positive integer")]
    FieldNumberOutOfRange { field: String, number: i32 },

    #[error("enum value \"{value}\" has number {number}, expected an unsigned integer")]
    EnumValueOutOfRange { value: String, number: i32 },

    #[error("field \"{field}\" references type {type_name}, which is not declared in this file")]
    Unresolved { field: String, type_name: String },
}
