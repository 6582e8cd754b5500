use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid value: {message}")]
    InvalidValue { message: String },

    #[cfg(feature = "json")]
    #[error("failed to parse VRM extension JSON: {message}")]
    JsonParse { message: String },

    #[cfg(feature = "json")]
    #[error("unsupported VRMC_springBone specVersion: {value}")]
    JsonSpecVersion { value: String },

    #[cfg(feature = "glb")]
    #[error("failed to parse GLB container: {message}")]
    GlbParse { message: String },

    #[cfg(feature = "glb")]
    #[error("unsupported GLB container version: {value}")]
    GlbVersion { value: u32 },
}
