//! Authenticated Epigos client.
//!
//! The client owns credentials and the transport; models borrow a cheap clone
//! of it. Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod normalize;

pub use builder::{ClientConfig, EpigosClientBuilder};
pub use self::core::{
    sdk_identifier, ApiRequest, EpigosClient, API_KEY_HEADER, CLIENT_SDK_HEADER,
    DEFAULT_BASE_URL, REQUEST_ID_HEADER,
};
pub use normalize::normalize;
