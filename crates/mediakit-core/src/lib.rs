pub mod config;
pub mod logging;

pub mod digest;
pub mod error;
pub mod gallery;
pub mod locator;
pub mod migrate;
pub mod normalize;
pub mod transform;

pub use error::MediaError;
