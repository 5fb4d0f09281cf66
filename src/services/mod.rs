// Service exports
pub mod file;
pub mod http;
pub mod source;

pub use file::FilePilotSource;
pub use http::HttpPilotSource;
pub use source::{build_source, PilotSource, SourceError};
