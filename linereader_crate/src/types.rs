pub use linereader_core::parse::ParseNode;
pub use linereader_core::{Line, LineSink, ReaderVersion, VersionMetadata};
