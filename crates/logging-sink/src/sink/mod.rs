mod file;
mod memory;
mod writer;

pub use file::LogFile;
pub use memory::{MemorySink, Record};
pub use writer::WriterSink;
