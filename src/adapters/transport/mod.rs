pub mod record_stream;

pub use record_stream::RecordStream;
