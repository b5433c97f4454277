pub mod transcript_csv;
pub mod transcript_json;
