pub mod chunk_executor;
pub mod chunk_merger;
pub mod chunk_planner;
pub mod chunk_result;
pub mod error;
pub mod infrastructure;
pub mod transcribe_use_case;
