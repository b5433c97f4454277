pub mod recognizer_pool;
pub mod speech_recognizer;
pub mod word_alignment;
