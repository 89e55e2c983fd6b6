pub mod mood;
pub mod track;

pub use mood::Mood;
pub use track::Track;
