pub mod mood_selector;
pub mod spinner;
pub mod track_card;
