pub mod track_list;

pub use track_list::TrackList;
