use crate::{http::ApiError, model::Track};

pub type RequestId = u64;

#[derive(Debug)]
pub enum Event {
    // Fetch results, tagged with the request that produced them
    SongsFetched(RequestId, Vec<Track>),
    FetchError(RequestId, ApiError),

    // Preview playback
    PreviewStarted(u64),
    PreviewEnded(u64),
    PreviewFailed(u64, String),
}
