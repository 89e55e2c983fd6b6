use std::{
    io::Cursor,
    sync::{
        Arc,
        Mutex, MutexGuard,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    thread,
    time::Duration,
};

use flume::Sender;
use rodio::{Decoder, OutputStream, Sink};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::{
    audio::{error::AudioError, util::construct_sink},
    event::events::Event,
    model::Track,
};

const NO_TRACK: u64 = 0;

/// Orders playback changes. Every `play` and `stop` advances the generation
/// under the lock, and a decoded clip is only appended while its generation
/// is still current, so a stop can never interleave with a pending append.
#[derive(Clone, Default)]
struct PlaybackGate {
    generation: Arc<Mutex<u64>>,
}

impl PlaybackGate {
    fn advance<R>(&self, f: impl FnOnce(u64) -> R) -> R {
        let mut generation = self.lock();
        *generation += 1;
        f(*generation)
    }

    fn run_if_current<R>(&self, generation: u64, f: impl FnOnce() -> R) -> Option<R> {
        let current = self.lock();
        (*current == generation).then(f)
    }

    fn lock(&self) -> MutexGuard<'_, u64> {
        self.generation.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Plays the short catalog preview clip of one track at a time.
pub struct PreviewPlayer {
    _stream: OutputStream,
    sink: Arc<Sink>,
    client: reqwest::Client,
    event_tx: Sender<Event>,

    pub is_muted: bool,

    current: Arc<AtomicU64>,
    is_playing: Arc<AtomicBool>,
    gate: PlaybackGate,
    task: Option<JoinHandle<()>>,
}

impl PreviewPlayer {
    pub fn new(client: reqwest::Client, event_tx: Sender<Event>) -> Result<Self, AudioError> {
        let (stream, sink) = construct_sink()?;

        let player = Self {
            _stream: stream,
            sink: Arc::new(sink),
            client,
            event_tx,
            is_muted: false,
            current: Arc::new(AtomicU64::new(NO_TRACK)),
            is_playing: Arc::new(AtomicBool::new(false)),
            gate: PlaybackGate::default(),
            task: None,
        };

        let sink = player.sink.clone();
        let playing = player.is_playing.clone();
        let current = player.current.clone();
        let event_tx = player.event_tx.clone();

        thread::spawn(move || {
            loop {
                if playing.load(Ordering::Relaxed) && sink.empty() {
                    playing.store(false, Ordering::Relaxed);
                    let track_id = current.swap(NO_TRACK, Ordering::SeqCst);
                    if event_tx.send(Event::PreviewEnded(track_id)).is_err() {
                        break;
                    }
                }
                thread::sleep(Duration::from_millis(1000 / 8));
            }
        });

        Ok(player)
    }

    pub fn play(&mut self, track: &Track) -> Result<(), AudioError> {
        let url = track
            .preview()
            .ok_or(AudioError::NoPreview(track.track_id))?
            .to_string();

        self.stop();

        let track_id = track.track_id;
        let generation = self.gate.advance(|generation| {
            self.current.store(track_id, Ordering::SeqCst);
            generation
        });

        let gate = self.gate.clone();
        let client = self.client.clone();
        let sink = self.sink.clone();
        let playing = self.is_playing.clone();
        let event_tx = self.event_tx.clone();

        self.task = Some(tokio::spawn(async move {
            let outcome = async {
                let bytes = client
                    .get(&url)
                    .send()
                    .await?
                    .error_for_status()?
                    .bytes()
                    .await?;
                debug!("Downloaded {} byte preview for {}", bytes.len(), track_id);

                let started = tokio::task::spawn_blocking(move || -> Result<bool, AudioError> {
                    let byte_len = bytes.len() as u64;
                    let decoder = Decoder::builder()
                        .with_data(Cursor::new(bytes.to_vec()))
                        .with_byte_len(byte_len)
                        .with_hint("m4a")
                        .build()
                        .map_err(|e| AudioError::DecodingError(e.to_string()))?;

                    let started = gate
                        .run_if_current(generation, || {
                            sink.append(decoder);
                            sink.play();
                            playing.store(true, Ordering::Relaxed);
                        })
                        .is_some();
                    Ok(started)
                })
                .await
                .map_err(|e| AudioError::DecodingError(e.to_string()))??;

                Ok::<_, AudioError>(started)
            };

            let event = match outcome.await {
                Ok(true) => Event::PreviewStarted(track_id),
                Ok(false) => return,
                Err(e) => Event::PreviewFailed(track_id, e.to_string()),
            };
            let _ = event_tx.send(event);
        }));

        Ok(())
    }

    /// Stops playback and rewinds, so the next `play` starts from the top.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.gate.advance(|_| {
            self.is_playing.store(false, Ordering::Relaxed);
            self.current.store(NO_TRACK, Ordering::SeqCst);
            self.sink.clear();
        });
    }

    pub fn toggle_mute(&mut self) {
        self.is_muted = !self.is_muted;
        self.sink.set_volume(if self.is_muted { 0.0 } else { 1.0 });
    }

    pub fn current_track_id(&self) -> Option<u64> {
        match self.current.load(Ordering::SeqCst) {
            NO_TRACK => None,
            id => Some(id),
        }
    }
}

impl Drop for PreviewPlayer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn only_the_latest_generation_runs() {
        let gate = PlaybackGate::default();
        let first = gate.advance(|g| g);
        let second = gate.advance(|g| g);

        assert_eq!(second, first + 1);
        assert_eq!(gate.run_if_current(first, || "stale"), None);
        assert_eq!(gate.run_if_current(second, || "fresh"), Some("fresh"));
    }

    #[test]
    fn stop_waits_for_a_pending_append() {
        let gate = PlaybackGate::default();
        let generation = gate.advance(|g| g);
        let (entered_tx, entered_rx) = mpsc::channel();
        let appended = Arc::new(AtomicBool::new(false));

        let worker = {
            let gate = gate.clone();
            let appended = appended.clone();
            thread::spawn(move || {
                gate.run_if_current(generation, || {
                    entered_tx.send(()).unwrap();
                    thread::sleep(Duration::from_millis(50));
                    appended.store(true, Ordering::SeqCst);
                })
            })
        };

        entered_rx.recv().unwrap();
        let seen_by_stop = gate.advance(|_| appended.load(Ordering::SeqCst));

        assert!(seen_by_stop);
        assert_eq!(worker.join().unwrap(), Some(()));
        assert_eq!(gate.run_if_current(generation, || ()), None);
    }
}
