use rodio::{
    OutputStream, OutputStreamBuilder, Sink,
    cpal::{default_host, traits::HostTrait},
};

use crate::audio::error::AudioError;

pub fn construct_sink() -> Result<(OutputStream, Sink), AudioError> {
    let device = default_host()
        .default_output_device()
        .ok_or_else(|| AudioError::DeviceError("no default output device".to_string()))?;

    let stream = OutputStreamBuilder::default()
        .with_device(device)
        .open_stream_or_fallback()
        .map_err(|e| AudioError::DeviceError(e.to_string()))?;
    let sink = Sink::connect_new(stream.mixer());

    Ok((stream, sink))
}
