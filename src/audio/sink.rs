//! `rodio`-backed implementation of the audio seam.
//!
//! The platform stream handle is not `Send`, so a dedicated output thread
//! owns it for the life of the module and connects new sinks to its mixer
//! on request. Decoders are opened on the caller's side (under the module
//! lock, like every other playback I/O) and shipped over; each track then
//! lives as its own `Sink` until the stream that owns it is dropped.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use std::time::Duration;

use rodio::{Decoder, OutputStreamBuilder, Sink, Source};

use crate::library::probe_duration;

use super::output::{AudioError, AudioOutput, AudioStream};

type FileDecoder = Decoder<BufReader<File>>;

enum OutputReq {
    Connect {
        decoder: FileDecoder,
        reply: Sender<Sink>,
    },
}

/// Shared output device; streams opened here all mix into it.
pub struct RodioOutput {
    tx: Sender<OutputReq>,
}

impl RodioOutput {
    /// Open the default output device. The device thread exits (and the
    /// device closes) when this handle is dropped.
    pub fn new() -> Result<Self, AudioError> {
        let (tx, rx) = channel::<OutputReq>();
        let (ready_tx, ready_rx) = channel();

        thread::Builder::new()
            .name("vivace-output".to_string())
            .spawn(move || output_thread(rx, ready_tx))?;

        ready_rx
            .recv()
            .map_err(|_| AudioError::Device("output thread exited".to_string()))?
            .map_err(AudioError::Device)?;

        Ok(Self { tx })
    }
}

fn output_thread(rx: Receiver<OutputReq>, ready: Sender<Result<(), String>>) {
    let mut stream = match OutputStreamBuilder::open_default_stream() {
        Ok(s) => s,
        Err(e) => {
            let _ = ready.send(Err(e.to_string()));
            return;
        }
    };
    // rodio logs to stderr when OutputStream is dropped; noisy for a
    // long-running daemon.
    stream.log_on_drop(false);
    let _ = ready.send(Ok(()));

    // Runs until the owning RodioOutput is dropped and the channel closes.
    while let Ok(req) = rx.recv() {
        match req {
            OutputReq::Connect { decoder, reply } => {
                let sink = Sink::connect_new(stream.mixer());
                sink.append(decoder);
                sink.pause();
                let _ = reply.send(sink);
            }
        }
    }
}

impl AudioOutput for RodioOutput {
    fn open(&self, path: &Path) -> Result<Box<dyn AudioStream>, AudioError> {
        let file = File::open(path)?;

        let decoder = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
            path: path.to_path_buf(),
            source: e,
        })?;

        // Tag properties are the reliable length source (mp3 decoders often
        // cannot tell); fall back to whatever the decoder reports.
        let length = probe_duration(path).or_else(|| decoder.total_duration());

        let (reply_tx, reply_rx) = channel();
        self.tx
            .send(OutputReq::Connect {
                decoder,
                reply: reply_tx,
            })
            .map_err(|_| AudioError::Device("output thread exited".to_string()))?;
        let sink = reply_rx
            .recv()
            .map_err(|_| AudioError::Device("output thread exited".to_string()))?;

        Ok(Box::new(RodioStream { sink, length }))
    }
}

struct RodioStream {
    sink: Sink,
    length: Option<Duration>,
}

impl AudioStream for RodioStream {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn length(&self) -> Option<Duration> {
        self.length
    }

    fn finished(&self) -> bool {
        self.sink.empty()
    }

    fn seek(&mut self, pos: Duration) -> Result<(), AudioError> {
        self.sink.try_seek(pos).map_err(|_| AudioError::Seek(pos))
    }
}

impl Drop for RodioStream {
    fn drop(&mut self) {
        self.sink.stop();
    }
}
