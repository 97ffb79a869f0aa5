// crates/soundtrim-media/src/worker.rs
//
// MediaWorker: job dispatch for the ffmpeg collaborators.
// All public API that consumers call lives here.
//
// Each job runs on its own thread and reports through the shared result
// channel; the caller drains `rx` on its own schedule. Nothing here blocks
// the caller — when the channel fills, backpressure lands on the job thread,
// not the consumer.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use uuid::Uuid;

use soundtrim_core::media_types::MediaResult;
use soundtrim_core::trim::Selection;

use crate::analyze::analyze_rms;
use crate::convert::convert_to_audio;
use crate::export::export_clip;
use crate::probe::probe_duration;

pub struct MediaWorker {
    /// Shared result channel: probes, progress, RMS levels, export results.
    pub rx: Receiver<MediaResult>,
    tx:     Sender<MediaResult>,

    /// Per-job cancel flags, keyed by job id so cancellation is targeted.
    /// Entries are inserted by `convert_to_audio` and removed when the job
    /// thread exits or `cancel` fires.
    cancels: Arc<Mutex<HashMap<Uuid, Arc<AtomicBool>>>>,
}

impl MediaWorker {
    pub fn new() -> Self {
        let (tx, rx) = bounded(512);
        Self {
            rx,
            tx,
            cancels: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Probe `path` for its duration. Result: `Duration` or `Error`.
    pub fn probe(&self, path: PathBuf) -> Uuid {
        let id = Uuid::new_v4();
        let tx = self.tx.clone();
        thread::spawn(move || {
            probe_duration(&path, id, &tx);
        });
        id
    }

    /// Extract `path`'s audio track to an MP3, streaming `ConvertProgress`
    /// along the way. Probes the duration on the job thread first (sending
    /// `Duration` as a side effect) so progress has a denominator.
    ///
    /// Terminal result: `AudioPath`, or `Error` ("cancelled" when aborted).
    pub fn convert_to_audio(&self, path: PathBuf) -> Uuid {
        let id     = Uuid::new_v4();
        let tx     = self.tx.clone();
        let cancel = Arc::new(AtomicBool::new(false));
        self.cancels.lock().unwrap().insert(id, Arc::clone(&cancel));

        let cancels = Arc::clone(&self.cancels);
        thread::spawn(move || {
            let total_secs = probe_duration(&path, id, &tx);
            convert_to_audio(&path, id, total_secs, &cancel, &tx);
            cancels.lock().unwrap().remove(&id);
        });
        id
    }

    /// Measure per-frame RMS levels of an audio file.
    /// Result: `RmsLevels` or `Error`.
    pub fn analyze(&self, path: PathBuf) -> Uuid {
        let id = Uuid::new_v4();
        let tx = self.tx.clone();
        thread::spawn(move || {
            analyze_rms(&path, id, &tx);
        });
        id
    }

    /// Stream-copy the selected range of `path` into `out_dir`.
    /// Result: `ExportDone` or `Error`.
    pub fn export(&self, path: PathBuf, out_dir: PathBuf, selection: Selection) -> Uuid {
        let id = Uuid::new_v4();
        let tx = self.tx.clone();
        thread::spawn(move || {
            export_clip(&path, &out_dir, id, &selection, &tx);
        });
        id
    }

    /// Request a running job to stop. Unknown or already-finished ids are a
    /// no-op. The job observes its flag at progress-line granularity and
    /// reports `Error { msg: "cancelled" }` on exit.
    pub fn cancel(&self, id: Uuid) {
        if let Some(flag) = self.cancels.lock().unwrap().remove(&id) {
            flag.store(true, Ordering::Relaxed);
        }
    }
}

impl Default for MediaWorker {
    fn default() -> Self {
        Self::new()
    }
}
