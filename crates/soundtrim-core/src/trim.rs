// crates/soundtrim-core/src/trim.rs
//
// Range selection over a bounded pixel track.
//
// Two boundary markers (Low, High) are dragged continuously in pixel space
// and quantized to step-aligned domain values only when a drag ends. The
// split is deliberate:
//
//   update_drag — runs at input-event rate (dozens of calls per second).
//                 Clamps one position field and returns. O(1), no
//                 allocation, never quantizes, so visual dragging stays
//                 smooth and the discrete value cannot jitter mid-gesture.
//   end_drag    — quantizes BOTH markers against the shared track and
//                 returns the Selection. Re-quantizing the marker that did
//                 not move guarantees the emitted pair is self-consistent.
//
// There is no stored "committed" state. A Selection is recomputed at every
// commit from the live marker positions, never cached.

use serde::{Deserialize, Serialize};

use crate::error::SoundtrimError;

/// Minimum pixel gap between the two markers. A selection can never be
/// dragged narrower than this, and a track narrower than this cannot host
/// two markers at all (rejected by `TrimController::new`).
pub const MIN_SEPARATION_PX: f64 = 50.0;

// ── Track ─────────────────────────────────────────────────────────────────────

/// The bounded 1-D domain a selection is made over, plus the pixel extent it
/// is projected onto. Immutable for the lifetime of one selection session.
///
/// `min`/`max`/`step` are in domain units (for soundtrim: RMS sample
/// indices); `width` is in pixels. Fields are private so every `Track` in
/// existence satisfies the constructor's checks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    min:   f64,
    max:   f64,
    step:  f64,
    width: f64,
}

impl Track {
    /// Validates geometry: `max > min`, `step > 0`, `width > 0`.
    ///
    /// ```
    /// use soundtrim_core::trim::Track;
    /// assert!(Track::new(0.0, 100.0, 1.0, 1000.0).is_ok());
    /// assert!(Track::new(100.0, 0.0, 1.0, 1000.0).is_err());
    /// assert!(Track::new(0.0, 100.0, 0.0, 1000.0).is_err());
    /// ```
    pub fn new(min: f64, max: f64, step: f64, width: f64) -> Result<Self, SoundtrimError> {
        if !(max > min) {
            return Err(SoundtrimError::InvalidArgument(format!(
                "track domain [{min}, {max}] is empty or inverted"
            )));
        }
        if !(step > 0.0) {
            return Err(SoundtrimError::InvalidArgument(format!(
                "track step {step} must be positive"
            )));
        }
        if !(width > 0.0) {
            return Err(SoundtrimError::InvalidArgument(format!(
                "track width {width}px must be positive"
            )));
        }
        Ok(Self { min, max, step, width })
    }

    pub fn min(&self)   -> f64 { self.min }
    pub fn max(&self)   -> f64 { self.max }
    pub fn step(&self)  -> f64 { self.step }
    pub fn width(&self) -> f64 { self.width }
}

// ── Quantizer ─────────────────────────────────────────────────────────────────

/// Snap a pixel position on `track` to a step-aligned domain value.
///
/// Normalizes `position / width` to a fraction of the track, scales by the
/// number of steps spanning the domain, and takes the FLOOR of the step
/// count. Flooring is the tie-break: a marker only counts a step once fully
/// crossed, so the selected range is never larger than what the marker
/// visually covers.
///
/// The result is always `min + k * step` for some integer `k >= 0`, and
/// always within `[min, max]`.
///
/// `position` outside `[0, width]` is a caller bug and returns
/// `InvalidArgument` — callers clamp before quantizing (as `TrimController`
/// does); this function never clamps silently.
///
/// ```
/// use soundtrim_core::trim::{quantize, Track};
/// let track = Track::new(0.0, 100.0, 1.0, 1000.0).unwrap();
/// assert_eq!(quantize(0.0, &track).unwrap(),    0.0);
/// assert_eq!(quantize(40.0, &track).unwrap(),   4.0);
/// assert_eq!(quantize(1000.0, &track).unwrap(), 100.0);
/// ```
pub fn quantize(position: f64, track: &Track) -> Result<f64, SoundtrimError> {
    if !(0.0..=track.width).contains(&position) {
        return Err(SoundtrimError::InvalidArgument(format!(
            "position {position}px outside track [0, {}]",
            track.width
        )));
    }

    let steps_in_range = (track.max - track.min) / track.step;
    let whole_steps    = (position / track.width * steps_in_range).floor();
    Ok(track.min + whole_steps * track.step)
}

// ── Markers and Selection ─────────────────────────────────────────────────────

/// The two boundary handles bounding the active selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Low,
    High,
}

/// Discrete, step-aligned value pair in domain units. Produced only by
/// `TrimController::end_drag`; serialized when handed to the export
/// collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub min_value: f64,
    pub max_value: f64,
}

/// Per-marker drag state. `drag_origin` is `Some` exactly while a drag is
/// active; it holds the position captured at `begin_drag` so incremental
/// deltas compose from a fixed reference instead of accumulating error.
#[derive(Clone, Copy, Debug)]
struct MarkerState {
    position:    f64,
    drag_origin: Option<f64>,
}

// ── TrimController ────────────────────────────────────────────────────────────

/// Owns the two marker positions and the drag lifecycle for each.
///
/// Invariant, preserved across every transition:
///   `0 <= low.position` and
///   `low.position + MIN_SEPARATION_PX <= high.position <= track.width`.
///
/// Single-threaded by design — drag events arrive from one input source.
/// Callers that fan drag handling out across threads must wrap the whole
/// controller in one mutex; there is no internal locking.
pub struct TrimController {
    track: Track,
    low:   MarkerState,
    high:  MarkerState,
}

impl TrimController {
    /// Markers start at the track edges (full selection).
    ///
    /// Rejects a track narrower than `MIN_SEPARATION_PX`: no valid marker
    /// placement exists on it, and catching that here keeps every drag-time
    /// path infallible with respect to geometry.
    pub fn new(track: Track) -> Result<Self, SoundtrimError> {
        if track.width() < MIN_SEPARATION_PX {
            return Err(SoundtrimError::Configuration(format!(
                "track width {}px cannot fit two markers {MIN_SEPARATION_PX}px apart",
                track.width()
            )));
        }
        Ok(Self {
            track,
            low:  MarkerState { position: 0.0,           drag_origin: None },
            high: MarkerState { position: track.width(), drag_origin: None },
        })
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Current pixel position of `marker` — read by the drawing layer.
    pub fn position(&self, marker: Marker) -> f64 {
        self.state(marker).position
    }

    pub fn is_dragging(&self, marker: Marker) -> bool {
        self.state(marker).drag_origin.is_some()
    }

    /// Capture the marker's current position as the drag's reference origin.
    ///
    /// A second `begin_drag` while that marker is already dragging is a
    /// lifecycle bug in the caller — rejected with `InvalidState`, leaving
    /// the active drag untouched.
    pub fn begin_drag(&mut self, marker: Marker) -> Result<(), SoundtrimError> {
        let state = self.state_mut(marker);
        if state.drag_origin.is_some() {
            return Err(SoundtrimError::InvalidState(format!(
                "begin_drag({marker:?}) while a drag is already active"
            )));
        }
        state.drag_origin = Some(state.position);
        Ok(())
    }

    /// Move `marker` to `origin + delta_px`, clamped so the invariant holds:
    ///
    ///   Low  → `[0, high - MIN_SEPARATION_PX]`
    ///   High → `[low + MIN_SEPARATION_PX, width]`
    ///
    /// Runs on every incremental movement event. Updates one position field
    /// and returns — no quantization, no allocation.
    pub fn update_drag(&mut self, marker: Marker, delta_px: f64) -> Result<(), SoundtrimError> {
        let (lo, hi) = match marker {
            Marker::Low  => (0.0, self.high.position - MIN_SEPARATION_PX),
            Marker::High => (self.low.position + MIN_SEPARATION_PX, self.track.width()),
        };

        let state  = self.state_mut(marker);
        let origin = state.drag_origin.ok_or_else(|| {
            SoundtrimError::InvalidState(format!(
                "update_drag({marker:?}) without an active drag"
            ))
        })?;

        state.position = (origin + delta_px).clamp(lo, hi);
        Ok(())
    }

    /// End the drag and commit: quantize BOTH markers against the shared
    /// track and return the resulting pair.
    ///
    /// Both are re-quantized — not just the one that moved — so the emitted
    /// Selection is always self-consistent regardless of which marker the
    /// gesture touched last.
    pub fn end_drag(&mut self, marker: Marker) -> Result<Selection, SoundtrimError> {
        let state = self.state_mut(marker);
        state.drag_origin.take().ok_or_else(|| {
            SoundtrimError::InvalidState(format!(
                "end_drag({marker:?}) without an active drag"
            ))
        })?;

        // Clamping in update_drag keeps both positions inside [0, width],
        // so these cannot fail for a live controller.
        Ok(Selection {
            min_value: quantize(self.low.position, &self.track)?,
            max_value: quantize(self.high.position, &self.track)?,
        })
    }

    fn state(&self, marker: Marker) -> &MarkerState {
        match marker {
            Marker::Low  => &self.low,
            Marker::High => &self.high,
        }
    }

    fn state_mut(&mut self, marker: Marker) -> &mut MarkerState {
        match marker {
            Marker::Low  => &mut self.low,
            Marker::High => &mut self.high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> Track {
        Track::new(0.0, 100.0, 1.0, 1000.0).unwrap()
    }

    // ── Quantizer ────────────────────────────────────────────────────────────

    #[test]
    fn quantize_is_step_aligned_and_in_range() {
        let t = track();
        let mut pos = 0.0;
        while pos <= 1000.0 {
            let v = quantize(pos, &t).unwrap();
            assert!((0.0..=100.0).contains(&v), "{v} out of domain at {pos}px");
            let k = (v - t.min()) / t.step();
            assert!((k - k.round()).abs() < 1e-9, "{v} not step-aligned at {pos}px");
            pos += 7.3;
        }
    }

    #[test]
    fn quantize_is_monotonic() {
        let t = Track::new(10.0, 70.0, 5.0, 480.0).unwrap();
        let mut prev = quantize(0.0, &t).unwrap();
        let mut pos = 1.0;
        while pos <= 480.0 {
            let v = quantize(pos, &t).unwrap();
            assert!(v >= prev, "quantize not monotonic: {prev} then {v} at {pos}px");
            prev = v;
            pos += 1.0;
        }
    }

    #[test]
    fn quantize_boundaries() {
        let t = track();
        assert_eq!(quantize(0.0, &t).unwrap(), 0.0);
        assert_eq!(quantize(1000.0, &t).unwrap(), 100.0);

        // Domain that does not divide evenly: [0, 10] with step 3 has floor
        // coverage up to 9 — the full-width position lands below max.
        let uneven = Track::new(0.0, 10.0, 3.0, 100.0).unwrap();
        assert_eq!(quantize(100.0, &uneven).unwrap(), 9.0);
    }

    #[test]
    fn quantize_floors_rather_than_rounds() {
        let t = track();
        // 9.9px of a 1000px track is 0.99 steps — not yet a full step.
        assert_eq!(quantize(9.9, &t).unwrap(), 0.0);
        assert_eq!(quantize(10.0, &t).unwrap(), 1.0);
    }

    #[test]
    fn quantize_rejects_out_of_range_position() {
        let t = track();
        assert!(matches!(
            quantize(-0.1, &t),
            Err(SoundtrimError::InvalidArgument(_))
        ));
        assert!(matches!(
            quantize(1000.1, &t),
            Err(SoundtrimError::InvalidArgument(_))
        ));
    }

    #[test]
    fn track_rejects_bad_geometry() {
        assert!(Track::new(5.0, 5.0, 1.0, 100.0).is_err());  // empty domain
        assert!(Track::new(0.0, 10.0, -1.0, 100.0).is_err()); // negative step
        assert!(Track::new(0.0, 10.0, 1.0, 0.0).is_err());    // zero width
        assert!(Track::new(0.0, 10.0, f64::NAN, 100.0).is_err());
    }

    // ── Controller lifecycle ─────────────────────────────────────────────────

    #[test]
    fn new_controller_spans_full_track() {
        let c = TrimController::new(track()).unwrap();
        assert_eq!(c.position(Marker::Low), 0.0);
        assert_eq!(c.position(Marker::High), 1000.0);
        assert!(!c.is_dragging(Marker::Low));
    }

    #[test]
    fn narrow_track_is_a_configuration_error() {
        let narrow = Track::new(0.0, 100.0, 1.0, 49.0).unwrap();
        assert!(matches!(
            TrimController::new(narrow),
            Err(SoundtrimError::Configuration(_))
        ));
        // Exactly MIN_SEPARATION_PX wide is the smallest legal track.
        let minimal = Track::new(0.0, 100.0, 1.0, MIN_SEPARATION_PX).unwrap();
        assert!(TrimController::new(minimal).is_ok());
    }

    #[test]
    fn double_begin_is_invalid_state_and_preserves_drag() {
        let mut c = TrimController::new(track()).unwrap();
        c.begin_drag(Marker::Low).unwrap();
        c.update_drag(Marker::Low, 100.0).unwrap();
        assert!(matches!(
            c.begin_drag(Marker::Low),
            Err(SoundtrimError::InvalidState(_))
        ));
        // The original drag is still live with its original origin.
        c.update_drag(Marker::Low, 200.0).unwrap();
        assert_eq!(c.position(Marker::Low), 200.0);
    }

    #[test]
    fn update_and_end_without_begin_are_invalid_state() {
        let mut c = TrimController::new(track()).unwrap();
        assert!(matches!(
            c.update_drag(Marker::High, -10.0),
            Err(SoundtrimError::InvalidState(_))
        ));
        assert!(matches!(
            c.end_drag(Marker::High),
            Err(SoundtrimError::InvalidState(_))
        ));
    }

    #[test]
    fn deltas_compose_from_the_drag_origin() {
        let mut c = TrimController::new(track()).unwrap();
        c.begin_drag(Marker::Low).unwrap();
        // Each delta is relative to the origin (0), not the previous update.
        c.update_drag(Marker::Low, 300.0).unwrap();
        c.update_drag(Marker::Low, 120.0).unwrap();
        assert_eq!(c.position(Marker::Low), 120.0);
    }

    #[test]
    fn invariant_survives_adversarial_deltas() {
        let mut c = TrimController::new(track()).unwrap();
        for delta in [1e9, -1e9, 999.0, -999.0, 951.0, 0.0] {
            c.begin_drag(Marker::Low).unwrap();
            c.update_drag(Marker::Low, delta).unwrap();
            c.end_drag(Marker::Low).unwrap();

            c.begin_drag(Marker::High).unwrap();
            c.update_drag(Marker::High, -delta).unwrap();
            c.end_drag(Marker::High).unwrap();

            let (lo, hi) = (c.position(Marker::Low), c.position(Marker::High));
            assert!(lo >= 0.0, "low {lo} escaped left edge (delta {delta})");
            assert!(hi <= 1000.0, "high {hi} escaped right edge (delta {delta})");
            assert!(
                lo + MIN_SEPARATION_PX <= hi,
                "separation violated: low {lo}, high {hi} (delta {delta})"
            );
        }
    }

    #[test]
    fn low_marker_stops_at_separation_gap() {
        let mut c = TrimController::new(track()).unwrap();
        c.begin_drag(Marker::High).unwrap();
        c.update_drag(Marker::High, -700.0).unwrap(); // high at 300
        c.end_drag(Marker::High).unwrap();

        c.begin_drag(Marker::Low).unwrap();
        c.update_drag(Marker::Low, 5000.0).unwrap();
        assert_eq!(c.position(Marker::Low), 250.0); // 300 - 50
    }

    #[test]
    fn drag_sequence_commits_expected_selection() {
        // End-to-end: 0..100 domain, step 1, 1000px track.
        let mut c = TrimController::new(track()).unwrap();

        c.begin_drag(Marker::Low).unwrap();
        c.update_drag(Marker::Low, 40.0).unwrap();
        assert_eq!(c.position(Marker::Low), 40.0);

        c.begin_drag(Marker::High).unwrap();
        c.update_drag(Marker::High, -900.0).unwrap();
        // Candidate 100px clamps to low + separation = 90px.
        assert_eq!(c.position(Marker::High), 90.0);

        let first = c.end_drag(Marker::Low).unwrap();
        let second = c.end_drag(Marker::High).unwrap();
        assert_eq!(first, Selection { min_value: 4.0, max_value: 9.0 });
        assert_eq!(second, first); // commit is recomputed, never cached
    }

    #[test]
    fn end_drag_requantizes_the_idle_marker_too() {
        let mut c = TrimController::new(track()).unwrap();
        c.begin_drag(Marker::High).unwrap();
        c.update_drag(Marker::High, -250.0).unwrap();
        let sel = c.end_drag(Marker::High).unwrap();
        // Low never moved but still contributes its quantized value.
        assert_eq!(sel, Selection { min_value: 0.0, max_value: 75.0 });
    }
}
