//! Utility functions

#[cfg(test)]
use std::sync::atomic::Ordering;
use std::time::Instant;

/// Microseconds per second, the fixed scale between wall-clock and playback time
pub const MICROS_PER_SEC: f64 = 1e6;

// ============================================================================
// Clocks
// ============================================================================

/// Monotonic wall-clock source
///
/// Everything that measures elapsed on-screen time (danmaku motion, OSD expiry,
/// press gestures) reads time through this trait so tests can drive it.
pub trait Clock: Send + Sync {
    /// Microseconds since an arbitrary fixed origin
    fn now_micros(&self) -> i64;

    /// Seconds since the same origin
    fn now_secs(&self) -> f64 {
        self.now_micros() as f64 / MICROS_PER_SEC
    }
}

/// Clock backed by `Instant`, anchored at construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_micros(&self) -> i64 {
        self.origin.elapsed().as_micros() as i64
    }
}

/// Hand-driven clock for deterministic tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: std::sync::atomic::AtomicI64,
}

#[cfg(test)]
impl ManualClock {
    pub fn at_secs(secs: f64) -> Self {
        let clock = Self::default();
        clock.set_secs(secs);
        clock
    }

    pub fn set_secs(&self, secs: f64) {
        self.micros
            .store((secs * MICROS_PER_SEC) as i64, Ordering::Relaxed);
    }

    pub fn advance_secs(&self, secs: f64) {
        self.micros
            .fetch_add((secs * MICROS_PER_SEC) as i64, Ordering::Relaxed);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_micros(&self) -> i64 {
        self.micros.load(Ordering::Relaxed)
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Format seconds as `MM:SS`, or `HH:MM:SS` once past an hour
///
/// Negative and non-finite inputs render as `00:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = total / 60 % 60;
    let secs = total % 60;
    if hours == 0 {
        format!("{:02}:{:02}", minutes, secs)
    } else {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }
}

/// Format a network throughput for the loading indicator
pub fn format_speed(bytes_per_sec: u64) -> String {
    let bytes = bytes_per_sec as f64;
    if bytes >= 1024.0 * 1024.0 {
        format!("{:.1}MB/s", bytes / (1024.0 * 1024.0))
    } else if bytes >= 1024.0 {
        format!("{:.0}KB/s", bytes / 1024.0)
    } else {
        format!("{}B/s", bytes_per_sec)
    }
}

/// Progress fraction of `position` within `duration`, 0 when duration is unknown
pub fn progress_fraction(position: f64, duration: f64) -> f32 {
    if duration > 0.0 && position.is_finite() {
        (position / duration).clamp(0.0, 1.0) as f32
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_minutes() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(5.9), "00:05");
        assert_eq!(format_time(61.0), "01:01");
        assert_eq!(format_time(3599.0), "59:59");
    }

    #[test]
    fn test_format_time_hours() {
        assert_eq!(format_time(3600.0), "01:00:00");
        assert_eq!(format_time(3725.0), "01:02:05");
    }

    #[test]
    fn test_format_time_invalid() {
        assert_eq!(format_time(-3.0), "00:00");
        assert_eq!(format_time(f64::NAN), "00:00");
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(512), "512B/s");
        assert_eq!(format_speed(2048), "2KB/s");
        assert_eq!(format_speed(3 * 1024 * 1024 / 2), "1.5MB/s");
    }

    #[test]
    fn test_progress_fraction() {
        assert_eq!(progress_fraction(30.0, 120.0), 0.25);
        assert_eq!(progress_fraction(30.0, 0.0), 0.0);
        assert_eq!(progress_fraction(200.0, 120.0), 1.0);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::at_secs(1.5);
        assert_eq!(clock.now_micros(), 1_500_000);
        clock.advance_secs(2.0);
        assert_eq!(clock.now_secs(), 3.5);
    }
}
