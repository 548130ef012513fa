//! On-screen display visibility timer
//!
//! The OSD (title bar, progress bar, buttons) is visible while the current
//! wall-clock time is before `expiry`. Pinning sets the expiry to infinity,
//! hiding sets it to zero.

/// Expiring visibility gate, times in wall-clock seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OsdTimer {
    expiry: f64,
}

impl Default for OsdTimer {
    fn default() -> Self {
        Self::hidden()
    }
}

impl OsdTimer {
    const PINNED: f64 = f64::INFINITY;

    pub fn hidden() -> Self {
        Self { expiry: 0.0 }
    }

    pub fn pinned() -> Self {
        Self {
            expiry: Self::PINNED,
        }
    }

    /// Show for `seconds` from `now`
    pub fn show_for(&mut self, now: f64, seconds: f64) {
        self.expiry = now + seconds;
    }

    /// Show until explicitly hidden
    pub fn pin(&mut self) {
        self.expiry = Self::PINNED;
    }

    pub fn hide(&mut self) {
        self.expiry = 0.0;
    }

    pub fn is_visible(&self, now: f64) -> bool {
        now < self.expiry
    }

    pub fn is_pinned(&self) -> bool {
        self.expiry == Self::PINNED
    }

    /// Hide if visible, otherwise show temporarily
    pub fn toggle(&mut self, now: f64, seconds: f64) {
        if self.is_visible(now) {
            self.hide();
        } else {
            self.show_for(now, seconds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_show_expires() {
        let mut osd = OsdTimer::hidden();
        assert!(!osd.is_visible(0.0));
        osd.show_for(100.0, 5.0);
        assert!(osd.is_visible(104.9));
        assert!(!osd.is_visible(105.0));
        assert!(!osd.is_pinned());
    }

    #[test]
    fn test_pinned_never_expires() {
        let mut osd = OsdTimer::hidden();
        osd.pin();
        assert!(osd.is_pinned());
        assert!(osd.is_visible(1e12));
        osd.hide();
        assert!(!osd.is_visible(0.0));
    }

    #[test]
    fn test_toggle() {
        let mut osd = OsdTimer::pinned();
        osd.toggle(10.0, 5.0);
        assert!(!osd.is_visible(10.0));
        osd.toggle(10.0, 5.0);
        assert!(osd.is_visible(14.0));
        assert!(!osd.is_visible(15.0));
    }
}
