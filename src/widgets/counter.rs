//! Counter animation
//!
//! Counts a number up from zero with a cubic ease-out when it first comes
//! into view. Each frame yields the grouped text to display; the last frame
//! always shows the exact target.

/// Cubic ease-out: fast start, slow finish
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Parse a counter target the way `parseInt(s, 10)` does: optional
/// whitespace and sign, then the leading run of digits
pub fn parse_target(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Format an integer with comma thousands grouping (`1,234,567`)
pub fn format_grouped(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One rendered frame of a counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: i64,
    pub text: String,
    /// No further frames are needed
    pub finished: bool,
}

/// A single run of the counter animation
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: i64,
    duration_ms: f64,
    started_at: f64,
}

impl CounterAnimation {
    /// Start counting toward `target` at time `now_ms`
    pub fn start(target: i64, duration_ms: f64, now_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            started_at: now_ms,
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    /// Progress in `[0, 1]` at `now_ms`
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// The frame to display at `now_ms`
    pub fn frame(&self, now_ms: f64) -> CounterFrame {
        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            return CounterFrame {
                value: self.target,
                text: format_grouped(self.target),
                finished: true,
            };
        }

        let value = (ease_out_cubic(progress) * self.target as f64).floor() as i64;
        CounterFrame {
            value,
            text: format_grouped(value),
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("1234"), Some(1234));
        assert_eq!(parse_target("  42+"), Some(42));
        assert_eq!(parse_target("-7"), Some(-7));
        assert_eq!(parse_target("abc"), None);
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("-"), None);
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1234), "1,234");
        assert_eq!(format_grouped(1234567), "1,234,567");
        assert_eq!(format_grouped(-100000), "-100,000");
    }

    #[test]
    fn test_frames_rise_to_target() {
        let counter = CounterAnimation::start(1234, 1800.0, 1000.0);
        let mut last = 0;
        let mut now = 1000.0;
        loop {
            let frame = counter.frame(now);
            assert!(frame.value >= last);
            assert!(frame.value <= 1234);
            last = frame.value;
            if frame.finished {
                assert_eq!(frame.text, "1,234");
                break;
            }
            now += 16.7;
        }
        assert!(now >= 2800.0);
    }

    #[test]
    fn test_frame_before_start_is_zero() {
        let counter = CounterAnimation::start(500, 1800.0, 1000.0);
        assert_eq!(counter.frame(990.0).value, 0);
        assert_eq!(counter.frame(1900.0).value, (0.875f64 * 500.0).floor() as i64);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let frame = CounterAnimation::start(80, 0.0, 0.0).frame(0.0);
        assert!(frame.finished);
        assert_eq!(frame.value, 80);
    }
}
