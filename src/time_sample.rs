use crate::geometry::RingGeometry;

/// Wall-clock time of day on a 12 hour dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSample {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeSample {
    /// Builds a sample, normalizing hour 12 to 0.
    ///
    /// # Panics
    ///
    /// If hour, minute or second are out of range. A time source producing
    /// such values is broken and must not be rendered silently.
    pub fn new(hour: u8, minute: u8, second: u8) -> Self {
        assert!(hour <= 12, "hour out of range: {hour}");
        assert!(minute < 60, "minute out of range: {minute}");
        assert!(second < 60, "second out of range: {second}");

        Self {
            hour: hour % 12,
            minute,
            second,
        }
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    /// Where the three hands point on `geometry`.
    ///
    /// The hour hand advances continuously with the minutes.
    pub fn hands(&self, geometry: &RingGeometry) -> HandPositions {
        let size = geometry.size();
        let minutes_on_dial = usize::from(self.hour) * 60 + usize::from(self.minute);

        HandPositions {
            hour: minutes_on_dial * size / 720,
            minute: usize::from(self.minute) * size / 60,
            second: usize::from(self.second) * size / 60,
        }
    }
}

impl From<time::Time> for TimeSample {
    fn from(value: time::Time) -> Self {
        Self::new(value.hour() % 12, value.minute(), value.second())
    }
}

impl std::fmt::Display for TimeSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Ring positions of the hour, minute and second hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandPositions {
    pub hour: usize,
    pub minute: usize,
    pub second: usize,
}

pub trait TimeSource {
    fn now(&self) -> Result<TimeSample, crate::error::Error>;
}

/// Local wall-clock time.
///
/// The zone is looked up on every read, so DST changes show up without a
/// restart and reads work from any thread.
#[derive(Debug, Default)]
pub struct LocalTimeSource;

impl LocalTimeSource {
    pub fn new() -> Self {
        let now = chrono::Local::now();
        tracing::info!(offset = %now.offset(), "Using local time");
        Self
    }
}

impl TimeSource for LocalTimeSource {
    fn now(&self) -> Result<TimeSample, crate::error::Error> {
        Ok(TimeSample::from(chrono::Local::now().time()))
    }
}

impl From<chrono::NaiveTime> for TimeSample {
    fn from(value: chrono::NaiveTime) -> Self {
        use chrono::Timelike;

        // hour() < 24, minute() and second() < 60
        Self::new(
            (value.hour() % 12) as u8,
            value.minute() as u8,
            value.second() as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;

    fn ring(size: usize) -> RingGeometry {
        RingGeometry::new(NonZeroUsize::new(size).unwrap())
    }

    #[test]
    fn test_noon_is_zero() {
        assert_eq!(TimeSample::new(12, 0, 0), TimeSample::new(0, 0, 0));
    }

    #[test]
    fn test_from_time_uses_twelve_hour_dial() {
        let sample = TimeSample::from(time::macros::time!(15:04:05));
        assert_eq!(sample, TimeSample::new(3, 4, 5));
        assert_eq!(sample.to_string(), "03:04:05");
    }

    #[test]
    fn test_from_chrono_time() {
        let time = chrono::NaiveTime::from_hms_opt(23, 59, 58).unwrap();
        assert_eq!(TimeSample::from(time), TimeSample::new(11, 59, 58));
    }

    #[test]
    fn test_local_time_with_other_threads_running() {
        let (stop, stopped) = std::sync::mpsc::channel::<()>();
        let worker = std::thread::spawn(move || {
            let _ = stopped.recv();
        });

        let source = LocalTimeSource::new();
        let first = source.now();
        let second = source.now();

        stop.send(()).unwrap();
        worker.join().unwrap();

        assert!(first.is_ok());
        assert!(second.is_ok());
    }

    #[test]
    #[should_panic(expected = "minute out of range")]
    fn test_minute_out_of_range() {
        let _ = TimeSample::new(1, 60, 0);
    }

    #[test]
    #[should_panic(expected = "hour out of range")]
    fn test_hour_out_of_range() {
        let _ = TimeSample::new(13, 0, 0);
    }

    #[test]
    fn test_three_o_clock() {
        let hands = TimeSample::new(3, 0, 0).hands(&ring(60));
        assert_eq!(
            hands,
            HandPositions {
                hour: 15,
                minute: 0,
                second: 0
            }
        );
    }

    #[test]
    fn test_hour_hand_advances_with_minutes() {
        let hands = TimeSample::new(2, 48, 0).hands(&ring(60));
        assert_eq!(hands.hour, 14);

        let hands = TimeSample::new(11, 59, 59).hands(&ring(60));
        assert_eq!(hands.hour, 59);
        assert_eq!(hands.minute, 59);
        assert_eq!(hands.second, 59);
    }

    #[test]
    fn test_tiny_ring() {
        let hands = TimeSample::new(6, 30, 30).hands(&ring(12));
        assert_eq!(
            hands,
            HandPositions {
                hour: 6,
                minute: 6,
                second: 6
            }
        );
    }

    #[test]
    fn test_hands_in_range() {
        for size in [1, 7, 12, 16, 24, 60, 61, 144] {
            let ring = ring(size);
            for hour in 0..12 {
                for minute in 0..60 {
                    let hands = TimeSample::new(hour, minute, minute).hands(&ring);
                    assert!(hands.hour < size);
                    assert!(hands.minute < size);
                    assert!(hands.second < size);
                }
            }
        }
    }
}
