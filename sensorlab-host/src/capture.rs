//! Sample capture
//!
//! A background thread parses `x,y,z` lines into a shared rolling window
//! while the caller prints statistics at a fixed interval. When the
//! measurement time is up, the window can be exported as CSV.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};
use sensorlab_core::imu::{SampleWindow, WindowStats};
use sensorlab_hal::UartRx;
use sensorlab_protocol::{AccelSample, LineParser};

use crate::error::Result;
use crate::port::read_line;

/// Largest window the capture tool keeps
pub const MAX_WINDOW: usize = 1000;

/// Interval used when zero is requested
const FALLBACK_INTERVAL: Duration = Duration::from_millis(100);

/// Window shared between the reader thread and the reporter
pub type SharedWindow = Arc<Mutex<SampleWindow<MAX_WINDOW>>>;

/// Capture settings
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Total measurement time
    pub duration: Duration,
    /// Time between statistics reports
    pub interval: Duration,
    /// Number of samples kept
    pub window: usize,
    /// CSV file written when the measurement ends
    pub csv: Option<PathBuf>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(10),
            interval: Duration::from_secs(1),
            window: sensorlab_core::config::DEFAULT_WINDOW_LEN,
            csv: None,
        }
    }
}

/// Background reader feeding a shared window
pub struct SampleReader {
    window: SharedWindow,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<usize>>,
}

impl SampleReader {
    /// Start reading samples from `rx` into a window of `window` samples
    pub fn spawn<R>(rx: R, window: usize) -> Self
    where
        R: UartRx<Error = io::Error> + Send + 'static,
    {
        let shared: SharedWindow = Arc::new(Mutex::new(SampleWindow::with_limit(window)));
        let stop = Arc::new(AtomicBool::new(false));

        let handle = {
            let shared = Arc::clone(&shared);
            let stop = Arc::clone(&stop);
            thread::spawn(move || read_samples(rx, &shared, &stop))
        };

        Self {
            window: shared,
            stop,
            handle: Some(handle),
        }
    }

    /// Lock the window
    pub fn window(&self) -> MutexGuard<'_, SampleWindow<MAX_WINDOW>> {
        lock(&self.window)
    }

    /// Current statistics
    pub fn stats(&self) -> Option<WindowStats> {
        self.window().stats()
    }

    /// Whether the reader thread is still running
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Ask the reader to stop
    ///
    /// The thread exits after its current line. A thread blocked on a
    /// silent device is left detached. Returns the number of samples read
    /// if the thread has finished.
    pub fn stop(&mut self) -> Option<usize> {
        self.stop.store(true, Ordering::Relaxed);

        let handle = self.handle.take()?;
        if !handle.is_finished() {
            debug!("Reader still blocked on the device, detaching");
            return None;
        }
        handle.join().ok()
    }

    /// Wait for the reader to reach end of stream
    pub fn join(mut self) -> usize {
        self.handle
            .take()
            .and_then(|h| h.join().ok())
            .unwrap_or_default()
    }
}

impl Drop for SampleReader {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicked reader leaves the window itself intact
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Reader thread body; returns the number of samples accepted
fn read_samples<R: UartRx<Error = io::Error>>(
    mut rx: R,
    window: &Mutex<SampleWindow<MAX_WINDOW>>,
    stop: &AtomicBool,
) -> usize {
    let mut parser = LineParser::new();
    let mut count = 0;

    while !stop.load(Ordering::Relaxed) {
        match read_line(&mut rx, &mut parser) {
            Ok(Some(line)) => match AccelSample::parse(&line) {
                Ok(sample) => {
                    trace!("Sample {}", sample);
                    lock(window).push(sample);
                    count += 1;
                }
                Err(e) => debug!("Skipping line {:?}: {:?}", line.as_str(), e),
            },
            Ok(None) => {
                info!("Sample stream ended");
                break;
            }
            Err(e) => {
                warn!("Serial read failed: {}", e);
                break;
            }
        }
    }

    count
}

/// One statistics report line
pub fn format_stats(stats: &WindowStats) -> String {
    format!(
        "n={:<4} latest {} | mean {} | std {}",
        stats.count, stats.latest, stats.mean, stats.std_dev
    )
}

/// Write the window as CSV: `Sample,X,Y,Z` then one row per sample
pub fn write_csv<W: Write, const N: usize>(window: &SampleWindow<N>, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["Sample", "X", "Y", "Z"])?;

    for (i, sample) in window.iter().enumerate() {
        csv.write_record([
            i.to_string(),
            format!("{:.3}", sample.x),
            format!("{:.3}", sample.y),
            format!("{:.3}", sample.z),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Run a timed measurement, printing statistics to `out`
pub fn run<R, O>(rx: R, options: &CaptureOptions, out: &mut O) -> Result<usize>
where
    R: UartRx<Error = io::Error> + Send + 'static,
    O: Write,
{
    let interval = if options.interval.is_zero() {
        FALLBACK_INTERVAL
    } else {
        options.interval
    };

    let mut reader = SampleReader::spawn(rx, options.window);
    let start = Instant::now();
    info!(
        "Measuring for {:?}, reporting every {:?}",
        options.duration, interval
    );

    while start.elapsed() < options.duration {
        let remaining = options.duration.saturating_sub(start.elapsed());
        thread::sleep(interval.min(remaining));

        match reader.stats() {
            Some(stats) => writeln!(out, "{}", format_stats(&stats))?,
            None => writeln!(out, "waiting for samples...")?,
        }

        if !reader.is_running() {
            break;
        }
    }

    let read = reader.stop();
    let window = reader.window();
    writeln!(out, "Measurement stopped, {} samples in window", window.len())?;
    if let Some(read) = read {
        debug!("Reader accepted {} samples", read);
    }

    if let Some(path) = &options.csv {
        let file = std::fs::File::create(path)?;
        write_csv(&*window, file)?;
        writeln!(out, "Saved {}", path.display())?;
    }

    Ok(window.len())
}
