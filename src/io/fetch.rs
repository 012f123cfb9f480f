//! Background loading of schedule data.
//!
//! Each request runs on its own thread and reports back over a channel. The UI
//! drains the channel once per frame; whichever response resolves last is the
//! one that ends up displayed.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;

use super::api::{load_response, LoadError};
use super::sample::sample_response;
use crate::model::GanttApiResponse;

/// Where a schedule comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    File(PathBuf),
    /// Built-in demonstration data anchored on the given date.
    Sample(NaiveDate),
}

impl Source {
    pub fn load(&self) -> Result<GanttApiResponse, LoadError> {
        match self {
            Source::File(path) => load_response(path),
            Source::Sample(today) => Ok(sample_response(*today)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Sample(_) => "sample schedule".to_string(),
        }
    }
}

/// A resolved request.
#[derive(Debug)]
pub struct Fetched {
    pub generation: u64,
    pub source: Source,
    pub result: Result<GanttApiResponse, LoadError>,
}

pub struct Fetcher {
    tx: Sender<Fetched>,
    rx: Receiver<Fetched>,
    generation: u64,
    in_flight: usize,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            generation: 0,
            in_flight: 0,
        }
    }

    /// Start loading `source` in the background. Returns the request's
    /// generation number.
    pub fn request(&mut self, source: Source) -> u64 {
        self.generation += 1;
        self.in_flight += 1;
        let generation = self.generation;
        let tx = self.tx.clone();
        tracing::debug!(generation, source = %source.describe(), "fetch started");
        thread::spawn(move || {
            let result = source.load();
            // Receiver gone means the app is shutting down.
            let _ = tx.send(Fetched {
                generation,
                source,
                result,
            });
        });
        generation
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Drain every response that has arrived and return the last one.
    pub fn poll(&mut self) -> Option<Fetched> {
        let mut latest = None;
        loop {
            match self.rx.try_recv() {
                Ok(fetched) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    if let Some(Fetched { generation, .. }) = &latest {
                        tracing::debug!(generation, "fetch superseded");
                    }
                    latest = Some(fetched);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        latest
    }

    /// Block until the next response arrives or `timeout` elapses.
    pub fn wait(&mut self, timeout: Duration) -> Option<Fetched> {
        let fetched = self.rx.recv_timeout(timeout).ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(fetched)
    }
}
