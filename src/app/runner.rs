//! Pipeline runner: one producer thread feeding N consumer threads

use crate::app::cli::Settings;
use crate::app::error::{AppError, AppResult};
use crate::queue::{Consumer, ConsumerReport, Producer, ProducerReport, QueueResult, SharedQueue};
use crate::sensor::{open_output, Reading, ReadingReader, RECORD_SIZE};
use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

const MAX_CAPACITY_HINT: usize = 4096;

/// Summary of a finished pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub producer: ProducerReport,
    pub consumers: Vec<ConsumerReport>,
    /// Items still queued when the queue was destroyed
    pub leftover: usize,
}

impl PipelineReport {
    /// Total items written to the output by all consumers
    pub fn delivered(&self) -> usize {
        self.consumers.iter().map(|c| c.delivered).sum()
    }
}

/// Copy every reading in `settings.input` to `settings.output` as CSV
///
/// The queue is closed on every failure path so no consumer is left waiting,
/// and it is destroyed once all threads have been joined.
pub fn run_pipeline(settings: &Settings) -> AppResult<PipelineReport> {
    let reader = ReadingReader::open(&settings.input)
        .map_err(|e| AppError::file("input", &settings.input, e))?;
    let sink = open_output(&settings.output, settings.append)
        .map_err(|e| AppError::file("output", &settings.output, e))?;
    let sink = Arc::new(Mutex::new(sink));

    let (queue, expected) = queue_for_input(&settings.input)?;
    let queue = Arc::new(queue);
    log::info!(
        "Reading {} ({} records) into {} with {} consumer(s), termination={}",
        settings.input.display(),
        expected,
        settings.output.display(),
        settings.consumers,
        settings.termination
    );

    let mut consumer_handles: Vec<(String, JoinHandle<QueueResult<ConsumerReport>>)> =
        Vec::with_capacity(settings.consumers);
    let mut first_error: Option<AppError> = None;

    for n in 1..=settings.consumers {
        let name = format!("consumer-{}", n);
        let consumer = Consumer::new(name.clone(), Arc::clone(&queue), Arc::clone(&sink))
            .with_retry_policy(settings.retry.clone())
            .with_item_delay(settings.consume_delay);
        match thread::Builder::new().name(name.clone()).spawn(move || consumer.run()) {
            Ok(handle) => consumer_handles.push((name, handle)),
            Err(source) => {
                first_error = Some(AppError::ThreadSpawn { name, source });
                break;
            }
        }
    }

    let mut producer_report = ProducerReport::default();
    if first_error.is_none() {
        let producer = Producer::new(Arc::clone(&queue), settings.termination, consumer_handles.len())
            .with_item_delay(settings.produce_delay);
        let spawned = thread::Builder::new()
            .name("producer".to_string())
            .spawn(move || producer.run(reader));
        match spawned {
            Ok(handle) => match handle.join() {
                Ok(Ok(report)) => producer_report = report,
                Ok(Err(e)) => {
                    log::error!("Producer failed: {}", e);
                    first_error = Some(e.into());
                }
                Err(_) => {
                    first_error = Some(AppError::ThreadPanicked {
                        name: "producer".to_string(),
                    })
                }
            },
            Err(source) => {
                first_error = Some(AppError::ThreadSpawn {
                    name: "producer".to_string(),
                    source,
                })
            }
        }
    }

    if first_error.is_some() {
        release_waiters(&queue);
    }

    let mut consumer_reports = Vec::with_capacity(consumer_handles.len());
    for (name, handle) in consumer_handles {
        match handle.join() {
            Ok(Ok(report)) => {
                log::debug!("{} delivered {} item(s)", report.name, report.delivered);
                consumer_reports.push(report);
            }
            Ok(Err(e)) => {
                log::error!("{} failed: {}", name, e);
                if first_error.is_none() {
                    first_error = Some(e.into());
                }
            }
            Err(_) => {
                log::error!("{} panicked", name);
                if first_error.is_none() {
                    first_error = Some(AppError::ThreadPanicked { name });
                }
            }
        }
    }

    let leftover = destroy_queue(&queue, first_error)?;

    let report = PipelineReport {
        producer: producer_report,
        consumers: consumer_reports,
        leftover,
    };
    log::info!(
        "Done: {} inserted, {} delivered, {} dropped",
        report.producer.inserted,
        report.delivered(),
        report.producer.dropped
    );
    match serde_json::to_string(&report) {
        Ok(json) => log::debug!("Pipeline report: {}", json),
        Err(e) => log::debug!("Could not serialise pipeline report: {}", e),
    }
    Ok(report)
}

/// Build the queue for an input file, returning it with the file's record count
fn queue_for_input(input: &Path) -> AppResult<(SharedQueue<Reading>, u64)> {
    let records = std::fs::metadata(input)
        .map(|m| m.len() / RECORD_SIZE as u64)
        .unwrap_or(0);
    let queue = SharedQueue::with_capacity(capacity_hint(records))?;
    Ok((queue, records))
}

/// Initial queue reservation for `records` expected items
///
/// Capped at [`MAX_CAPACITY_HINT`]; the queue grows past it as needed.
fn capacity_hint(records: u64) -> usize {
    usize::try_from(records).map_or(MAX_CAPACITY_HINT, |n| n.min(MAX_CAPACITY_HINT))
}

/// Destroy the queue once every thread is joined
///
/// An earlier thread failure takes precedence over a failure to destroy.
fn destroy_queue<T: crate::queue::StreamItem>(
    queue: &SharedQueue<T>,
    first_error: Option<AppError>,
) -> AppResult<usize> {
    match (queue.destroy(), first_error) {
        (Ok(leftover), None) => {
            if leftover > 0 {
                log::warn!("{} item(s) left in the queue", leftover);
            }
            Ok(leftover)
        }
        (Ok(_), Some(e)) => Err(e),
        (Err(e), None) => Err(e.into()),
        (Err(destroy_err), Some(e)) => {
            log::warn!("Failed to destroy queue after error: {}", destroy_err);
            Err(e)
        }
    }
}

fn release_waiters<T: crate::queue::StreamItem>(queue: &SharedQueue<T>) {
    if let Err(e) = queue.close() {
        log::warn!("Failed to close queue after error: {}", e);
    }
}
