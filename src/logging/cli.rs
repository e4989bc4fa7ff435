//! Command-line logger
use super::{Event, LogError, Loggable, Logger};
use enum_map::{enum_map, EnumMap};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Drop;
use std::time::{Duration, Instant};

/// Logger that writes summaries to stdout.
///
/// Logged scalars are averaged over all events since the previous summary.
pub struct CLILogger {
    events: EnumMap<Event, EventLog>,

    display_period: Duration,
    last_display_time: Instant,
}

impl CLILogger {
    pub fn new(display_period: Duration) -> Self {
        Self {
            events: enum_map! { _ => EventLog::new() },
            display_period,
            last_display_time: Instant::now(),
        }
    }

    /// Mean of the committed values of `name` since the last summary.
    ///
    /// Returns `None` if nothing has been committed under that name.
    pub fn mean(&self, event: Event, name: &str) -> Option<f64> {
        match self.events[event].aggregators.get(name)? {
            Aggregator::Nothing => None,
            Aggregator::ScalarMean { accumulator, .. } => accumulator.mean(),
        }
    }

    /// Display the summary and clear all stored data.
    pub fn display(&mut self) {
        for (event, event_log) in self.events.iter_mut() {
            let summary_size = event_log.index - event_log.summary_start_index;
            if summary_size == 0 {
                continue;
            }

            println!(
                "==== {:?}s {} - {} ====",
                event,
                event_log.summary_start_index,
                event_log.index - 1
            );
            for (name, aggregator) in &mut event_log.aggregators {
                println!("{}: {}", name, aggregator);
                aggregator.clear()
            }
            event_log.summary_start_index = event_log.index;
        }
        self.last_display_time = Instant::now();
    }
}

impl Default for CLILogger {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl Logger for CLILogger {
    fn log(&mut self, event: Event, name: &'static str, value: Loggable) -> Result<(), LogError> {
        let aggregators = &mut self.events[event].aggregators;
        match aggregators.get_mut(name) {
            Some(aggregator) => aggregator
                .update(value)
                .map_err(|expected| LogError::new(name, value, expected)),
            None => {
                aggregators.insert(name, Aggregator::new(value));
                Ok(())
            }
        }
    }

    fn done(&mut self, event: Event) {
        let event_log = &mut self.events[event];
        event_log.index += 1;

        for aggregator in event_log.aggregators.values_mut() {
            aggregator.commit()
        }

        if self.last_display_time.elapsed() >= self.display_period {
            self.display();
        }
    }
}

impl Drop for CLILogger {
    fn drop(&mut self) {
        // Ensure everything is flushed.
        self.display();
    }
}

struct EventLog {
    /// Global index for this event
    index: u64,
    /// Value of `index` at the start of this summary period
    summary_start_index: u64,
    /// An aggregator for each log entry.
    aggregators: BTreeMap<&'static str, Aggregator>,
}

impl EventLog {
    #[allow(clippy::missing_const_for_fn)] // BTreeMap const new not stabilized
    fn new() -> Self {
        Self {
            index: 0,
            summary_start_index: 0,
            aggregators: BTreeMap::new(),
        }
    }
}

#[derive(Debug)]
enum Aggregator {
    /// Aggregates nothing
    Nothing,
    ScalarMean {
        accumulator: MeanAccumulator,
        pending: Option<f64>,
    },
}

impl Aggregator {
    /// Create a new aggregator from a logged value.
    const fn new(value: Loggable) -> Self {
        match value {
            Loggable::Nothing => Self::Nothing,
            Loggable::Scalar(x) => Self::ScalarMean {
                accumulator: MeanAccumulator::new(),
                pending: Some(x),
            },
        }
    }

    /// Update an aggregator with a logged value within an event.
    ///
    /// Returns `Err(expected)` if the value is incompatible with this aggregator.
    fn update(&mut self, value: Loggable) -> Result<(), &'static str> {
        match (self, value) {
            (Self::Nothing, Loggable::Nothing) => Ok(()),
            (Self::Nothing, _) => Err("Nothing"),
            (Self::ScalarMean { pending, .. }, Loggable::Scalar(x)) => {
                *pending = Some(x);
                Ok(())
            }
            (Self::ScalarMean { .. }, _) => Err("Scalar"),
        }
    }

    /// Commit the pending value into the aggregate.
    fn commit(&mut self) {
        if let Self::ScalarMean {
            accumulator,
            pending,
        } = self
        {
            if let Some(value) = pending.take() {
                accumulator.insert(value)
            }
        }
    }

    /// Clear the aggregated values (but not the pending values)
    fn clear(&mut self) {
        if let Self::ScalarMean { accumulator, .. } = self {
            accumulator.clear()
        }
    }
}

/// Display the commited aggregated value.
impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Nothing => write!(f, "Nothing"),
            Self::ScalarMean { accumulator, .. } => accumulator.fmt(f),
        }
    }
}

#[derive(Debug)]
struct MeanAccumulator {
    sum: f64,
    count: u64,
}

impl MeanAccumulator {
    const fn new() -> Self {
        Self { sum: 0.0, count: 0 }
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }

    fn insert(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn clear(&mut self) {
        self.sum = 0.0;
        self.count = 0;
    }
}

impl fmt::Display for MeanAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mean() {
            Some(mean) => write!(f, "{}", mean),
            None => write!(f, "None"),
        }
    }
}
