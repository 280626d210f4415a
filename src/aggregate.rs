//! Fans the [`ClassificationEngine`] out over the input streams and folds the
//! labels into one [`AggregateResult`].
//!
//! Classification of a stream may run on the rayon pool. Workers only return
//! values; the collected vector keeps input order and the merge into the
//! result map happens afterwards on one thread, stream by stream.

use indicatif::ProgressBar;
use rayon::prelude::*;

use crate::classify::engine::{ClassificationEngine, Resolution};
use crate::error::SourceError;
use crate::models::{AggregateResult, Stream, Subject};

/// A subject that matched at least one catalog group.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub key: String,
    pub resolutions: Vec<Resolution>,
}

impl Classified {
    pub fn labels(&self) -> Vec<String> {
        self.resolutions.iter().map(|r| r.full_name.clone()).collect()
    }
}

/// Per-stream classification summary.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamOutcome {
    pub stream: Stream,
    /// Subjects read from the stream.
    pub total: usize,
    /// Keys with at least one label, in input order.
    pub matched: Vec<Classified>,
    /// Keys whose text matched no catalog group.
    pub unmatched: Vec<String>,
    /// Keys with no text to classify (missing descriptions).
    pub skipped: Vec<String>,
    /// Set when the stream's input could not be read.
    pub error: Option<String>,
}

impl StreamOutcome {
    fn empty(stream: Stream) -> Self {
        Self {
            stream,
            total: 0,
            matched: Vec::new(),
            unmatched: Vec::new(),
            skipped: Vec::new(),
            error: None,
        }
    }

    pub fn failed(stream: Stream, error: &SourceError) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::empty(stream)
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    pub result: AggregateResult,
    pub streams: Vec<StreamOutcome>,
}

impl AggregateReport {
    pub fn has_failures(&self) -> bool {
        self.streams.iter().any(StreamOutcome::is_failed)
    }
}

pub struct Aggregator<'t> {
    engine: ClassificationEngine<'t>,
    parallel: bool,
    progress: Option<ProgressBar>,
}

impl<'t> Aggregator<'t> {
    pub fn new(engine: ClassificationEngine<'t>) -> Self {
        Self {
            engine,
            parallel: true,
            progress: None,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Tick `progress` once per classified subject.
    pub fn progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Classify every subject of one stream.
    pub fn classify_stream(&self, stream: Stream, subjects: &[Subject]) -> StreamOutcome {
        let classify_one = |subject: &Subject| -> Option<Vec<Resolution>> {
            let resolutions = subject.text.as_deref().map(|text| self.engine.explain(text));
            if let Some(pb) = &self.progress {
                pb.inc(1);
            }
            resolutions
        };

        let results: Vec<Option<Vec<Resolution>>> = if self.parallel {
            subjects.par_iter().map(&classify_one).collect()
        } else {
            subjects.iter().map(&classify_one).collect()
        };

        let mut outcome = StreamOutcome {
            total: subjects.len(),
            ..StreamOutcome::empty(stream)
        };

        for (subject, resolutions) in subjects.iter().zip(results) {
            match resolutions {
                None => {
                    tracing::debug!(
                        stream = %subject.stream,
                        key = %subject.key,
                        group = subject.group.as_deref(),
                        "no description to classify"
                    );
                    outcome.skipped.push(subject.key.clone());
                }
                Some(resolutions) if resolutions.is_empty() => {
                    outcome.unmatched.push(subject.key.clone())
                }
                Some(resolutions) => outcome.matched.push(Classified {
                    key: subject.key.clone(),
                    resolutions,
                }),
            }
        }

        tracing::info!(
            %stream,
            total = outcome.total,
            matched = outcome.matched.len(),
            unmatched = outcome.unmatched.len(),
            skipped = outcome.skipped.len(),
            "stream classified"
        );

        outcome
    }

    /// Classify every stream that was read successfully and fold the results.
    ///
    /// A stream whose input failed to load is recorded as failed and
    /// contributes nothing.
    pub fn run<I>(&self, inputs: I) -> AggregateReport
    where
        I: IntoIterator<Item = (Stream, Result<Vec<Subject>, SourceError>)>,
    {
        let streams: Vec<StreamOutcome> = inputs
            .into_iter()
            .map(|(stream, subjects)| match subjects {
                Ok(subjects) => self.classify_stream(stream, &subjects),
                Err(e) => {
                    tracing::error!(%stream, error = %e, "stream input failed");
                    StreamOutcome::failed(stream, &e)
                }
            })
            .collect();

        AggregateReport {
            result: aggregate(&streams),
            streams,
        }
    }
}

/// Fold outcomes, in order, into a fresh result. Keys seen in more than one
/// place have their labels extended, never replaced.
pub fn aggregate(outcomes: &[StreamOutcome]) -> AggregateResult {
    outcomes
        .iter()
        .flat_map(|o| o.matched.iter())
        .fold(AggregateResult::new(), |mut result, classified| {
            result.merge(&classified.key, &classified.labels());
            result
        })
}
