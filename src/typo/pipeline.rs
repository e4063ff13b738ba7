//! Availability pipeline: typo candidates resolved through the cache, in order

use futures::stream::{self, Stream};

use super::{candidates, Candidate};
use crate::availability::{AvailabilityCache, DomainValidator, LookupSource};
use crate::error::Result;
use crate::types::DomainReport;

/// Runs typo generation and batch checks against one cache for the whole run
pub struct TypoPipeline {
    cache: AvailabilityCache,
    validator: DomainValidator,
}

impl TypoPipeline {
    pub fn new(cache: AvailabilityCache) -> Self {
        Self {
            cache,
            validator: DomainValidator::new(),
        }
    }

    /// Stream availability for every typo of `label` under the selected codes.
    ///
    /// The label and TLD are validated before anything is generated. A filter
    /// that selects no code yields an empty stream.
    pub fn generate(
        &mut self,
        label: &str,
        tld: &str,
        filter: Option<&str>,
    ) -> Result<AvailabilityStream<'_>> {
        let label = self.validator.validate_label(label)?;
        let tld = self.validator.validate_tld(tld)?;

        tracing::info!(label = %label, tld = %tld, filter = ?filter, "Generating typos");

        Ok(AvailabilityStream::new(
            &mut self.cache,
            tld,
            Box::new(candidates(&label, filter)),
        ))
    }

    /// Stream availability for a list of bare labels, without mutation
    pub fn check_labels<I, S>(&mut self, labels: I, tld: &str) -> Result<AvailabilityStream<'_>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tld = self.validator.validate_tld(tld)?;
        let labels = labels
            .into_iter()
            .map(|label| self.validator.validate_label(label.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(count = labels.len(), tld = %tld, "Checking labels");

        Ok(AvailabilityStream::new(
            &mut self.cache,
            tld,
            Box::new(labels.into_iter().map(Candidate::plain)),
        ))
    }

    pub fn cache(&self) -> &AvailabilityCache {
        &self.cache
    }

    pub fn into_cache(self) -> AvailabilityCache {
        self.cache
    }
}

/// Single-pass stream of [`DomainReport`]s.
///
/// Every item is resolved when it is pulled. After an error the stream is
/// finished; reports already yielded stay valid and their lookups stay cached.
pub struct AvailabilityStream<'a> {
    cache: &'a mut AvailabilityCache,
    validator: DomainValidator,
    tld: String,
    candidates: Box<dyn Iterator<Item = Candidate> + Send + 'a>,
    finished: bool,
}

impl<'a> AvailabilityStream<'a> {
    fn new(
        cache: &'a mut AvailabilityCache,
        tld: String,
        candidates: Box<dyn Iterator<Item = Candidate> + Send + 'a>,
    ) -> Self {
        Self {
            cache,
            validator: DomainValidator::new(),
            tld,
            candidates,
            finished: false,
        }
    }

    /// Resolve the next candidate
    pub async fn next(&mut self) -> Option<Result<DomainReport>> {
        if self.finished {
            return None;
        }

        let candidate = loop {
            match self.candidates.next() {
                // single-character labels lose their only character under B1
                Some(candidate) if candidate.label.is_empty() => {
                    tracing::debug!(code = ?candidate.code, "Skipping empty candidate");
                }
                Some(candidate) => break candidate,
                None => {
                    self.finished = true;
                    return None;
                }
            }
        };

        let domain = self.validator.full_domain(&candidate.label, &self.tld);

        match self.cache.resolve(&domain).await {
            Ok((availability, source)) => Some(Ok(DomainReport {
                domain,
                code: candidate.code,
                availability,
                from_cache: source == LookupSource::Cache,
            })),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }

    /// Drain the stream, stopping at the first error
    pub async fn collect_all(mut self) -> Result<Vec<DomainReport>> {
        let mut reports = Vec::new();
        while let Some(report) = self.next().await {
            reports.push(report?);
        }
        Ok(reports)
    }

    /// Adapt into a [`futures::Stream`]
    pub fn into_stream(self) -> impl Stream<Item = Result<DomainReport>> + 'a {
        stream::unfold(self, |mut this| async move {
            this.next().await.map(|item| (item, this))
        })
    }
}
