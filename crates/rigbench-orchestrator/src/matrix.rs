use std::{collections::VecDeque, sync::Arc};

use async_trait::async_trait;
use rigbench_advisor::{Analyzer, SpecLookup};
use rigbench_bus::EventBus;
use rigbench_types::{
    events::{LifecyclePhase, ProgressUpdate, RunEvent},
    hardware::HardwareSpec,
    matrix::{MatrixJob, MatrixOutcome},
    saved::SavedResult,
    Result,
};
use tracing::{info, warn};

/// One unit of work; only one is ever in flight.
enum MatrixStep {
    Lookup {
        device: usize,
    },
    Analyze {
        device: usize,
        game: usize,
        spec: Arc<HardwareSpec>,
    },
}

/// Run-local accumulator, folded into an immutable `MatrixOutcome` at the end.
#[derive(Default)]
struct MatrixTally {
    results: Vec<SavedResult>,
    errors: Vec<String>,
    completed: usize,
}

impl MatrixTally {
    fn skip_device(&mut self, device: &str, games: usize) -> String {
        let message = format!("Could not get specs for \"{device}\", skipping all its analyses.");
        self.errors.push(message.clone());
        self.completed += games;
        message
    }

    fn record_result(&mut self, result: SavedResult) {
        self.results.push(result);
        self.completed += 1;
    }

    fn record_failure(&mut self, device: &str, game: &str) -> String {
        let message = format!("Failed to analyze \"{game}\" on \"{device}\".");
        self.errors.push(message.clone());
        self.completed += 1;
        message
    }

    fn into_outcome(self) -> MatrixOutcome {
        MatrixOutcome {
            results: self.results,
            errors: self.errors,
        }
    }
}

/// Drives spec lookups and analyses for every device x game combination.
pub struct MatrixOrchestrator<L, A, B>
where
    L: SpecLookup,
    A: Analyzer,
    B: EventBus,
{
    lookup: L,
    analyzer: A,
    bus: B,
    language: String,
}

impl<L, A, B> MatrixOrchestrator<L, A, B>
where
    L: SpecLookup,
    A: Analyzer,
    B: EventBus,
{
    pub fn new(lookup: L, analyzer: A, bus: B, language: impl Into<String>) -> Self {
        Self {
            lookup,
            analyzer,
            bus,
            language: language.into(),
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Validates the request, then runs it. Only validation can fail.
    pub async fn run_matrix<D, G>(&self, devices: D, games: G) -> Result<MatrixOutcome>
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        G: IntoIterator,
        G::Item: AsRef<str>,
    {
        let job = MatrixJob::new(devices, games)?;
        Ok(self.execute(&job).await)
    }

    /// Drains the job sequentially. A failed lookup skips all of that
    /// device's games; a failed analysis skips only that combination.
    pub async fn execute(&self, job: &MatrixJob) -> MatrixOutcome {
        let devices = job.devices();
        let games = job.games();
        let total = job.total_combinations();
        let mut tally = MatrixTally::default();
        let mut queue: VecDeque<MatrixStep> = (0..devices.len())
            .map(|device| MatrixStep::Lookup { device })
            .collect();

        info!(
            "Starting matrix run: {} devices x {} games",
            devices.len(),
            games.len()
        );
        self.publish(RunEvent::lifecycle(
            LifecyclePhase::MatrixStart,
            Some(format!("{} combinations", total)),
        ))
        .await;

        while let Some(step) = queue.pop_front() {
            match step {
                MatrixStep::Lookup { device } => {
                    let name = &devices[device];
                    self.report(
                        format!("Fetching specs for {name}..."),
                        tally.completed,
                        total,
                    )
                    .await;
                    match self.lookup.resolve(name, &self.language).await {
                        Ok(spec) => {
                            let spec = Arc::new(spec);
                            // Push in reverse so this device's games run next, in order.
                            for game in (0..games.len()).rev() {
                                queue.push_front(MatrixStep::Analyze {
                                    device,
                                    game,
                                    spec: Arc::clone(&spec),
                                });
                            }
                        }
                        Err(err) => {
                            warn!("Spec lookup failed for {name:?}: {err}");
                            let message = tally.skip_device(name, games.len());
                            self.publish(RunEvent::failure(message)).await;
                        }
                    }
                }
                MatrixStep::Analyze { device, game, spec } => {
                    let device_name = &devices[device];
                    let game_name = &games[game];
                    self.report(
                        format!(
                            "Analyzing ({}/{}): {} on {}",
                            tally.completed + 1,
                            total,
                            game_name,
                            device_name
                        ),
                        tally.completed,
                        total,
                    )
                    .await;
                    match self.analyzer.analyze(&spec, game_name, &self.language).await {
                        Ok(analysis) => {
                            let result = SavedResult::new(
                                game_name.clone(),
                                spec.labelled(device_name),
                                analysis,
                            );
                            tally.record_result(result);
                        }
                        Err(err) => {
                            warn!("Analysis failed for {game_name:?} on {device_name:?}: {err}");
                            let message = tally.record_failure(device_name, game_name);
                            self.publish(RunEvent::failure(message)).await;
                        }
                    }
                }
            }
        }

        self.report("Matrix analysis complete", tally.completed, total)
            .await;
        let outcome = tally.into_outcome();
        info!(
            "Matrix run finished: {} results, {} errors",
            outcome.results.len(),
            outcome.errors.len()
        );
        self.publish(RunEvent::lifecycle(
            LifecyclePhase::MatrixEnd,
            Some(format!(
                "{} succeeded, {} failed",
                outcome.results.len(),
                outcome.errors.len()
            )),
        ))
        .await;
        outcome
    }

    async fn report(&self, status: impl Into<String>, completed: usize, total: usize) {
        self.publish(RunEvent::progress(ProgressUpdate::new(
            status, completed, total,
        )))
        .await;
    }

    async fn publish(&self, event: RunEvent) {
        if let Err(err) = self.bus.publish(event).await {
            warn!("Failed to publish run event: {err}");
        }
    }
}

#[async_trait]
pub trait MatrixRunner {
    async fn run(&self, job: &MatrixJob) -> MatrixOutcome;
}

#[async_trait]
impl<L, A, B> MatrixRunner for MatrixOrchestrator<L, A, B>
where
    L: SpecLookup,
    A: Analyzer,
    B: EventBus,
{
    async fn run(&self, job: &MatrixJob) -> MatrixOutcome {
        self.execute(job).await
    }
}
