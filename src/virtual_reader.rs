//! Locally generated demo traces.
//!
//! Produces the same document shape the simulation server returns, so the
//! player can be exercised without a server.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::model::{Pid, ProcessDetail, ProcessSnapshot, Statistics, TimeStep, Trace};
use crate::request::{ProcessRow, SchedulingPolicy};
use crate::theme::PROCESS_PALETTE;
use crate::traits::TraceReader;

const DEFAULT_PROCESS_COUNT: usize = 5;
const DEFAULT_MAX_BURST: u32 = 8;
const DEFAULT_MAX_ARRIVAL: u32 = 12;
const MAX_PRIORITY: u32 = 5;

/// Seeded generator of random process sets and their schedules.
#[derive(Debug, Clone)]
pub struct VirtualTraceReader {
    process_count: usize,
    max_burst: u32,
    max_arrival: u32,
    seed: u64,
    policy: SchedulingPolicy,
}

impl Default for VirtualTraceReader {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualTraceReader {
    pub fn new() -> Self {
        Self {
            process_count: DEFAULT_PROCESS_COUNT,
            max_burst: DEFAULT_MAX_BURST,
            max_arrival: DEFAULT_MAX_ARRIVAL,
            seed: 42, // Default seed for reproducibility
            policy: SchedulingPolicy::NonPreemptive,
        }
    }

    pub fn with_config(process_count: usize, max_burst: u32, max_arrival: u32, seed: u64) -> Self {
        Self {
            process_count: process_count.max(1),
            max_burst: max_burst.max(1),
            max_arrival,
            seed,
            policy: SchedulingPolicy::NonPreemptive,
        }
    }

    pub fn policy(mut self, policy: SchedulingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The random process set this reader schedules.
    pub fn rows(&self) -> Vec<ProcessRow> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..self.process_count)
            .map(|_| ProcessRow {
                burst_time: rng.gen_range(1..=self.max_burst),
                arrival_time: rng.gen_range(0..=self.max_arrival),
                priority: rng.gen_range(1..=MAX_PRIORITY),
            })
            .collect()
    }
}

impl TraceReader for VirtualTraceReader {
    fn read(&self) -> anyhow::Result<Trace> {
        let rows = self.rows();
        let trace = simulate(&rows, self.policy);
        tracing::info!(
            seed = self.seed,
            processes = rows.len(),
            steps = trace.step_count(),
            "generated demo trace"
        );
        Ok(trace)
    }

    fn describe(&self) -> String {
        format!("demo (seed {})", self.seed)
    }
}

#[derive(Debug)]
struct Job {
    pid: Pid,
    arrival: u64,
    burst: u64,
    priority: u32,
    remaining: u64,
    color: &'static str,
    response: Option<u64>,
}

impl Job {
    fn snapshot(&self) -> ProcessSnapshot {
        ProcessSnapshot {
            pid: self.pid,
            color: self.color.to_string(),
            remaining_time: Some(self.remaining as u32),
        }
    }

    fn rank(&self) -> (u32, u64, Pid) {
        (self.priority, self.arrival, self.pid)
    }
}

struct Run {
    time: u64,
    pending: Vec<Job>,
    ready: Vec<Job>,
    history: Vec<TimeStep>,
    details: Vec<ProcessDetail>,
}

impl Run {
    fn admit(&mut self) {
        while self.pending.first().is_some_and(|job| job.arrival <= self.time) {
            let job = self.pending.remove(0);
            self.ready.push(job);
        }
    }

    fn pick(&mut self) -> Job {
        self.ready.sort_by_key(Job::rank);
        self.ready.remove(0)
    }

    /// Runs `job` for one time unit and admits anything that arrived meanwhile.
    fn execute(&mut self, job: &mut Job) {
        self.history.push(TimeStep {
            time: self.time,
            running: Some(job.snapshot()),
            queue: self.ready.iter().map(Job::snapshot).collect(),
        });
        job.remaining -= 1;
        self.time += 1;
        self.admit();
    }

    fn finish(&mut self, job: Job) {
        let turnaround = self.time - job.arrival;
        self.details.push(ProcessDetail {
            pid: job.pid,
            priority: job.priority,
            waiting_time: (turnaround - job.burst) as f64,
            turnaround_time: turnaround as f64,
            completion_time: self.time as f64,
            arrival_time: Some(job.arrival as f64),
            burst_time: Some(job.burst as f64),
            response_time: job.response.map(|r| r as f64),
        });
    }
}

/// Schedules `rows` by priority (lower value first, ties by arrival then pid)
/// and records one snapshot per simulated time unit.
///
/// Pids follow row order starting at 1. Colors come from the palette in
/// arrival order.
pub fn simulate(rows: &[ProcessRow], policy: SchedulingPolicy) -> Trace {
    let mut pending: Vec<Job> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| Job {
            pid: (i + 1) as Pid,
            arrival: row.arrival_time as u64,
            burst: row.burst_time.max(1) as u64,
            priority: row.priority,
            remaining: row.burst_time.max(1) as u64,
            color: "",
            response: None,
        })
        .collect();
    pending.sort_by_key(|job| (job.arrival, job.pid));
    for (i, job) in pending.iter_mut().enumerate() {
        job.color = PROCESS_PALETTE[i % PROCESS_PALETTE.len()];
    }

    let mut run = Run {
        time: 0,
        pending,
        ready: Vec::new(),
        history: Vec::new(),
        details: Vec::new(),
    };

    loop {
        run.admit();
        if run.ready.is_empty() {
            let Some(next) = run.pending.first().map(|job| job.arrival) else {
                break;
            };
            while run.time < next {
                run.history.push(TimeStep::idle(run.time));
                run.time += 1;
            }
            continue;
        }

        let mut job = run.pick();
        job.response.get_or_insert(run.time - job.arrival);

        match policy {
            SchedulingPolicy::NonPreemptive => {
                while job.remaining > 0 {
                    run.execute(&mut job);
                }
            }
            SchedulingPolicy::Preemptive => run.execute(&mut job),
        }

        if job.remaining == 0 {
            run.finish(job);
        } else {
            run.ready.push(job);
        }
    }

    let statistics = summarize(run.details);
    Trace::new(run.history, statistics)
}

fn summarize(details: Vec<ProcessDetail>) -> Statistics {
    if details.is_empty() {
        return Statistics::default();
    }

    let n = details.len() as f64;
    let average = |f: fn(&ProcessDetail) -> f64| round2(details.iter().map(f).sum::<f64>() / n);

    Statistics {
        average_waiting_time: average(|d| d.waiting_time),
        average_turnaround_time: average(|d| d.turnaround_time),
        average_response_time: average(|d| d.response_time.unwrap_or(0.0)),
        completion_order: details.iter().map(|d| d.pid).collect(),
        process_details: details,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
