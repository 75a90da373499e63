//! Final results view shown once playback completes.

use crate::model::{process_label, ProcessDetail, Statistics};

/// Column headers of the per-process table, in display order.
pub const DETAIL_COLUMNS: [&str; 5] = [
    "Process ID",
    "Priority",
    "Waiting Time",
    "Turnaround Time",
    "Completion Time",
];

/// One row of the per-process table, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub pid: u32,
    pub cells: [String; 5],
    /// Extra values the simulator may report, for hover details
    pub arrival_time: Option<f64>,
    pub burst_time: Option<f64>,
    pub response_time: Option<f64>,
}

impl DetailRow {
    fn from_detail(detail: &ProcessDetail) -> Self {
        Self {
            pid: detail.pid,
            cells: [
                process_label(detail.pid),
                detail.priority.to_string(),
                format_number(detail.waiting_time),
                format_number(detail.turnaround_time),
                format_number(detail.completion_time),
            ],
            arrival_time: detail.arrival_time,
            burst_time: detail.burst_time,
            response_time: detail.response_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsView {
    /// (label, value) for waiting, turnaround and response averages
    pub averages: [(&'static str, String); 3],
    /// Completion order as `P1 → P2 → …`
    pub completion_order: String,
    /// One row per process, in the order the simulator reported them
    pub rows: Vec<DetailRow>,
}

impl StatisticsView {
    pub fn completion_order_label(&self) -> String {
        format!("Completion Order: {}", self.completion_order)
    }

    /// All summary lines in display order.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .averages
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect();
        lines.push(self.completion_order_label());
        lines
    }
}

/// Formats statistics for display; rows keep the input order.
pub fn statistics_view(stats: &Statistics) -> StatisticsView {
    let completion_order = stats
        .completion_order
        .iter()
        .map(|&pid| process_label(pid))
        .collect::<Vec<_>>()
        .join(" → ");

    StatisticsView {
        averages: [
            ("Average Waiting Time", format_number(stats.average_waiting_time)),
            ("Average Turnaround Time", format_number(stats.average_turnaround_time)),
            ("Average Response Time", format_number(stats.average_response_time)),
        ],
        completion_order,
        rows: stats.process_details.iter().map(DetailRow::from_detail).collect(),
    }
}

/// Shortest decimal form: `1`, `2.5`, `1.33`.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}
