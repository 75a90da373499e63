use rsched::scene::{StateScene, StatisticsView, TimelineScene};
use rsched::{
    parse_trace, read_trace_file, ManualScheduler, PlaybackError, PlaybackPhase, PlaybackSession,
    PlaybackSurface, SceneBuffer, TickOutcome, TickScheduler, TraceReader, TraceWriter, VirtualTraceReader,
};
use anyhow::Result;
use egui::Color32;
use std::env;
use std::fs;

const SINGLE_PROCESS_TRACE: &str = r##"{
    "history": [
        {"time": 0, "running": {"pid": 1, "color": "#f00"}, "queue": [{"pid": 2, "color": "#0f0"}]},
        {"time": 1, "running": null, "queue": []}
    ],
    "statistics": {
        "average_waiting_time": 0,
        "average_turnaround_time": 1,
        "average_response_time": 0,
        "completion_order": [1],
        "process_details": [
            {"pid": 1, "priority": 1, "waiting_time": 0, "turnaround_time": 1, "completion_time": 1}
        ]
    }
}"##;

/// Counts how many times each area was drawn.
#[derive(Default)]
struct CountingSurface {
    states: usize,
    timelines: usize,
    statistics: usize,
}

impl PlaybackSurface for CountingSurface {
    fn show_state(&mut self, _scene: &StateScene) -> Result<()> {
        self.states += 1;
        Ok(())
    }

    fn show_timeline(&mut self, _scene: &TimelineScene) -> Result<()> {
        self.timelines += 1;
        Ok(())
    }

    fn show_statistics(&mut self, _view: &StatisticsView) -> Result<()> {
        self.statistics += 1;
        Ok(())
    }

    fn clear(&mut self) {}
}

/// Fails when asked to draw the state area for the nth time.
struct BrokenSurface {
    fail_on: usize,
    drawn: usize,
}

impl PlaybackSurface for BrokenSurface {
    fn show_state(&mut self, _scene: &StateScene) -> Result<()> {
        self.drawn += 1;
        if self.drawn == self.fail_on {
            anyhow::bail!("canvas lost");
        }
        Ok(())
    }

    fn show_timeline(&mut self, _scene: &TimelineScene) -> Result<()> {
        Ok(())
    }

    fn show_statistics(&mut self, _view: &StatisticsView) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) {}
}

#[test]
fn test_single_process_playback() -> Result<()> {
    let trace = parse_trace(SINGLE_PROCESS_TRACE)?;
    let mut session = PlaybackSession::new(ManualScheduler::new());
    let mut surface = SceneBuffer::new();
    session.load_and_start(trace);
    let timer = session.timer().unwrap();

    // Tick 1: P1 running, P2 waiting, one red block in slot 0.
    assert_eq!(session.on_timer(timer, &mut surface)?, TickOutcome::Rendered { step: 0 });
    let state = surface.state().unwrap();
    assert_eq!(state.running.as_ref().unwrap().label, "P1");
    let queued: Vec<&str> = state.queue.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(queued, vec!["P2"]);

    let timeline = surface.timeline().unwrap();
    assert_eq!(timeline.slot_count, 2);
    assert_eq!(timeline.blocks.len(), 1);
    assert_eq!(timeline.blocks[0].step, 0);
    assert_eq!(timeline.blocks[0].fill, Color32::from_rgb(255, 0, 0));
    let width = timeline.slot_width;

    // Tick 2: idle step replaces both indicators, slot 1 stays empty.
    assert_eq!(session.on_timer(timer, &mut surface)?, TickOutcome::Rendered { step: 1 });
    let state = surface.state().unwrap();
    assert!(state.running.is_none());
    assert!(state.queue.is_empty());
    let timeline = surface.timeline().unwrap();
    assert_eq!(timeline.blocks.len(), 1);
    assert_eq!(timeline.slot_width, width);
    assert!(surface.statistics().is_none());

    // The history is exhausted, so the next tick shows the statistics.
    assert_eq!(session.on_timer(timer, &mut surface)?, TickOutcome::Completed);
    assert_eq!(session.phase(), PlaybackPhase::Completed);
    assert_eq!(session.scheduler().active_timers(), 0);
    assert_eq!(session.rendered_ticks(), 2);

    let stats = surface.statistics().unwrap();
    assert_eq!(stats.completion_order_label(), "Completion Order: P1");
    assert_eq!(stats.rows.len(), 1);
    assert_eq!(stats.rows[0].pid, 1);
    assert_eq!(stats.averages[1].1, "1");

    Ok(())
}

#[test]
fn test_restart_mid_playback_leaves_one_driver() -> Result<()> {
    let trace = VirtualTraceReader::with_config(3, 3, 2, 7).read()?;
    let steps = trace.step_count();
    assert!(steps >= 2);

    let mut session = PlaybackSession::new(ManualScheduler::new());
    let mut surface = CountingSurface::default();
    session.load_and_start(trace);
    let stale = session.timer().unwrap();
    session.on_timer(stale, &mut surface)?;

    session.restart()?;
    let fresh = session.timer().unwrap();
    assert_eq!(session.scheduler().active_timers(), 1);
    assert!(!session.scheduler().is_active(stale));

    // A callback from the cancelled timer draws nothing.
    assert_eq!(session.on_timer(stale, &mut surface)?, TickOutcome::Stale);
    assert_eq!(surface.states, 1);

    let mut ticks = 0;
    while session.on_timer(fresh, &mut surface)? != TickOutcome::Completed {
        ticks += 1;
        assert!(ticks <= steps, "playback ran past the end of the history");
    }
    assert_eq!(ticks, steps);
    assert_eq!(surface.states, steps + 1);
    assert_eq!(surface.timelines, steps + 1);
    assert_eq!(surface.statistics, 1);

    Ok(())
}

#[test]
fn test_render_failure_stops_playback() -> Result<()> {
    let trace = VirtualTraceReader::with_config(3, 3, 0, 11).read()?;
    let mut session = PlaybackSession::new(ManualScheduler::new());
    let mut surface = BrokenSurface { fail_on: 2, drawn: 0 };
    session.load_and_start(trace);
    let timer = session.timer().unwrap();

    session.on_timer(timer, &mut surface)?;
    let err = session.on_timer(timer, &mut surface).unwrap_err();

    assert!(matches!(err, PlaybackError::Render { step: 1, .. }));
    assert!(err.to_string().contains("canvas lost"));
    assert_eq!(session.phase(), PlaybackPhase::Faulted);
    assert_eq!(session.scheduler().active_timers(), 0);
    assert_eq!(session.on_timer(timer, &mut surface)?, TickOutcome::Stale);

    Ok(())
}

#[test]
fn test_loading_a_new_trace_cancels_the_old_timer() -> Result<()> {
    let mut session = PlaybackSession::new(ManualScheduler::new());
    let mut surface = SceneBuffer::new();
    session.load_and_start(parse_trace(SINGLE_PROCESS_TRACE)?);
    let old = session.timer().unwrap();
    session.on_timer(old, &mut surface)?;

    session.load_and_start(VirtualTraceReader::new().read()?);
    let new = session.timer().unwrap();

    assert_ne!(old, new);
    assert_eq!(session.scheduler().active_timers(), 1);
    assert_eq!(session.scheduler().cancelled(), &[old]);
    assert_eq!(session.cursor(), 0);

    Ok(())
}

#[test]
fn test_brotli_trace_round_trip() -> Result<()> {
    let path = env::temp_dir().join("rsched_round_trip.json.br");
    let _ = fs::remove_file(&path);

    let trace = VirtualTraceReader::with_config(4, 5, 6, 99).read()?;
    {
        let mut writer = TraceWriter::new(&path)?;
        writer.write_trace(&trace)?;
        assert_eq!(writer.traces_written(), 1);
        writer.finish()?;
    }

    let raw = fs::read(&path)?;
    assert!(serde_json::from_slice::<serde_json::Value>(&raw).is_err());

    let loaded = read_trace_file(&path)?;
    assert_eq!(loaded.history, trace.history);
    assert_eq!(loaded.statistics.completion_order, trace.statistics.completion_order);
    assert_eq!(loaded.statistics.process_details.len(), trace.statistics.process_details.len());
    assert!((loaded.statistics.average_waiting_time - trace.statistics.average_waiting_time).abs() < 1e-9);

    fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn test_plain_trace_file_is_readable_json() -> Result<()> {
    let path = env::temp_dir().join("rsched_plain_trace.json");
    let _ = fs::remove_file(&path);

    let trace = parse_trace(SINGLE_PROCESS_TRACE)?;
    let mut writer = TraceWriter::new(&path)?.pretty(true);
    writer.write_trace(&trace)?;
    writer.finish()?;

    let text = fs::read_to_string(&path)?;
    assert!(text.contains("\"completion_order\""));
    assert_eq!(parse_trace(&text)?, trace);

    fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn test_malformed_trace_is_rejected() {
    let err = parse_trace(r#"{"history": "nope"}"#).unwrap_err();
    assert!(format!("{:#}", err).contains("schema"));

    let missing = read_trace_file(&env::temp_dir().join("rsched_missing_trace.json")).unwrap_err();
    assert!(missing.to_string().contains("Failed to open file"));
}

#[test]
fn test_demo_trace_plays_to_completion() -> Result<()> {
    let trace = VirtualTraceReader::new().read()?;
    let steps = trace.step_count();
    let finished = trace.statistics.completion_order.len();

    let mut session = PlaybackSession::new(ManualScheduler::new());
    let mut surface = SceneBuffer::new();
    session.load_and_start(trace);
    let timer = session.timer().unwrap();

    for step in 0..steps {
        assert_eq!(session.on_timer(timer, &mut surface)?, TickOutcome::Rendered { step });
        assert_eq!(session.cursor(), step + 1);
    }
    assert_eq!(session.on_timer(timer, &mut surface)?, TickOutcome::Completed);

    let view = surface.statistics().unwrap();
    assert_eq!(view.rows.len(), finished);
    let busy = surface.timeline().unwrap().blocks.len();
    assert_eq!(busy, session.trace().unwrap().busy_steps());

    Ok(())
}
