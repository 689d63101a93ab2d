use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use chrono::{Days, NaiveDate};
use contribution_canon_core::{
    ActivityDay, CellIndex, ContributionGrid, FireEvent, SpeedPreset, DAYS_PER_WEEK,
};
use contribution_canon_system_layout::LayoutEngine;
use contribution_canon_system_trajectory::{TrajectoryScheduler, STAGGER_STEP};

#[test]
fn identical_inputs_replay_identically() {
    let grid = patterned_grid(53);
    let geometry = LayoutEngine::default().layout_grid(&grid);
    let scheduler = TrajectoryScheduler::new();

    for speed in [SpeedPreset::Slow, SpeedPreset::Normal, SpeedPreset::Fast] {
        let first = scheduler.schedule(&grid, &geometry, speed);
        let second = scheduler.schedule(&grid, &geometry, speed);

        assert_eq!(first, second, "schedule diverged for {speed:?}");
        assert_eq!(fingerprint(&first), fingerprint(&second));
    }
}

#[test]
fn launches_advance_by_constant_stagger() {
    let grid = patterned_grid(20);
    let geometry = LayoutEngine::default().layout_grid(&grid);
    let scheduler = TrajectoryScheduler::new();
    let events = scheduler.schedule(&grid, &geometry, SpeedPreset::Normal);

    assert_eq!(events.len(), grid.active_days());
    assert_eq!(events[0].launch_delay, Duration::ZERO);
    for pair in events.windows(2) {
        assert!(pair[1].launch_delay > pair[0].launch_delay);
        assert_eq!(pair[1].launch_delay - pair[0].launch_delay, STAGGER_STEP);
    }
}

#[test]
fn events_follow_week_major_order_and_skip_empty_cells() {
    let grid = patterned_grid(6);
    let geometry = LayoutEngine::default().layout_grid(&grid);
    let scheduler = TrajectoryScheduler::new();
    let events = scheduler.schedule(&grid, &geometry, SpeedPreset::Normal);

    let expected: Vec<CellIndex> = grid
        .cells()
        .filter(|(_, day)| day.is_active())
        .map(|(index, _)| index)
        .collect();
    let scheduled: Vec<CellIndex> = events.iter().map(|event| event.cell).collect();
    assert_eq!(scheduled, expected);

    for event in &events {
        assert_eq!(event.target, geometry.cell_center(event.cell));
        assert_eq!(
            event.impact_time(),
            event.launch_delay + event.flight_duration
        );
    }
}

#[test]
fn single_active_cell_fires_once_without_delay() {
    let grid = grid_with_single_cell(2, CellIndex::new(1, 3), 5);
    let geometry = LayoutEngine::default().layout_grid(&grid);
    let scheduler = TrajectoryScheduler::new();
    let events = scheduler.schedule(&grid, &geometry, SpeedPreset::Fast);

    assert_eq!(events.len(), 1);
    let event = events[0];
    assert_eq!(event.launch_delay, Duration::ZERO);
    assert_eq!(event.cell, CellIndex::new(1, 3));
    assert_eq!(event.target, glam::Vec2::new(67.0, 91.0));

    let distance = 145.0_f64.sqrt();
    let expected = distance / 100.0 * 0.7;
    let error = (event.flight_duration.as_secs_f64() - expected).abs();
    assert!(error < 1e-6);
}

#[test]
fn empty_grids_schedule_nothing() {
    let scheduler = TrajectoryScheduler::new();
    let engine = LayoutEngine::default();

    let speed = SpeedPreset::Normal;

    let zero_weeks = ContributionGrid::empty();
    let geometry = engine.layout_grid(&zero_weeks);
    let events = scheduler.schedule(&zero_weeks, &geometry, speed);
    assert!(events.is_empty());

    let days = (0..21).map(|offset| ActivityDay::empty(date(offset)));
    let all_zero = ContributionGrid::from_days(days);
    let geometry = engine.layout_grid(&all_zero);
    assert!(scheduler.schedule(&all_zero, &geometry, speed).is_empty());
}

#[test]
fn speed_presets_only_scale_flight_time() {
    let grid = patterned_grid(10);
    let geometry = LayoutEngine::default().layout_grid(&grid);
    let scheduler = TrajectoryScheduler::new();

    let normal = scheduler.schedule(&grid, &geometry, SpeedPreset::Normal);
    let slow = scheduler.schedule(&grid, &geometry, SpeedPreset::Slow);

    assert_eq!(normal.len(), slow.len());
    for (normal, slow) in normal.iter().zip(&slow) {
        assert_eq!(normal.launch_delay, slow.launch_delay);
        assert_eq!(normal.target, slow.target);
        let ratio = slow.flight_duration.as_secs_f64() / normal.flight_duration.as_secs_f64();
        assert!((ratio - 1.5).abs() < 1e-6);
    }
}

#[test]
fn output_buffer_is_cleared_between_calls() {
    let grid = patterned_grid(4);
    let geometry = LayoutEngine::default().layout_grid(&grid);
    let scheduler = TrajectoryScheduler::new();
    let speed = SpeedPreset::Normal;
    let mut out = Vec::new();

    scheduler.handle(&grid, &geometry, speed, &mut out);
    let first_len = out.len();
    scheduler.handle(&grid, &geometry, speed, &mut out);

    assert_eq!(out.len(), first_len);
}

fn date(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|start| start.checked_add_days(Days::new(offset)))
        .expect("date in range")
}

fn patterned_grid(weeks: usize) -> ContributionGrid {
    let days = (0..weeks * DAYS_PER_WEEK).map(|offset| {
        let week = offset / DAYS_PER_WEEK;
        let day = offset % DAYS_PER_WEEK;
        let count = if (week + day).is_multiple_of(3) {
            (week * day) as u32 + 1
        } else {
            0
        };
        ActivityDay::new(date(offset as u64), count)
    });
    ContributionGrid::from_days(days)
}

fn grid_with_single_cell(weeks: usize, target: CellIndex, count: u32) -> ContributionGrid {
    let days = (0..weeks * DAYS_PER_WEEK).map(|offset| {
        let index = CellIndex::new(offset / DAYS_PER_WEEK, offset % DAYS_PER_WEEK);
        let count = if index == target { count } else { 0 };
        ActivityDay::new(date(offset as u64), count)
    });
    ContributionGrid::from_days(days)
}

fn fingerprint(events: &[FireEvent]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for event in events {
        event.cell.hash(&mut hasher);
        event.target.x.to_bits().hash(&mut hasher);
        event.target.y.to_bits().hash(&mut hasher);
        event.launch_delay.hash(&mut hasher);
        event.flight_duration.hash(&mut hasher);
    }
    hasher.finish()
}
