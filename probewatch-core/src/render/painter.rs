//! Region painter
//!
//! Turns a redraw plan into drawing calls. Each region clears its own
//! rectangle before drawing, so partial updates never touch the rest of
//! the screen; the whole frame is cleared only for full redraws.

use core::fmt::Write as _;

use heapless::String;
use probewatch_display::{Color, DisplayBackend, DisplayError, Point, Rect, TextStyle};

use super::diff::{RedrawPlan, Region};
use super::layout::Layout;
use super::snapshot::{ChannelView, GraphView, Snapshot};
use crate::alarm::{AlarmIndicator, AlarmState};
use crate::history::{SampleRing, SampleStore, Stats};

const BACKGROUND: Color = Color::BLACK;
const TITLE_BG: Color = Color::BLUE;
const TEXT: Color = Color::WHITE;
const DIM: Color = Color::GRAY;
const HIGH: Color = Color::RED;
const LOW: Color = Color::CYAN;
const CURVE: Color = Color::GREEN;

/// Gap between a region edge and its text
const PAD: u16 = 2;

type Label = String<24>;

/// Style for a value, emphasised while its channel is alarmed
///
/// The blink phase swaps foreground and background.
fn value_style(alarm: AlarmIndicator, size: u8) -> TextStyle {
    let accent = match alarm.state {
        AlarmState::Normal => return TextStyle::new(TEXT, BACKGROUND, size),
        AlarmState::HighAlarm => HIGH,
        AlarmState::LowAlarm => LOW,
    };
    if alarm.blink_on {
        TextStyle::new(BACKGROUND, accent, size)
    } else {
        TextStyle::new(accent, BACKGROUND, size)
    }
}

fn push_temp(label: &mut Label, value: Option<f32>) {
    // Labels are sized for the longest value; overflow just truncates
    let _ = match value {
        Some(v) => write!(label, "{:.1}", v),
        None => write!(label, "--.-"),
    };
}

fn alarm_tag(state: AlarmState) -> &'static str {
    match state {
        AlarmState::Normal => "",
        AlarmState::HighAlarm => "HI",
        AlarmState::LowAlarm => "LO",
    }
}

/// Paint every region of `plan`
///
/// Stops at the first failed drawing call.
pub fn paint<D: DisplayBackend, const C: usize, const N: usize>(
    display: &mut D,
    layout: &Layout,
    plan: &RedrawPlan,
    snapshot: &Snapshot,
    store: &SampleStore<C, N>,
) -> Result<(), DisplayError> {
    if plan.full {
        display.clear(BACKGROUND)?;
    }
    for region in plan.regions.iter() {
        paint_region(display, layout, *region, snapshot, store)?;
    }
    Ok(())
}

fn paint_region<D: DisplayBackend, const C: usize, const N: usize>(
    display: &mut D,
    layout: &Layout,
    region: Region,
    snapshot: &Snapshot,
    store: &SampleStore<C, N>,
) -> Result<(), DisplayError> {
    match (region, snapshot) {
        (Region::Title, _) => paint_title(display, layout, snapshot, store.channel_count()),
        (Region::NoProbes, _) => paint_no_probes(display, layout),
        (Region::OverviewRow(index), Snapshot::Overview { rows }) => {
            match rows.iter().find(|r| r.index == index) {
                Some(row) => paint_overview_row(display, layout.overview_row(index), row),
                None => Ok(()),
            }
        }
        (Region::DetailValue, Snapshot::Detail { channel: Some(ch) }) => {
            paint_detail_value(display, layout.detail_value(), ch)
        }
        (Region::GraphInfo, Snapshot::Graph { graph: Some(g) }) => {
            paint_graph_info(display, layout.graph_info(), g)
        }
        (Region::GraphCurve, Snapshot::Graph { graph: Some(g) }) => {
            match store.history(g.channel.index) {
                Some(ring) => paint_curve(display, layout.graph_curve(), ring),
                None => Ok(()),
            }
        }
        // Region does not belong to this snapshot's mode
        _ => Ok(()),
    }
}

fn paint_title<D: DisplayBackend>(
    display: &mut D,
    layout: &Layout,
    snapshot: &Snapshot,
    channel_count: usize,
) -> Result<(), DisplayError> {
    let rect = layout.title();
    display.clear_region(rect, TITLE_BG)?;

    let mut label = Label::new();
    let _ = match snapshot {
        Snapshot::Overview { rows } => write!(label, "PROBES {}", rows.len()),
        Snapshot::Detail { channel: Some(ch) } => {
            write!(label, "PROBE {} {}/{}", ch.id.0, ch.index + 1, channel_count)
        }
        Snapshot::Graph { graph: Some(g) } => write!(label, "GRAPH P{}", g.channel.id.0),
        Snapshot::Detail { channel: None } => write!(label, "DETAIL"),
        Snapshot::Graph { graph: None } => write!(label, "GRAPH"),
    };
    let style = TextStyle::new(TEXT, TITLE_BG, 1);
    display.draw_text(rect.at(PAD, PAD), &label, style)
}

fn paint_no_probes<D: DisplayBackend>(
    display: &mut D,
    layout: &Layout,
) -> Result<(), DisplayError> {
    let rect = layout.body();
    display.clear_region(rect, BACKGROUND)?;
    let style = TextStyle::new(DIM, BACKGROUND, 1);
    display.draw_text(rect.at(PAD, PAD), "NO PROBES", style)
}

fn paint_overview_row<D: DisplayBackend>(
    display: &mut D,
    rect: Rect,
    row: &ChannelView,
) -> Result<(), DisplayError> {
    let style = value_style(row.alarm, 1);
    display.clear_region(rect, style.bg)?;

    let mut label = Label::new();
    let _ = write!(label, "P{:<2} ", row.id.0);
    push_temp(&mut label, row.value);
    let _ = write!(label, "C {}", alarm_tag(row.alarm.state));
    display.draw_text(rect.at(PAD, PAD), &label, style)
}

fn paint_detail_value<D: DisplayBackend>(
    display: &mut D,
    rect: Rect,
    channel: &ChannelView,
) -> Result<(), DisplayError> {
    display.clear_region(rect, BACKGROUND)?;

    let big = value_style(channel.alarm, 3);
    let mut label = Label::new();
    push_temp(&mut label, channel.value);
    let _ = label.push('C');
    let value_at = rect.at(PAD * 2, PAD * 4);
    display.draw_text(value_at, &label, big)?;

    let status = match channel.alarm.state {
        AlarmState::Normal => "NORMAL",
        AlarmState::HighAlarm => "HIGH ALARM",
        AlarmState::LowAlarm => "LOW ALARM",
    };
    let small = value_style(channel.alarm, 1);
    let status_at = rect.at(PAD * 2, PAD * 6 + big.line_height());
    display.draw_text(status_at, status, small)
}

fn paint_graph_info<D: DisplayBackend>(
    display: &mut D,
    rect: Rect,
    graph: &GraphView,
) -> Result<(), DisplayError> {
    display.clear_region(rect, BACKGROUND)?;
    let plain = TextStyle::new(TEXT, BACKGROUND, 1);

    let (min, max, avg) = match graph.stats {
        Some(Stats { min, max, avg, .. }) => (Some(min), Some(max), Some(avg)),
        None => (None, None, None),
    };

    let mut line = Label::new();
    let _ = line.push_str("min ");
    push_temp(&mut line, min);
    let _ = line.push_str(" max ");
    push_temp(&mut line, max);
    display.draw_text(rect.at(PAD, PAD), &line, plain)?;

    line.clear();
    let _ = line.push_str("avg ");
    push_temp(&mut line, avg);
    let _ = line.push_str(" now ");
    let avg_at = rect.at(PAD, PAD + plain.line_height());
    display.draw_text(avg_at, &line, plain)?;

    let mut now = Label::new();
    push_temp(&mut now, graph.channel.value);
    let now_at = Point::new(avg_at.x + plain.width_of(line.len()), avg_at.y);
    display.draw_text(now_at, &now, value_style(graph.channel.alarm, 1))
}

/// Plot the most recent samples that fit the curve width
fn paint_curve<D: DisplayBackend, const N: usize>(
    display: &mut D,
    rect: Rect,
    ring: &SampleRing<N>,
) -> Result<(), DisplayError> {
    display.clear_region(rect, BACKGROUND)?;
    let plot = rect.inset(PAD);
    if plot.is_empty() {
        return Ok(());
    }
    display.draw_line(
        Point::new(plot.x, plot.bottom() - 1),
        Point::new(plot.right() - 1, plot.bottom() - 1),
        DIM,
    )?;

    let width = usize::from(plot.width);
    let points = ring.len().min(width);
    if points == 0 {
        return Ok(());
    }
    let skip = ring.len() - points;

    let mut lo = f32::MAX;
    let mut hi = f32::MIN;
    for s in ring.iter().skip(skip) {
        lo = lo.min(s.value);
        hi = hi.max(s.value);
    }
    let span = hi - lo;
    let max_dy = f32::from(plot.height - 1);

    let mut previous: Option<Point> = None;
    for (k, sample) in ring.iter().skip(skip).enumerate() {
        let dx = if points > 1 {
            k * (width - 1) / (points - 1)
        } else {
            0
        };
        let frac = if span > 0.0 {
            (sample.value - lo) / span
        } else {
            0.5
        };
        let dy = (frac * max_dy) as u16;
        let p = Point::new(plot.x + dx as u16, plot.bottom() - 1 - dy);
        match previous {
            Some(prev) => display.draw_line(prev, p, CURVE)?,
            None if points == 1 => display.draw_point(p, CURVE)?,
            None => {}
        }
        previous = Some(p);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::AlarmBank;
    use crate::config::AlarmThresholds;
    use crate::render::diff::RenderDiff;
    use crate::testing::{DrawCall, RecordingDisplay};
    use crate::traits::{ChannelId, Reading};
    use crate::view::{ViewEvent, ViewState};

    fn setup() -> (SampleStore<4, 16>, AlarmBank<4>, ViewState) {
        let mut store = SampleStore::new(&[ChannelId(1), ChannelId(2)], 16, 0);
        for t in 0..5u32 {
            store.record(0, Reading::Celsius(20.0 + t as f32), t);
        }
        store.record(1, Reading::Celsius(31.0), 0);
        let mut alarms = AlarmBank::new(2, AlarmThresholds::default(), 500);
        alarms.update(0, Reading::Celsius(24.0), 0);
        alarms.update(1, Reading::Celsius(31.0), 0);
        (store, alarms, ViewState::new(2))
    }

    #[test]
    fn test_full_overview_clears_once() {
        let (store, alarms, view) = setup();
        let layout = Layout::new(160, 128);
        let snap = Snapshot::capture(&view, &store, &alarms);
        let plan = RenderDiff::new(0.1).plan(view.frame_key(), &snap);

        let mut display = RecordingDisplay::new(160, 128);
        paint(&mut display, &layout, &plan, &snap, &store).unwrap();

        assert_eq!(display.clears(), 1);
        assert_eq!(display.calls()[0], DrawCall::Clear(BACKGROUND));
        assert!(display.texts().any(|t| t.starts_with("P1  24.0C")));
        assert!(display.texts().any(|t| t.starts_with("P2  31.0C HI")));
    }

    #[test]
    fn test_partial_row_is_region_scoped() {
        let (store, alarms, view) = setup();
        let layout = Layout::new(160, 128);
        let snap = Snapshot::capture(&view, &store, &alarms);
        let mut plan = RedrawPlan::default();
        plan.regions.push(Region::OverviewRow(1)).unwrap();

        let mut display = RecordingDisplay::new(160, 128);
        paint(&mut display, &layout, &plan, &snap, &store).unwrap();

        assert_eq!(display.clears(), 0);
        assert_eq!(
            display.calls()[0],
            DrawCall::ClearRegion(layout.overview_row(1), HIGH)
        );
        assert_eq!(display.calls().len(), 2);
    }

    #[test]
    fn test_graph_curve_draws_segments() {
        let (store, alarms, mut view) = setup();
        view.handle(ViewEvent::NextMode);
        view.handle(ViewEvent::NextMode);
        let layout = Layout::new(160, 128);
        let snap = Snapshot::capture(&view, &store, &alarms);
        let mut plan = RedrawPlan::default();
        plan.regions.push(Region::GraphCurve).unwrap();

        let mut display = RecordingDisplay::new(160, 128);
        paint(&mut display, &layout, &plan, &snap, &store).unwrap();

        // Clear, axis, then one segment between each pair of samples
        let lines = display
            .calls()
            .iter()
            .filter(|c| matches!(c, DrawCall::Line(..)))
            .count();
        assert_eq!(lines, 1 + 4);
    }

    #[test]
    fn test_failure_stops_painting() {
        let (store, alarms, view) = setup();
        let layout = Layout::new(160, 128);
        let snap = Snapshot::capture(&view, &store, &alarms);
        let plan = RedrawPlan::full(&snap);

        let mut display = RecordingDisplay::new(160, 128);
        display.fail_after(2);
        assert_eq!(
            paint(&mut display, &layout, &plan, &snap, &store),
            Err(DisplayError::Communication)
        );
        assert_eq!(display.calls().len(), 2);
    }

    #[test]
    fn test_blink_swaps_colours() {
        let on = AlarmIndicator {
            state: AlarmState::HighAlarm,
            blink_on: true,
        };
        let off = AlarmIndicator {
            blink_on: false,
            ..on
        };
        assert_eq!(value_style(on, 1).bg, HIGH);
        assert_eq!(value_style(off, 1).fg, HIGH);
        assert_eq!(value_style(AlarmIndicator::default(), 1).fg, TEXT);
    }
}
