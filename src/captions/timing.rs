use tracing::debug;

use crate::config::TimingConfig;
use crate::subtitle::Caption;

/// Stretch captions over short silences.
///
/// Only gaps strictly between `gap_fill_min` and `gap_fill_max` are touched:
/// the earlier caption is extended by half the gap, stopping `gap_margin`
/// before the next one.
pub fn fill_gaps(mut captions: Vec<Caption>, config: &TimingConfig) -> Vec<Caption> {
    for i in 1..captions.len() {
        let next_start = captions[i].start;
        let current = &mut captions[i - 1];
        let gap = next_start - current.end;

        if gap > config.gap_fill_min && gap < config.gap_fill_max {
            debug!("Gap of {:.1}s between captions {} and {}", gap, i, i + 1);
            current.end = (current.end + gap / 2.0).min(next_start - config.gap_margin);
        }
    }
    captions
}

/// Remove timing overlaps and enforce the minimum caption duration.
///
/// Captions are sorted by start time. When a caption starts before the
/// previous one ends, the previous one is cut short; if that would leave it
/// under `min_duration`, it keeps `min_duration` and the current caption is
/// pushed later instead.
pub fn resolve_overlaps(mut captions: Vec<Caption>, config: &TimingConfig) -> Vec<Caption> {
    captions.sort_by(|a, b| a.start.total_cmp(&b.start));

    for i in 0..captions.len() {
        if i > 0 {
            let (done, rest) = captions.split_at_mut(i);
            let previous = &mut done[i - 1];
            let current = &mut rest[0];

            if current.start < previous.end {
                previous.end = current.start - config.min_gap;

                if previous.end - previous.start < config.min_duration {
                    previous.end = previous.start + config.min_duration;
                    current.start = previous.end + config.min_gap;
                }
                debug!("Overlap resolved between captions {} and {}", i, i + 1);
            }
        }

        let current = &mut captions[i];
        if current.end - current.start < config.min_duration {
            current.end = current.start + config.min_duration;
        }
    }

    captions
}
