use gazecue_common::config::PipelineConfig;
use gazecue_detection::{DetectionRun, NoopObserver};
use gazecue_model::event::{events_respect_spacing, GazeEvent};
use gazecue_model::landmark::LandmarkSet;
use proptest::prelude::*;

fn degenerate() -> LandmarkSet {
    let mut set = LandmarkSet::for_gaze(0.5, 0.5);
    set.outer_corner = set.inner_corner;
    set
}

/// `None` is a frame without a face.
fn arbitrary_frames() -> impl Strategy<Value = Vec<Option<(f64, f64)>>> {
    prop::collection::vec(
        prop_oneof![
            1 => Just(None),
            8 => (0.0f64..1.0, 0.0f64..1.0).prop_map(Some),
        ],
        0..300,
    )
}

fn arbitrary_config() -> impl Strategy<Value = PipelineConfig> {
    (1u64..4, 1usize..12, 1u32..6, 0.0f64..3.0).prop_map(
        |(frame_skip, smoothing_window, confidence_threshold, debounce_time)| PipelineConfig {
            frame_skip,
            smoothing_window,
            confidence_threshold,
            debounce_time,
            ..Default::default()
        },
    )
}

fn detect(config: &PipelineConfig, frames: &[Option<(f64, f64)>], fps: f64) -> Vec<GazeEvent> {
    let mut run = DetectionRun::new(config).unwrap();
    for (i, frame) in frames.iter().enumerate() {
        let faces: Vec<LandmarkSet> = frame
            .iter()
            .map(|(x, y)| LandmarkSet::for_gaze(*x, *y))
            .collect();
        run.feed_landmarks(i as u64, i as f64 / fps, &faces, &mut NoopObserver);
    }
    run.finish(&mut NoopObserver).events
}

#[test]
fn events_are_ordered_and_spaced() {
    proptest!(|(config in arbitrary_config(), frames in arbitrary_frames(), fps in 5.0f64..60.0)| {
        let events = detect(&config, &frames, fps);
        prop_assert!(events_respect_spacing(&events, config.debounce_time));
        for pair in events.windows(2) {
            prop_assert!(pair[0].frame_index < pair[1].frame_index);
        }
    });
}

#[test]
fn first_event_needs_a_full_run_of_sampled_frames() {
    proptest!(|(config in arbitrary_config(), frames in arbitrary_frames())| {
        let events = detect(&config, &frames, 30.0);
        if let Some(first) = events.first() {
            let earliest = u64::from(config.confidence_threshold - 1) * config.frame_skip;
            prop_assert!(first.frame_index >= earliest);
            prop_assert_eq!(first.frame_index % config.frame_skip, 0);
        }
    });
}

#[test]
fn alternating_classification_never_fires() {
    proptest!(|(threshold in 2u32..8, len in 0usize..400)| {
        let config = PipelineConfig {
            frame_skip: 1,
            smoothing_window: 1,
            confidence_threshold: threshold,
            debounce_time: 0.0,
            ..Default::default()
        };
        let frames: Vec<Option<(f64, f64)>> = (0..len)
            .map(|i| Some(if i % 2 == 0 { (0.9, 0.1) } else { (0.1, 0.9) }))
            .collect();
        prop_assert!(detect(&config, &frames, 30.0).is_empty());
    });
}

#[test]
fn degenerate_frames_leave_the_outcome_unchanged() {
    proptest!(|(
        gaze in prop::collection::vec((0.0f64..1.0, 0.0f64..1.0), 0..200),
        inserts in prop::collection::vec(0usize..3, 0..200),
    )| {
        let config = PipelineConfig {
            frame_skip: 1,
            ..Default::default()
        };

        let mut clean = DetectionRun::new(&config).unwrap();
        let mut noisy = DetectionRun::new(&config).unwrap();
        let mut noisy_index = 0u64;
        for (i, (x, y)) in gaze.iter().enumerate() {
            let t = i as f64 * 0.05;
            let face = [LandmarkSet::for_gaze(*x, *y)];

            for _ in 0..inserts.get(i).copied().unwrap_or(0) {
                noisy.feed_landmarks(noisy_index, t, &[degenerate()], &mut NoopObserver);
                noisy_index += 1;
            }
            clean.feed_landmarks(i as u64, t, &face, &mut NoopObserver);
            noisy.feed_landmarks(noisy_index, t, &face, &mut NoopObserver);
            noisy_index += 1;
        }

        let clean = clean.finish(&mut NoopObserver);
        let noisy = noisy.finish(&mut NoopObserver);
        let clean_t: Vec<f64> = clean.events.iter().map(|e| e.timestamp_secs).collect();
        let noisy_t: Vec<f64> = noisy.events.iter().map(|e| e.timestamp_secs).collect();
        prop_assert_eq!(clean_t, noisy_t);
        prop_assert_eq!(clean.stats.readies, noisy.stats.readies);
    });
}
