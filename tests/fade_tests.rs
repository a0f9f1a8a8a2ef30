use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use gaze_fade::fade::{advance, update, FadePhase};
use gaze_fade::math::Rgba;
use gaze_fade::traits::OpacitySink;
use gaze_fade::{Camera, FadeConfig, FadeController, FadeState, LabelId, TextLabel};

fn scenario_config() -> FadeConfig {
    FadeConfig {
        visibility_angle_degrees: 5.0,
        fade_scale: 0.5,
        minimum_alpha_before_auto_fade: 0.5,
    }
}

fn label_at(position: Vec3) -> TextLabel {
    TextLabel::new("label", position, Rgba::new(0.2, 0.4, 0.8, 1.0))
}

/// Deterministic pseudo-random sequence in [0, 1)
fn sequence(seed: u32, len: usize) -> Vec<f32> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 8) as f32 / (1u32 << 24) as f32
        })
        .collect()
}

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn test_facing_target_reaches_full_alpha_in_two_ticks() {
        let camera = Camera::default();
        let mut controller =
            FadeController::new(LabelId(1), scenario_config(), label_at(Vec3::new(0.0, 0.0, 5.0)))
                .unwrap();

        assert!(!controller.tick(&camera, 1.0));
        assert!((controller.state().alpha() - 0.5).abs() < 1e-6);
        assert!(!controller.state().is_latched());

        assert!(controller.tick(&camera, 1.0), "second tick should complete");
        assert!((controller.state().alpha() - 1.0).abs() < 1e-6);
        assert!(controller.state().is_latched());
        assert_eq!(controller.phase(), FadePhase::Latched);
    }

    #[test]
    fn test_facing_away_never_fades_in() {
        let camera = Camera::default();
        let mut controller =
            FadeController::new(LabelId(2), scenario_config(), label_at(Vec3::new(0.0, 0.0, -5.0)))
                .unwrap();

        for _ in 0..100 {
            assert!(!controller.tick(&camera, 1.0));
            assert_eq!(controller.state().alpha(), 0.0);
            assert_eq!(controller.target().alpha(), 0.0);
        }
        assert!(!controller.state().is_latched());
        assert_eq!(controller.phase(), FadePhase::Hidden);
    }

    #[test]
    fn test_auto_fade_continues_without_gaze() {
        let config = scenario_config();
        let mut state = FadeState::from_alpha(0.6);
        let mut ticks = 0;

        while !state.is_latched() {
            let next = advance(state, &config, false, 0.1);
            assert!(next.alpha() > state.alpha(), "auto fade should keep increasing alpha");
            state = next;
            ticks += 1;
            assert!(ticks <= 20, "auto fade never latched");
        }
        assert!((state.alpha() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_auto_fade_through_update_with_camera_facing_away() {
        let camera = Camera::default();
        let target = Vec3::new(0.0, 0.0, -5.0);
        let state = update(FadeState::from_alpha(0.6), &scenario_config(), &camera, &target, 0.2);
        assert!((state.alpha() - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_target_on_camera_fades_out_without_nan() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), 0.0, 0.0);
        let target = camera.position;
        let state = update(FadeState::from_alpha(0.3), &scenario_config(), &camera, &target, 0.2);
        assert!(!state.alpha().is_nan());
        assert!((state.alpha() - 0.2).abs() < 1e-5, "sentinel direction means not gazing");
    }
}

#[cfg(test)]
mod controller_tests {
    use super::*;

    #[test]
    fn test_new_hides_target_and_keeps_rgb() {
        let controller =
            FadeController::new(LabelId(0), scenario_config(), label_at(Vec3::Z)).unwrap();
        assert_eq!(controller.target().color, Rgba::new(0.2, 0.4, 0.8, 0.0));
        assert_eq!(controller.state(), FadeState::new());
        assert_eq!(controller.phase(), FadePhase::Hidden);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = FadeConfig {
            fade_scale: 0.0,
            ..scenario_config()
        };
        assert!(FadeController::new(LabelId(0), config, label_at(Vec3::Z)).is_err());
    }

    #[test]
    fn test_tick_writes_alpha_to_target_only() {
        let camera = Camera::default();
        let mut controller =
            FadeController::new(LabelId(0), scenario_config(), label_at(Vec3::new(0.0, 0.0, 5.0)))
                .unwrap();
        controller.tick(&camera, 0.5);
        let color = controller.target().color;
        assert_eq!(color.rgb(), [0.2, 0.4, 0.8]);
        assert!((color.a - 0.25).abs() < 1e-6);
        assert_eq!(controller.phase(), FadePhase::FadingIn);
    }

    #[test]
    fn test_gazed_label_with_zero_dt_reports_fading_in() {
        let camera = Camera::default();
        let mut controller =
            FadeController::new(LabelId(0), scenario_config(), label_at(Vec3::new(0.0, 0.0, 5.0)))
                .unwrap();
        controller.tick(&camera, 0.5);
        controller.tick(&camera, 0.0);
        assert!((controller.state().alpha() - 0.25).abs() < 1e-6);
        assert_eq!(controller.phase(), FadePhase::FadingIn);
    }

    #[test]
    fn test_controller_keeps_validated_config() {
        let config = FadeConfig {
            visibility_angle_degrees: 12.0,
            ..scenario_config()
        };
        let controller = FadeController::new(LabelId(3), config, label_at(Vec3::Z)).unwrap();
        assert_eq!(controller.config(), &config);
        assert_eq!(controller.id(), LabelId(3));
    }

    #[test]
    fn test_fades_out_when_gaze_leaves_early() {
        let mut camera = Camera::default();
        let mut controller =
            FadeController::new(LabelId(0), scenario_config(), label_at(Vec3::new(0.0, 0.0, 5.0)))
                .unwrap();
        controller.tick(&camera, 0.4);
        assert!((controller.state().alpha() - 0.2).abs() < 1e-6);

        camera.turn(std::f32::consts::PI);
        controller.tick(&camera, 0.2);
        assert!((controller.state().alpha() - 0.1).abs() < 1e-6);
        assert_eq!(controller.phase(), FadePhase::FadingOut);
    }

    #[test]
    fn test_completion_callback_fires_once() {
        let camera = Camera::default();
        let completed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&completed);
        let mut controller =
            FadeController::new(LabelId(9), scenario_config(), label_at(Vec3::new(0.0, 0.0, 5.0)))
                .unwrap()
                .with_completion(move |id| sink.borrow_mut().push(id));

        for _ in 0..10 {
            controller.tick(&camera, 1.0);
        }
        assert_eq!(*completed.borrow(), vec![LabelId(9)]);
    }

    #[test]
    fn test_latched_controller_ignores_further_ticks() {
        let mut camera = Camera::default();
        let mut controller =
            FadeController::new(LabelId(0), scenario_config(), label_at(Vec3::new(0.0, 0.0, 5.0)))
                .unwrap();
        controller.tick(&camera, 1.0);
        controller.tick(&camera, 1.0);
        let latched = controller.state();
        assert!(latched.is_latched());

        camera.turn(std::f32::consts::PI);
        for dt in [0.0, 0.5, 10.0, 1000.0] {
            assert!(!controller.tick(&camera, dt));
            assert_eq!(controller.state(), latched);
            assert_eq!(controller.target().alpha(), latched.alpha());
        }
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    #[test]
    fn test_alpha_stays_in_range_for_arbitrary_ticks() {
        for seed in 1..20 {
            let config = FadeConfig {
                visibility_angle_degrees: 10.0,
                fade_scale: 0.01 + sequence(seed, 1)[0] * 0.99,
                minimum_alpha_before_auto_fade: 0.1 + sequence(seed + 100, 1)[0] * 0.9,
            };
            let gazes = sequence(seed * 7, 200);
            let dts = sequence(seed * 13, 200);

            let mut state = FadeState::new();
            for (g, dt) in gazes.iter().zip(&dts) {
                let before = state;
                state = advance(state, &config, *g < 0.5, dt * 3.0);
                assert!(
                    (0.0..=1.0).contains(&state.alpha()),
                    "alpha escaped range: {}",
                    state.alpha()
                );
                if before.is_latched() {
                    assert_eq!(state, before, "latched state changed");
                }
            }
        }
    }

    #[test]
    fn test_latched_iff_alpha_reached_one() {
        let config = scenario_config();
        let gazes = sequence(42, 500);
        let mut state = FadeState::new();
        let mut reached_one = false;
        for g in gazes {
            state = advance(state, &config, g < 0.3, 0.05);
            reached_one |= (state.alpha() - 1.0).abs() < 1e-5;
            assert_eq!(state.is_latched(), reached_one);
        }
    }
}
