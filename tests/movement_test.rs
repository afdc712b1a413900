use std::{f32::consts::PI, future::Future};

use cgmath::{InnerSpace, Vector3};
use gridbot::{
    entities::person::{Direction, MotionState, MovePlan, playback_speed},
    error::MoveError,
    flow::drive,
    resources::animation::{AnimatedProperty, AnimationValue},
};
use instant::Duration;

use crate::common::test_utils::{
    MAX_TICKS, TICK, assert_f32_eq, assert_vec_eq, robot_at_origin, scene_time,
};

mod common;

#[test]
fn displacement_has_length_step_times_count() {
    for direction in [
        Direction::Forward,
        Direction::Back,
        Direction::Left,
        Direction::Right,
    ] {
        for count in 1..=4 {
            let plan = MovePlan::new(direction, count, 2.0);
            assert_f32_eq(plan.distance(), 2.0 * count as f32);
            assert_f32_eq(plan.displacement.magnitude(), plan.distance());
        }
    }
}

#[test]
fn each_direction_has_its_axis_and_angle() {
    let forward = MovePlan::new(Direction::Forward, 1, 2.0);
    assert_vec_eq(forward.displacement, Vector3::new(0.0, 0.0, 2.0));
    assert_f32_eq(forward.target_rotation, -PI / 2.0);

    let back = MovePlan::new(Direction::Back, 1, 2.0);
    assert_vec_eq(back.displacement, Vector3::new(0.0, 0.0, -2.0));
    assert_f32_eq(back.target_rotation, PI / 2.0);

    let left = MovePlan::new(Direction::Left, 1, 2.0);
    assert_vec_eq(left.displacement, Vector3::new(2.0, 0.0, 0.0));
    assert_f32_eq(left.target_rotation, 0.0);

    let right = MovePlan::new(Direction::Right, 1, 2.0);
    assert_vec_eq(right.displacement, Vector3::new(-2.0, 0.0, 0.0));
    assert_f32_eq(right.target_rotation, -PI);
}

#[test]
fn single_step_plays_at_speed_two() {
    assert_f32_eq(playback_speed(1, 2.0), 2.0);
    assert_f32_eq(MovePlan::new(Direction::Back, 1, 2.0).speed, 2.0);
    // independent of the grid size
    assert_f32_eq(MovePlan::new(Direction::Left, 1, 0.3).speed, 2.0);
    assert_f32_eq(MovePlan::new(Direction::Forward, 1, 7.0).speed, 2.0);
}

#[test]
fn longer_walks_play_at_half_the_distance() {
    assert_f32_eq(playback_speed(2, 4.0), 2.0);
    assert_f32_eq(playback_speed(3, 6.0), 3.0);
    assert_f32_eq(MovePlan::new(Direction::Back, 3, 0.3).speed, 0.45);
    assert_f32_eq(MovePlan::new(Direction::Right, 4, 2.0).speed, 4.0);
}

#[test]
fn forward_one_step_from_origin() {
    let (scene, _, person) = robot_at_origin();

    let result = drive(&scene, TICK, MAX_TICKS, person.move_forward(1)).unwrap();

    assert_eq!(result, Ok(()));
    assert_vec_eq(person.position().unwrap(), Vector3::new(0.0, 0.0, 2.0));
    assert_f32_eq(person.rotation_y().unwrap(), -PI / 2.0);
    assert_eq!(person.state(), MotionState::Idle);
}

#[test]
fn left_two_steps_from_origin() {
    let (scene, id, person) = robot_at_origin();
    let plan = MovePlan::new(Direction::Left, 2, person.movement().step_size);
    assert_vec_eq(plan.displacement, Vector3::new(4.0, 0.0, 0.0));
    assert_f32_eq(plan.speed, 2.0);

    drive(&scene, TICK, MAX_TICKS, person.move_left(2))
        .unwrap()
        .unwrap();

    assert_vec_eq(person.position().unwrap(), Vector3::new(4.0, 0.0, 0.0));
    assert_f32_eq(person.rotation_y().unwrap(), 0.0);
    // the playlist holds exactly the two tracks of the last move
    assert_eq!(scene.borrow().mesh(id).unwrap().animations.len(), 2);
}

#[test]
fn moves_chain_from_the_current_transform() {
    let (scene, _, person) = robot_at_origin();

    drive(&scene, TICK, MAX_TICKS, async {
        person.move_forward(2).await?;
        person.move_right(1).await?;
        person.move_back(1).await
    })
    .unwrap()
    .unwrap();

    assert_vec_eq(person.position().unwrap(), Vector3::new(-2.0, 0.0, 2.0));
    assert_f32_eq(person.rotation_y().unwrap(), PI / 2.0);
}

#[test]
fn each_move_rebuilds_both_tracks_from_the_current_pose() {
    let (scene, id, person) = robot_at_origin();

    drive(&scene, TICK, MAX_TICKS, async {
        person.move_forward(1).await?;
        person.move_left(2).await
    })
    .unwrap()
    .unwrap();

    let scene = scene.borrow();
    let tracks = &scene.mesh(id).unwrap().animations;
    assert_eq!(tracks.len(), 2);

    let rotation = &tracks[0];
    assert_eq!(rotation.property, AnimatedProperty::RotationY);
    let frames: Vec<_> = rotation.keys().iter().map(|k| k.frame).collect();
    assert_eq!(frames, vec![0.0, 10.0]);
    match (rotation.keys()[0].value, rotation.keys()[1].value) {
        (AnimationValue::Float(start), AnimationValue::Float(end)) => {
            // starts where the forward move left the robot facing
            assert_f32_eq(start, -PI / 2.0);
            assert_f32_eq(end, 0.0);
        }
        other => panic!("unexpected rotation keys {:?}", other),
    }

    let position = &tracks[1];
    assert_eq!(position.property, AnimatedProperty::Position);
    let frames: Vec<_> = position.keys().iter().map(|k| k.frame).collect();
    assert_eq!(frames, vec![0.0, 30.0]);
    match (position.keys()[0].value, position.keys()[1].value) {
        (AnimationValue::Vector3(start), AnimationValue::Vector3(end)) => {
            assert_vec_eq(start, Vector3::new(0.0, 0.0, 2.0));
            assert_vec_eq(end, Vector3::new(4.0, 0.0, 2.0));
        }
        other => panic!("unexpected position keys {:?}", other),
    }
}

#[test]
fn robot_turns_before_it_finishes_walking() {
    let (scene, _, person) = robot_at_origin();

    let (moved, (rotation, position)) = drive(&scene, TICK, MAX_TICKS, async {
        futures::join!(person.move_right(2), async {
            // speed 2 at 30 fps: frame 15 of 30
            scene_time(&scene, Duration::from_millis(250)).await;
            (person.rotation_y(), person.position())
        })
    })
    .unwrap();

    assert_eq!(moved, Ok(()));
    assert_f32_eq(rotation.unwrap(), -PI);
    assert_vec_eq(position.unwrap(), Vector3::new(-2.0, 0.0, 0.0));
}

#[test]
fn one_coarse_tick_can_finish_move_and_settle() {
    let (scene, _, person) = robot_at_origin();
    let waker = futures::task::noop_waker();
    let mut cx = std::task::Context::from_waker(&waker);
    let mut pending = Box::pin(person.move_forward(1));

    assert!(pending.as_mut().poll(&mut cx).is_pending());
    // 500ms of animation and 300ms of settling fit into one second
    scene.borrow_mut().advance(Duration::from_secs(1));

    assert_eq!(pending.as_mut().poll(&mut cx), std::task::Poll::Ready(Ok(())));
    assert_vec_eq(person.position().unwrap(), Vector3::new(0.0, 0.0, 2.0));
}

#[test]
fn move_resolves_only_after_the_settle_delay() {
    let (scene, _, person) = robot_at_origin();

    drive(&scene, TICK, MAX_TICKS, person.move_forward(1))
        .unwrap()
        .unwrap();

    // 30 frames at 30 fps * speed 2 = 500ms of animation, then 300ms settling
    let elapsed = scene.borrow().elapsed();
    assert!(elapsed >= Duration::from_millis(800), "{:?}", elapsed);
    assert!(elapsed <= Duration::from_millis(900), "{:?}", elapsed);
}

#[test]
fn robot_stands_still_while_settling() {
    let (scene, _, person) = robot_at_origin();

    let (moved, position_while_settling) = drive(&scene, TICK, MAX_TICKS, async {
        futures::join!(person.move_forward(1), async {
            scene_time(&scene, Duration::from_millis(600)).await;
            person.position()
        })
    })
    .unwrap();

    assert_eq!(moved, Ok(()));
    assert_vec_eq(position_while_settling.unwrap(), Vector3::new(0.0, 0.0, 2.0));
}

#[test]
fn second_move_while_moving_is_rejected() {
    let (scene, _, person) = robot_at_origin();

    let (first, second) = drive(&scene, TICK, MAX_TICKS, async {
        futures::join!(person.move_forward(1), person.move_left(1))
    })
    .unwrap();

    assert_eq!(first, Ok(()));
    assert_eq!(second, Err(MoveError::Busy));
    // only the accepted move took effect
    assert_vec_eq(person.position().unwrap(), Vector3::new(0.0, 0.0, 2.0));
    assert_eq!(person.state(), MotionState::Idle);
}

#[test]
fn zero_steps_is_a_no_op() {
    let (scene, id, person) = robot_at_origin();

    let result = drive(&scene, TICK, MAX_TICKS, person.move_back(0)).unwrap();

    assert_eq!(result, Ok(()));
    assert_eq!(scene.borrow().elapsed(), Duration::ZERO);
    assert!(scene.borrow().mesh(id).unwrap().animations.is_empty());
}

#[test]
fn disposing_the_robot_mid_move_interrupts_it() {
    let (scene, id, person) = robot_at_origin();

    let (moved, _) = drive(&scene, TICK, MAX_TICKS, async {
        futures::join!(person.move_forward(3), async {
            scene_time(&scene, Duration::from_millis(100)).await;
            scene.borrow_mut().dispose_mesh(id);
        })
    })
    .unwrap();

    assert_eq!(moved, Err(MoveError::Interrupted));
    assert_eq!(person.state(), MotionState::Idle);
    let after = drive(&scene, TICK, MAX_TICKS, person.move_forward(1)).unwrap();
    assert_eq!(after, Err(MoveError::MeshMissing));
}

#[test]
fn dropping_a_move_returns_the_robot_to_idle() {
    let (scene, _, person) = robot_at_origin();

    {
        let mut pending = Box::pin(person.move_forward(1));
        let waker = futures::task::noop_waker();
        let mut cx = std::task::Context::from_waker(&waker);
        assert!(pending.as_mut().poll(&mut cx).is_pending());
        assert_eq!(person.state(), MotionState::Moving);
    }

    assert_eq!(person.state(), MotionState::Idle);
    drive(&scene, TICK, MAX_TICKS, person.move_left(1))
        .unwrap()
        .unwrap();
}

#[test]
fn reset_returns_exactly_to_the_default_position() {
    let (scene, _, person) = robot_at_origin();

    drive(&scene, TICK, MAX_TICKS, async {
        person.move_forward(3).await?;
        person.move_left(1).await
    })
    .unwrap()
    .unwrap();
    person.reset_position().unwrap();

    assert_eq!(person.position().unwrap(), person.default_position());
}

#[test]
fn reset_during_a_move_interrupts_it() {
    let (scene, _, person) = robot_at_origin();

    let (moved, reset) = drive(&scene, TICK, MAX_TICKS, async {
        futures::join!(person.move_right(2), async {
            scene_time(&scene, Duration::from_millis(150)).await;
            person.reset_position()
        })
    })
    .unwrap();

    assert_eq!(moved, Err(MoveError::Interrupted));
    assert_eq!(reset, Ok(()));
    assert_eq!(person.position().unwrap(), person.default_position());
}
