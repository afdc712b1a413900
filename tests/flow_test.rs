use std::future::pending;

use cgmath::Vector3;
use gridbot::{
    config::GameConfig,
    entities::person::Direction,
    error::{CommandParseError, DriveError, MoveError},
    flow::{Command, drive, parse_program, run_program},
};

use crate::common::test_utils::{MAX_TICKS, TICK, assert_vec_eq, robot_at_origin};

mod common;

#[test]
fn commands_parse_with_optional_counts() {
    assert_eq!(
        "forward".parse::<Command>(),
        Ok(Command::Move(Direction::Forward, 1))
    );
    assert_eq!(
        "  LEFT 3 ".parse::<Command>(),
        Ok(Command::Move(Direction::Left, 3))
    );
    assert_eq!("reset".parse::<Command>(), Ok(Command::Reset));
    assert_eq!(
        "jump 2".parse::<Command>(),
        Err(CommandParseError::Unknown("jump".to_string()))
    );
    assert_eq!(
        "back -1".parse::<Command>(),
        Err(CommandParseError::InvalidCount("-1".to_string()))
    );
    assert_eq!(
        "right 1 2".parse::<Command>(),
        Err(CommandParseError::Trailing("2".to_string()))
    );
    assert_eq!("   ".parse::<Command>(), Err(CommandParseError::Empty));
}

#[test]
fn commands_display_as_they_parse() {
    let command = Command::Move(Direction::Back, 2);
    assert_eq!(command.to_string().parse::<Command>(), Ok(command));
}

#[test]
fn programs_skip_blank_lines_and_comments() {
    let program = parse_program(
        "# walk to the kettle\n\
         forward 2\n\
         \n\
         left # turn\n\
         reset\n",
    )
    .unwrap();

    assert_eq!(
        program,
        vec![
            Command::Move(Direction::Forward, 2),
            Command::Move(Direction::Left, 1),
            Command::Reset,
        ]
    );
}

#[test]
fn program_runs_all_commands_in_order() {
    let (scene, _, person) = robot_at_origin();
    let program = parse_program("forward 2\nleft\nback").unwrap();

    let completed = drive(&scene, TICK, MAX_TICKS, run_program(&person, &program)).unwrap();

    assert_eq!(completed, Ok(3));
    assert_vec_eq(person.position().unwrap(), Vector3::new(2.0, 0.0, 2.0));
}

#[test]
fn program_stops_at_the_first_failure() {
    let (scene, id, person) = robot_at_origin();
    let program = parse_program("forward\nright").unwrap();
    scene.borrow_mut().dispose_mesh(id);

    let completed = drive(&scene, TICK, MAX_TICKS, run_program(&person, &program)).unwrap();

    assert_eq!(completed, Err(MoveError::MeshMissing));
}

#[test]
fn drive_gives_up_on_futures_that_never_resolve() {
    let (scene, _, _) = robot_at_origin();

    let result = drive(&scene, TICK, 10, pending::<()>());

    assert_eq!(result, Err(DriveError::Stalled(10)));
    assert_eq!(scene.borrow().elapsed(), TICK * 10);
}

#[test]
fn default_config_matches_the_game() {
    let config = GameConfig::default();

    assert_eq!(config.step_size, 2.0);
    assert_eq!(config.frame_rate, 30.0);
    assert_eq!(config.rotation_frames, 10.0);
    assert_eq!(config.move_frames, 30.0);
    assert_eq!(config.settle_delay_millis, 300);
    assert_eq!(config.person.file, "robot.glb");
    assert_eq!(config.kettle.file, "kettle.glb");
    assert_eq!(config.kettle.highlight_indices, vec![1, 2]);
}

#[test]
fn json_overrides_only_what_it_names() {
    let config = GameConfig::from_json(
        r#"{ "step_size": 1.5, "kettle": { "position": [0.0, 0.0, 6.0] } }"#,
    )
    .unwrap();

    assert_eq!(config.step_size, 1.5);
    assert_eq!(config.kettle.position, [0.0, 0.0, 6.0]);
    assert_eq!(config.kettle.name, "kettle");
    assert_eq!(config.settle_delay_millis, 300);
    assert!(GameConfig::from_json("{ not json").is_err());
}
