//! Flow control: command programs and the loops that drive them.
//!
//! A program is a list of [`Command`]s the robot executes one after another.
//! Moves only make progress while somebody advances the scene clock, so every
//! way of running a program pairs it with a driver:
//!
//! - [`drive`] polls a future and advances the scene by a fixed tick in
//!   between, which is deterministic and what the tests use
//! - [`run`] (native only) loads a level and plays a program in real time on
//!   a single threaded tokio runtime
//! - the wasm32 build lets the browser call `tick` from its animation frame,
//!   see [`crate::web`]

use std::{fmt, future::Future, pin::pin, str::FromStr, task::Poll};

use futures::task::noop_waker_ref;
use instant::Duration;

use crate::{
    data_structures::scene::SharedScene,
    entities::person::{Direction, Person},
    error::{CommandParseError, DriveError, MoveError},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction, u32),
    Reset,
}

impl FromStr for Command {
    type Err = CommandParseError;

    /// Parses `forward`, `back 2`, `left 3`, `right`, `reset`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or(CommandParseError::Empty)?;
        let direction = match verb.to_ascii_lowercase().as_str() {
            "forward" => Direction::Forward,
            "back" => Direction::Back,
            "left" => Direction::Left,
            "right" => Direction::Right,
            "reset" => {
                return match words.next() {
                    Some(extra) => Err(CommandParseError::Trailing(extra.to_string())),
                    None => Ok(Command::Reset),
                };
            }
            other => return Err(CommandParseError::Unknown(other.to_string())),
        };
        let count = match words.next() {
            Some(count) => count
                .parse::<u32>()
                .map_err(|_| CommandParseError::InvalidCount(count.to_string()))?,
            None => 1,
        };
        if let Some(extra) = words.next() {
            return Err(CommandParseError::Trailing(extra.to_string()));
        }
        Ok(Command::Move(direction, count))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Reset => f.write_str("reset"),
            Command::Move(direction, count) => {
                let verb = match direction {
                    Direction::Forward => "forward",
                    Direction::Back => "back",
                    Direction::Left => "left",
                    Direction::Right => "right",
                };
                write!(f, "{} {}", verb, count)
            }
        }
    }
}

/// Parses one command per non-empty line. `#` starts a comment.
pub fn parse_program(source: &str) -> Result<Vec<Command>, CommandParseError> {
    source
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .map(str::parse)
        .collect()
}

pub async fn execute(person: &Person, command: Command) -> Result<(), MoveError> {
    match command {
        Command::Move(direction, count) => person.move_with_animation(direction, count).await,
        Command::Reset => person.reset_position(),
    }
}

/// Executes `commands` in order and stops at the first failing one.
///
/// Returns how many commands completed.
pub async fn run_program(person: &Person, commands: &[Command]) -> Result<usize, MoveError> {
    for (idx, command) in commands.iter().enumerate() {
        log::info!("[{}/{}] {}", idx + 1, commands.len(), command);
        if let Err(e) = execute(person, *command).await {
            log::warn!("Program stopped at `{}`: {}", command, e);
            return Err(e);
        }
    }
    Ok(commands.len())
}

/// Polls `future` to completion, advancing `scene` by `tick` whenever it is
/// pending.
///
/// Gives up after `max_ticks` scene advances.
pub fn drive<F: Future>(
    scene: &SharedScene,
    tick: Duration,
    max_ticks: usize,
    future: F,
) -> Result<F::Output, DriveError> {
    let mut future = pin!(future);
    let mut cx = std::task::Context::from_waker(noop_waker_ref());
    for _ in 0..max_ticks {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return Ok(output);
        }
        scene.borrow_mut().advance(tick);
    }
    match future.as_mut().poll(&mut cx) {
        Poll::Ready(output) => Ok(output),
        Poll::Pending => Err(DriveError::Stalled(max_ticks)),
    }
}

/// Loads the level from `./assets` and plays `commands` in real time.
#[cfg(not(target_arch = "wasm32"))]
pub fn run(config: crate::config::GameConfig, commands: Vec<Command>) -> anyhow::Result<()> {
    use crate::{level::Level, resources::GltfLoader};

    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move {
        let tick = Duration::from_millis(config.tick_duration_millis.max(1));
        let level = Level::load(&GltfLoader, config).await?;

        let mut program = pin!(run_program(&level.person, &commands));
        let mut interval = tokio::time::interval(tick);
        let mut last_time = instant::Instant::now();
        let completed = loop {
            tokio::select! {
                result = &mut program => break result?,
                _ = interval.tick() => {
                    let dt = last_time.elapsed();
                    last_time = instant::Instant::now();
                    level.advance(dt);
                }
            }
        };
        if let Some(position) = level.person.position() {
            log::info!("Program finished after {} commands at {:?}", completed, position);
        }
        Ok::<(), anyhow::Error>(())
    })
}
