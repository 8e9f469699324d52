use std::fs;
use std::path::PathBuf;

use agent::{protocol, Acceleration, AgentSession, Environment, Lander, Segment, SessionError};
use clap::Parser;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Recorded server frames, one per line (see sample_session.jsonl)
    #[arg(long, value_name = "FILE")]
    session_log: PathBuf,

    /// Team name announced in the join frame
    #[arg(long, default_value = "Team rust")]
    name: String,

    /// Game room id
    #[arg(long, default_value = "local")]
    game_id: String,
}

fn main() -> Result<(), String> {
    // WARN for everything, INFO for this crate; override with RUST_LOG
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("agent=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let frames = fs::read_to_string(&cli.session_log)
        .map_err(|e| format!("Failed to read {}: {e}", cli.session_log.display()))?;

    let mut session = AgentSession::new(cli.name, cli.game_id, calculate_acceleration);
    println!("> {}", session.join_message());

    for frame in frames.lines().filter(|l| !l.trim().is_empty()) {
        match session.handle_message(frame) {
            Ok(Some(reply)) => {
                println!("> {reply}");
                if let Some(environment) = session.environment() {
                    print_sight_overlay(environment, frame);
                }
            }
            Ok(None) => {}
            Err(SessionError::Server(payload)) => {
                return Err(format!("Server closed the game: {payload}"));
            }
            Err(e) => return Err(e.to_string()),
        }
    }
    Ok(())
}

/// Sample strategy: hold a safety margin above the terrain, drift towards
/// the goal while the lander can still see it.
fn calculate_acceleration(environment: &Environment, lander: &Lander) -> Acceleration {
    let clearance = environment
        .segments
        .iter()
        .map(|wall| (wall.closest_point(lander.position) - lander.position).length())
        .fold(f64::INFINITY, f64::min);

    let sight = Segment::new(lander.position, environment.goal);
    let goal_visible = environment
        .segments
        .iter()
        .all(|wall| wall.intersects(sight).is_none());

    let toward_goal = environment.goal - lander.position;
    Acceleration {
        up: clearance < 100. || lander.velocity.y < -15.,
        left: goal_visible && toward_goal.x < -1. && lander.velocity.x > -10.,
        right: goal_visible && toward_goal.x > 1. && lander.velocity.x < 10.,
    }
}

// Overlay frame a test server would draw; replayed logs just print it.
fn print_sight_overlay(environment: &Environment, state_frame: &str) {
    let Ok(protocol::ServerMessage::State(lander)) = protocol::parse_server_message(state_frame)
    else {
        return;
    };
    let sight = Segment::new(lander.position, environment.goal);
    println!("> {}", protocol::debug_message(&[sight]));
}
