use json::{object, JsonValue};

use crate::error::ProtocolError;
use crate::geometry::{Segment, Vec2};

/// Keep-alive payload the client sends every 15 seconds.
pub const PING: &str = "PING";

/// Keep-alive reply; arrives as a bare text frame, not JSON.
pub const PONG: &str = "PONG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanderStatus {
    Flying,
    Completed,
    Crashed,
    DidNotFinish,
}

impl LanderStatus {
    fn from_wire(raw: &str) -> Result<Self, ProtocolError> {
        match raw {
            "FLYING" => Ok(Self::Flying),
            "COMPLETED" => Ok(Self::Completed),
            "CRASHED" => Ok(Self::Crashed),
            "DID_NOT_FINISH" => Ok(Self::DidNotFinish),
            other => Err(ProtocolError::UnknownStatus(other.to_owned())),
        }
    }
}

/// Lander snapshot from a `state` frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Lander {
    pub position: Vec2,
    pub velocity: Vec2,
    pub status: LanderStatus,
    pub finish_time: Option<f64>,
}

/// Physics constants announced with the environment. Servers may omit
/// individual fields; absent ones fall back to these defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constants {
    pub time_delta_seconds: f64,
    pub gravity: f64,
    pub lander_acceleration_left: f64,
    pub lander_acceleration_right: f64,
    pub lander_acceleration_up: f64,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            time_delta_seconds: 0.1,
            gravity: 10.0,
            lander_acceleration_left: 5.0,
            lander_acceleration_right: 5.0,
            lander_acceleration_up: 15.0,
        }
    }
}

/// Environment snapshot from an `env` frame: the terrain to avoid, the goal
/// to reach and the physics constants in play.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub segments: Vec<Segment>,
    pub goal: Vec2,
    pub constants: Constants,
}

/// Control decision sent back for every `state` frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Acceleration {
    pub up: bool,
    pub left: bool,
    pub right: bool,
}

/// A decoded server frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    Env(Environment),
    State(Lander),
    JoinAck { url: Option<String> },
    GameError(String),
    Pong,
    /// Frame with a type this client does not know; carries the type tag.
    Unknown(String),
}

macro_rules! get_json {
    ($value:expr, $func:ident, $path:expr) => {
        $value
            .$func()
            .ok_or_else(|| ProtocolError::MissingField($path.to_owned()))?
    };
}

/// Decode one raw server frame.
pub fn parse_server_message(raw: &str) -> Result<ServerMessage, ProtocolError> {
    if raw == PONG {
        return Ok(ServerMessage::Pong);
    }

    let value = json::parse(raw)?;
    let kind = get_json!(value["type"], as_str, "type");
    match kind {
        "env" => Ok(ServerMessage::Env(environment_from_json(&value)?)),
        "state" => Ok(ServerMessage::State(lander_from_json(&value["lander"])?)),
        "join" => Ok(ServerMessage::JoinAck {
            url: value["url"].as_str().map(str::to_owned),
        }),
        "error" => Ok(ServerMessage::GameError(value.dump())),
        other => Ok(ServerMessage::Unknown(other.to_owned())),
    }
}

fn vec2_from_json(value: &JsonValue, path: &str) -> Result<Vec2, ProtocolError> {
    let coordinate = |axis: &str| {
        value[axis]
            .as_f64()
            .ok_or_else(|| ProtocolError::MissingField(format!("{path}/{axis}")))
    };
    Ok(Vec2::new(coordinate("x")?, coordinate("y")?))
}

fn environment_from_json(value: &JsonValue) -> Result<Environment, ProtocolError> {
    let segments_json = &value["segments"];
    if segments_json.is_null() {
        return Err(ProtocolError::MissingField("segments".to_owned()));
    }

    let segments = segments_json
        .members()
        .enumerate()
        .map(|(i, segment)| {
            Ok(Segment::new(
                vec2_from_json(&segment["start"], &format!("segments/{i}/start"))?,
                vec2_from_json(&segment["end"], &format!("segments/{i}/end"))?,
            ))
        })
        .collect::<Result<Vec<_>, ProtocolError>>()?;

    let defaults = Constants::default();
    let constants_json = &value["constants"];
    let constant = |key: &str, default: f64| constants_json[key].as_f64().unwrap_or(default);

    Ok(Environment {
        segments,
        goal: vec2_from_json(&value["goal"], "goal")?,
        constants: Constants {
            time_delta_seconds: constant("timeDeltaSeconds", defaults.time_delta_seconds),
            gravity: constant("gravity", defaults.gravity),
            lander_acceleration_left: constant(
                "landerAccelerationLeft",
                defaults.lander_acceleration_left,
            ),
            lander_acceleration_right: constant(
                "landerAccelerationRight",
                defaults.lander_acceleration_right,
            ),
            lander_acceleration_up: constant(
                "landerAccelerationUp",
                defaults.lander_acceleration_up,
            ),
        },
    })
}

fn lander_from_json(value: &JsonValue) -> Result<Lander, ProtocolError> {
    Ok(Lander {
        position: vec2_from_json(&value["position"], "lander/position")?,
        velocity: vec2_from_json(&value["velocity"], "lander/velocity")?,
        status: LanderStatus::from_wire(get_json!(value["status"], as_str, "lander/status"))?,
        finish_time: value["finishTime"].as_f64(),
    })
}

/// Frame announcing this client to the server.
pub fn join_message(name: &str, game_id: &str) -> String {
    object! {
        "type": "join",
        "name": name,
        "gameId": game_id
    }
    .dump()
}

/// Control frame answering a `state` snapshot.
pub fn input_message(game_id: &str, acceleration: Acceleration) -> String {
    object! {
        "gameId": game_id,
        "acceleration": object! {
            "up": acceleration.up,
            "left": acceleration.left,
            "right": acceleration.right
        },
        "type": "input"
    }
    .dump()
}

/// Overlay frame the test server renders on top of the game view.
pub fn debug_message(segments: &[Segment]) -> String {
    let segments: Vec<JsonValue> = segments.iter().map(|s| segment_to_json(*s)).collect();
    object! {
        "segments": segments,
        "type": "debug"
    }
    .dump()
}

fn vec2_to_json(v: Vec2) -> JsonValue {
    object! { "x": v.x, "y": v.y }
}

fn segment_to_json(s: Segment) -> JsonValue {
    object! {
        "start": vec2_to_json(s.start),
        "end": vec2_to_json(s.end)
    }
}
