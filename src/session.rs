use tracing::{debug, info, trace, warn};

use crate::error::SessionError;
use crate::protocol::{self, Acceleration, Environment, Lander, ServerMessage};

/// A control strategy: given the latest environment snapshot and lander
/// state, pick the acceleration for this tick. Implemented for any closure
/// with the matching signature.
pub trait Strategy {
    fn decide(&mut self, environment: &Environment, lander: &Lander) -> Acceleration;
}

impl<F> Strategy for F
where
    F: FnMut(&Environment, &Lander) -> Acceleration,
{
    fn decide(&mut self, environment: &Environment, lander: &Lander) -> Acceleration {
        self(environment, lander)
    }
}

/// Message pump for one game session. Owns the latest environment snapshot
/// and passes it into the strategy together with each incoming lander state,
/// so there is no shared mutable state between the update and read paths.
///
/// Performs no I/O: frames come in as raw text, replies go out as raw text,
/// and the caller owns the socket, the ping schedule and reconnects.
pub struct AgentSession<S> {
    name: String,
    game_id: String,
    strategy: S,
    environment: Option<Environment>,
}

impl<S: Strategy> AgentSession<S> {
    pub fn new(name: impl Into<String>, game_id: impl Into<String>, strategy: S) -> Self {
        Self {
            name: name.into(),
            game_id: game_id.into(),
            strategy,
            environment: None,
        }
    }

    /// The frame to send right after the connection opens.
    pub fn join_message(&self) -> String {
        protocol::join_message(&self.name, &self.game_id)
    }

    /// Latest environment snapshot, once one has arrived.
    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_ref()
    }

    /// Feed one raw server frame through the session. Returns the reply
    /// frame to send back, if this message warrants one.
    ///
    /// A `state` frame that arrives before any environment is an error: the
    /// strategy would be deciding blind. A server `error` frame is also
    /// surfaced as an error so the caller can decide whether to disconnect.
    pub fn handle_message(&mut self, raw: &str) -> Result<Option<String>, SessionError> {
        match protocol::parse_server_message(raw)? {
            ServerMessage::Env(environment) => {
                debug!(
                    segments = environment.segments.len(),
                    "environment snapshot updated"
                );
                self.environment = Some(environment);
                Ok(None)
            }
            ServerMessage::State(lander) => {
                let environment = self
                    .environment
                    .as_ref()
                    .ok_or(SessionError::EnvironmentMissing)?;
                let acceleration = self.strategy.decide(environment, &lander);
                debug!(?acceleration, ?lander.status, "strategy decision");
                Ok(Some(protocol::input_message(&self.game_id, acceleration)))
            }
            ServerMessage::JoinAck { url } => {
                info!(url = url.as_deref().unwrap_or(""), "joined game");
                Ok(None)
            }
            ServerMessage::GameError(payload) => Err(SessionError::Server(payload)),
            ServerMessage::Pong => {
                trace!("keep-alive pong");
                Ok(None)
            }
            ServerMessage::Unknown(kind) => {
                warn!(kind = %kind, "ignoring frame with unexpected type");
                Ok(None)
            }
        }
    }
}
