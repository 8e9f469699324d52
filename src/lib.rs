//! Building blocks for a spacehex lander game client: a small 2D geometry
//! core, the server frame codec and a strategy seam to hang a controller on.
//! The crate performs no I/O; the caller owns the websocket.

pub mod error;
pub mod geometry;
pub mod protocol;
pub mod session;

pub use error::*;
pub use geometry::*;
pub use protocol::*;
pub use session::*;
