//! Dragging roots around the plane
//!
//! [`Explorer`] owns one [`Handle`] per root. A press on a handle starts a
//! [`DragSession`]; every motion event moves the grabbed root and rebuilds
//! the [`Frame`](crate::Frame); release ends the session.

mod explorer;
mod handle;
mod session;

pub use explorer::{Explorer, ExplorerOptions};
pub use handle::{Anchored, Handle, Marker, Outline, Tile};
pub use session::DragSession;
