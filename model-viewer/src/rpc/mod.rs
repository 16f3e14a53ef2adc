//! JSON-RPC 2.0 bridge between the host page and the viewer.
//!
//! The page mounts the viewer canvas and drives its lifecycle over
//! `postMessage`; the viewer answers requests and pushes status updates.
//!
//! ## Message Flow
//!
//! ```text
//! Host page                               Viewer (wasm)
//!     │                                        │
//!     ├─ Request (with ID) ──────────────────> │
//!     │                                        ├─ Queue ViewerCommand
//!     │ <───────────────── Response (with ID) ─┤
//!     │                                        │
//!     │ <────────── Notification (no ID) ──────┤
//! ```
//!
//! Requests sent without an ID still run; they just get no response.
//!
//! ## Methods
//!
//! ### Lifecycle
//! - `viewer_activate`: build the scene and start loading the model
//! - `viewer_toggle`: play/pause (activates on first use)
//! - `viewer_dispose`: unmount, releasing every viewer resource
//! - `viewer_configure`: replace settings; only accepted while idle
//!
//! ### Queries
//! - `get_viewer_status`: `{ state, initialized, loading, playing }`
//! - `get_fps`: current smoothed frame rate
//!
//! ## Notifications
//! - `viewer_state_changed`: status object, sent on every change
//! - `fps_update`: sent every half second while the model is shown
//! - `debug_message`: unparseable input
//!
//! ## Error Codes
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//! - `-32000`: Viewer busy (configure outside idle)

/// JSON-RPC message types, dispatch and the `postMessage` transport.
pub mod web_rpc;
