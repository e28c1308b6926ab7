//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `Header`: product name, location and shortcut hints
//! - `MessageView`: one transcript entry
//! - `Toast`: the current notification
//!
//! ### Stateful Components (Persistent State + Transient Wrapper)
//!
//! The state lives in `TuiState`; the wrapper is built every frame:
//! - `InputBox`: draft text for a chat or the URL field
//! - `MessageList`: scrollable transcript with layout caching
//! - `NotesCanvas`: the rendered notes document
//! - `CodePanel`: the prototype's Code tab
//! - `Sidebar`: navigation menu and help overlay
//!
//! Components receive external data as props, never by reaching into `App`,
//! which keeps every one of them renderable from a `TestBackend` test.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── header.rs        (top bar)
//! ├── input_box/       (text input, wrapping and cursor math)
//! ├── message.rs       (single message renderer)
//! ├── message_list.rs  (scrollable transcript)
//! ├── notes_canvas.rs  (markdown document pane)
//! ├── code_panel.rs    (highlighted code / placeholder)
//! ├── landing.rs       (hero, carousel, URL field)
//! ├── sidebar.rs       (menu + help overlay)
//! ├── spinner.rs       (pending-reply animation)
//! └── toast.rs         (notifications)
//! ```

pub mod code_panel;
pub mod header;
pub mod input_box;
pub mod landing;
pub mod message;
pub mod message_list;
pub mod notes_canvas;
pub mod sidebar;
pub mod spinner;
pub mod toast;

pub use code_panel::{CodePanel, CodePanelState};
pub use header::Header;
pub use input_box::{InputBox, InputEvent};
pub use landing::LandingPage;
pub use message_list::{MessageList, MessageListState};
pub use notes_canvas::{NotesCanvas, NotesCanvasState};
pub use sidebar::{MenuItem, Sidebar, SidebarEvent, SidebarState};
pub use toast::Toast;
