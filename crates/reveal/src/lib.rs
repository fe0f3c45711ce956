//! # reveal
//!
//! Cover an image with polygon tiles, then take them away one by one.
//!
//! The crate is the engine behind a "guess the picture" game: it builds a
//! covering (rectangles, triangles or irregular shards) for an image of a
//! given size and tracks which tiles still hide it. Drawing, windows and
//! file pickers belong to the host; see the `reveal-cli` crate for one.
//!
//! ## Rust Lesson #7: Modules
//!
//! Every module is declared here explicitly:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! ```
//! use reveal::{Action, CoveringType, Reveal, Settings, generate};
//!
//! let mut game = Reveal::new(Settings::default());
//! let covering = generate(640.0, 480.0, 12, CoveringType::Shards, Some(7)).unwrap();
//! game.load_covering(covering);
//! game.dispatch(Action::Uncover);
//! assert_eq!(game.session().visible_count(), 11);
//! ```

pub mod action;
pub mod clip;
pub mod covering;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod navigation;
pub mod quiz;
pub mod reveal;
pub mod rng;
pub mod session;
pub mod settings;
pub mod svg;
pub mod worker;

// Re-export common types at crate root for convenience.
pub use action::Action;
pub use clip::{clip, point_in_polygon};
pub use covering::{Covering, CoveringRequest, CoveringType, Defect, generate, generate_covering};
pub use error::{Error, Result};
pub use geometry::{Point, Polygon, Rect, area, contains};
pub use gesture::{GestureState, GestureTracker, classify};
pub use navigation::ImageCursor;
pub use quiz::Quiz;
pub use reveal::{Outcome, Reveal};
pub use session::{Redraw, RevealSession, RevealState, Tile};
pub use settings::Settings;
pub use svg::SvgStyle;
pub use worker::CoveringWorker;
