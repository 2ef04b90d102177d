//! Platform-independent core of the gradebook admin front end.
//!
//! Data flows one way: the API client loads a [`state::Snapshot`], the view
//! stage filters and sorts it into derived lists, and [`present`] turns
//! those into render-ready shapes. Mutations go through [`workflow`], which
//! always ends in a full resync.

pub mod api;
pub mod collate;
pub mod config;
pub mod error;
pub mod form;
pub mod modal;
pub mod model;
pub mod present;
pub mod session;
pub mod state;
pub mod view;
pub mod workflow;

pub use api::{ApiClient, Backend};
pub use collate::{Collator, FoldedCollator};
pub use error::{ApiError, AuthError, ErrorClass, FormError};
pub use model::{Grade, GradeId, Role, Student, StudentId};
pub use session::{Session, SessionStore};
pub use state::{ClientState, ListView, Snapshot};
pub use view::{GroupFilter, SortKey};
