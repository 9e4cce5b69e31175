//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the formwork crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use formwork::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let schema = Schema::from_file("path/to/schema.json")?;
//! let session = Session::create(schema, None, false)?;
//!
//! let outcome = session.save()?;
//! for error in &outcome.errors {
//!     eprintln!("{}", error);
//! }
//! # Ok(())
//! # }
//! ```

// Sessions and configuration
pub use crate::session::{EditorOptions, SaveOutcome, Session, SessionBuilder};

// Schema model
pub use crate::schema::{
    EnumOption, EnumType, IntoSchema, Parameter, ParameterType, ScalarKind, Schema, SchemaIndex,
};

// Node tree
pub use crate::codec::{FieldKind, PresentationMode};
pub use crate::template::Group;
pub use crate::tree::{FieldNode, GroupNode, ListNode, Node, NodeId, NodeTree};

// Rendering
pub use crate::render::{OutlineRenderer, TreeVisitor};

// Error types
pub use crate::error::{CoercionError, FieldCoercionError, SchemaError, SessionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
