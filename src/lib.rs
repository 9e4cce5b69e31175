//! # formwork - Schema-driven Editing Engine
//!
//! **formwork** keeps three representations of a document in sync: a static
//! [`Schema`](schema::Schema), a live tree of editable nodes, and the JSON
//! instance that is read in and written back out. Schemas are ordered field
//! lists whose fields are either scalars (string, integer, float, boolean, date,
//! cron, enumeration) or repeatable lists of groups that nest to any depth.
//!
//! ## Core Workflow
//!
//! 1.  **Load a Schema**: Parse it from JSON with `Schema::from_json`, or implement
//!     `IntoSchema` for your own format.
//! 2.  **Open a Session**: `Session::create` hydrates the node tree from an existing
//!     instance, or from a default template built from the schema.
//! 3.  **Edit**: Controls report raw values through `set_value`, and repeatable
//!     sections grow and shrink through `add_group` / `delete_group`. New groups are
//!     always built from the schema, never copied from siblings.
//! 4.  **Save**: `save` walks the tree back into an instance, coercing every field
//!     and reporting each field that failed instead of stopping at the first.
//!
//! ## Quick Start
//!
//! ```rust
//! use formwork::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let schema = Schema::from_json(
//!         r#"{
//!             "parameters": [
//!                 {"name": "port", "label": "Port", "type": "integer"},
//!                 {"name": "routes", "label": "Routes", "type": [
//!                     {"name": "path", "label": "Path", "type": "string"}
//!                 ]}
//!             ]
//!         }"#,
//!     )?;
//!
//!     // No instance: start from the schema's default template.
//!     let mut session = Session::create(schema, None, false)?;
//!
//!     let port = session.locate("port")?;
//!     session.set_value(port, "8080")?;
//!     let path = session.locate("routes.0.path")?;
//!     session.set_value(path, "/a")?;
//!
//!     let routes = session.locate("routes")?;
//!     session.add_group(routes)?;
//!
//!     let outcome = session.save()?;
//!     assert!(outcome.is_valid());
//!     assert_eq!(
//!         serde_json::Value::Object(outcome.instance),
//!         serde_json::json!({"port": 8080, "routes": [{"path": "/a"}, {"path": ""}]})
//!     );
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod dehydrate;
pub mod error;
pub mod hydrate;
pub mod mutator;
pub mod prelude;
pub mod render;
pub mod schema;
pub mod session;
pub mod template;
pub mod tree;
