//! Default instances built from the schema alone.

use crate::codec::{FieldCodec, FieldKind, PresentationMode};
use crate::schema::{Parameter, ParameterType, SchemaIndex};
use crate::session::EditorOptions;
use serde_json::{Map, Value};

/// A group value: field name to instance value, in schema order.
pub type Group = Map<String, Value>;

/// Builds a schema-conformant default group.
///
/// Scalars take their declared `default_value` or the kind's empty value. A
/// declared default is stored the way saving it would produce it (`"8080"` on an
/// integer becomes `8080`), so the template survives hydrate and dehydrate
/// unchanged. Each list-valued parameter gets exactly one default group so
/// every repeatable section starts with an example entry.
pub fn instantiate(parameters: &[Parameter], index: &SchemaIndex, options: &EditorOptions) -> Group {
    let codec = FieldCodec::new(index);
    parameters
        .iter()
        .map(|parameter| {
            let value = match &parameter.kind {
                ParameterType::List(children) => {
                    Value::Array(vec![Value::Object(instantiate(children, index, options))])
                }
                ParameterType::Scalar(kind) => {
                    let kind = FieldKind::resolve(kind, index);
                    let mode = PresentationMode::for_kind(&kind, index, options.autocomplete_threshold);
                    parameter
                        .default_value
                        .as_ref()
                        .and_then(|default| codec.normalize_default(&kind, mode, default))
                        .map(|(_, value)| value)
                        .unwrap_or_else(|| kind.empty_value())
                }
            };
            (parameter.name.clone(), value)
        })
        .collect()
}
