//! Group mutation tests
//!
//! Adding and deleting groups through a session and through a bare `Mutator`.
//!
mod common;
use common::*;
use formwork::hydrate::hydrate;
use formwork::mutator::Mutator;
use formwork::prelude::*;
use formwork::tree::IdAllocator;
use serde_json::{Value, json};

fn open() -> Session {
    Session::create(service_schema(), Some(service_instance()), false).expect("session opens")
}

fn max_id(tree: &NodeTree) -> NodeId {
    tree.iter().map(Node::id).max().expect("tree is not empty")
}

#[cfg(test)]
mod add_group_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_appends_default_group() {
        let mut session = open();
        let endpoints = session.locate("endpoints").expect("resolves");
        let before = session.tree().list(endpoints).expect("list").groups.clone();
        let highest = max_id(session.tree());

        let added = session.add_group(endpoints).expect("group is added");

        let after = session.tree().list(endpoints).expect("list").groups.clone();
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after[..before.len()], before.as_slice());
        assert_eq!(after.last(), Some(&added));
        assert!(added > highest, "new ids come after every existing id");

        let tree = session.tree();
        assert_eq!(entry_names(tree, added), vec!["path", "method", "timeout", "headers"]);
        assert_eq!(tree.group(added).expect("group").parent, endpoints);
    }

    #[test]
    fn test_added_group_is_built_from_schema_not_siblings() {
        let mut session = open();
        let endpoints = session.locate("endpoints").expect("resolves");
        session.add_group(endpoints).expect("group is added");

        let outcome = session.save().expect("save succeeds");
        assert!(outcome.is_valid());
        let instance = Value::Object(outcome.instance);
        assert_eq!(
            instance["endpoints"][2],
            json!({"path": "", "method": "get", "timeout": "", "headers": [{"key": "", "value": ""}]})
        );
        assert_eq!(instance["endpoints"][1]["path"], json!("/items"));
    }

    #[test]
    fn test_add_to_nested_list_only_touches_that_list() {
        let mut session = open();
        let first_headers = session.locate("endpoints.0.headers").expect("resolves");
        let second_headers = session.locate("endpoints.1.headers").expect("resolves");
        let untouched = session.tree().list(second_headers).expect("list").groups.clone();

        session.add_group(first_headers).expect("group is added");
        session.add_group(first_headers).expect("group is added");

        let tree = session.tree();
        assert_eq!(tree.list(first_headers).expect("list").groups.len(), 2);
        assert_eq!(tree.list(second_headers).expect("list").groups, untouched);

        let key = session.locate("endpoints.0.headers.1.key").expect("new field resolves");
        assert_eq!(session.field(key).expect("field").raw, "");
    }

    #[test]
    fn test_add_to_empty_list() {
        let instance = as_group(json!({"port": 80}));
        let mut session =
            Session::create(routes_schema(), Some(instance), false).expect("session opens");
        let routes = session.locate("routes").expect("resolves");
        assert!(session.tree().list(routes).expect("list").groups.is_empty());

        session.add_group(routes).expect("group is added");
        let outcome = session.save().expect("save succeeds");
        assert_eq!(
            Value::Object(outcome.instance),
            json!({"port": 80, "routes": [{"path": ""}]})
        );
    }

    #[test]
    fn test_root_list_cannot_grow() {
        let mut session = open();
        let root = session.tree().root();
        let len = session.tree().len();
        assert_eq!(session.add_group(root), Err(SessionError::RootListNotExtendable));
        assert_eq!(session.tree().len(), len);
    }

    #[test]
    fn test_add_to_non_list_node() {
        let mut session = open();
        let port = session.locate("port").expect("resolves");
        assert_eq!(
            session.add_group(port),
            Err(SessionError::UnexpectedNodeKind {
                id: port,
                expected: "list"
            })
        );
    }

    #[test]
    fn test_failed_resolution_leaves_tree_untouched() {
        // Hydrate with one schema, then mutate against another that lacks the list.
        let service = service_schema();
        let service_index = SchemaIndex::new(&service).expect("index builds");
        let options = EditorOptions::default();
        let mut ids = IdAllocator::new();
        let mut tree = hydrate(
            &service.parameters,
            &[Value::Object(service_instance())],
            &service_index,
            &mut ids,
            &options,
        );

        let routes = routes_schema();
        let routes_index = SchemaIndex::new(&routes).expect("index builds");
        let endpoints = tree.locate("endpoints").expect("resolves");
        let groups = tree.list(endpoints).expect("list").groups.clone();
        let len = tree.len();

        let result = Mutator::new(&routes, &routes_index, &options).add_group(&mut tree, &mut ids, endpoints);
        assert_eq!(
            result,
            Err(SessionError::Schema(SchemaError::SchemaPathNotFound {
                path: "endpoints".to_string()
            }))
        );
        assert_eq!(tree.len(), len);
        assert_eq!(tree.list(endpoints).expect("list").groups, groups);
    }

    #[test]
    fn test_add_to_list_named_root() {
        let schema = json!({
            "parameters": [
                {"name": "title", "type": "string"},
                {"name": "root", "type": [{"name": "path", "type": "string"}]}
            ]
        });
        let mut session = Session::create(schema, None, false).expect("session opens");
        let list = session.locate("root").expect("resolves");

        let added = session.add_group(list).expect("group is added");
        assert_eq!(entry_names(session.tree(), added), vec!["path"]);

        let outcome = session.save().expect("save succeeds");
        assert_eq!(
            Value::Object(outcome.instance),
            json!({"title": "", "root": [{"path": ""}, {"path": ""}]})
        );
    }

    #[test]
    fn test_dotted_list_name_is_rejected_up_front() {
        let schema = json!({
            "parameters": [{"name": "a.b", "type": [{"name": "x", "type": "string"}]}]
        });
        assert_eq!(
            Session::create(schema, None, false).err().map(|e| e.to_string()),
            Some("Parameter name 'a.b' must not contain '.'".to_string())
        );
    }

    #[test]
    fn test_resolve_parameters_for_nested_list() {
        let schema = service_schema();
        let index = SchemaIndex::new(&schema).expect("index builds");
        let options = EditorOptions::default();
        let session = open();
        let headers = session.locate("endpoints.1.headers").expect("resolves");

        let parameters = Mutator::new(&schema, &index, &options)
            .resolve_parameters(session.tree(), headers)
            .expect("parameters resolve");
        let names: Vec<_> = parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["key", "value"]);
    }
}

#[cfg(test)]
mod delete_group_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_delete_removes_group_and_subtree() {
        let mut session = open();
        let endpoints = session.locate("endpoints").expect("resolves");
        let first = session.locate("endpoints.0").expect("resolves");
        let second = session.locate("endpoints.1").expect("resolves");
        let first_path = session.locate("endpoints.0.path").expect("resolves");

        session.delete_group(first).expect("group is deleted");

        let tree = session.tree();
        assert_eq!(tree.list(endpoints).expect("list").groups, vec![second]);
        assert!(!tree.contains(first));
        assert!(!tree.contains(first_path));
        assert_eq!(session.locate("endpoints.0"), Ok(second));
    }

    #[test]
    fn test_delete_nested_group() {
        let mut session = open();
        let header = session.locate("endpoints.1.headers.0").expect("resolves");
        session.delete_group(header).expect("group is deleted");

        let outcome = session.save().expect("save succeeds");
        let instance = Value::Object(outcome.instance);
        assert_eq!(instance["endpoints"][1]["headers"], json!([]));
        assert_eq!(instance["endpoints"][0]["path"], json!("/health"));
    }

    #[test]
    fn test_delete_then_add_never_reuses_ids() {
        let mut session = open();
        let endpoints = session.locate("endpoints").expect("resolves");
        let first = session.locate("endpoints.0").expect("resolves");
        let highest = max_id(session.tree());

        session.delete_group(first).expect("group is deleted");
        let added = session.add_group(endpoints).expect("group is added");
        assert!(added > highest);
        assert!(!session.tree().contains(first));
    }

    #[test]
    fn test_root_group_cannot_be_deleted() {
        let mut session = open();
        let root = session.root_group().expect("root group exists");
        assert_eq!(session.delete_group(root), Err(SessionError::RootGroupNotDeletable));
        assert!(session.tree().contains(root));
    }

    #[test]
    fn test_delete_non_group_node() {
        let mut session = open();
        let field = session.locate("port").expect("resolves");
        assert_eq!(
            session.delete_group(field),
            Err(SessionError::UnexpectedNodeKind {
                id: field,
                expected: "group"
            })
        );
    }
}
