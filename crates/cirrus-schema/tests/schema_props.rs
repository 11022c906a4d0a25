use cirrus_schema::{Entity, Field, FieldKind, Operation, ResolverMapping, SchemaDocument};
use proptest::prelude::*;

fn field_kind() -> impl Strategy<Value = FieldKind> {
    prop_oneof![
        Just(FieldKind::String),
        Just(FieldKind::Int),
        Just(FieldKind::Float),
        Just(FieldKind::Boolean),
    ]
}

fn arb_entity() -> impl Strategy<Value = Entity> {
    let type_name = "[A-Z][A-Za-z0-9]{0,8}";
    let field_name = "[a-z][a-z0-9_]{0,8}";
    (
        type_name,
        field_name,
        proptest::collection::vec((field_name, field_kind(), any::<bool>()), 0..6),
    )
        .prop_map(|(name, id_field, fields)| {
            let mut entity = Entity::new(name, id_field.clone());
            let mut seen = vec![id_field];
            for (fname, kind, required) in fields {
                if seen.contains(&fname) {
                    continue;
                }
                seen.push(fname.clone());
                let mut field = Field::new(fname, kind);
                if required {
                    field = field.required();
                }
                entity = entity.field(field);
            }
            entity
        })
}

proptest! {
    #[test]
    fn valid_entities_always_render(entity in arb_entity()) {
        let doc = SchemaDocument::for_entity(&entity).unwrap();

        // Always exactly the three operations.
        prop_assert_eq!(doc.operations().len(), 3);
        prop_assert!(doc.declares_field("Query", "all"));
        prop_assert!(doc.declares_field("Mutation", "save"));
        prop_assert!(doc.declares_field("Mutation", "delete"));
    }

    #[test]
    fn mappings_never_reference_undeclared_fields(entity in arb_entity()) {
        let doc = SchemaDocument::for_entity(&entity).unwrap();
        for mapping in ResolverMapping::all_for_entity(&entity) {
            for field in mapping.referenced_fields() {
                prop_assert!(doc.declares_field(doc.entity_type(), field));
            }
        }
    }

    #[test]
    fn create_never_takes_a_client_key(entity in arb_entity()) {
        let mapping = ResolverMapping::for_operation(Operation::Create, &entity);
        let needle = format!("$ctx.args.{})", entity.id_field());
        prop_assert!(!mapping.request_template().body().contains(&needle));
        prop_assert!(mapping.request_template().body().contains("$util.autoId()"));
    }
}
