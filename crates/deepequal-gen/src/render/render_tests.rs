#![allow(non_snake_case)]

use super::*;
use deepequal_core::TypeId;

fn any_type() -> TypeId {
    let mut universe = deepequal_core::Universe::new();
    universe.builtin("int")
}

#[test]
fn render_method___value_plan___exact_text() {
    let text = render_method("Tag", &Plan::Value);

    assert_eq!(
        text,
        "// DeepEqual is an autogenerated deepequal function, deeply comparing the\n\
         // receiver with other. in must be non-nil.\n\
         func (in *Tag) DeepEqual(other *Tag) bool {\n\
         \tif other == nil || *in != *other {\n\
         \t\treturn false\n\
         \t}\n\
         \n\
         \treturn true\n\
         }\n"
    );
}

#[test]
fn render_method___positional_slice___exact_text() {
    let plan = Plan::Slice {
        element: ElementCheck::Value,
        order: SliceOrder::Positional,
    };

    let text = render_method("Tags", &plan);

    let expected = [
        "func (in *Tags) DeepEqual(other *Tags) bool {",
        "\tif other == nil {",
        "\t\treturn false",
        "\t}",
        "",
        "\tif len(*in) != len(*other) {",
        "\t\treturn false",
        "\t} else {",
        "\t\tfor i, inElement := range *in {",
        "\t\t\tif inElement != (*other)[i] {",
        "\t\t\t\treturn false",
        "\t\t\t}",
        "\t\t}",
        "\t}",
        "",
        "\treturn true",
        "}",
        "",
    ]
    .join("\n");
    assert!(text.ends_with(&expected), "{text}");
}

#[test]
fn render_method___multiset_slice___consumes_matches() {
    let plan = Plan::Slice {
        element: ElementCheck::DeepEqual(any_type()),
        order: SliceOrder::Unordered(UnorderedMatching::Multiset),
    };

    let text = render_method("Items", &plan);

    assert!(text.contains("matched := make([]bool, len(*other))"));
    assert!(text.contains("\t\t\t\tif matched[i] {\n\t\t\t\t\tcontinue\n"));
    assert!(text.contains("if inElement.DeepEqual(&otherElement) {"));
    assert!(text.contains("matched[i] = true"));
}

#[test]
fn render_method___any_match_slice___has_no_matched_set() {
    let plan = Plan::Slice {
        element: ElementCheck::Value,
        order: SliceOrder::Unordered(UnorderedMatching::AnyMatch),
    };

    let text = render_method("Tags", &plan);

    assert!(!text.contains("matched"));
    assert!(text.contains("for _, otherElement := range *other {"));
    assert!(text.contains("if inElement == otherElement {"));
}

#[test]
fn render_method___map_of_pointers___nil_aware_value_check() {
    let plan = Plan::Map {
        value: ElementCheck::PointerToValue,
    };

    let text = render_method("Counts", &plan);

    assert!(text.contains("if otherValue, present := (*other)[key]; !present {"));
    assert!(text.contains(
        "if ((inValue == nil) != (otherValue == nil)) || (inValue != nil && *inValue != *otherValue) {"
    ));
}

#[test]
fn render_method___struct_fields___one_block_per_member() {
    let ty = any_type();
    let plan = Plan::Struct {
        fields: vec![
            FieldCheck {
                name: "Name".into(),
                kind: FieldKind::Value,
            },
            FieldCheck {
                name: "Limit".into(),
                kind: FieldKind::Pointer {
                    pointee: PointeeCheck::Value,
                    ignore_nil: true,
                },
            },
            FieldCheck {
                name: "Meta".into(),
                kind: FieldKind::Equal {
                    ty,
                    pointer_param: true,
                },
            },
            FieldCheck {
                name: "Spec".into(),
                kind: FieldKind::DeepEqual(ty),
            },
            FieldCheck {
                name: "Labels".into(),
                kind: FieldKind::Nested(Box::new(Plan::Delegate(ty))),
            },
        ],
    };

    let text = render_method("Widget", &plan);

    assert!(text.contains("\tif in.Name != other.Name {\n\t\treturn false\n\t}\n\n"));
    assert!(text.contains(
        "\tif in.Limit != nil {\n\
         \t\tif (in.Limit == nil) != (other.Limit == nil) {\n\
         \t\t\treturn false\n\
         \t\t} else if in.Limit != nil {\n\
         \t\t\tif *in.Limit != *other.Limit {\n"
    ));
    assert!(text.contains("\tif !in.Meta.Equal(&other.Meta) {\n"));
    assert!(text.contains("\tif !in.Spec.DeepEqual(&other.Spec) {\n"));
    assert!(text.contains(
        "\tif ((in.Labels != nil) && (other.Labels != nil)) || ((in.Labels == nil) != (other.Labels == nil)) {\n\
         \t\tin, other := &in.Labels, &other.Labels\n\
         \t\tif other == nil || !in.DeepEqual(other) {\n"
    ));
    assert!(text.ends_with("\t}\n\n\treturn true\n}\n"));
}

#[test]
fn render_method___value_equal_param___passes_value() {
    let plan = Plan::Struct {
        fields: vec![FieldCheck {
            name: "When".into(),
            kind: FieldKind::Equal {
                ty: any_type(),
                pointer_param: false,
            },
        }],
    };

    let text = render_method("Event", &plan);

    assert!(text.contains("if !in.When.Equal(other.When) {"));
}
