//! Component Invocation Compiler Tests
//!
//! Statement shape and generated source for whole tags.

#[cfg(test)]
mod tests {
    use component_compiler::compile_all;
    use component_compiler::component::compile_component;
    use component_compiler::error::CompileError;
    use component_compiler::output::{Statement, Target};
    use component_compiler::production::{
        AttributeProduction, CallExpr, ChildrenProduction, TagProduction, ValueExpression,
    };

    fn button() -> TagProduction {
        TagProduction::new("MyComponentButton")
            .with_attribute(AttributeProduction::literal("class", "btn btn-primary"))
            .with_attribute(AttributeProduction::literal("type", "submit"))
    }

    fn children(markup: &str) -> ChildrenProduction {
        ChildrenProduction::new(vec![Statement::append_literal(Target::Page, markup)])
    }

    #[test]
    fn should_emit_property_map_and_render_call() {
        let compiled = compile_component(&button()).unwrap();
        assert_eq!(
            compiled.to_source(),
            [
                "props = [];",
                "props['class'] = [];",
                "props['class'][] = 'btn btn-primary';",
                "props['class'] = component.create_property('class', props['class']);",
                "props['type'] = [];",
                "props['type'][] = 'submit';",
                "props['type'] = component.create_property('type', props['type']);",
                "page .= component.render('MyComponentButton', props, scope);",
                "unset(props);",
            ]
            .join("\n")
        );
    }

    #[test]
    fn should_put_children_last_as_html_fragment() {
        let tag = button().with_children(children("<span>Submit me!</span>"));
        let stmts = compile_component(&tag).unwrap().into_statements();
        let n = stmts.len();
        assert_eq!(
            &stmts[n - 4..],
            &[
                Statement::InitChildren,
                Statement::append_literal(Target::Children, "<span>Submit me!</span>"),
                Statement::SealChildren,
                Statement::RenderComponent {
                    name: "MyComponentButton".to_string(),
                    target: Target::Page,
                },
            ]
        );
    }

    #[test]
    fn should_ignore_empty_children() {
        let tag = button().with_children(ChildrenProduction::default());
        let stmts = compile_component(&tag).unwrap().into_statements();
        assert!(!stmts.contains(&Statement::InitChildren));
    }

    #[test]
    fn should_strip_quotes_from_property_names() {
        let tag = TagProduction::new("Card")
            .with_attribute(AttributeProduction::literal("'title'", "a"))
            .with_attribute(AttributeProduction::literal("\"subtitle\"", "b"));
        let source = compile_component(&tag).unwrap().to_source();
        assert!(source.contains("props['title'] = [];"));
        assert!(source.contains("props['subtitle'] = [];"));
    }

    #[test]
    fn should_escape_quotes_and_backslashes_in_generated_literals() {
        let tag = TagProduction::new("MyComponentButton")
            .with_attribute(AttributeProduction::literal("type", r"Test\'s and Stuff"));
        let source = compile_component(&tag).unwrap().to_source();
        assert!(source.contains(r"props['type'][] = 'Test\\\'s and Stuff';"));
    }

    #[test]
    fn should_reject_children_attribute_with_inner_markup() {
        let tag = TagProduction::new("Panel")
            .with_attribute(AttributeProduction::literal("children", "text"))
            .with_children(children("<p>inner</p>"))
            .at_line(3);
        let err = compile_component(&tag).unwrap_err();
        assert_eq!(
            err,
            CompileError::ChildrenCollision {
                component: "Panel".to_string(),
                line: Some(3),
            }
        );
        assert_eq!(
            err.to_string(),
            "Cannot use \"children\" as a property name and have inner HTML."
        );
    }

    #[test]
    fn should_reject_children_collision_regardless_of_attribute_order() {
        let tag = TagProduction::new("Panel")
            .with_attribute(AttributeProduction::literal("class", "a"))
            .with_attribute(AttributeProduction::literal("children", "text"))
            .with_attribute(AttributeProduction::literal("id", "b"))
            .with_children(children("<p>inner</p>"));
        assert!(matches!(
            compile_component(&tag),
            Err(CompileError::ChildrenCollision { .. })
        ));
    }

    #[test]
    fn should_allow_children_attribute_without_inner_markup() {
        let tag = TagProduction::new("Panel")
            .with_attribute(AttributeProduction::literal("children", "text"));
        assert!(compile_component(&tag).is_ok());
    }

    #[test]
    fn should_abort_whole_tag_on_property_error() {
        let tag = button().with_attribute(AttributeProduction::literal(
            "items",
            "<% loop $Items %>",
        ));
        assert!(matches!(
            compile_component(&tag),
            Err(CompileError::LoopInProperty { .. })
        ));
    }

    #[test]
    fn should_keep_first_position_and_last_value_for_repeated_attribute() {
        let tag = TagProduction::new("Card")
            .with_attribute(AttributeProduction::literal("class", "first"))
            .with_attribute(AttributeProduction::literal("id", "x"))
            .with_attribute(AttributeProduction::literal("class", "second"));
        let source = compile_component(&tag).unwrap().to_source();
        assert!(!source.contains("'first'"));
        let class_at = source.find("props['class'][] = 'second';").unwrap();
        let id_at = source.find("props['id'] = [];").unwrap();
        assert!(class_at < id_at);
    }

    #[test]
    fn should_emit_guarded_appends_as_if_blocks() {
        let helper = CallExpr::path("Field").method("getAttributesHTML", &["class", "type"]);
        let tag = TagProduction::new("MyComponentButtonWithObjectCast").with_attribute(
            AttributeProduction::new(
                "attributesHTML",
                vec![
                    ValueExpression::guarded(
                        helper.clone(),
                        vec![ValueExpression::Call(helper)],
                    ),
                    ValueExpression::literal(" data-test"),
                ],
            ),
        );
        let source = compile_component(&tag).unwrap().to_source();
        assert!(source.contains(
            "if (scope.has(Field.getAttributesHTML('class', 'type'))) {\n  props['attributesHTML'][] = scope.obj(Field.getAttributesHTML('class', 'type'));\n}"
        ));
    }

    #[test]
    fn should_compile_identically_twice() {
        let tag = button()
            .with_attribute(AttributeProduction::new(
                "title",
                vec![
                    ValueExpression::guarded(
                        CallExpr::path("Title"),
                        vec![ValueExpression::Call(CallExpr::path("Title"))],
                    ),
                    ValueExpression::literal(" suffix"),
                ],
            ))
            .with_children(children("<b>x</b>"));
        let first = compile_component(&tag).unwrap();
        let second = compile_component(&tag).unwrap();
        assert_eq!(first.to_source(), second.to_source());
        assert_eq!(first, second);
    }

    #[test]
    fn should_compile_batches_in_input_order() {
        let tags: Vec<TagProduction> = (0..32)
            .map(|i| TagProduction::new(format!("Component{}", i)))
            .collect();
        let names: Vec<String> = compile_all(&tags)
            .into_iter()
            .map(|r| r.unwrap().component)
            .collect();
        let expected: Vec<String> = (0..32).map(|i| format!("Component{}", i)).collect();
        assert_eq!(names, expected);
    }
}
