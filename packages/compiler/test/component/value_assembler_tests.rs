//! Property Value Assembler Tests
//!
//! Attribute productions in, property-accumulator appends out.

#[cfg(test)]
mod tests {
    use component_compiler::component::assemble_property;
    use component_compiler::error::CompileError;
    use component_compiler::output::{Expr, IfBranch, Statement, Target};
    use component_compiler::production::{
        AttributeProduction, BlockKind, CallExpr, CallMode, ValueExpression,
    };

    fn prop(name: &str) -> Target {
        Target::Property(name.to_string())
    }

    #[test]
    fn should_append_literal_into_property_accumulator() {
        let attr = AttributeProduction::literal("class", "btn btn-primary");
        let appends = assemble_property("Button", "class", &attr).unwrap();
        assert_eq!(
            appends,
            vec![Statement::append_literal(prop("class"), "btn btn-primary")]
        );
    }

    #[test]
    fn should_drop_empty_literal_fragments() {
        let attr = AttributeProduction::new(
            "Items",
            vec![
                ValueExpression::literal(""),
                ValueExpression::Call(CallExpr::object("MenuList")),
                ValueExpression::literal(""),
            ],
        );
        let appends = assemble_property("List", "Items", &attr).unwrap();
        assert_eq!(
            appends,
            vec![Statement::append(
                prop("Items"),
                Expr::Call(CallExpr::object("MenuList"))
            )]
        );
    }

    #[test]
    fn should_keep_fragment_order_across_branches() {
        let attr = AttributeProduction::new(
            "title",
            vec![
                ValueExpression::concat(vec![
                    ValueExpression::literal("Hello "),
                    ValueExpression::Call(CallExpr::path("Name")),
                ]),
                ValueExpression::literal("!"),
            ],
        );
        let appends = assemble_property("Card", "title", &attr).unwrap();
        assert_eq!(
            appends,
            vec![
                Statement::append_literal(prop("title"), "Hello "),
                Statement::append(prop("title"), Expr::Call(CallExpr::path("Name"))),
                Statement::append_literal(prop("title"), "!"),
            ]
        );
    }

    #[test]
    fn should_guard_conditional_branch_and_use_object_form() {
        let helper = CallExpr::path("Field").method("getAttributesHTML", &["class", "type"]);
        let attr = AttributeProduction::new(
            "attributesHTML",
            vec![
                ValueExpression::guarded(
                    helper.clone(),
                    vec![ValueExpression::Call(helper.clone())],
                ),
                ValueExpression::literal(" data-test"),
            ],
        );
        let appends = assemble_property("Button", "attributesHTML", &attr).unwrap();
        assert_eq!(
            appends,
            vec![
                Statement::If {
                    branches: vec![IfBranch {
                        condition: helper.clone(),
                        body: vec![Statement::append(
                            prop("attributesHTML"),
                            Expr::Call(helper.with_mode(CallMode::Object)),
                        )],
                    }],
                    otherwise: None,
                },
                Statement::append_literal(prop("attributesHTML"), " data-test"),
            ]
        );
    }

    #[test]
    fn should_skip_guarded_branch_with_nothing_to_append() {
        let attr = AttributeProduction::new(
            "class",
            vec![ValueExpression::guarded(
                CallExpr::path("Active"),
                vec![ValueExpression::literal("")],
            )],
        );
        assert!(assemble_property("Card", "class", &attr).unwrap().is_empty());
    }

    #[test]
    fn should_reject_unclosed_if_opener() {
        let attr = AttributeProduction::new(
            "class",
            vec![
                ValueExpression::Opener(BlockKind::If),
                ValueExpression::literal("active"),
            ],
        );
        let err = assemble_property("Card", "class", &attr).unwrap_err();
        assert_eq!(
            err,
            CompileError::MissingEndIf {
                property: "class".to_string(),
                component: "Card".to_string(),
                line: None,
            }
        );
        assert_eq!(
            err.to_string(),
            "Missing < % end_if % > inside property \"class\" on component \"Card\""
        );
    }

    #[test]
    fn should_reject_if_opener_leaked_as_text() {
        let attr = AttributeProduction::literal("class", "<% if $Active %>active");
        let err = assemble_property("Card", "class", &attr).unwrap_err();
        assert!(matches!(err, CompileError::MissingEndIf { .. }));
    }

    #[test]
    fn should_reject_loop_inside_property() {
        let mut attr = AttributeProduction::new(
            "items",
            vec![ValueExpression::concat(vec![ValueExpression::Opener(
                BlockKind::Loop,
            )])],
        );
        attr.line = Some(7);
        let err = assemble_property("Menu", "items", &attr).unwrap_err();
        assert_eq!(err.line(), Some(7));
        assert_eq!(
            err.to_string(),
            "Cannot use < % loop % > inside property \"items\" on component \"Menu\""
        );
    }

    #[test]
    fn should_report_if_before_loop() {
        let attr = AttributeProduction::literal("x", "<% loop $Items %><% if $A %>");
        let err = assemble_property("Menu", "x", &attr).unwrap_err();
        assert!(matches!(err, CompileError::MissingEndIf { .. }));
    }
}
