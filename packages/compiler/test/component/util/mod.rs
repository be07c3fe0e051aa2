//! Shared fixtures for component tests: a template set modeled on a small
//! theme, a form-field-like record and page helpers.

#![allow(dead_code)]

use component_compiler::component::{compile_component, ComponentRenderer};
use component_compiler::config::ComponentConfig;
use component_compiler::error::RenderResult;
use component_compiler::output::{Statement, Target};
use component_compiler::production::TagProduction;
use component_compiler::util::strip_whitespace;
use component_compiler::view::{InMemoryTemplateLoader, Record, Value, Viewer};

pub const BUTTON: &str = r#"<button class="$class" type="<% if $type %>$type<% else %>button<% end_if %>">$children</button>"#;

pub const BUTTON_WITH_OBJECT_CAST: &str =
    r#"<button class="$class" type="$type" $attributesHTML></button>"#;

pub const LIST_COMPONENT: &str = r#"<ul class="menu menu-count-$Items.Count">
<% loop $Items %>
    <li class="menu-item menu-item-$Pos">
        $Title
    </li>
<% end_loop %>
</ul>"#;

pub const RECORD_COMPONENT: &str = r#"<li class="menu-item">
    $MyRecord.Title
</li>"#;

pub fn theme_loader() -> InMemoryTemplateLoader {
    InMemoryTemplateLoader::new()
        .with("components/MyComponentButton", BUTTON)
        .with("components/MyComponentButtonWithObjectCast", BUTTON_WITH_OBJECT_CAST)
        .with("components/SSListComponent", LIST_COMPONENT)
        .with("components/ViewableDataComponent", RECORD_COMPONENT)
        .with(
            "components/ComponentUsingClassButNotPassedIn",
            r#"<div class="$class"></div>"#,
        )
        .with("components/MyFormMessageTest", "<div>$message</div>")
        .with("Includes/EmptyComponent", "")
        .with("components/subfolder/SubComponent", "<p>Sub component $Missing</p>")
}

pub fn renderer() -> ComponentRenderer<Viewer<InMemoryTemplateLoader>> {
    ComponentRenderer::new(ComponentConfig::default(), Viewer::new(theme_loader()))
}

/// A text field named `Name`, as a form would expose it to templates.
pub fn name_field() -> Value {
    Value::record(
        Record::new()
            .with("Name", "Name")
            .with_method("getAttributesHTML", |_excluded| {
                Value::html(r#"name="Name" id="Name""#)
            })
            .with("Message", Value::html(r#"The field "Name" is required."#)),
    )
}

/// Markup followed by one compiled tag and more markup, as the host would
/// emit for a page.
pub fn page(before: &str, tag: &TagProduction, after: &str) -> Vec<Statement> {
    let mut statements = vec![Statement::append_literal(Target::Page, before)];
    statements.extend(
        compile_component(tag)
            .expect("tag should compile")
            .into_statements(),
    );
    statements.push(Statement::append_literal(Target::Page, after));
    statements
}

pub fn render_tag(tag: &TagProduction, data: Value) -> RenderResult<String> {
    renderer().render_page(&page("", tag, ""), data)
}

pub fn children_markup(markup: &str) -> component_compiler::production::ChildrenProduction {
    component_compiler::production::ChildrenProduction::new(vec![Statement::append_literal(
        Target::Page,
        markup,
    )])
}

/// Compares markup the way the theme tests always have: all whitespace
/// removed from both sides.
pub fn assert_eq_ignoring_whitespace(expected: &str, actual: &str) {
    assert_eq!(
        strip_whitespace(expected),
        strip_whitespace(actual),
        "\nexpected:\n{}\nactual:\n{}",
        expected,
        actual
    );
}
