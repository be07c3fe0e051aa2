//! Component Resolver Tests
//!
//! Search-path resolution and the isolated component context.

#[path = "util/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::theme_loader;
    use component_compiler::component::{search_paths, ComponentData, ComponentRenderer};
    use component_compiler::config::ComponentConfig;
    use component_compiler::error::RenderError;
    use component_compiler::view::{InMemoryTemplateLoader, PropertyMap, Value, Viewer};

    fn subfolder_renderer() -> ComponentRenderer<Viewer<InMemoryTemplateLoader>> {
        ComponentRenderer::new(
            ComponentConfig::with_component_paths(["components/subfolder"]),
            Viewer::new(theme_loader()),
        )
    }

    #[test]
    fn should_list_configured_paths_then_fallbacks() {
        let config = ComponentConfig::default();
        assert_eq!(
            search_paths(&config, "Button"),
            vec!["components/Button", "Includes/Button", "Button"]
        );
    }

    #[test]
    fn should_report_every_candidate_when_not_found() {
        let err = subfolder_renderer()
            .render("X", PropertyMap::new())
            .unwrap_err();
        assert_eq!(
            err,
            RenderError::TemplateNotFound {
                candidates: vec![
                    "components/subfolder/X".to_string(),
                    "Includes/X".to_string(),
                    "X".to_string(),
                ],
            }
        );
        assert!(err
            .to_string()
            .contains("None of the following templates could be found"));
    }

    #[test]
    fn should_render_component_from_configured_subfolder() {
        let html = subfolder_renderer()
            .render("SubComponent", PropertyMap::new())
            .unwrap();
        assert_eq!(html, Value::html("<p>Sub component </p>"));
    }

    #[test]
    fn should_fall_back_to_includes_folder() {
        let html = subfolder_renderer()
            .render("EmptyComponent", PropertyMap::new())
            .unwrap();
        assert_eq!(html, Value::html(""));
    }

    #[test]
    fn should_prefer_earlier_search_paths() {
        let loader = InMemoryTemplateLoader::new()
            .with("theme/Card", "theme")
            .with("components/Card", "components")
            .with("Card", "root");
        let renderer = ComponentRenderer::new(
            ComponentConfig::with_component_paths(["theme", "components"]),
            Viewer::new(loader),
        );
        assert_eq!(
            renderer.render("Card", PropertyMap::new()).unwrap(),
            Value::html("theme")
        );
    }

    #[test]
    fn should_expose_component_name_to_template() {
        let loader = InMemoryTemplateLoader::new().with("components/Card", "<div data-c=\"$ComponentName\">$title</div>");
        let renderer = ComponentRenderer::new(ComponentConfig::default(), Viewer::new(loader));
        let mut props = PropertyMap::new();
        props.insert("title".to_string(), Value::text("<Hi>"));
        assert_eq!(
            renderer.render("Card", props).unwrap(),
            Value::html("<div data-c=\"Card\">&lt;Hi&gt;</div>")
        );
    }

    #[test]
    fn should_reject_each_reserved_property() {
        for reserved in ["failover", "customisedObject", "objCache"] {
            let mut props = PropertyMap::new();
            props.insert(reserved.to_string(), Value::text("x"));
            let err = ComponentData::new("EmptyComponent", props).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!(
                    "You cannot use the property \"{}\" on \"EmptyComponent\" as it's already used by ViewableData.",
                    reserved
                )
            );
        }
    }

    #[test]
    fn should_surface_template_syntax_errors_with_path() {
        let loader = InMemoryTemplateLoader::new().with("components/Broken", "a\n<% if $X %>b");
        let renderer = ComponentRenderer::new(ComponentConfig::default(), Viewer::new(loader));
        let err = renderer.render("Broken", PropertyMap::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to compile template \"components/Broken\": Missing <% end_if %> for <% if %> on line 2"
        );
    }
}
