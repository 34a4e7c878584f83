// template expansion for new fragments and entry titles

use super::config::ScrivenerConfig;
use super::format::FormatTools;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use minijinja::{Environment, Value, context};
use std::fs;
use std::path::Path;

/// dashes as long as `value` is in characters
fn underline(value: String) -> String {
    "-".repeat(value.chars().count())
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.add_filter("underline", underline);
    env
}

/// render a template string against a context
pub fn render_template(source: &str, ctx: Value) -> Result<String> {
    Ok(environment().render_str(source, ctx)?)
}

/// text of a new, blank fragment
///
/// uses the template file named by `new_fragment_template` when configured,
/// otherwise the format's built-in template.
pub fn new_fragment_text(
    root: &Path,
    tools: &dyn FormatTools,
    config: &ScrivenerConfig,
) -> Result<String> {
    let ctx = context! { categories => &config.categories };

    match &config.new_fragment_template {
        Some(template_path) => {
            let path = root.join(template_path);
            let source = fs::read_to_string(&path).map_err(|e| Error::FileReadError {
                path: path.clone(),
                source: e,
            })?;
            tracing::debug!(template = %path.display(), "rendering custom fragment template");
            render_template(&source, ctx)
        }
        None => render_template(tools.new_template(), ctx),
    }
}

/// title of a collected changelog entry
pub fn entry_title(
    config: &ScrivenerConfig,
    version: Option<&str>,
    date: NaiveDate,
) -> Result<String> {
    let ctx = context! {
        version => version,
        date => date.format("%Y-%m-%d").to_string(),
    };
    let title = render_template(&config.entry_title_template, ctx)?;
    Ok(title.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::format::RstTools;

    #[test]
    fn test_underline_filter() {
        let out = render_template("{{ name|underline }}", context! { name => "Añadido" }).unwrap();
        assert_eq!(out, "-------");
    }

    #[test]
    fn test_new_fragment_text() {
        let config = ScrivenerConfig::default().categories(vec!["Added".into(), "Fixed".into()]);
        let text = new_fragment_text(Path::new("."), &RstTools::new(), &config).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], ".. A new changelog entry.");
        assert!(lines.contains(&".. Added"));
        assert!(lines.contains(&".. -----"));
        assert!(lines.contains(&".. - A bullet item for the Fixed category."));
        assert!(lines.iter().all(|l| l.starts_with("..")));
    }

    #[test]
    fn test_blank_fragment_parses_empty() {
        let tools = RstTools::new();
        let config = ScrivenerConfig::default();
        let text = new_fragment_text(Path::new("."), &tools, &config).unwrap();
        assert!(tools.parse_text(&text).is_empty());
    }

    #[test]
    fn test_uncommented_fragment_parses() {
        let tools = RstTools::new();
        let config =
            ScrivenerConfig::default().categories(vec!["Added".into(), "Security".into()]);
        let text = new_fragment_text(Path::new("."), &tools, &config).unwrap();

        // uncomment the Security heading, its underline and its bullet
        let edited: String = text
            .lines()
            .map(|line| match line {
                ".. Security"
                | ".. --------"
                | ".. - A bullet item for the Security category." => {
                    line.trim_start_matches(".. ").to_string()
                }
                _ => line.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n");

        let sections = tools.parse_text(&edited);
        assert_eq!(sections.titles().collect::<Vec<_>>(), vec!["Security"]);
        assert_eq!(
            sections.get("Security"),
            Some(&["- A bullet item for the Security category.".to_string()][..])
        );
    }

    #[test]
    fn test_custom_template_file() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(
            dir.path().join("entry.j2"),
            "{% for cat in categories %}.. {{ cat }}\n{% endfor %}",
        )
        .unwrap();

        let config = ScrivenerConfig::default()
            .categories(vec!["Added".into()])
            .new_fragment_template("entry.j2");
        let text = new_fragment_text(dir.path(), &RstTools::new(), &config).unwrap();
        assert_eq!(text, ".. Added\n");
    }

    #[test]
    fn test_missing_template_file() {
        let config = ScrivenerConfig::default().new_fragment_template("does/not/exist.j2");
        let result = new_fragment_text(Path::new("."), &RstTools::new(), &config);
        assert!(matches!(result, Err(Error::FileReadError { .. })));
    }

    #[test]
    fn test_bad_template_syntax() {
        let result = render_template("{% for x in %}", context! {});
        assert!(matches!(result, Err(Error::TemplateError(_))));
    }

    #[test]
    fn test_entry_title() {
        let config = ScrivenerConfig::default();
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();

        assert_eq!(
            entry_title(&config, Some("1.2.0"), date).unwrap(),
            "1.2.0 - 2026-10-17"
        );
        assert_eq!(entry_title(&config, None, date).unwrap(), "2026-10-17");
    }
}
