//! Template route resolution

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::Settings;

static SECTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9\-]{1,50}$").expect("valid section pattern"));

static PAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9\-]{1,75}$").expect("valid page pattern"));

/// Template file for a requested page, relative to `template_directory`
///
/// `section/page.twig` is preferred when the section is given, both names
/// are well formed and the file exists; otherwise `page.twig` at the top
/// level. `None` when neither is usable.
pub fn validate_route(page: &str, section: Option<&str>, template_directory: &Path) -> Option<String> {
    if !PAGE_PATTERN.is_match(page) {
        return None;
    }

    if let Some(section) = section.filter(|s| SECTION_PATTERN.is_match(s)) {
        let route = format!("{}/{}.twig", section, page);
        if template_directory.join(section).is_dir() && template_directory.join(&route).is_file() {
            return Some(route);
        }
    }

    let route = format!("{}.twig", page);
    template_directory
        .join(&route)
        .is_file()
        .then_some(route)
}

/// [`validate_route`] against the `template_directory` setting
pub fn validate_route_in(settings: &Settings, page: &str, section: Option<&str>) -> Option<String> {
    let directory = settings.get_str("template_directory")?;
    validate_route(page, section, Path::new(directory))
}
