use url::Url;

/// Label for the site in the grounded prompt: the configured name, else the seed host
pub fn site_label(site_name: Option<&str>, seed_url: &str) -> String {
    if let Some(name) = site_name.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    Url::parse(seed_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| seed_url.to_string())
}

/// Prompt embedding the grounding document ahead of the user's query
pub fn grounded_prompt(site: &str, document: &str, query: &str) -> String {
    format!(
        "Based on the content from the {site} website, please provide information and \
         assistance related to the user's query.\n\n\
         Website Content:\n{document}\n\n\
         User Query: {query}"
    )
}

/// Prompt used when no site content was found
pub fn fallback_prompt(query: &str) -> String {
    format!(
        "Based on available data, please provide information and assistance related to \
         the user's query.\n\n\
         User Query: {query}"
    )
}
