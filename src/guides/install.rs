use super::{Guide, GuideError, Provider, PROVIDERS_END_MARKER, PROVIDERS_START_MARKER};

/// Render the install guide for `guide`, with setup instructions for each of
/// `providers` injected in the order given.
///
/// Every provider id is validated before any text is produced, so a single
/// unknown id fails the whole call.
pub fn install_guide<S: AsRef<str>>(
    guide: &str,
    providers: &[S],
) -> Result<String, GuideError> {
    let guide = Guide::parse(guide)?;
    let providers = providers
        .iter()
        .map(|p| Provider::parse(p.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let block = render_provider_block(guide, &providers);
    Ok(inject_providers(guide.markdown(), &block))
}

/// Build the provider appendix. Empty when `providers` is empty.
pub fn render_provider_block(guide: Guide, providers: &[Provider]) -> String {
    if providers.is_empty() {
        return String::new();
    }

    let lines: Vec<String> = providers
        .iter()
        .map(|&provider| provider_line(provider, guide))
        .collect();

    format!("## Provider setup\n\n{}\n", lines.join("\n"))
}

fn provider_line(provider: Provider, guide: Guide) -> String {
    match provider.doc_url(guide) {
        Some(url) => format!(
            "- **{provider}**: Fetch {url} and follow it to install and configure the {provider} provider alongside the OpenFeature {} SDK.",
            guide.display_name()
        ),
        None => format!(
            "- **{provider}**: No bundled documentation link for {}. Search the web for \"{provider} OpenFeature {guide}\" installation documentation and follow it to configure the provider alongside the SDK.",
            guide.display_name()
        ),
    }
}

/// Place `block` into `text`.
///
/// A marker region is replaced in full, markers included; an empty block
/// removes it. Without markers a non-empty block is appended after a
/// horizontal rule and an empty one leaves the text untouched.
pub fn inject_providers(text: &str, block: &str) -> String {
    if let Some((start, end)) = marker_region(text) {
        let mut out = String::with_capacity(text.len() + block.len());
        out.push_str(&text[..start]);
        out.push_str(block);
        out.push_str(&text[end..]);
        return out;
    }

    if block.is_empty() {
        return text.to_string();
    }

    format!("{}\n\n---\n\n{block}", text.trim_end())
}

/// Byte range of the marker region, from the start of the start marker to the
/// end of the end marker.
fn marker_region(text: &str) -> Option<(usize, usize)> {
    let start = text.find(PROVIDERS_START_MARKER)?;
    let after_start = start + PROVIDERS_START_MARKER.len();
    let end = text[after_start..].find(PROVIDERS_END_MARKER)? + after_start;
    Some((start, end + PROVIDERS_END_MARKER.len()))
}
