//! Feature record construction for the phishing classifier.
//!
//! Each document feature is a small pure function over the parsed page. When no
//! page could be fetched those columns keep their zero default and only the
//! URL-derived columns are filled.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::domain::{FeatureName, FeatureRecord};

use super::{fetcher::FetchedPage, lexical};

struct PageSelectors {
    src_resources: Selector,
    href_links: Selector,
    anchors: Selector,
    references: Selector,
    script_and_links: Selector,
    forms: Selector,
    frames: Selector,
}

impl PageSelectors {
    fn new() -> Self {
        Self {
            src_resources: Selector::parse("img[src], script[src], link[src]")
                .expect("src resource selector"),
            href_links: Selector::parse("link[href]").expect("link selector"),
            anchors: Selector::parse("a[href]").expect("anchor selector"),
            references: Selector::parse("a, img, script, link").expect("reference selector"),
            script_and_links: Selector::parse("script[src], link[href]")
                .expect("script/link selector"),
            forms: Selector::parse("form[action]").expect("form selector"),
            frames: Selector::parse("iframe, frame").expect("frame selector"),
        }
    }
}

/// The page being scored: its URL, lowercased host and parsed markup.
struct PageContext<'a> {
    url: &'a str,
    hostname: String,
    document: &'a Html,
    selectors: PageSelectors,
}

impl PageContext<'_> {
    fn is_external(&self, reference: &str) -> bool {
        match lexical::host_of(reference) {
            Some(host) => host != self.hostname,
            None => false,
        }
    }

    fn form_actions(&self) -> impl Iterator<Item = &str> + '_ {
        self.document
            .select(&self.selectors.forms)
            .filter_map(|form| form.value().attr("action"))
    }
}

/// Builds the full record for `url`; `page` is `None` when fetching failed.
pub fn extract_features(url: &str, page: Option<&FetchedPage>) -> FeatureRecord {
    match page {
        Some(page) => {
            let document = Html::parse_document(&page.body);
            extract_from_document(url, Some(&page.final_url), Some(&document))
        }
        None => extract_from_document(url, None, None),
    }
}

pub fn extract_from_document(
    url: &str,
    final_url: Option<&str>,
    document: Option<&Html>,
) -> FeatureRecord {
    let mut record = FeatureRecord::default();
    lexical::apply_lexical_features(&mut record, url);
    record.set_count(
        FeatureName::UrlLengthRT,
        final_url.unwrap_or(url).chars().count(),
    );
    // placeholder column the model was trained with; never computed
    record.set(FeatureName::PctExtHyperlinks, 0.0);

    if let Some(document) = document {
        let page = PageContext {
            url,
            hostname: lexical::host_of(url).unwrap_or_default(),
            document,
            selectors: PageSelectors::new(),
        };
        apply_document_features(&mut record, &page);
    }
    record
}

fn apply_document_features(record: &mut FeatureRecord, page: &PageContext<'_>) {
    let ext_resources = pct_ext_resource_urls(page);
    record.set(FeatureName::PctExtResourceUrls, ext_resources);
    record.set(FeatureName::PctExtResourceUrlsRT, ext_resources);

    let (null_self, ext_null_self) = pct_null_self_redirects(page);
    record.set(FeatureName::PctNullSelfRedirectHyperlinks, null_self);
    record.set(FeatureName::PctExtNullSelfRedirectHyperlinksRT, ext_null_self);

    record.set(
        FeatureName::FrequentDomainNameMismatch,
        domain_name_mismatch_ratio(page),
    );
    record.set_flag(FeatureName::ExtMetaScriptLinkRT, has_ext_script_or_link(page));
    record.set_flag(FeatureName::SubmitInfoToEmail, submits_to_email(page));
    record.set_flag(FeatureName::InsecureForms, has_insecure_form(page));
    record.set_flag(FeatureName::IframeOrFrame, has_frame(page));
    record.set_flag(
        FeatureName::AbnormalExtFormActionR,
        has_external_form_action(page),
    );
    record.set_flag(FeatureName::AbnormalFormAction, has_abnormal_form_action(page));
}

fn percentage(hits: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64 * 100.0
    }
}

/// A `link` carrying both `src` and `href` is counted once per attribute.
fn pct_ext_resource_urls(page: &PageContext<'_>) -> f64 {
    let src_refs = page
        .document
        .select(&page.selectors.src_resources)
        .filter_map(|el| el.value().attr("src"));
    let href_refs = page
        .document
        .select(&page.selectors.href_links)
        .filter_map(|el| el.value().attr("href"));

    let (mut total, mut external) = (0, 0);
    for reference in src_refs.chain(href_refs) {
        total += 1;
        if page.is_external(reference) {
            external += 1;
        }
    }
    percentage(external, total)
}

fn is_null_or_self_redirect(href: &str, page_url: &str) -> bool {
    href.is_empty()
        || href == "#"
        || href == page_url
        || href
            .strip_prefix(page_url)
            .is_some_and(|rest| rest.starts_with('#'))
}

/// Returns `(all null/self redirects, external null/self redirects)` as percentages
/// of every anchor with an `href`.
fn pct_null_self_redirects(page: &PageContext<'_>) -> (f64, f64) {
    let (mut total, mut null_self, mut ext_null_self) = (0, 0, 0);
    for anchor in page.document.select(&page.selectors.anchors) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        total += 1;
        let href = href.trim();
        if is_null_or_self_redirect(href, page.url) {
            null_self += 1;
            if page.is_external(href) {
                ext_null_self += 1;
            }
        }
    }
    (percentage(null_self, total), percentage(ext_null_self, total))
}

fn reference_of<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    element
        .value()
        .attr("href")
        .filter(|value| !value.is_empty())
        .or_else(|| element.value().attr("src"))
}

/// Fraction (not percentage) of `a`/`img`/`script`/`link` references to another host.
fn domain_name_mismatch_ratio(page: &PageContext<'_>) -> f64 {
    let (mut total, mut mismatched) = (0usize, 0usize);
    for element in page.document.select(&page.selectors.references) {
        let Some(reference) = reference_of(&element) else {
            continue;
        };
        total += 1;
        if page.is_external(reference) {
            mismatched += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        mismatched as f64 / total as f64
    }
}

fn has_ext_script_or_link(page: &PageContext<'_>) -> bool {
    page.document
        .select(&page.selectors.script_and_links)
        .filter_map(|el| match el.value().name() {
            "script" => el.value().attr("src"),
            _ => el.value().attr("href"),
        })
        .any(|reference| page.is_external(reference))
}

fn is_mail_action(action: &str) -> bool {
    let lowered = action.to_lowercase();
    let mut segments = lowered.split('@');
    segments.next();
    segments.next().is_some_and(|domain| domain.contains('.'))
}

fn submits_to_email(page: &PageContext<'_>) -> bool {
    page.form_actions().any(is_mail_action)
}

fn has_insecure_form(page: &PageContext<'_>) -> bool {
    page.form_actions().any(|action| {
        let scheme = lexical::UrlParts::split(action).scheme;
        !scheme.is_empty() && scheme != "https"
    })
}

fn has_frame(page: &PageContext<'_>) -> bool {
    page.document.select(&page.selectors.frames).next().is_some()
}

fn has_external_form_action(page: &PageContext<'_>) -> bool {
    page.form_actions().any(|action| page.is_external(action))
}

/// Blank actions, actions that resolve to no host (`about:blank`, `javascript:`,
/// `mailto:`) and actions that resolve to another host are all abnormal.
fn is_abnormal_form_action(action: &str, base: Option<&Url>) -> bool {
    let action = action.trim();
    if action.is_empty() || action.eq_ignore_ascii_case("about:blank") {
        return true;
    }
    let Some(base) = base else {
        return true;
    };
    match base.join(action) {
        Ok(resolved) => match (resolved.host_str(), base.host_str()) {
            (Some(target), Some(own)) => !target.eq_ignore_ascii_case(own),
            _ => true,
        },
        Err(_) => true,
    }
}

fn has_abnormal_form_action(page: &PageContext<'_>) -> bool {
    let base = Url::parse(page.url).ok();
    page.form_actions()
        .any(|action| is_abnormal_form_action(action, base.as_ref()))
}
