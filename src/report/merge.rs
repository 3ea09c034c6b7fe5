//! Merge & rank engine
//!
//! Folds every per-source mapping into one table keyed by pet id with a column
//! per site label, then ranks the rows by how many sites list each pet.

use crate::crawler::SourceResult;
use crate::report::{PresenceEntry, Report, Site, SourceFailure, GENERATED_FORMAT};
use chrono::{DateTime, Local};
use std::collections::{BTreeMap, HashMap};
use url::Url;

/// Merges per-source results into a ranked report
///
/// # Merge Rules
///
/// - Sites are keyed by display label; pages of one site share a column
/// - Results are folded in source index order, so within a site a later page
///   overwrites an earlier page's link for the same pet, and the input order
///   of `results` does not matter
/// - Relative links are qualified with the owning site's base address
/// - Failed sources add their site column but no pets
/// - Rows are sorted by presence count ascending, then by pet id
pub fn merge_results(results: &[SourceResult], generated: DateTime<Local>) -> Report {
    let mut ordered: Vec<&SourceResult> = results.iter().collect();
    ordered.sort_by_key(|r| r.source.index);

    // label -> base address of the first page seen for that label
    let mut sites: BTreeMap<String, String> = BTreeMap::new();
    // pet id -> label -> link
    let mut table: HashMap<&str, HashMap<String, String>> = HashMap::new();
    let mut failures = Vec::new();

    for result in ordered {
        let label = result.source.label();
        sites
            .entry(label.clone())
            .or_insert_with(|| result.source.site.clone());

        let pets = match &result.outcome {
            Ok(pets) => pets,
            Err(e) => {
                failures.push(SourceFailure {
                    url: result.source.url(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        for (id, link) in pets {
            table
                .entry(id.as_str())
                .or_default()
                .insert(label.clone(), qualify_link(&result.source.site, link));
        }
    }

    let sites: Vec<Site> = sites
        .into_iter()
        .map(|(label, base)| Site { label, base })
        .collect();

    let mut pets: Vec<PresenceEntry> = table
        .into_iter()
        .map(|(id, row)| {
            let links = sites
                .iter()
                .map(|site| row.get(&site.label).cloned().unwrap_or_default())
                .collect();
            PresenceEntry::new(id, links)
        })
        .collect();

    pets.sort_by(|a, b| {
        a.presence_count
            .cmp(&b.presence_count)
            .then_with(|| a.id.cmp(&b.id))
    });

    tracing::info!(
        "Merged {} pets across {} sites ({} failed pages)",
        pets.len(),
        sites.len(),
        failures.len()
    );

    Report {
        generated: generated.format(GENERATED_FORMAT).to_string(),
        sites,
        pets,
        failures,
    }
}

/// Makes a pet link absolute against its site's base address
///
/// Only `http` and `https` links are returned unchanged; anything else is
/// treated as a path on the site. Protocol-relative links (`//host/path`)
/// take the base address's scheme. An empty link (a pet listed without a
/// detail page) points at the site itself.
pub fn qualify_link(base: &str, link: &str) -> String {
    let link = link.trim();

    if let Ok(url) = Url::parse(link) {
        if matches!(url.scheme(), "http" | "https") {
            return link.to_string();
        }
    }

    if link.starts_with("//") {
        if let Ok(joined) = Url::parse(base).and_then(|b| b.join(link)) {
            return joined.to_string();
        }
    }

    let base = base.trim_end_matches('/');
    if link.is_empty() {
        base.to_string()
    } else if link.starts_with('/') {
        format!("{}{}", base, link)
    } else {
        format!("{}/{}", base, link)
    }
}
