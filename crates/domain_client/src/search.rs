//! Client search ranking
//!
//! A client matches when the lowercased, trimmed query is a substring of its
//! lowercased name or of its phone. Matches are ranked by tier: the name
//! starts with the query, then the name contains it, then phone-only
//! matches. Ties fall back to alphabetical name order. An empty query keeps
//! every client in alphabetical order.

use std::cmp::Ordering;

use crate::client::Client;

fn name_order(a: &Client, b: &Client) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

fn tier(name: &str, query: &str) -> u8 {
    if name.starts_with(query) {
        2
    } else if name.contains(query) {
        1
    } else {
        0
    }
}

/// Filters and orders `candidates` for the given search text
pub fn rank_clients<'a>(query: &str, candidates: &'a [Client]) -> Vec<&'a Client> {
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        let mut all: Vec<&Client> = candidates.iter().collect();
        all.sort_by(|a, b| name_order(a, b));
        return all;
    }

    let mut ranked: Vec<(u8, &Client)> = candidates
        .iter()
        .filter_map(|client| {
            let name = client.name.to_lowercase();
            if name.contains(&query) || client.phone.to_lowercase().contains(&query) {
                Some((tier(&name, &query), client))
            } else {
                None
            }
        })
        .collect();

    ranked.sort_by(|(ta, a), (tb, b)| tb.cmp(ta).then_with(|| name_order(a, b)));
    ranked.into_iter().map(|(_, client)| client).collect()
}
