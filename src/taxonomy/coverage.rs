use std::collections::HashSet;

use super::Taxonomy;

/// Return the checklist titles the catalog cannot produce.
///
/// `listing` holds one checklist title per line. A line is covered when its
/// trimmed, lowercased text equals some catalog `full_name` (compared the same
/// way). Blank lines are ignored; uncovered lines are returned trimmed and in
/// their original order.
pub fn uncovered(taxonomy: &Taxonomy, listing: &str) -> Vec<String> {
    let known: HashSet<String> = taxonomy
        .full_names()
        .map(|name| name.trim().to_lowercase())
        .collect();

    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !known.contains(&line.to_lowercase()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncovered_lines() {
        let taxonomy = Taxonomy::from_json(
            r#"{"technology_groups": [{"usage_names": ["nginx"], "technologies": [
                {"versions": [{"number": "1.18", "full_name": "NGINX 1.18"}]}]}]}"#,
        )
        .unwrap();

        let listing = "nginx 1.18\n\nApache Server 2.4 UNIX\n  Docker Enterprise 2.x Linux/UNIX  \n";
        assert_eq!(
            uncovered(&taxonomy, listing),
            vec!["Apache Server 2.4 UNIX", "Docker Enterprise 2.x Linux/UNIX"]
        );
    }
}
