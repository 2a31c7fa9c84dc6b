use crate::models::CommunityRecord;

/// Records whose name or location contains `query`, ignoring case, in their
/// original order. An empty query keeps everything. Whitespace is matched
/// literally, so `" "` only keeps records with a space in name or location.
pub fn filter<'a>(records: &'a [CommunityRecord], query: &str) -> Vec<&'a CommunityRecord> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records.iter().filter(|r| r.matches(&needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed_communities;

    fn record(name: &str, location: &str) -> CommunityRecord {
        CommunityRecord {
            name: name.to_string(),
            location: location.to_string(),
            description: String::new(),
            offers: vec![],
            needs: vec![],
        }
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let records = seed_communities();
        let out = filter(&records, "");
        assert_eq!(out.len(), records.len());
        assert!(out.iter().zip(records.iter()).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn oregon_finds_green_meadows() {
        let records = seed_communities();
        let out = filter(&records, "oregon");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Green Meadows Collective");
    }

    #[test]
    fn matches_name_or_location_case_insensitively() {
        let records = vec![
            record("Hill Farm", "Wales"),
            record("Coastal Co-op", "Hilo, Hawaii"),
            record("Valley Guild", "Texas"),
        ];
        let names: Vec<&str> = filter(&records, "HIL").iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Hill Farm", "Coastal Co-op"]);
    }

    #[test]
    fn description_is_not_searched() {
        let records = seed_communities();
        assert!(filter(&records, "permaculture community").is_empty());
    }

    #[test]
    fn whitespace_query_is_literal() {
        let records = vec![record("Solo", "Nowhere"), record("Two Words", "Here")];
        let out = filter(&records, " ");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Two Words");
    }

    #[test]
    fn result_is_exactly_the_matching_subsequence() {
        let records = vec![
            record("Alpha", "North"),
            record("Beta", "Northeast"),
            record("Gamma", "South"),
            record("north star", "Sea"),
        ];
        for query in ["north", "a", "th", "zzz", "S"] {
            let out = filter(&records, query);
            let needle = query.to_lowercase();
            let expected: Vec<&CommunityRecord> = records
                .iter()
                .filter(|r| r.name.to_lowercase().contains(&needle) || r.location.to_lowercase().contains(&needle))
                .collect();
            assert_eq!(out, expected, "query {:?}", query);
        }
    }
}
