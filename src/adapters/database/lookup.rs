//! Lookups by key with a lazily populated index cache
//!
//! The cache maps a key to a position in the backing collection. Positions stay valid as long
//! as records are only ever modified in place: inserting, removing or reordering records
//! requires [`IndexCache::clear`].
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct IndexCache {
    positions: HashMap<String, usize>,
}

impl IndexCache {
    pub fn get(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

/// Position of the first record whose key field equals `key`
///
/// A cached position is trusted as-is. On a miss the collection is scanned, and only a match is
/// remembered.
pub fn find<T, F>(key: &str, collection: &[T], cache: &mut IndexCache, key_field: F) -> Option<usize>
where
    F: Fn(&T) -> &str,
{
    if let Some(position) = cache.get(key) {
        return Some(position);
    }

    let position = collection
        .iter()
        .position(|record| key_field(record) == key)?;
    cache.positions.insert(key.to_string(), position);
    Some(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use speculoos::prelude::*;

    struct Record {
        name: &'static str,
        email: &'static str,
    }

    #[fixture]
    fn records() -> Vec<Record> {
        vec![
            Record {
                name: "Simply Lift",
                email: "john@simplylift.co",
            },
            Record {
                name: "Iron Temple",
                email: "admin@irontemple.com",
            },
            Record {
                name: "She Lifts",
                email: "kate@shelifts.co.uk",
            },
        ]
    }

    #[rstest]
    #[case("john@simplylift.co", Some(0))]
    #[case("admin@irontemple.com", Some(1))]
    #[case("unknown@email.co", None)]
    fn test_find_by_email(
        records: Vec<Record>,
        #[case] key: &str,
        #[case] expected: Option<usize>,
    ) {
        let mut cache = IndexCache::default();

        let res = find(key, &records, &mut cache, |record| record.email);

        assert_that!(res).is_equal_to(expected);
        // Only hits are remembered
        assert_that!(cache.get(key)).is_equal_to(expected);
    }

    #[rstest]
    fn test_find_uses_cached_position(records: Vec<Record>) {
        // GIVEN a cache pointing "Iron Temple" at the last record
        let mut cache = IndexCache::default();
        cache.positions.insert("Iron Temple".to_string(), 2);

        // WHEN looking it up
        let res = find("Iron Temple", &records, &mut cache, |record| record.name);

        // THEN the cached position wins over a scan
        assert_that!(res).is_equal_to(Some(2));
        assert_that!(cache.len()).is_equal_to(1);
    }

    #[rstest]
    fn test_find_miss_leaves_cache_untouched(records: Vec<Record>) {
        let mut cache = IndexCache::default();
        find("She Lifts", &records, &mut cache, |record| record.name);

        let res = find("Nobody", &records, &mut cache, |record| record.name);

        assert_that!(res).is_none();
        assert_that!(cache.len()).is_equal_to(1);
    }

    #[test]
    fn test_find_first_match_wins() {
        let records = vec![
            Record {
                name: "Twin",
                email: "first@twin.co",
            },
            Record {
                name: "Twin",
                email: "second@twin.co",
            },
        ];
        let mut cache = IndexCache::default();

        let res = find("Twin", &records, &mut cache, |record| record.name);

        assert_that!(res).is_equal_to(Some(0));
    }

    #[rstest]
    fn test_clear(records: Vec<Record>) {
        let mut cache = IndexCache::default();
        find("Simply Lift", &records, &mut cache, |record| record.name);
        assert_that!(cache.is_empty()).is_false();

        cache.clear();

        assert_that!(cache.is_empty()).is_true();
    }
}
