/// Shallow merge of option-carrying structures.
///
/// Every *set* field of the source is copied over the destination, so later
/// sources win over earlier ones and over the destination's pre-existing
/// values. The merge is shallow on purpose: a set field replaces the
/// destination field wholesale, and nested collections are never merged
/// element-wise. Callers rely on replace-not-merge, so this must not be
/// turned into a deep merge.
pub trait Merge {
    /// Copy every set field of `src` over `self`.
    ///
    /// A `None` source is skipped silently. This never fails.
    fn merge(&mut self, src: Option<&Self>);

    /// Merge multiple sources left to right, later sources winning.
    fn merge_all<'a, I>(&mut self, sources: I)
    where
        I: IntoIterator<Item = Option<&'a Self>>,
        Self: 'a,
    {
        for src in sources {
            self.merge(src);
        }
    }
}

#[cfg(test)]
mod ut {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Opts {
        name: Option<String>,
        count: Option<usize>,
        tags: Option<Vec<String>>,
    }

    impl Merge for Opts {
        fn merge(&mut self, src: Option<&Self>) {
            let src = match src {
                Some(src) => src,
                None => return,
            };
            if src.name.is_some() {
                self.name = src.name.clone();
            }
            if src.count.is_some() {
                self.count = src.count;
            }
            if src.tags.is_some() {
                self.tags = src.tags.clone();
            }
        }
    }

    #[test]
    fn test_none_source_skipped() {
        let mut dest = Opts {
            name: Some("a".to_string()),
            ..Default::default()
        };
        dest.merge(None);
        assert_eq!(dest.name, Some("a".to_string()));
    }

    #[test]
    fn test_set_fields_overwrite() {
        let mut dest = Opts {
            name: Some("a".to_string()),
            count: Some(1),
            ..Default::default()
        };
        let src = Opts {
            name: Some("b".to_string()),
            ..Default::default()
        };
        dest.merge(Some(&src));
        assert_eq!(dest.name, Some("b".to_string()));
        assert_eq!(dest.count, Some(1));
    }

    #[test]
    fn test_later_sources_win() {
        let mut dest = Opts::default();
        let first = Opts {
            count: Some(1),
            ..Default::default()
        };
        let second = Opts {
            count: Some(2),
            ..Default::default()
        };
        dest.merge_all([Some(&first), None, Some(&second)]);
        assert_eq!(dest.count, Some(2));
    }

    #[test]
    fn test_collections_replaced_wholesale() {
        let mut dest = Opts {
            tags: Some(vec!["x".to_string(), "y".to_string()]),
            ..Default::default()
        };
        let src = Opts {
            tags: Some(vec!["z".to_string()]),
            ..Default::default()
        };
        dest.merge(Some(&src));
        // not element-wise: the whole list is replaced
        assert_eq!(dest.tags, Some(vec!["z".to_string()]));
    }
}
