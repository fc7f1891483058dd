use std::fmt;

/// A contiguous run of items from a result list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T> {
    items: &'a [T],
}

impl<'a, T> Page<'a, T> {
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: fmt::Display> fmt::Display for Page<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.items {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Split `items` into pages of at most `page_size` items. The last page may
/// be shorter; a page size of zero yields no pages.
pub fn paginate<T>(items: &[T], page_size: usize) -> Vec<Page<'_, T>> {
    if page_size == 0 {
        return Vec::new();
    }
    items.chunks(page_size).map(|items| Page { items }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ScoredDocument;

    #[test]
    fn last_page_holds_remainder() {
        let items = [1, 2, 3, 4, 5];
        let pages = paginate(&items, 2);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].items(), &[1, 2]);
        assert_eq!(pages[2].items(), &[5]);
        assert!(paginate(&items, 0).is_empty());
        assert!(paginate::<i32>(&[], 3).is_empty());
    }

    #[test]
    fn page_displays_items_back_to_back() {
        let docs = [ScoredDocument::new(1, 0.5, 2), ScoredDocument::new(3, 0.25, 1)];
        let pages = paginate(&docs, 5);
        assert_eq!(
            pages[0].to_string(),
            "{ document_id = 1, relevance = 0.5, rating = 2 }{ document_id = 3, relevance = 0.25, rating = 1 }"
        );
    }
}
