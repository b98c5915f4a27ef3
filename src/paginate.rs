use std::num::NonZeroUsize;

#[derive(Clone, Debug)]
pub struct Paginator<T> {
    sequence: Vec<T>,
    page_size: NonZeroUsize,
    start_index: usize,
}

impl<T> Paginator<T> {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self::with_sequence(Vec::new(), page_size)
    }

    pub fn with_sequence(sequence: Vec<T>, page_size: NonZeroUsize) -> Self {
        Self {
            sequence,
            page_size,
            start_index: 0,
        }
    }

    pub fn set_sequence(&mut self, sequence: Vec<T>) {
        self.sequence = sequence;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.start_index = 0;
    }

    pub fn next(&mut self) {
        self.start_index = (self.start_index + self.page_size.get()).min(self.last_page_start());
    }

    pub fn previous(&mut self) {
        self.start_index = self.start_index.saturating_sub(self.page_size.get());
    }

    pub fn current_window(&self) -> &[T] {
        let start = self.start_index.min(self.sequence.len());
        let end = (start + self.page_size.get()).min(self.sequence.len());
        &self.sequence[start..end]
    }

    pub fn sequence(&self) -> &[T] {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// `ceil(len / page_size)`, and 1 for an empty sequence.
    pub fn page_count(&self) -> usize {
        self.sequence.len().div_ceil(self.page_size.get()).max(1)
    }

    pub fn current_page(&self) -> usize {
        self.start_index / self.page_size.get() + 1
    }

    pub fn page_label(&self) -> String {
        format!("{} / {}", self.current_page(), self.page_count())
    }

    pub fn has_next(&self) -> bool {
        self.start_index < self.last_page_start()
    }

    pub fn has_previous(&self) -> bool {
        self.start_index > 0
    }

    // floor((len - 1) / page_size) * page_size, or 0 when empty.
    fn last_page_start(&self) -> usize {
        let page_size = self.page_size.get();
        (self.sequence.len().saturating_sub(1) / page_size) * page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator(len: usize, page_size: usize) -> Paginator<usize> {
        Paginator::with_sequence((0..len).collect(), NonZeroUsize::new(page_size).unwrap())
    }

    #[test]
    fn walks_to_last_partial_page_and_stops() {
        let mut pages = paginator(25, 10);
        assert_eq!(pages.page_label(), "1 / 3");

        pages.next();
        assert_eq!(pages.page_label(), "2 / 3");

        pages.next();
        assert_eq!(pages.page_label(), "3 / 3");
        assert_eq!(pages.start_index(), 20);
        assert_eq!(pages.current_window(), [20, 21, 22, 23, 24]);
        assert!(!pages.has_next());

        pages.next();
        assert_eq!(pages.start_index(), 20);
    }

    #[test]
    fn previous_stops_at_zero() {
        let mut pages = paginator(25, 10);
        pages.next();
        pages.previous();
        pages.previous();
        assert_eq!(pages.start_index(), 0);
        assert!(!pages.has_previous());
    }

    #[test]
    fn empty_sequence_is_page_one_of_one() {
        let mut pages = paginator(0, 10);
        pages.next();
        assert_eq!(pages.page_label(), "1 / 1");
        assert!(pages.current_window().is_empty());
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_page() {
        let mut pages = paginator(20, 10);
        pages.next();
        pages.next();
        assert_eq!(pages.start_index(), 10);
        assert_eq!(pages.page_count(), 2);
    }

    #[test]
    fn new_sequence_resets_window() {
        let mut pages = paginator(25, 10);
        pages.next();
        pages.next();

        pages.set_sequence((0..3).collect());
        assert_eq!(pages.start_index(), 0);
        assert_eq!(pages.current_window(), [0, 1, 2]);
    }
}
