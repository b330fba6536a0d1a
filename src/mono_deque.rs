/// A queue of indices into a value slice, kept so that the indexed values never increase
/// from front to back. The front is therefore always the index of the largest value seen
/// since the last expiry.
///
/// Indices are only ever appended, so the buffer grows at the back and a head cursor marks
/// the logical front.
#[derive(Clone, Debug, Default)]
pub struct MonoDeque {
    buf: Vec<usize>,
    head: usize,
}

impl MonoDeque {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
            head: 0,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.head == self.buf.len()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buf.len() - self.head
    }

    #[inline(always)]
    pub fn front(&self) -> Option<usize> {
        self.buf.get(self.head).copied()
    }

    /// Drops indices from the front that are older than `oldest_allowed`.
    #[inline(always)]
    pub fn expire(&mut self, oldest_allowed: usize) {
        while matches!(self.front(), Some(idx) if idx < oldest_allowed) {
            self.head += 1;
        }
    }

    /// Appends `idx`, first dropping every index at the back whose value is not greater than
    /// `values[idx]`.
    #[inline(always)]
    pub fn push_max<N: PartialOrd>(&mut self, idx: usize, values: &[N]) {
        while self.buf.len() > self.head {
            let last = self.buf[self.buf.len() - 1];
            if values[idx] >= values[last] {
                self.buf.pop();
            } else {
                break;
            }
        }
        self.buf.push(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_sliding_window_maximum() {
        let values = [1, 3, -1, -3, 5, 3, 6, 7];
        let window = 3;
        let mut deque = MonoDeque::with_capacity(values.len());
        let mut maxima = Vec::new();

        for idx in 0..values.len() {
            deque.expire((idx + 1).saturating_sub(window));
            deque.push_max(idx, &values);
            if idx + 1 >= window {
                maxima.push(values[deque.front().unwrap()]);
            }
        }

        assert_eq!(maxima, vec![3, 3, 5, 5, 6, 7]);
    }

    #[test]
    fn equal_values_keep_the_newest_index() {
        let values = [4, 4, 4];
        let mut deque = MonoDeque::default();
        for idx in 0..values.len() {
            deque.push_max(idx, &values);
        }
        assert_eq!(deque.len(), 1);
        assert_eq!(deque.front(), Some(2));
    }

    #[test]
    fn expire_empties_the_queue() {
        let values = [3.0, 2.0, 1.0];
        let mut deque = MonoDeque::default();
        for idx in 0..values.len() {
            deque.push_max(idx, &values);
        }
        assert_eq!(deque.len(), 3);

        deque.expire(2);
        assert_eq!(deque.front(), Some(2));
        deque.expire(3);
        assert!(deque.is_empty());
        assert_eq!(deque.front(), None);
    }
}
