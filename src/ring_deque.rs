use std::{fmt, iter::FusedIterator};

use itertools::Itertools;

use crate::{
    error::Error,
    index::{is_valid_capacity, wrap_add, wrap_sub, MIN_CAPACITY},
};

/// Selects which end of a [`RingDeque`] an operation applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum End {
    Front,
    Back,
}

/// A double-ended queue stored in a power-of-two ring of slots.
///
/// The ring doubles when it becomes full and halves once occupancy drops to a quarter,
/// never going below 4 slots. Both keep insertion and removal at either end amortized O(1).
#[derive(Clone, Debug)]
pub struct RingDeque<T> {
    storage: Vec<Option<T>>,
    size: usize,
    /// Slot of the first element, `None` while empty.
    front: Option<usize>,
    /// Slot of the last element, `None` while empty.
    back: Option<usize>,
}

fn vacant_slots<T>(capacity: usize) -> Vec<Option<T>> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

impl<T> RingDeque<T> {
    /// Creates an empty deque with the minimum capacity of 4.
    pub fn new() -> Self {
        Self {
            storage: vacant_slots(MIN_CAPACITY),
            size: 0,
            front: None,
            back: None,
        }
    }

    /// Creates an empty deque with `capacity` slots.
    /// Fails unless `capacity` is a power of two of at least 4.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        if !is_valid_capacity(capacity) {
            return Err(Error::InvalidCapacity(capacity));
        }

        Ok(Self {
            storage: vacant_slots(capacity),
            size: 0,
            front: None,
            back: None,
        })
    }

    /// Creates a deque holding `data`, with the first element placed at slot `front` and
    /// the rest following it around the ring. Mostly useful for setting up a specific slot
    /// layout in tests.
    pub fn from_seed(data: Vec<T>, front: usize, capacity: usize) -> Result<Self, Error> {
        let mut deque = Self::with_capacity(capacity)?;
        if front >= capacity {
            return Err(Error::FrontOutOfRange { front, capacity });
        }
        // A full ring would have to grow before it could be seeded
        if data.len() >= capacity {
            return Err(Error::SeedOverflow {
                len: data.len(),
                capacity,
            });
        }
        if data.is_empty() {
            return Ok(deque);
        }

        deque.size = data.len();
        deque.front = Some(front);
        deque.back = Some(wrap_add(front, data.len() - 1, capacity));
        for (i, value) in data.into_iter().enumerate() {
            deque.storage[wrap_add(front, i, capacity)] = Some(value);
        }

        Ok(deque)
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The number of slots in the backing ring.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn front(&self) -> Option<&T> {
        self.front.and_then(|slot| self.storage[slot].as_ref())
    }

    pub fn back(&self) -> Option<&T> {
        self.back.and_then(|slot| self.storage[slot].as_ref())
    }

    /// Returns the element `index` positions from the front.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.size {
            return None;
        }
        let front = self.front?;
        self.storage[wrap_add(front, index, self.capacity())].as_ref()
    }

    /// Inserts `value` at the given end, doubling the ring if this fills it.
    pub fn enqueue(&mut self, value: T, end: End) {
        let capacity = self.capacity();
        let slot = match (self.front, self.back) {
            (Some(front), Some(back)) => match end {
                End::Front => {
                    let slot = wrap_sub(front, 1, capacity);
                    self.front = Some(slot);
                    slot
                }
                End::Back => {
                    let slot = wrap_add(back, 1, capacity);
                    self.back = Some(slot);
                    slot
                }
            },
            _ => {
                self.front = Some(0);
                self.back = Some(0);
                0
            }
        };

        debug_assert!(self.storage[slot].is_none());
        self.storage[slot] = Some(value);
        self.size += 1;

        if self.size == capacity {
            self.grow();
        }
    }

    /// Removes the element at the given end. Returns `None` if the deque is empty.
    /// Halves the ring once it is at most a quarter full, unless that would go below 4 slots.
    pub fn dequeue(&mut self, end: End) -> Option<T> {
        let (front, back) = self.front.zip(self.back)?;
        let capacity = self.capacity();

        let slot = match end {
            End::Front => {
                self.front = Some(wrap_add(front, 1, capacity));
                front
            }
            End::Back => {
                self.back = Some(wrap_sub(back, 1, capacity));
                back
            }
        };
        let value = self.storage[slot].take();
        debug_assert!(value.is_some());

        self.size -= 1;
        if self.size == 0 {
            self.front = None;
            self.back = None;
        }

        if self.size <= capacity / 4 && capacity / 2 >= MIN_CAPACITY {
            self.shrink();
        }

        value
    }

    pub fn push_front(&mut self, value: T) {
        self.enqueue(value, End::Front)
    }

    pub fn push_back(&mut self, value: T) {
        self.enqueue(value, End::Back)
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.dequeue(End::Front)
    }

    pub fn pop_back(&mut self) -> Option<T> {
        self.dequeue(End::Back)
    }

    /// Iterates from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            deque: self,
            head: 0,
            tail: self.size,
        }
    }

    fn grow(&mut self) {
        self.relocate(self.capacity() * 2);
    }

    fn shrink(&mut self) {
        let halved = self.capacity() / 2;
        if halved < MIN_CAPACITY {
            return;
        }
        self.relocate(halved);
    }

    /// Moves the elements, in order, into slots `0..size` of a new ring of `new_capacity` slots.
    fn relocate(&mut self, new_capacity: usize) {
        debug_assert!(is_valid_capacity(new_capacity));
        debug_assert!(self.size < new_capacity);

        let old_capacity = self.capacity();
        let mut storage = vacant_slots(new_capacity);
        if let Some(front) = self.front {
            for (i, slot) in storage.iter_mut().take(self.size).enumerate() {
                *slot = self.storage[wrap_add(front, i, old_capacity)].take();
            }
        }

        log::trace!(
            "Relocating {} elements from {} to {} slots",
            self.size,
            old_capacity,
            new_capacity
        );

        self.storage = storage;
        if self.size > 0 {
            self.front = Some(0);
            self.back = Some(self.size - 1);
        }
    }
}

impl<T> Default for RingDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for RingDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for RingDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<'a, T> IntoIterator for &'a RingDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lists every slot in storage order. The front slot is marked `(F)` and the back slot `(B)`;
/// vacant slots are shown as `_`.
impl<T: fmt::Display> fmt::Display for RingDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "RingDeque <empty>");
        }

        let mut slots = self.storage.iter().enumerate().map(|(i, slot)| {
            let value = match slot {
                Some(value) => value.to_string(),
                None => "_".into(),
            };
            if Some(i) == self.front {
                format!("{}(F)", value)
            } else if Some(i) == self.back {
                format!("{}(B)", value)
            } else {
                value
            }
        });

        write!(f, "RingDeque <{}>", slots.join(","))
    }
}

pub struct Iter<'a, T> {
    deque: &'a RingDeque<T>,
    /// Logical index of the next element from the front.
    head: usize,
    /// One past the logical index of the next element from the back.
    tail: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }
        let item = self.deque.get(self.head);
        self.head += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tail - self.head;
        (remaining, Some(remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        self.deque.get(self.tail)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}
