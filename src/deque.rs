//! A circular doubly linked deque anchored at a sentinel.
//!
//! Links are slots in a `Vec` addressed by index rather than pointers. Slot 0 is the sentinel: it
//! never holds an item, its `next` is the head and its `prev` is the tail, and an empty deque is
//! the sentinel linked to itself.
//!
//! A removed link is never spliced back into the ring, but its slot goes on a free list and a
//! later insert overwrites the whole link. Nothing outside the deque ever holds a slot index.

use std::fmt;

use crate::errors::*;

const SENTINEL: usize = 0;

#[derive(Debug, Clone)]
struct Link<T> {
    prev: usize,
    next: usize,
    item: Option<T>,
}

#[derive(Clone)]
pub struct Deque<T> {
    links: Vec<Link<T>>,
    free: Vec<usize>,
}

impl<T> Default for Deque<T> {
    fn default() -> Deque<T> {
        Deque::new()
    }
}

impl<T> Deque<T> {
    pub fn new() -> Deque<T> {
        Deque {
            links: vec![Link { prev: SENTINEL, next: SENTINEL, item: None }],
            free: vec![],
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links[SENTINEL].next == SENTINEL
    }

    /// Number of items, found by walking the ring once. The sentinel is not counted.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn push_front(&mut self, item: T) {
        self.insert_after(SENTINEL, item);
    }

    pub fn push_back(&mut self, item: T) {
        let tail = self.links[SENTINEL].prev;
        self.insert_after(tail, item);
    }

    /// Take the head item. Fails with `EmptyCollection` if there is none.
    pub fn pop_front(&mut self) -> Result<T> {
        let head = self.links[SENTINEL].next;
        if head == SENTINEL {
            return Err(ErrorKind::EmptyCollection.into());
        }

        let (prev, next) = (self.links[head].prev, self.links[head].next);
        self.links[prev].next = next;
        self.links[next].prev = prev;
        self.free.push(head);

        self.links[head].item.take().ok_or_else(|| ErrorKind::EmptyCollection.into())
    }

    pub fn front(&self) -> Option<&T> {
        self.links[self.links[SENTINEL].next].item.as_ref()
    }

    /// Items from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { deque: self, at: self.links[SENTINEL].next }
    }

    fn insert_after(&mut self, anchor: usize, item: T) {
        let next = self.links[anchor].next;
        let link = Link { prev: anchor, next, item: Some(item) };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.links[slot] = link;
                slot
            }
            None => {
                self.links.push(link);
                self.links.len() - 1
            }
        };
        self.links[next].prev = slot;
        self.links[anchor].next = slot;
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

pub struct Iter<'a, T> {
    deque: &'a Deque<T>,
    at: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.at == SENTINEL {
            return None;
        }
        let link = &self.deque.links[self.at];
        self.at = link.next;
        link.item.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, Arbitrary, Gen};
    use std::collections::VecDeque;

    use super::*;

    // Walk the ring once, every next link must be mirrored by a prev link.
    fn assert_ring_consistent<T>(d: &Deque<T>) {
        let mut at = SENTINEL;
        let mut steps = 0;
        loop {
            let next = d.links[at].next;
            assert_eq!(d.links[next].prev, at, "next.prev of slot {} does not point back", at);
            at = next;
            steps += 1;
            if at == SENTINEL {
                break;
            }
            assert!(d.links[at].item.is_some());
            assert!(steps <= d.links.len(), "ring does not return to the sentinel");
        }
        assert_eq!(steps, d.len() + 1);
    }

    #[test]
    fn new_deque_is_empty() {
        let d = Deque::<u32>::new();
        assert!(d.is_empty());
        assert_eq!(d.len(), 0);
        assert_eq!(d.front(), None);
        assert_ring_consistent(&d);
    }

    #[test]
    fn pop_from_empty_fails() {
        let mut d = Deque::<u32>::new();
        match d.pop_front() {
            Err(Error(ErrorKind::EmptyCollection, _)) => {}
            other => panic!("unexpected pop result {:?}", other),
        }
        d.push_back(1);
        assert_eq!(d.pop_front().unwrap(), 1);
        assert!(d.pop_front().is_err());
        assert_ring_consistent(&d);
    }

    #[test]
    fn push_both_ends() {
        let mut d = Deque::new();
        d.push_back(2);
        d.push_front(1);
        d.push_back(3);
        d.push_front(0);
        assert_eq!(d.iter().cloned().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(d.len(), 4);
        assert_eq!(d.front(), Some(&0));
        assert_ring_consistent(&d);
        assert_eq!(format!("{:?}", d), "[0, 1, 2, 3]");
    }

    #[test]
    fn removed_slots_are_reused() {
        let mut d = Deque::new();
        for i in 0..4 {
            d.push_back(i);
        }
        for _ in 0..3 {
            let _ = d.pop_front().unwrap();
        }
        for i in 4..7 {
            d.push_front(i);
        }
        // sentinel + 4 slots, nothing new allocated
        assert_eq!(d.links.len(), 5);
        assert_eq!(d.iter().cloned().collect::<Vec<_>>(), vec![6, 5, 4, 3]);
        assert_ring_consistent(&d);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Front(u8),
        Back(u8),
        Pop,
    }

    impl Arbitrary for Op {
        fn arbitrary(g: &mut Gen) -> Op {
            match u8::arbitrary(g) % 3 {
                0 => Op::Front(u8::arbitrary(g)),
                1 => Op::Back(u8::arbitrary(g)),
                _ => Op::Pop,
            }
        }
    }

    #[test]
    fn matches_std_vecdeque() {
        fn p(ops: Vec<Op>) -> bool {
            let mut d = Deque::new();
            let mut model = VecDeque::new();
            for op in ops {
                match op {
                    Op::Front(v) => {
                        d.push_front(v);
                        model.push_front(v);
                    }
                    Op::Back(v) => {
                        d.push_back(v);
                        model.push_back(v);
                    }
                    Op::Pop => {
                        if d.pop_front().ok() != model.pop_front() {
                            return false;
                        }
                    }
                }
            }
            assert_ring_consistent(&d);
            d.len() == model.len() && d.iter().eq(model.iter())
        }
        quickcheck(p as fn(Vec<Op>) -> bool)
    }
}
