use std::fmt::Debug;

use crate::deque::Deque;
use crate::errors::*;

/// The pending items of a search. The adapters only differ in where `add` puts an item,
/// `remove` always takes from the head of the underlying deque.
pub trait Worklist<T>: Debug {
    fn add(&mut self, item: T);

    /// Take the next item. Fails with `EmptyCollection` when nothing is pending.
    fn remove(&mut self) -> Result<T>;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;
}

/// Last in, first out: items are added at the head.
#[derive(Debug, Clone, Default)]
pub struct Stack<T> {
    contents: Deque<T>,
}

/// First in, first out: items are added at the tail.
#[derive(Debug, Clone, Default)]
pub struct Queue<T> {
    contents: Deque<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Stack<T> {
        Stack { contents: Deque::new() }
    }
}

impl<T> Queue<T> {
    pub fn new() -> Queue<T> {
        Queue { contents: Deque::new() }
    }
}

impl<T: Debug> Worklist<T> for Stack<T> {
    #[inline]
    fn add(&mut self, item: T) {
        self.contents.push_front(item);
    }

    #[inline]
    fn remove(&mut self) -> Result<T> {
        self.contents.pop_front()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    fn len(&self) -> usize {
        self.contents.len()
    }
}

impl<T: Debug> Worklist<T> for Queue<T> {
    #[inline]
    fn add(&mut self, item: T) {
        self.contents.push_back(item);
    }

    #[inline]
    fn remove(&mut self) -> Result<T> {
        self.contents.pop_front()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    fn len(&self) -> usize {
        self.contents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<W: Worklist<u32>>(mut worklist: W) -> Vec<u32> {
        let mut out = vec![];
        while !worklist.is_empty() {
            out.push(worklist.remove().unwrap());
        }
        out
    }

    fn filled<W: Worklist<u32>>(mut worklist: W, items: &[u32]) -> W {
        for &item in items {
            worklist.add(item);
        }
        worklist
    }

    #[test]
    fn queue_is_fifo() {
        let q = filled(Queue::new(), &[1, 2, 3]);
        assert_eq!(q.len(), 3);
        assert_eq!(drain(q), vec![1, 2, 3]);
    }

    #[test]
    fn stack_is_lifo() {
        let s = filled(Stack::new(), &[1, 2, 3]);
        assert_eq!(s.len(), 3);
        assert_eq!(drain(s), vec![3, 2, 1]);
    }

    #[test]
    fn interleaved_adds_and_removes() {
        fn exercise(w: &mut dyn Worklist<u32>) {
            w.add(1);
            w.add(2);
            let _ = w.remove().unwrap();
            w.add(3);
        }
        let mut q = Queue::new();
        let mut s = Stack::new();
        exercise(&mut q);
        exercise(&mut s);
        assert_eq!(drain(q), vec![2, 3]);
        assert_eq!(drain(s), vec![3, 1]);
    }

    #[test]
    fn removing_from_empty_worklists_fails() {
        let mut q = Queue::<u32>::new();
        let mut s = Stack::<u32>::new();
        assert!(q.is_empty() && s.is_empty());
        assert!(q.remove().is_err());
        assert!(s.remove().is_err());
    }
}
