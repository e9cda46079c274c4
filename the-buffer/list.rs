//! Arena-backed doubly-linked node list.
//!
//! [`NodeList`] is the ordered container underneath the piece table. Nodes
//! live in a slotmap arena and are addressed by [`NodeId`] handles, so a
//! retained id stays valid (and correctly linked) while other nodes are
//! inserted or removed around it. Insertion and removal next to a known node
//! are O(1); range removal walks the `next` links.

use slotmap::{
  SlotMap,
  new_key_type,
};

new_key_type! {
  /// Stable handle to a node in a [`NodeList`].
  pub struct NodeId;
}

#[derive(Debug)]
struct Node<T> {
  value: T,
  prev:  Option<NodeId>,
  next:  Option<NodeId>,
}

#[derive(Debug)]
pub struct NodeList<T> {
  nodes: SlotMap<NodeId, Node<T>>,
  head:  Option<NodeId>,
  tail:  Option<NodeId>,
}

impl<T> Default for NodeList<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> NodeList<T> {
  pub fn new() -> Self {
    Self {
      nodes: SlotMap::with_key(),
      head:  None,
      tail:  None,
    }
  }

  /// A list holding a single node.
  pub fn with_value(value: T) -> Self {
    let mut list = Self::new();
    list.push_back(value);
    list
  }

  pub fn head(&self) -> Option<NodeId> {
    self.head
  }

  pub fn tail(&self) -> Option<NodeId> {
    self.tail
  }

  pub fn next(&self, id: NodeId) -> Option<NodeId> {
    self.nodes.get(id).and_then(|node| node.next)
  }

  pub fn prev(&self, id: NodeId) -> Option<NodeId> {
    self.nodes.get(id).and_then(|node| node.prev)
  }

  pub fn get(&self, id: NodeId) -> Option<&T> {
    self.nodes.get(id).map(|node| &node.value)
  }

  pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
    self.nodes.get_mut(id).map(|node| &mut node.value)
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Inserts `value` immediately after `pos`. With `pos == None` the new node
  /// becomes the head (before the current head, or as the sole element of an
  /// empty list). Returns the new node's id.
  pub fn insert_after(&mut self, pos: Option<NodeId>, value: T) -> NodeId {
    match pos {
      Some(pos) => {
        let next = self.nodes[pos].next;
        let id = self.nodes.insert(Node {
          value,
          prev: Some(pos),
          next,
        });
        self.nodes[pos].next = Some(id);
        match next {
          Some(next) => self.nodes[next].prev = Some(id),
          None => self.tail = Some(id),
        }
        id
      },
      None => {
        let head = self.head;
        let id = self.nodes.insert(Node {
          value,
          prev: None,
          next: head,
        });
        match head {
          Some(head) => self.nodes[head].prev = Some(id),
          None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
      },
    }
  }

  /// Appends at the tail.
  pub fn push_back(&mut self, value: T) -> NodeId {
    let tail = self.tail;
    self.insert_after(tail, value)
  }

  /// Splices the node out of the list and returns its value.
  pub fn remove(&mut self, id: NodeId) -> Option<T> {
    let node = self.nodes.remove(id)?;
    match node.prev {
      Some(prev) => self.nodes[prev].next = node.next,
      None => self.head = node.next,
    }
    match node.next {
      Some(next) => self.nodes[next].prev = node.prev,
      None => self.tail = node.prev,
    }
    Some(node.value)
  }

  /// Removes the inclusive run of nodes from `start` to `end`, walking
  /// forward via `next`. Either bound may be `None`, meaning the list
  /// boundary on that side. The caller must guarantee that `start` precedes
  /// or equals `end` in list order.
  pub fn remove_range(&mut self, start: Option<NodeId>, end: Option<NodeId>) {
    let mut cur = start.or(self.head);
    let end = end.or(self.tail);

    while let Some(id) = cur {
      let next = self.next(id);
      self.remove(id);
      if Some(id) == end {
        break;
      }
      cur = next;
    }
  }

  /// Values in list order, front to back.
  pub fn iter(&self) -> Iter<'_, T> {
    Iter {
      list: self,
      cur:  self.head,
    }
  }

  /// Snapshot copy of the values in order, for diagnostics and tests.
  pub fn to_vec(&self) -> Vec<T>
  where
    T: Clone,
  {
    self.iter().cloned().collect()
  }
}

impl<T> std::ops::Index<NodeId> for NodeList<T> {
  type Output = T;

  fn index(&self, id: NodeId) -> &T {
    &self.nodes[id].value
  }
}

impl<T> std::ops::IndexMut<NodeId> for NodeList<T> {
  fn index_mut(&mut self, id: NodeId) -> &mut T {
    &mut self.nodes[id].value
  }
}

pub struct Iter<'a, T> {
  list: &'a NodeList<T>,
  cur:  Option<NodeId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
  type Item = &'a T;

  fn next(&mut self) -> Option<&'a T> {
    let id = self.cur?;
    self.cur = self.list.next(id);
    Some(&self.list[id])
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn from_array<T: Copy>(values: &[T]) -> NodeList<T> {
    let mut list = NodeList::new();
    for &value in values {
      list.push_back(value);
    }
    list
  }

  #[test]
  fn push_and_get_back() {
    let mut list = NodeList::with_value(5);
    list.push_back(6);
    list.push_back(7);
    list.push_back(8);

    assert_eq!(list.to_vec(), vec![5, 6, 7, 8]);
  }

  #[test]
  fn insert_after() {
    let mut list = from_array(&[1, 2, 3, 4, 5]);
    let second = list.head().and_then(|head| list.next(head));
    list.insert_after(second, 99);
    assert_eq!(list.to_vec(), vec![1, 2, 99, 3, 4, 5]);
  }

  #[test]
  fn insert_after_none_prepends() {
    let mut list = from_array(&[1, 2, 3, 4, 5]);
    list.insert_after(None, 55);
    assert_eq!(list.to_vec(), vec![55, 1, 2, 3, 4, 5]);
  }

  #[test]
  fn insert_after_none_in_empty_list() {
    let mut list = NodeList::new();
    let id = list.insert_after(None, 55);
    assert_eq!(list.to_vec(), vec![55]);
    assert_eq!(list.head(), Some(id));
    assert_eq!(list.tail(), Some(id));
  }

  #[test]
  fn insert_after_tail() {
    let mut list = from_array(&[1, 2, 3]);
    let tail = list.tail();
    list.insert_after(tail, 100);
    assert_eq!(list.to_vec(), vec![1, 2, 3, 100]);
    assert_eq!(list.tail().map(|id| list[id]), Some(100));
  }

  #[test]
  fn remove_head() {
    let mut list = from_array(&[1, 2, 3]);
    let head = list.head().unwrap();
    assert_eq!(list.remove(head), Some(1));
    assert_eq!(list.to_vec(), vec![2, 3]);
  }

  #[test]
  fn remove_tail() {
    let mut list = from_array(&[1, 2, 3]);
    let tail = list.tail().unwrap();
    assert_eq!(list.remove(tail), Some(3));
    assert_eq!(list.to_vec(), vec![1, 2]);
    assert_eq!(list.tail().map(|id| list[id]), Some(2));
  }

  #[test]
  fn remove_middle() {
    let mut list = from_array(&[5, 6, 7]);
    let middle = list.head().and_then(|head| list.next(head)).unwrap();
    list.remove(middle);
    assert_eq!(list.to_vec(), vec![5, 7]);

    // The survivors are linked to each other.
    let head = list.head().unwrap();
    assert_eq!(list.next(head), list.tail());
    assert_eq!(list.prev(list.tail().unwrap()), Some(head));
  }

  #[test]
  fn remove_range_inner() {
    let mut list = from_array(&[5, 6, 7, 8, 9, 10, 11, 12]);
    let start = list.head().and_then(|head| list.next(head));
    let end = list.tail().and_then(|tail| list.prev(tail));

    list.remove_range(start, end);

    assert_eq!(list.to_vec(), vec![5, 12]);
  }

  #[test]
  fn remove_range_defaults_to_whole_list() {
    let mut list = from_array(&[1, 2, 3]);
    list.remove_range(None, None);
    assert!(list.is_empty());
    assert_eq!(list.head(), None);
    assert_eq!(list.tail(), None);
  }

  #[test]
  fn retained_id_survives_surrounding_churn() {
    let mut list = from_array(&[1, 2, 3]);
    let middle = list.head().and_then(|head| list.next(head)).unwrap();

    let head = list.head().unwrap();
    list.remove(head);
    list.push_back(4);
    list.insert_after(Some(middle), 9);

    assert_eq!(list[middle], 2);
    assert_eq!(list.to_vec(), vec![2, 9, 3, 4]);
  }
}
